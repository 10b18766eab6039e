use log::{info, warn};

use chordseek_shared::{DeliveryMode, PeerId, RelayMessage};

use super::{PacketReceiver, PacketSender, RecvError, SendError};

/// Result of a send that did not fail outright
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SendStatus {
    /// Handed to the transport for at least one connected peer
    Sent,
    /// No addressed peer was connected, so nothing was sent. Nothing is
    /// queued: callers re-send on the next join if the data still matters.
    Dropped,
}

/// Wraps the transport with the two delivery contracts the core relies on.
pub struct RelayChannel {
    sender: Box<dyn PacketSender>,
    receiver: Box<dyn PacketReceiver>,
}

impl RelayChannel {
    pub fn new(sender: Box<dyn PacketSender>, receiver: Box<dyn PacketReceiver>) -> Self {
        Self { sender, receiver }
    }

    pub fn connected_peers(&self) -> Vec<PeerId> {
        self.sender.connected_peers()
    }

    pub fn connected_peer_count(&self) -> usize {
        self.sender.connected_peers().len()
    }

    /// Delivered to every connected recipient, or that recipient is dropped
    /// by the transport
    pub fn send_reliable(
        &self,
        bytes: &[u8],
        to_peers: &[PeerId],
    ) -> Result<SendStatus, SendError> {
        self.send(bytes, to_peers, DeliveryMode::Reliable)
    }

    /// May be lost under congestion. Callers must tolerate the loss.
    pub fn send_best_effort(
        &self,
        bytes: &[u8],
        to_peers: &[PeerId],
    ) -> Result<SendStatus, SendError> {
        self.send(bytes, to_peers, DeliveryMode::BestEffort)
    }

    /// Frames `message` and routes it over the contract it asks for
    pub fn send_message(
        &self,
        message: &RelayMessage,
        to_peers: &[PeerId],
    ) -> Result<SendStatus, SendError> {
        let bytes = message.to_bytes();
        match message.delivery_mode() {
            DeliveryMode::Reliable => self.send_reliable(&bytes, to_peers),
            DeliveryMode::BestEffort => self.send_best_effort(&bytes, to_peers),
        }
    }

    /// Drains every frame the transport has waiting, handing each to
    /// `on_receive` in delivery order. Returns how many frames were read.
    pub fn receive<F: FnMut(PeerId, &[u8])>(
        &mut self,
        mut on_receive: F,
    ) -> Result<usize, RecvError> {
        let mut count = 0;
        loop {
            match self.receiver.receive()? {
                Some((peer, payload)) => {
                    on_receive(peer, payload);
                    count += 1;
                }
                None => {
                    // No more frames, break loop
                    break;
                }
            }
        }
        Ok(count)
    }

    fn send(
        &self,
        bytes: &[u8],
        to_peers: &[PeerId],
        mode: DeliveryMode,
    ) -> Result<SendStatus, SendError> {
        let connected = self.sender.connected_peers();
        let recipients: Vec<PeerId> = to_peers
            .iter()
            .filter(|peer| connected.contains(peer))
            .copied()
            .collect();

        if recipients.is_empty() {
            info!(
                "dropping {:?} frame of {} bytes: no connected recipients",
                mode,
                bytes.len()
            );
            return Ok(SendStatus::Dropped);
        }
        if recipients.len() < to_peers.len() {
            warn!(
                "{} addressed peer(s) are no longer connected, sending to the remaining {}",
                to_peers.len() - recipients.len(),
                recipients.len()
            );
        }

        self.sender.send(&recipients, bytes, mode)?;
        Ok(SendStatus::Sent)
    }
}
