use thiserror::Error;

use chordseek_shared::{DeliveryMode, PeerId};

mod relay_channel;
pub use relay_channel::{RelayChannel, SendStatus};

/// Error returned by a transport that could not hand a frame off
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Transport refused to send a frame")]
pub struct SendError;

/// Error returned by a transport whose receive side has failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Transport receive side failed")]
pub struct RecvError;

/// Outgoing half of the peer-to-peer transport.
///
/// Advertising, the discovery handshake and byte delivery all live behind
/// this trait.
pub trait PacketSender: Send + Sync {
    /// Hand a frame to the transport for the given peers
    fn send(&self, peers: &[PeerId], payload: &[u8], mode: DeliveryMode)
        -> Result<(), SendError>;
    /// Peers whose connection the transport has finalized
    fn connected_peers(&self) -> Vec<PeerId>;
}

/// Incoming half of the peer-to-peer transport
pub trait PacketReceiver: Send + Sync {
    /// Receives the next frame, or `None` when nothing is waiting
    fn receive(&mut self) -> Result<Option<(PeerId, &[u8])>, RecvError>;
}
