use crate::SessionId;

/// How a frame must be delivered by the transport.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Eventually delivered to every connected recipient, or the recipient is
    /// considered disconnected
    Reliable,
    /// May be silently dropped under congestion
    BestEffort,
}

/// Everything peers say to each other through the relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayMessage {
    /// Opaque map synchronization data, handed verbatim to the spatial map.
    /// Losing a non-critical payload only slows convergence.
    SyncPayload { bytes: Vec<u8>, critical: bool },
    /// "This is the session id my anchors are tagged with."
    IdentityAnnouncement(SessionId),
}

impl RelayMessage {
    pub fn sync(bytes: Vec<u8>, critical: bool) -> Self {
        RelayMessage::SyncPayload { bytes, critical }
    }

    pub fn announcement(session_id: SessionId) -> Self {
        RelayMessage::IdentityAnnouncement(session_id)
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        match self {
            RelayMessage::SyncPayload { critical: true, .. } => DeliveryMode::Reliable,
            RelayMessage::SyncPayload { critical: false, .. } => DeliveryMode::BestEffort,
            RelayMessage::IdentityAnnouncement(_) => DeliveryMode::Reliable,
        }
    }
}
