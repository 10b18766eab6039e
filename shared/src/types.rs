use std::fmt;

// PeerId

/// Transport-assigned handle for a connected participant. Stable for the
/// lifetime of one connection, never minted by the core.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct PeerId(u64);

impl PeerId {
    pub fn to_u64(&self) -> u64 {
        self.0
    }

    pub fn from_u64(value: u64) -> Self {
        PeerId(value)
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer#{}", self.0)
    }
}

// SessionId

/// Logical identity of a participant's contribution to the shared map.
/// A single peer may present several of these over its lifetime
/// (e.g. after an app relaunch).
#[derive(PartialEq, Eq, Hash, Clone, Debug, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub fn new<S: Into<String>>(value: S) -> Self {
        SessionId(value.into())
    }

    /// Generates a fresh random identifier in the 8-4-4-4-12 hex layout.
    pub fn generate() -> Self {
        let high = fastrand::u64(..);
        let low = fastrand::u64(..);
        SessionId(format!(
            "{:08X}-{:04X}-{:04X}-{:04X}-{:012X}",
            high >> 32,
            (high >> 16) & 0xFFFF,
            high & 0xFFFF,
            low >> 48,
            low & 0xFFFF_FFFF_FFFF,
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        SessionId::new(value)
    }
}

// AnchorId

/// Identifies one anchor in the shared map.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct AnchorId(u64);

impl AnchorId {
    pub fn generate() -> Self {
        AnchorId(fastrand::u64(..))
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }

    pub fn from_u64(value: u64) -> Self {
        AnchorId(value)
    }
}
