pub(crate) mod peer_events;

pub use peer_events::*;
