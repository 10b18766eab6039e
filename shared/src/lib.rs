//! # Chordseek Shared
//! Common functionality shared between every participant of a chordseek
//! session: identifiers, anchors, the chord catalog and the relay wire format.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod catalog;
mod messages;
mod spatial;
mod types;

pub use catalog::{Chord, ObjectCatalog};
pub use messages::{
    error::WireError,
    relay_message::{DeliveryMode, RelayMessage},
    wire::{SESSION_ID_PREFIX, TAG_IDENTITY_ANNOUNCEMENT, TAG_SYNC_PAYLOAD},
};
pub use spatial::{Anchor, Position, Transform};
pub use types::{AnchorId, PeerId, SessionId};
