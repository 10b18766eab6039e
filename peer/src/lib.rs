//! # Chordseek Peer
//! Serverless coordination for a small group of peers sharing one live
//! spatial map. Tracks which logical session each connected peer currently
//! presents, which anchors each session created, who may join, and which
//! side of the hide-and-seek game the local participant is playing.
//!
//! All state lives in a single [`Coordinator`]. The host serializes every
//! transport callback and user action onto it; no operation blocks.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod transport;
pub mod shared {
    pub use chordseek_shared::{
        Anchor, AnchorId, Chord, DeliveryMode, ObjectCatalog, PeerId, Position, RelayMessage,
        SessionId, Transform, WireError,
    };
}

mod coordinator;
mod error;
mod events;
mod membership;
mod role;
mod session;
mod world;

pub use coordinator::{Coordinator, NoticeConfig, SessionConfig, TriggerOutcome};
pub use error::{PeerError, RoleError};
pub use events::{
    DiscoveryEvent, ErrorEvent, Notice, NoticeEvent, PeerEvent, PeerEvents, PeerJoinedEvent,
    PeerLeftEvent, RecoveryAction,
};
pub use membership::MembershipPolicy;
pub use role::{
    nearest_anchor, DiscoveredChord, DiscoveryOutcome, InstructionState, PlacementOutcome, Role,
    RoleStateMachine,
};
pub use session::{Announcement, SessionRegistry};
pub use world::{OwnershipTracker, SpatialMap};
