use std::{mem, time::Duration, vec::IntoIter};

use chordseek_shared::{PeerId, SessionId};

use crate::{role::DiscoveredChord, PeerError};

/// What the user can do about a notice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Clear local anchor state via `Coordinator::reset_tracking`
    ResetTracking,
}

/// A user-facing status message with a display duration hint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub duration: Duration,
    pub recovery: Option<RecoveryAction>,
}

impl Notice {
    pub fn new<S: Into<String>>(text: S, duration: Duration) -> Self {
        Self {
            text: text.into(),
            duration,
            recovery: None,
        }
    }

    pub fn with_recovery(mut self, recovery: RecoveryAction) -> Self {
        self.recovery = Some(recovery);
        self
    }
}

pub struct PeerEvents {
    notices: Vec<Notice>,
    joins: Vec<PeerId>,
    leaves: Vec<(PeerId, Option<SessionId>)>,
    discoveries: Vec<DiscoveredChord>,
    errors: Vec<PeerError>,

    empty: bool,
}

impl PeerEvents {
    pub(crate) fn new() -> Self {
        Self {
            notices: Vec::new(),
            joins: Vec::new(),
            leaves: Vec::new(),
            discoveries: Vec::new(),
            errors: Vec::new(),

            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: PeerEvent>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: PeerEvent>(&self) -> bool {
        V::has(self)
    }

    // Crate-public

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
        self.empty = false;
    }

    pub(crate) fn push_join(&mut self, peer: &PeerId) {
        self.joins.push(*peer);
        self.empty = false;
    }

    pub(crate) fn push_leave(&mut self, peer: &PeerId, session_id: Option<SessionId>) {
        self.leaves.push((*peer, session_id));
        self.empty = false;
    }

    pub(crate) fn push_discovery(&mut self, chord: DiscoveredChord) {
        self.discoveries.push(chord);
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: PeerError) {
        self.errors.push(error);
        self.empty = false;
    }
}

// Event Trait
pub trait PeerEvent {
    type Iter;

    fn iter(events: &mut PeerEvents) -> Self::Iter;

    fn has(events: &PeerEvents) -> bool;
}

// NoticeEvent
pub struct NoticeEvent;
impl PeerEvent for NoticeEvent {
    type Iter = IntoIter<Notice>;

    fn iter(events: &mut PeerEvents) -> Self::Iter {
        let list = mem::take(&mut events.notices);
        IntoIterator::into_iter(list)
    }

    fn has(events: &PeerEvents) -> bool {
        !events.notices.is_empty()
    }
}

// PeerJoinedEvent
pub struct PeerJoinedEvent;
impl PeerEvent for PeerJoinedEvent {
    type Iter = IntoIter<PeerId>;

    fn iter(events: &mut PeerEvents) -> Self::Iter {
        let list = mem::take(&mut events.joins);
        IntoIterator::into_iter(list)
    }

    fn has(events: &PeerEvents) -> bool {
        !events.joins.is_empty()
    }
}

// PeerLeftEvent
pub struct PeerLeftEvent;
impl PeerEvent for PeerLeftEvent {
    type Iter = IntoIter<(PeerId, Option<SessionId>)>;

    fn iter(events: &mut PeerEvents) -> Self::Iter {
        let list = mem::take(&mut events.leaves);
        IntoIterator::into_iter(list)
    }

    fn has(events: &PeerEvents) -> bool {
        !events.leaves.is_empty()
    }
}

// DiscoveryEvent
pub struct DiscoveryEvent;
impl PeerEvent for DiscoveryEvent {
    type Iter = IntoIter<DiscoveredChord>;

    fn iter(events: &mut PeerEvents) -> Self::Iter {
        let list = mem::take(&mut events.discoveries);
        IntoIterator::into_iter(list)
    }

    fn has(events: &PeerEvents) -> bool {
        !events.discoveries.is_empty()
    }
}

// ErrorEvent
pub struct ErrorEvent;
impl PeerEvent for ErrorEvent {
    type Iter = IntoIter<PeerError>;

    fn iter(events: &mut PeerEvents) -> Self::Iter {
        let list = mem::take(&mut events.errors);
        IntoIterator::into_iter(list)
    }

    fn has(events: &PeerEvents) -> bool {
        !events.errors.is_empty()
    }
}
