use std::collections::{HashMap, HashSet, VecDeque};

use log::info;

use chordseek_shared::{AnchorId, PeerId, SessionId};

use crate::world::{OwnershipTracker, SpatialMap};

/// What recording an identity announcement did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Announcement {
    /// First announcement from this peer
    FirstSeen,
    /// Peer repeated the session id it already had
    Unchanged,
    /// Peer switched session ids. Every anchor of `old` was evicted before
    /// `new` was recorded.
    Replaced {
        old: SessionId,
        new: SessionId,
        evicted: Vec<AnchorId>,
    },
}

/// Maps each connected peer to the session id it currently presents.
#[derive(Default)]
pub struct SessionRegistry {
    peer_sessions: HashMap<PeerId, SessionId>,
    // ids that were replaced or whose peer left; anchors still arriving
    // with one of these origins are stale
    retired_sessions: HashSet<SessionId>,
    // oldest first, bounded by RETIRED_CAPACITY
    retired_order: VecDeque<SessionId>,
}

impl SessionRegistry {
    /// How many retired session ids are remembered before the oldest is
    /// forgotten
    pub const RETIRED_CAPACITY: usize = 32;

    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `peer` now presents `session_id`.
    ///
    /// When this replaces a different id, all anchors of the old id are
    /// evicted from `map` and `tracker` before the new id is stored.
    pub fn record_announcement<M: SpatialMap + ?Sized>(
        &mut self,
        peer: PeerId,
        session_id: SessionId,
        tracker: &mut OwnershipTracker,
        map: &mut M,
    ) -> Announcement {
        if self.retired_sessions.remove(&session_id) {
            self.retired_order.retain(|retired| *retired != session_id);
        }

        let Some(current) = self.peer_sessions.get(&peer) else {
            info!("{} announced session {}", peer, session_id);
            self.peer_sessions.insert(peer, session_id);
            return Announcement::FirstSeen;
        };

        if *current == session_id {
            return Announcement::Unchanged;
        }

        let old = current.clone();
        let evicted = tracker.evict_all(&old, map);
        info!(
            "{} replaced session {} with {}, evicted {} anchor(s)",
            peer,
            old,
            session_id,
            evicted.len()
        );
        self.peer_sessions.insert(peer, session_id.clone());
        self.retire(old.clone());

        Announcement::Replaced {
            old,
            new: session_id,
            evicted,
        }
    }

    /// Remove `peer`, returning the last session id it presented so the
    /// caller can evict its anchors.
    pub fn forget(&mut self, peer: &PeerId) -> Option<SessionId> {
        let session_id = self.peer_sessions.remove(peer)?;
        self.retire(session_id.clone());
        Some(session_id)
    }

    pub fn current_session_id(&self, peer: &PeerId) -> Option<&SessionId> {
        self.peer_sessions.get(peer)
    }

    /// Peer currently presenting `session_id`, if any
    pub fn peer_of(&self, session_id: &SessionId) -> Option<PeerId> {
        self.peer_sessions
            .iter()
            .find(|(_, current)| *current == session_id)
            .map(|(peer, _)| *peer)
    }

    /// Whether `session_id` belonged to a peer that has since moved on or left
    pub fn is_retired(&self, session_id: &SessionId) -> bool {
        self.retired_sessions.contains(session_id)
    }

    pub fn retired_count(&self) -> usize {
        self.retired_sessions.len()
    }

    pub fn peer_count(&self) -> usize {
        self.peer_sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peer_sessions.is_empty()
    }

    pub fn peers(&self) -> impl Iterator<Item = &PeerId> {
        self.peer_sessions.keys()
    }

    fn retire(&mut self, session_id: SessionId) {
        // a session still presented by another peer is live
        if self.peer_of(&session_id).is_some() || self.retired_sessions.contains(&session_id) {
            return;
        }

        self.retired_sessions.insert(session_id.clone());
        self.retired_order.push_back(session_id);

        if self.retired_order.len() > Self::RETIRED_CAPACITY {
            if let Some(oldest) = self.retired_order.pop_front() {
                self.retired_sessions.remove(&oldest);
            }
        }
    }
}
