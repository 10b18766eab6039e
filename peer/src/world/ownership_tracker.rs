use std::collections::{HashMap, HashSet};

use log::info;

use chordseek_shared::{AnchorId, SessionId};

use crate::world::SpatialMap;

/// Remembers which session created which anchor, so everything a session
/// contributed can be torn down at once.
#[derive(Default)]
pub struct OwnershipTracker {
    session_anchors: HashMap<SessionId, HashSet<AnchorId>>,
    anchor_sessions: HashMap<AnchorId, SessionId>,
    // markers the local participant attached to discovered chords
    discovered_markers: HashSet<AnchorId>,
}

impl OwnershipTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute `anchor_id` to `session_id`. Re-tagging moves the anchor to
    /// the new session.
    pub fn tag(&mut self, anchor_id: AnchorId, session_id: SessionId) {
        if let Some(previous) = self.anchor_sessions.get(&anchor_id) {
            if *previous == session_id {
                return;
            }
            let previous = previous.clone();
            self.remove_from_session(&previous, &anchor_id);
        }

        self.session_anchors
            .entry(session_id.clone())
            .or_default()
            .insert(anchor_id);
        self.anchor_sessions.insert(anchor_id, session_id);
    }

    /// Forget a single anchor, e.g. after the map removed it.
    /// Returns the session it was attributed to.
    pub fn untag(&mut self, anchor_id: &AnchorId) -> Option<SessionId> {
        self.discovered_markers.remove(anchor_id);
        let session_id = self.anchor_sessions.remove(anchor_id)?;
        self.remove_from_session(&session_id, anchor_id);
        Some(session_id)
    }

    /// Remove every anchor created by `session_id` from the map and from the
    /// tracker. Unknown or already evicted ids are a no-op.
    ///
    /// Anchors the map still carries with that origin are removed too, even
    /// if they were never tagged here.
    pub fn evict_all<M: SpatialMap + ?Sized>(
        &mut self,
        session_id: &SessionId,
        map: &mut M,
    ) -> Vec<AnchorId> {
        let mut evicted: HashSet<AnchorId> =
            self.session_anchors.remove(session_id).unwrap_or_default();

        for anchor in map.anchors() {
            if anchor.origin_session() == Some(session_id) {
                evicted.insert(anchor.id());
            }
        }

        let mut evicted: Vec<AnchorId> = evicted.into_iter().collect();
        evicted.sort();

        for anchor_id in &evicted {
            map.remove_anchor(anchor_id);
            self.anchor_sessions.remove(anchor_id);
            self.discovered_markers.remove(anchor_id);
        }

        if !evicted.is_empty() {
            info!(
                "evicted {} anchor(s) originating from session {}",
                evicted.len(),
                session_id
            );
        }

        evicted
    }

    /// Record that the local participant attached a marker to `anchor_id`
    pub fn mark_discovered(&mut self, anchor_id: AnchorId) {
        self.discovered_markers.insert(anchor_id);
    }

    /// Local reset: drop every discovered marker without needing a session id
    pub fn untrack_all(&mut self) -> Vec<AnchorId> {
        let mut cleared: Vec<AnchorId> = self.discovered_markers.drain().collect();
        cleared.sort();
        cleared
    }

    pub fn session_of(&self, anchor_id: &AnchorId) -> Option<&SessionId> {
        self.anchor_sessions.get(anchor_id)
    }

    pub fn is_tagged(&self, anchor_id: &AnchorId) -> bool {
        self.anchor_sessions.contains_key(anchor_id)
    }

    pub fn is_discovered(&self, anchor_id: &AnchorId) -> bool {
        self.discovered_markers.contains(anchor_id)
    }

    /// Anchors attributed to `session_id`, in no particular order
    pub fn anchors_of(&self, session_id: &SessionId) -> Vec<AnchorId> {
        self.session_anchors
            .get(session_id)
            .map(|anchors| anchors.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn anchor_count(&self, session_id: &SessionId) -> usize {
        self.session_anchors
            .get(session_id)
            .map_or(0, HashSet::len)
    }

    pub fn tagged_count(&self) -> usize {
        self.anchor_sessions.len()
    }

    fn remove_from_session(&mut self, session_id: &SessionId, anchor_id: &AnchorId) {
        if let Some(anchors) = self.session_anchors.get_mut(session_id) {
            anchors.remove(anchor_id);
            if anchors.is_empty() {
                self.session_anchors.remove(session_id);
            }
        }
    }
}
