use std::mem;

use log::{info, warn};

use chordseek_shared::{Anchor, AnchorId, PeerId, RelayMessage, SessionId, Transform};

use crate::{
    events::{Notice, PeerEvents, RecoveryAction},
    membership::MembershipPolicy,
    role::{
        DiscoveredChord, DiscoveryOutcome, InstructionState, PlacementOutcome, Role,
        RoleStateMachine,
    },
    session::{Announcement, SessionRegistry},
    transport::{PacketReceiver, PacketSender, RelayChannel, SendStatus},
    world::{OwnershipTracker, SpatialMap},
    PeerError, RoleError, SessionConfig,
};

/// What a placement-or-discovery trigger did
#[derive(Clone, Debug, PartialEq)]
pub enum TriggerOutcome {
    Placement(PlacementOutcome),
    Discovery(DiscoveryOutcome),
}

/// Owns every piece of shared mutable state: the peer to session mapping,
/// anchor attribution, admission policy and the local role.
///
/// Transport callbacks and user actions must be delivered one at a time, in
/// the order they happened. Each call runs to completion, so no caller ever
/// observes an anchor tagged with a session that was already replaced.
pub struct Coordinator {
    config: SessionConfig,
    local_session: SessionId,
    relay: Option<RelayChannel>,
    registry: SessionRegistry,
    tracker: OwnershipTracker,
    membership: MembershipPolicy,
    roles: RoleStateMachine,
    incoming_events: PeerEvents,
}

impl Coordinator {
    /// Create a new Coordinator for the local participant presenting
    /// `local_session`
    pub fn new(config: SessionConfig, local_session: SessionId) -> Self {
        let membership = MembershipPolicy::new(config.max_peers);
        let roles = RoleStateMachine::new(config.catalog.clone(), config.discovery_range);

        Self {
            config,
            local_session,
            relay: None,
            registry: SessionRegistry::new(),
            tracker: OwnershipTracker::new(),
            membership,
            roles,
            incoming_events: PeerEvents::new(),
        }
    }

    /// Attach the peer-to-peer transport
    pub fn connect(&mut self, sender: Box<dyn PacketSender>, receiver: Box<dyn PacketReceiver>) {
        self.relay = Some(RelayChannel::new(sender, receiver));
    }

    /// Returns whether a transport has been attached
    pub fn is_connected(&self) -> bool {
        self.relay.is_some()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn local_session_id(&self) -> &SessionId {
        &self.local_session
    }

    pub fn connected_peers(&self) -> Vec<PeerId> {
        self.relay
            .as_ref()
            .map(RelayChannel::connected_peers)
            .unwrap_or_default()
    }

    pub fn connected_peer_count(&self) -> usize {
        self.relay
            .as_ref()
            .map_or(0, RelayChannel::connected_peer_count)
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn ownership(&self) -> &OwnershipTracker {
        &self.tracker
    }

    pub fn roles(&self) -> &RoleStateMachine {
        &self.roles
    }

    pub fn membership(&self) -> &MembershipPolicy {
        &self.membership
    }

    /// Must be called regularly, drains every frame the transport has
    /// received and returns everything that happened since the last call
    pub fn receive<M: SpatialMap>(&mut self, map: &mut M) -> PeerEvents {
        let mut frames: Vec<(PeerId, Vec<u8>)> = Vec::new();
        if let Some(relay) = self.relay.as_mut() {
            let received = relay.receive(|peer, payload| frames.push((peer, payload.to_vec())));
            if let Err(error) = received {
                warn!("transport receive failed: {}", error);
                self.incoming_events.push_error(error.into());
            }
        }

        for (peer, frame) in frames {
            self.on_data_received(map, &peer, &frame);
        }

        self.take_events()
    }

    /// Returns everything recorded since the last call and resets the buffer
    pub fn take_events(&mut self) -> PeerEvents {
        mem::replace(&mut self.incoming_events, PeerEvents::new())
    }

    // Transport callbacks

    /// A peer asks to join. The answer must reach the transport before it
    /// finalizes the connection.
    pub fn on_peer_discovered(&mut self, peer: &PeerId) -> bool {
        let peer_count = self.connected_peer_count();
        if self.membership.should_admit(peer_count) {
            return true;
        }

        warn!("refusing {}: group already has {} peer(s)", peer, peer_count);
        self.push_notice(
            format!(
                "Another peer wants to join the experience.\nThis app is limited to {} users.",
                self.membership.max_peers()
            ),
            self.config.notice.long,
        );
        false
    }

    /// A peer finished connecting. It learns our session id right away so it
    /// can attribute our anchors.
    pub fn on_peer_joined(&mut self, peer: &PeerId) {
        info!("{} joined", peer);
        self.push_notice(
            "A peer wants to join the experience.\nHold the phones next to each other.",
            self.config.notice.long,
        );
        self.incoming_events.push_join(peer);
        self.announce_to(&[*peer]);
    }

    /// A peer disconnected: everything its session contributed goes with it
    pub fn on_peer_left<M: SpatialMap>(&mut self, map: &mut M, peer: &PeerId) {
        info!("{} left", peer);
        self.push_notice("A peer has left the shared experience.", self.config.notice.default);

        let session_id = self.registry.forget(peer);
        if let Some(session_id) = &session_id {
            let evicted = self.tracker.evict_all(session_id, map);
            self.roles.forget_discoveries(&evicted);
        }

        self.incoming_events.push_leave(peer, session_id);
    }

    /// Handle one frame from `peer`. Malformed frames are dropped and change
    /// nothing.
    pub fn on_data_received<M: SpatialMap>(&mut self, map: &mut M, peer: &PeerId, bytes: &[u8]) {
        let message = match RelayMessage::from_bytes(bytes) {
            Ok(message) => message,
            Err(error) => {
                warn!("ignoring malformed frame from {}: {}", peer, error);
                return;
            }
        };

        match message {
            RelayMessage::SyncPayload { bytes, .. } => {
                map.apply_sync(&bytes);
            }
            RelayMessage::IdentityAnnouncement(session_id) => {
                let announcement = self.registry.record_announcement(
                    *peer,
                    session_id,
                    &mut self.tracker,
                    map,
                );
                if let Announcement::Replaced { evicted, .. } = announcement {
                    self.roles.forget_discoveries(&evicted);
                }
            }
        }
    }

    /// Joining an existing group was confirmed by the transport
    pub fn on_join_confirmed(&mut self) {
        self.roles.join_confirmed();
    }

    /// The underlying tracking or connection failed. The user is offered a
    /// local reset.
    pub fn on_transport_failed<S: Into<String>>(&mut self, reason: S) {
        let reason = reason.into();
        warn!("shared session failed: {}", reason);
        self.incoming_events.push_notice(
            Notice::new(
                format!("The shared session failed.\n{}", reason),
                self.config.notice.long,
            )
            .with_recovery(RecoveryAction::ResetTracking),
        );
        self.incoming_events
            .push_error(PeerError::TransportFailed { reason });
    }

    // Local session

    /// The local session id changed (e.g. the map restarted). Every
    /// connected peer is told so it can drop anchors tagged with the old one.
    pub fn set_local_session_id(&mut self, session_id: SessionId) {
        if self.local_session == session_id {
            return;
        }
        info!("local session id changed to {}", session_id);
        self.local_session = session_id;

        let peers = self.connected_peers();
        self.announce_to(&peers);
    }

    /// Forward synchronization data produced by the local map to every
    /// connected peer. With nobody connected it is dropped, not queued.
    pub fn broadcast_sync(&mut self, blob: &[u8], critical: bool) -> Result<SendStatus, PeerError> {
        let Some(relay) = self.relay.as_ref() else {
            info!("deferred sync payload: no transport attached");
            return Ok(SendStatus::Dropped);
        };

        let peers = relay.connected_peers();
        if peers.is_empty() {
            info!("deferred sync payload: no peers connected");
            return Ok(SendStatus::Dropped);
        }

        let message = RelayMessage::sync(blob.to_vec(), critical);
        Ok(relay.send_message(&message, &peers)?)
    }

    // Map callbacks

    /// The map gained an anchor, locally or through synchronization
    pub fn on_anchor_added<M: SpatialMap>(&mut self, map: &mut M, anchor: &Anchor) {
        if anchor.is_participant() {
            self.push_notice(
                "Established joint experience with a peer.",
                self.config.notice.default,
            );
        }

        let Some(origin) = anchor.origin_session() else {
            return;
        };

        if *origin != self.local_session && self.registry.is_retired(origin) {
            warn!("dropping anchor from retired session {}", origin);
            map.remove_anchor(&anchor.id());
            return;
        }

        self.tracker.tag(anchor.id(), origin.clone());
    }

    /// The map dropped an anchor on its own
    pub fn on_anchor_removed(&mut self, anchor_id: &AnchorId) {
        self.tracker.untag(anchor_id);
        self.roles.forget_discoveries(&[*anchor_id]);
    }

    // Gameplay

    pub fn current_role(&self) -> Role {
        self.roles.role()
    }

    pub fn instruction_state(&self) -> InstructionState {
        self.roles.instruction_state()
    }

    /// Explicitly take the Hider role. Only allowed before anyone joined.
    pub fn become_hider(&mut self) -> Result<(), RoleError> {
        let connected_peers = self.connected_peer_count();
        self.roles.become_hider(connected_peers)
    }

    /// The user tapped. A Hider places the next chord at `at_location`
    /// (`None` when no surface was hit); a Seeker looks for the nearest
    /// chord around the device.
    pub fn trigger_placement_or_discovery<M: SpatialMap>(
        &mut self,
        map: &mut M,
        at_location: Option<Transform>,
    ) -> Result<TriggerOutcome, PeerError> {
        match self.roles.role() {
            Role::Hider => {
                let outcome = self.roles.place(
                    at_location,
                    &self.local_session,
                    &mut self.tracker,
                    map,
                )?;
                match &outcome {
                    PlacementOutcome::Placed(_) => {}
                    PlacementOutcome::NoTarget => self.push_notice(
                        "Can't place object - no surface found.\nLook for flat surfaces.",
                        self.config.notice.short,
                    ),
                    PlacementOutcome::Exhausted => {
                        info!("every chord has been placed");
                    }
                }
                Ok(TriggerOutcome::Placement(outcome))
            }
            Role::Seeker => {
                let outcome = self.roles.discover(map, &mut self.tracker)?;
                match &outcome {
                    DiscoveryOutcome::Found { chord, .. } => {
                        self.push_notice(
                            format!("You found {}!", chord.name),
                            self.config.notice.short,
                        );
                        self.incoming_events.push_discovery(chord.clone());
                    }
                    DiscoveryOutcome::NothingNearby => self.push_notice(
                        "There are no chords to find yet",
                        self.config.notice.short,
                    ),
                    DiscoveryOutcome::OutOfRange { .. } => self.push_notice(
                        "There is no chord nearby",
                        self.config.notice.short,
                    ),
                }
                Ok(TriggerOutcome::Discovery(outcome))
            }
        }
    }

    /// Local reset: remove every discovered marker. This is the recovery
    /// action offered after a transport failure.
    pub fn reset_tracking(&mut self) -> Vec<DiscoveredChord> {
        let markers = self.tracker.untrack_all();
        let cleared = self.roles.clear_discoveries();
        info!(
            "reset tracking: cleared {} marker(s)",
            markers.len().max(cleared.len())
        );
        cleared
    }

    // Private methods

    fn announce_to(&mut self, peers: &[PeerId]) {
        let Some(relay) = self.relay.as_ref() else {
            warn!("cannot announce session id: no transport attached");
            return;
        };

        let message = RelayMessage::announcement(self.local_session.clone());
        match relay.send_message(&message, peers) {
            Ok(SendStatus::Sent) => {}
            Ok(SendStatus::Dropped) => {
                info!("session announcement dropped: no connected recipients");
            }
            Err(error) => {
                warn!("cannot send session announcement: {}", error);
                self.incoming_events.push_error(error.into());
            }
        }
    }

    fn push_notice<S: Into<String>>(&mut self, text: S, duration: std::time::Duration) {
        self.incoming_events.push_notice(Notice::new(text, duration));
    }
}
