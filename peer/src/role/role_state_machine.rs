use log::{info, warn};

use chordseek_shared::{Anchor, AnchorId, Chord, ObjectCatalog, SessionId, Transform};

use crate::{
    role::discovery::nearest_anchor,
    world::{OwnershipTracker, SpatialMap},
    RoleError,
};

// Role

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Role {
    /// Places the catalog's chords around the shared space
    Hider,
    /// Walks around looking for chords someone else placed
    #[default]
    Seeker,
}

// InstructionState

/// What the local participant should be doing next
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstructionState {
    Placing(Chord),
    Exhausted,
    Seeking,
}

impl InstructionState {
    /// Prompt for the instruction banner, `None` when it should be hidden
    pub fn prompt(&self) -> Option<String> {
        match self {
            InstructionState::Placing(chord) => Some(format!("Tap to place the {} chord", chord)),
            InstructionState::Exhausted => None,
            InstructionState::Seeking => Some("Tap to find chords around you".to_string()),
        }
    }
}

// PlacementOutcome

#[derive(Clone, Debug, PartialEq)]
pub enum PlacementOutcome {
    /// A new anchor for the next catalog chord was added to the map
    Placed(Anchor),
    /// No surface was resolved under the trigger; nothing changed
    NoTarget,
    /// Every catalog chord is already placed
    Exhausted,
}

// DiscoveredChord

/// A chord the local participant has found and attached a marker to
#[derive(Clone, Debug, PartialEq)]
pub struct DiscoveredChord {
    pub anchor_id: AnchorId,
    pub name: String,
    pub transform: Transform,
}

// DiscoveryOutcome

#[derive(Clone, Debug, PartialEq)]
pub enum DiscoveryOutcome {
    Found { chord: DiscoveredChord, distance: f32 },
    /// The map holds no catalog chords at all
    NothingNearby,
    /// The closest chord is beyond the discovery range
    OutOfRange { distance: f32 },
}

// RoleStateMachine

/// Hider/Seeker state plus the placement cursor and discovery log.
pub struct RoleStateMachine {
    role: Role,
    catalog: ObjectCatalog,
    placement_index: usize,
    discovery_range: f32,
    discovered: Vec<DiscoveredChord>,
}

impl RoleStateMachine {
    pub fn new(catalog: ObjectCatalog, discovery_range: f32) -> Self {
        Self {
            role: Role::Seeker,
            catalog,
            placement_index: 0,
            discovery_range,
            discovered: Vec::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn catalog(&self) -> &ObjectCatalog {
        &self.catalog
    }

    pub fn placement_index(&self) -> usize {
        self.placement_index
    }

    pub fn discovery_range(&self) -> f32 {
        self.discovery_range
    }

    pub fn discovered(&self) -> &[DiscoveredChord] {
        &self.discovered
    }

    // Transitions

    /// Explicit local choice to hide chords. Only the participant starting
    /// the group may do this, so it fails once anyone is connected.
    pub fn become_hider(&mut self, connected_peers: usize) -> Result<(), RoleError> {
        if self.role == Role::Hider {
            return Err(RoleError::AlreadyHider);
        }
        if connected_peers > 0 {
            return Err(RoleError::GroupAlreadyFormed { connected_peers });
        }
        info!("role set to Hider");
        self.role = Role::Hider;
        Ok(())
    }

    /// Joining an existing group always makes the local participant a Seeker
    pub fn join_confirmed(&mut self) {
        if self.role != Role::Seeker {
            info!("joined an existing group, role set to Seeker");
        }
        self.role = Role::Seeker;
    }

    pub fn instruction_state(&self) -> InstructionState {
        match self.role {
            Role::Seeker => InstructionState::Seeking,
            Role::Hider => match self.catalog.get(self.placement_index) {
                Some(chord) => InstructionState::Placing(chord.clone()),
                None => InstructionState::Exhausted,
            },
        }
    }

    // Hider

    /// Place the next catalog chord at `target`, tagging it with the local
    /// session.
    pub fn place<M: SpatialMap + ?Sized>(
        &mut self,
        target: Option<Transform>,
        local_session: &SessionId,
        tracker: &mut OwnershipTracker,
        map: &mut M,
    ) -> Result<PlacementOutcome, RoleError> {
        if self.role != Role::Hider {
            return Err(RoleError::WrongRole {
                operation: "placement",
                required: "Hider",
            });
        }

        let Some(transform) = target else {
            warn!("placement failed: no surface under trigger");
            return Ok(PlacementOutcome::NoTarget);
        };

        let Some(chord) = self.catalog.get(self.placement_index) else {
            return Ok(PlacementOutcome::Exhausted);
        };

        let anchor = Anchor::new(AnchorId::generate(), chord.name(), transform)
            .with_origin(local_session.clone());
        tracker.tag(anchor.id(), local_session.clone());
        map.add_anchor(anchor.clone());
        self.placement_index += 1;

        info!(
            "placed {} ({}/{})",
            chord,
            self.placement_index,
            self.catalog.len()
        );

        Ok(PlacementOutcome::Placed(anchor))
    }

    // Seeker

    /// Look for the nearest catalog chord around the local device
    pub fn discover<M: SpatialMap + ?Sized>(
        &mut self,
        map: &M,
        tracker: &mut OwnershipTracker,
    ) -> Result<DiscoveryOutcome, RoleError> {
        if self.role != Role::Seeker {
            return Err(RoleError::WrongRole {
                operation: "discovery",
                required: "Seeker",
            });
        }

        let candidates: Vec<Anchor> = map
            .anchors()
            .into_iter()
            .filter(|anchor| self.catalog.contains_name(anchor.name()))
            .collect();

        if candidates.is_empty() {
            return Ok(DiscoveryOutcome::NothingNearby);
        }

        // every distance is NaN when the device position is unknown
        let position = map.local_position();
        let Some((nearest, distance)) = nearest_anchor(&candidates, &position) else {
            warn!("discovery failed: no measurable distance from {:?}", position);
            return Ok(DiscoveryOutcome::OutOfRange {
                distance: f32::INFINITY,
            });
        };

        if !(distance < self.discovery_range) {
            return Ok(DiscoveryOutcome::OutOfRange { distance });
        }

        let chord = DiscoveredChord {
            anchor_id: nearest.id(),
            name: nearest.name().to_string(),
            transform: *nearest.transform(),
        };
        tracker.mark_discovered(chord.anchor_id);
        self.discovered.push(chord.clone());
        info!("discovered {} at distance {:.2}", chord.name, distance);

        Ok(DiscoveryOutcome::Found { chord, distance })
    }

    /// Drop every discovered marker (local reset)
    pub fn clear_discoveries(&mut self) -> Vec<DiscoveredChord> {
        std::mem::take(&mut self.discovered)
    }

    /// Drop markers whose anchors left the map
    pub fn forget_discoveries(&mut self, anchor_ids: &[AnchorId]) {
        self.discovered
            .retain(|chord| !anchor_ids.contains(&chord.anchor_id));
    }
}
