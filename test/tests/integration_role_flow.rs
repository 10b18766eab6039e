/// INTEGRATION TESTS: Hider placement and Seeker discovery

use chordseek_peer::{
    DiscoveryEvent, DiscoveryOutcome, ErrorEvent, InstructionState, NoticeEvent, PeerError,
    PlacementOutcome, RecoveryAction, Role, RoleError, TriggerOutcome,
};
use chordseek_shared::{Chord, ObjectCatalog, Position, SessionId, Transform};
use chordseek_test::{connect_peers, LocalNetwork, TestPeer};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn target(x: f32) -> Option<Transform> {
    Some(Transform::from_position(Position::new(x, 0.0, 0.0)))
}

fn notices(peer: &mut TestPeer) -> Vec<String> {
    let mut events = peer.coordinator.take_events();
    events.read::<NoticeEvent>().map(|notice| notice.text).collect()
}

// ============================================================================
// Roles
// ============================================================================

#[test]
fn new_participant_is_seeker() {
    let network = LocalNetwork::new();
    let peer = TestPeer::new(&network, 1, "A");

    assert_eq!(peer.coordinator.current_role(), Role::Seeker);
    assert_eq!(peer.coordinator.instruction_state(), InstructionState::Seeking);
    assert_eq!(
        peer.coordinator.instruction_state().prompt().as_deref(),
        Some("Tap to find chords around you")
    );
}

#[test]
fn group_initiator_can_become_hider() {
    let network = LocalNetwork::new();
    let mut peer = TestPeer::new(&network, 1, "A");

    assert_eq!(peer.coordinator.become_hider(), Ok(()));
    assert_eq!(peer.coordinator.current_role(), Role::Hider);
    assert_eq!(
        peer.coordinator.instruction_state(),
        InstructionState::Placing(Chord::new("C Major"))
    );
    assert_eq!(
        peer.coordinator.instruction_state().prompt().as_deref(),
        Some("Tap to place the C Major chord")
    );
}

#[test]
fn cannot_become_hider_after_peer_joined() {
    init_logger();
    let network = LocalNetwork::new();
    let mut a = TestPeer::new(&network, 1, "A");
    let mut b = TestPeer::new(&network, 2, "B");
    assert!(connect_peers(&network, &mut a, &mut b));

    assert_eq!(
        b.coordinator.become_hider(),
        Err(RoleError::GroupAlreadyFormed { connected_peers: 1 })
    );
    assert_eq!(b.coordinator.current_role(), Role::Seeker);
}

#[test]
fn becoming_hider_twice_is_rejected() {
    let network = LocalNetwork::new();
    let mut peer = TestPeer::new(&network, 1, "A");
    peer.coordinator.become_hider().unwrap();

    assert_eq!(peer.coordinator.become_hider(), Err(RoleError::AlreadyHider));
}

#[test]
fn join_confirmation_forces_seeker() {
    let network = LocalNetwork::new();
    let mut peer = TestPeer::new(&network, 1, "A");
    peer.coordinator.become_hider().unwrap();

    peer.coordinator.on_join_confirmed();

    assert_eq!(peer.coordinator.current_role(), Role::Seeker);
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn hider_places_catalog_in_order_then_stops() {
    init_logger();
    let network = LocalNetwork::new();
    let mut hider = TestPeer::new(&network, 1, "A");
    hider.coordinator.become_hider().unwrap();
    let catalog = ObjectCatalog::default();

    for (index, chord) in catalog.iter().enumerate() {
        let outcome = hider
            .coordinator
            .trigger_placement_or_discovery(&mut hider.map, target(index as f32))
            .unwrap();
        match outcome {
            TriggerOutcome::Placement(PlacementOutcome::Placed(anchor)) => {
                assert_eq!(anchor.name(), chord.name());
                assert_eq!(anchor.origin_session(), Some(&SessionId::new("A")));
                assert!(hider.coordinator.ownership().is_tagged(&anchor.id()));
            }
            other => panic!("Expected placement, got {:?}", other),
        }
    }

    let expected: Vec<String> = catalog.iter().map(|chord| chord.name().to_string()).collect();
    assert_eq!(hider.map.names(), expected);
    assert_eq!(
        hider.coordinator.ownership().anchor_count(&SessionId::new("A")),
        4
    );
    assert_eq!(hider.coordinator.instruction_state(), InstructionState::Exhausted);
    assert_eq!(hider.coordinator.instruction_state().prompt(), None);

    let outcome = hider
        .coordinator
        .trigger_placement_or_discovery(&mut hider.map, target(9.0))
        .unwrap();
    assert_eq!(outcome, TriggerOutcome::Placement(PlacementOutcome::Exhausted));
    assert_eq!(hider.map.len(), 4);
    assert_eq!(hider.coordinator.roles().placement_index(), 4);
}

#[test]
fn placement_without_target_changes_nothing() {
    init_logger();
    let network = LocalNetwork::new();
    let mut hider = TestPeer::new(&network, 1, "A");
    hider.coordinator.become_hider().unwrap();

    let outcome = hider
        .coordinator
        .trigger_placement_or_discovery(&mut hider.map, None)
        .unwrap();

    assert_eq!(outcome, TriggerOutcome::Placement(PlacementOutcome::NoTarget));
    assert!(hider.map.is_empty());
    assert_eq!(hider.coordinator.roles().placement_index(), 0);
    assert_eq!(
        notices(&mut hider),
        vec!["Can't place object - no surface found.\nLook for flat surfaces.".to_string()]
    );
}

// ============================================================================
// Discovery
// ============================================================================

fn seeker_with_chords(network: &LocalNetwork, distances: &[(f32, &str)]) -> TestPeer {
    let mut seeker = TestPeer::new(network, 2, "B");
    let hider_session = SessionId::new("A");
    for (index, (distance, name)) in distances.iter().enumerate() {
        let anchor = seeker.map.insert_remote(
            100 + index as u64,
            name,
            Position::new(*distance, 0.0, 0.0),
            &hider_session,
        );
        seeker.coordinator.on_anchor_added(&mut seeker.map, &anchor);
    }
    seeker
}

#[test]
fn discovery_selects_nearest_chord_in_range() {
    init_logger();
    let network = LocalNetwork::new();
    let mut seeker = seeker_with_chords(
        &network,
        &[(5.0, "C Major"), (2.0, "F Major"), (0.5, "G Major")],
    );

    let outcome = seeker
        .coordinator
        .trigger_placement_or_discovery(&mut seeker.map, None)
        .unwrap();

    match outcome {
        TriggerOutcome::Discovery(DiscoveryOutcome::Found { chord, distance }) => {
            assert_eq!(chord.name, "G Major");
            assert!((distance - 0.5).abs() < 1e-6);
        }
        other => panic!("Expected a discovery, got {:?}", other),
    }
    assert_eq!(seeker.coordinator.roles().discovered().len(), 1);

    let mut events = seeker.coordinator.take_events();
    let found: Vec<_> = events.read::<DiscoveryEvent>().collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "G Major");
    let texts: Vec<_> = events.read::<NoticeEvent>().map(|notice| notice.text).collect();
    assert_eq!(texts, vec!["You found G Major!".to_string()]);
}

#[test]
fn discovery_out_of_range_mutates_nothing() {
    init_logger();
    let network = LocalNetwork::new();
    let mut seeker = seeker_with_chords(&network, &[(5.0, "C Major"), (4.0, "F Major")]);

    let outcome = seeker
        .coordinator
        .trigger_placement_or_discovery(&mut seeker.map, None)
        .unwrap();

    match outcome {
        TriggerOutcome::Discovery(DiscoveryOutcome::OutOfRange { distance }) => {
            assert!((distance - 4.0).abs() < 1e-6);
        }
        other => panic!("Expected out of range, got {:?}", other),
    }
    assert!(seeker.coordinator.roles().discovered().is_empty());
    for id in [100, 101] {
        assert!(!seeker
            .coordinator
            .ownership()
            .is_discovered(&chordseek_shared::AnchorId::from_u64(id)));
    }
    assert_eq!(notices(&mut seeker), vec!["There is no chord nearby".to_string()]);
}

#[test]
fn discovery_range_is_strict() {
    let network = LocalNetwork::new();
    let mut seeker = seeker_with_chords(&network, &[(3.0, "C Major")]);

    let outcome = seeker
        .coordinator
        .trigger_placement_or_discovery(&mut seeker.map, None)
        .unwrap();

    assert!(matches!(
        outcome,
        TriggerOutcome::Discovery(DiscoveryOutcome::OutOfRange { .. })
    ));
}

#[test]
fn discovery_ignores_non_catalog_anchors() {
    let network = LocalNetwork::new();
    let mut seeker = seeker_with_chords(&network, &[(0.1, ""), (0.2, "Banjo")]);

    let outcome = seeker
        .coordinator
        .trigger_placement_or_discovery(&mut seeker.map, None)
        .unwrap();

    assert_eq!(
        outcome,
        TriggerOutcome::Discovery(DiscoveryOutcome::NothingNearby)
    );
    assert!(seeker.coordinator.roles().discovered().is_empty());
}

#[test]
fn discovery_measures_from_device_position() {
    let network = LocalNetwork::new();
    let mut seeker = seeker_with_chords(&network, &[(10.0, "C Major"), (0.0, "F Major")]);
    seeker.map.set_position(Position::new(9.0, 0.0, 0.0));

    let outcome = seeker
        .coordinator
        .trigger_placement_or_discovery(&mut seeker.map, None)
        .unwrap();

    match outcome {
        TriggerOutcome::Discovery(DiscoveryOutcome::Found { chord, .. }) => {
            assert_eq!(chord.name, "C Major");
        }
        other => panic!("Expected a discovery, got {:?}", other),
    }
}

#[test]
fn discovery_never_selects_unmeasurable_chord() {
    let network = LocalNetwork::new();
    let mut seeker = seeker_with_chords(&network, &[(10.0, "C Major"), (f32::NAN, "F Major")]);

    let outcome = seeker
        .coordinator
        .trigger_placement_or_discovery(&mut seeker.map, None)
        .unwrap();

    match outcome {
        TriggerOutcome::Discovery(DiscoveryOutcome::OutOfRange { distance }) => {
            assert!((distance - 10.0).abs() < 1e-6);
        }
        other => panic!("Expected out of range, got {:?}", other),
    }
    assert!(seeker.coordinator.roles().discovered().is_empty());
    assert_eq!(notices(&mut seeker), vec!["There is no chord nearby".to_string()]);
}

#[test]
fn discovery_without_device_position_finds_nothing() {
    let network = LocalNetwork::new();
    let mut seeker = seeker_with_chords(&network, &[(100.0, "C Major")]);
    seeker.map.set_position(Position::new(f32::NAN, 0.0, 0.0));

    let outcome = seeker
        .coordinator
        .trigger_placement_or_discovery(&mut seeker.map, None)
        .unwrap();

    assert!(matches!(
        outcome,
        TriggerOutcome::Discovery(DiscoveryOutcome::OutOfRange { .. })
    ));
    assert!(seeker.coordinator.roles().discovered().is_empty());
    assert!(!seeker
        .coordinator
        .ownership()
        .is_discovered(&chordseek_shared::AnchorId::from_u64(100)));
    assert_eq!(notices(&mut seeker), vec!["There is no chord nearby".to_string()]);
}

#[test]
fn participant_anchor_announces_joint_experience() {
    let network = LocalNetwork::new();
    let mut seeker = seeker_with_chords(&network, &[(1.0, "")]);

    assert_eq!(
        notices(&mut seeker),
        vec!["Established joint experience with a peer.".to_string()]
    );
}

// ============================================================================
// Reset and failure
// ============================================================================

#[test]
fn reset_tracking_clears_discovered_markers() {
    init_logger();
    let network = LocalNetwork::new();
    let mut seeker = seeker_with_chords(&network, &[(1.0, "C Major")]);
    seeker
        .coordinator
        .trigger_placement_or_discovery(&mut seeker.map, None)
        .unwrap();

    let cleared = seeker.coordinator.reset_tracking();

    assert_eq!(cleared.len(), 1);
    assert!(seeker.coordinator.roles().discovered().is_empty());
    // the chord itself is still in the shared map
    assert_eq!(seeker.map.len(), 1);
    assert!(seeker.coordinator.ownership().is_tagged(&cleared[0].anchor_id));
    assert!(!seeker.coordinator.ownership().is_discovered(&cleared[0].anchor_id));
}

#[test]
fn transport_failure_offers_reset() {
    init_logger();
    let network = LocalNetwork::new();
    let mut peer = TestPeer::new(&network, 1, "A");

    peer.coordinator.on_transport_failed("World tracking failed");

    let mut events = peer.coordinator.take_events();
    let notices: Vec<_> = events.read::<NoticeEvent>().collect();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].recovery, Some(RecoveryAction::ResetTracking));
    assert!(notices[0].text.contains("World tracking failed"));

    let errors: Vec<_> = events.read::<ErrorEvent>().collect();
    assert_eq!(
        errors,
        vec![PeerError::TransportFailed {
            reason: "World tracking failed".to_string()
        }]
    );
}
