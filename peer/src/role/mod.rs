mod discovery;
mod role_state_machine;

pub use discovery::nearest_anchor;
pub use role_state_machine::{
    DiscoveredChord, DiscoveryOutcome, InstructionState, PlacementOutcome, Role, RoleStateMachine,
};
