mod coordinator;
pub use coordinator::{Coordinator, TriggerOutcome};

mod session_config;
pub use session_config::{NoticeConfig, SessionConfig};
