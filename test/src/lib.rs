
pub use helpers::*;
pub use local_transport::{LocalNetwork, SentFrame};
pub use test_map::TestMap;
