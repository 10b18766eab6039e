use std::{default::Default, time::Duration};

use chordseek_shared::ObjectCatalog;

/// Contains Config properties which will be used by the Coordinator
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Most connected peers admitted at once, not counting the local
    /// participant. Peers discovered past this are refused.
    pub max_peers: usize,
    /// A Seeker finds a chord only when strictly closer than this, in world
    /// units
    pub discovery_range: f32,
    /// Chords the Hider places, in placement order
    pub catalog: ObjectCatalog,
    /// Display durations attached to status notices
    pub notice: NoticeConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_peers: 4,
            discovery_range: 3.0,
            catalog: ObjectCatalog::default(),
            notice: NoticeConfig::default(),
        }
    }
}

/// How long each kind of status notice should stay on screen
#[derive(Clone, Debug)]
pub struct NoticeConfig {
    /// Placement and discovery feedback
    pub short: Duration,
    /// Peer joins and capacity rejections
    pub long: Duration,
    /// Everything else
    pub default: Duration,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            short: Duration::from_secs(2),
            long: Duration::from_secs(6),
            default: Duration::from_secs(5),
        }
    }
}
