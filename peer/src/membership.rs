/// Admission control for peers asking to join the group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MembershipPolicy {
    max_peers: usize,
}

impl MembershipPolicy {
    pub fn new(max_peers: usize) -> Self {
        Self { max_peers }
    }

    pub fn max_peers(&self) -> usize {
        self.max_peers
    }

    /// Whether one more peer may join a group that already has
    /// `current_peer_count` connected peers. Must be asked before the
    /// transport finalizes the connection.
    pub fn should_admit(&self, current_peer_count: usize) -> bool {
        current_peer_count < self.max_peers
    }
}

impl Default for MembershipPolicy {
    fn default() -> Self {
        Self::new(4)
    }
}
