use chordseek_shared::{Anchor, AnchorId, Position};

/// The shared map collaborator. It owns the anchors; the core only asks it
/// to add or remove them and reads them back.
pub trait SpatialMap {
    /// Every anchor currently in the map, in the map's own order
    fn anchors(&self) -> Vec<Anchor>;
    fn add_anchor(&mut self, anchor: Anchor);
    fn remove_anchor(&mut self, anchor_id: &AnchorId);
    /// Where the local device is right now
    fn local_position(&self) -> Position;
    /// Apply a synchronization blob received from a peer
    fn apply_sync(&mut self, blob: &[u8]);
}
