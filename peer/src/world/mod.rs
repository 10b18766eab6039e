mod ownership_tracker;
mod spatial_map;

pub use ownership_tracker::OwnershipTracker;
pub use spatial_map::SpatialMap;
