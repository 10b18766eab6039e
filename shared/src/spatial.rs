use crate::{AnchorId, SessionId};

// Position

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance between two points in shared map coordinates.
    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

// Transform

/// Position plus orientation (unit quaternion, `[x, y, z, w]`) in shared
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Position,
    pub rotation: [f32; 4],
}

impl Transform {
    pub fn from_position(position: Position) -> Self {
        Self {
            position,
            rotation: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_position(Position::default())
    }
}

// Anchor

/// A named, positioned object in the shared map.
///
/// `name` is a catalog entry for placed chords and empty for participant
/// markers. `origin_session` is absent for anchors created locally that the
/// map has not attributed yet.
#[derive(Clone, Debug, PartialEq)]
pub struct Anchor {
    id: AnchorId,
    name: String,
    transform: Transform,
    origin_session: Option<SessionId>,
}

impl Anchor {
    pub fn new<S: Into<String>>(id: AnchorId, name: S, transform: Transform) -> Self {
        Self {
            id,
            name: name.into(),
            transform,
            origin_session: None,
        }
    }

    /// A participant marker: an unnamed anchor representing another device.
    pub fn participant(id: AnchorId, transform: Transform, origin_session: SessionId) -> Self {
        Self {
            id,
            name: String::new(),
            transform,
            origin_session: Some(origin_session),
        }
    }

    pub fn with_origin(mut self, origin_session: SessionId) -> Self {
        self.origin_session = Some(origin_session);
        self
    }

    pub fn id(&self) -> AnchorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn position(&self) -> &Position {
        &self.transform.position
    }

    pub fn origin_session(&self) -> Option<&SessionId> {
        self.origin_session.as_ref()
    }

    pub fn is_participant(&self) -> bool {
        self.name.is_empty()
    }
}
