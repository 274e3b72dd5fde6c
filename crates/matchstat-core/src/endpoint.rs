//! Match endpoints: where an offer sits in the world and which host location
//! it belongs to.

use serde::{Deserialize, Serialize};

use crate::id::LocationId;

/// A world-space position in host distance units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other`, accumulated in f64.
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        let dz = f64::from(other.z) - f64::from(self.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// One side of a match: the offer's position and owning location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub position: Position,
    pub location: LocationId,
}

impl Endpoint {
    pub const fn new(position: Position, location: LocationId) -> Self {
        Self { position, location }
    }

    pub fn distance_to(&self, other: &Endpoint) -> f64 {
        self.position.distance(&other.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 0.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = Position::new(12.5, -3.0, 900.0);
        assert_eq!(p.distance(&p), 0.0);
    }

    #[test]
    fn endpoint_distance_ignores_location() {
        let a = Endpoint::new(Position::new(0.0, 1.0, 0.0), LocationId(1));
        let b = Endpoint::new(Position::new(0.0, 1.0, 100.0), LocationId(2));
        assert_eq!(a.distance_to(&b), 100.0);
    }
}
