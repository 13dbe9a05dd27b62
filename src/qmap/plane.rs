use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Plane in `dot(normal, p) == distance` form.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plane {
    pub normal: DVec3,
    pub distance: f64,
}

impl Plane {
    /// Builds the plane through three points given in `.map` winding order.
    ///
    /// The normal is `cross(v1 - v2, v0 - v1)`, which points out of the brush
    /// for clockwise points. Collinear points give a non-finite normal.
    pub fn from_points([v0, v1, v2]: [DVec3; 3]) -> Self {
        let normal = (v1 - v2).cross(v0 - v1).normalize();

        Self {
            normal,
            distance: normal.dot(v0),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.normal.is_finite() && self.distance.is_finite()
    }

    /// Signed distance of `point` from the plane, positive on the normal's side.
    pub fn point_side(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }
}
