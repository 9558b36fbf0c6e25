use crate::photon::Axis;

/// Axis-aligned bounding box in 3D space.
///
/// An empty box holds `+inf`/`-inf` sentinels so that the first point added
/// through [`BoundingBox::extend`] defines it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: [f64::INFINITY; 3],
            max: [f64::NEG_INFINITY; 3],
        }
    }

    /// True while no point has been added.
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    /// Widens the box component-wise to cover `point`.
    pub fn extend(&mut self, point: &[f64; 3]) {
        for i in 0..3 {
            if point[i] < self.min[i] { self.min[i] = point[i]; }
            if point[i] > self.max[i] { self.max[i] = point[i]; }
        }
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] = out.min[i].min(other.min[i]);
            out.max[i] = out.max[i].max(other.max[i]);
        }
        out
    }

    pub fn extent(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Axis of maximum extent. Ties go to X, then Y, then Z, so a box with
    /// zero extent splits along X.
    pub fn longest_axis(&self) -> Axis {
        let [dx, dy, dz] = self.extent();
        if dx >= dy && dx >= dz {
            Axis::X
        } else if dy >= dz {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Copy of the box with its upper bound on `axis` lowered to `value`.
    pub fn with_max(&self, axis: Axis, value: f64) -> BoundingBox {
        let mut out = *self;
        out.max[axis.index()] = value;
        out
    }

    /// Copy of the box with its lower bound on `axis` raised to `value`.
    pub fn with_min(&self, axis: Axis, value: f64) -> BoundingBox {
        let mut out = *self;
        out.min[axis.index()] = value;
        out
    }

    pub fn contains(&self, point: &[f64; 3]) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
