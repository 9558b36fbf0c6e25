/// Coordinate axis a tree node splits its descendants along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// A recorded light sample.
///
/// `axis` is `None` until the photon has been placed as an internal node of
/// a balanced [`PhotonMap`](crate::PhotonMap). Leaves keep `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Photon {
    pub(crate) position: [f64; 3],
    pub(crate) direction: [f64; 3],
    pub(crate) axis: Option<Axis>,
}

impl Photon {
    /// Creates an unplaced photon. The direction is normalized; a zero
    /// direction is kept as is.
    pub fn new(position: [f64; 3], direction: [f64; 3]) -> Self {
        Photon {
            position,
            direction: normalize(direction),
            axis: None,
        }
    }

    pub fn position(&self) -> [f64; 3] {
        self.position
    }

    /// Unit incoming direction.
    pub fn direction(&self) -> [f64; 3] {
        self.direction
    }

    pub fn axis(&self) -> Option<Axis> {
        self.axis
    }

    #[inline]
    pub fn dist_sq(&self, point: &[f64; 3]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        let dz = self.position[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

fn normalize(v: [f64; 3]) -> [f64; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_is_normalized() {
        let p = Photon::new([1.0, 2.0, 3.0], [0.0, 3.0, 4.0]);
        let d = p.direction();
        assert!((d[1] - 0.6).abs() < 1e-12);
        assert!((d[2] - 0.8).abs() < 1e-12);
        assert_eq!(p.axis(), None);
    }

    #[test]
    fn test_zero_direction_kept() {
        let p = Photon::new([0.0; 3], [0.0; 3]);
        assert_eq!(p.direction(), [0.0; 3]);
    }
}
