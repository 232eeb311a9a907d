use crate::{Interval, Vec3};

/// Axis-aligned bounding box, one interval per axis.
///
/// Used to pick split axes when balancing spatial indices. Unlike a BVH
/// box it is never padded: a flat point set really has zero extent on
/// its flat axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Smallest box containing every point of the iterator.
    ///
    /// Returns [`Aabb::EMPTY`] for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        points
            .into_iter()
            .fold(Aabb::EMPTY, |bounds, p| bounds.include(p))
    }

    /// Grow the box so that it contains `p`.
    pub fn include(&self, p: Vec3) -> Self {
        Self {
            x: self.x.include(p.x),
            y: self.y.include(p.y),
            z: self.z.include(p.z),
        }
    }

    /// Per-axis size of the box.
    pub fn extent(&self) -> Vec3 {
        Vec3::new(self.x.size(), self.y.size(), self.z.size())
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    ///
    /// Ties go to the earlier axis, so a cube splits on X.
    pub fn longest_axis(&self) -> usize {
        let size = self.extent();

        if size.x >= size.y && size.x >= size.z {
            0
        } else if size.y >= size.z {
            1
        } else {
            2
        }
    }

    /// An empty box (contains nothing).
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}
