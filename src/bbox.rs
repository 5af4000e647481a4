/*

    Axis aligned integer box on the voxel grid.

    A BBox covers the half-open range [min, max) along each
    axis. Boxes are values: translate, merge and intersect
    all return new boxes.

    @author: bartu
    @date: 9 Nov, 2025
*/

use std::fmt;

use crate::interval::Interval;
use crate::numeric::{Coord, grid_volume};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BBox {
    min: Coord,
    /// Never smaller than min on any axis
    max: Coord,
}

impl BBox {
    /// Box from corners. Any axis where max < min is collapsed to empty.
    pub fn new(min: Coord, max: Coord) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    pub fn new_from(zint: &Interval, yint: &Interval, xint: &Interval) -> Self {
        Self::new(
            Coord::new(zint.min, yint.min, xint.min),
            Coord::new(zint.max, yint.max, xint.max),
        )
    }

    /// Box of the given size whose center is `center`.
    /// For odd sizes the extra voxel goes to the upper side.
    pub fn centered(center: Coord, size: Coord) -> Self {
        let size = size.max(Coord::ZERO);
        let min = center - size / 2;
        Self::new(min, min + size)
    }

    pub fn min(&self) -> Coord {
        self.min
    }

    pub fn max(&self) -> Coord {
        self.max
    }

    pub fn size(&self) -> Coord {
        self.max - self.min
    }

    pub fn volume(&self) -> i64 {
        grid_volume(self.size())
    }

    pub fn is_empty(&self) -> bool {
        self.volume() == 0
    }

    pub fn axis(&self, i: usize) -> Interval {
        Interval::new(self.min[i], self.max[i])
    }

    pub fn axes(&self) -> [Interval; 3] {
        [self.axis(0), self.axis(1), self.axis(2)]
    }

    /// Bounding union of the two boxes
    pub fn merge(&self, other: &BBox) -> BBox {
        BBox::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Clipped overlap, empty if the boxes don't overlap
    pub fn intersect(&self, other: &BBox) -> BBox {
        let [z, y, x] = self.axes();
        let [oz, oy, ox] = other.axes();
        BBox::new_from(&z.intersect(&oz), &y.intersect(&oy), &x.intersect(&ox))
    }

    pub fn translate(&self, by: Coord) -> BBox {
        BBox {
            min: self.min + by,
            max: self.max + by,
        }
    }

    pub fn contains_box(&self, other: &BBox) -> bool {
        let mine = self.axes();
        let theirs = other.axes();
        mine.iter().zip(theirs.iter()).all(|(m, t)| m.contains_interval(t))
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..{}, {}..{}, {}..{}]",
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z
        )
    }
}

// Merge an iterator of boxes, None if there were none
pub fn merge_all<'a>(boxes: impl IntoIterator<Item = &'a BBox>) -> Option<BBox> {
    boxes.into_iter().fold(None, |acc, b| match acc {
        None => Some(*b),
        Some(a) => Some(a.merge(b)),
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered() {
        let b = BBox::centered(Coord::ZERO, Coord::new(100, 80, 81));
        assert_eq!(b.min(), Coord::new(-50, -40, -40));
        assert_eq!(b.max(), Coord::new(50, 40, 41));
        assert_eq!(b.size(), Coord::new(100, 80, 81));
        assert_eq!(b.volume(), 100 * 80 * 81);
    }

    #[test]
    fn test_merge_of_centered_boxes() {
        let a = BBox::centered(Coord::ZERO, Coord::splat(100));
        let b = BBox::centered(Coord::ZERO, Coord::splat(80));
        let m = a.merge(&b);
        assert_eq!(m, a);
        assert!(m.contains_box(&b));

        let c = BBox::centered(Coord::ZERO, Coord::new(10, 200, 20));
        let m = a.merge(&c);
        assert_eq!(m.min(), Coord::new(-50, -100, -50));
        assert_eq!(m.size(), Coord::new(100, 200, 100));
    }

    #[test]
    fn test_intersect_clips() {
        let region = BBox::centered(Coord::ZERO, Coord::splat(100));
        let corner = BBox::centered(Coord::new(45, -45, 0), Coord::splat(20));
        let clipped = region.intersect(&corner);
        assert_eq!(clipped.min(), Coord::new(35, -50, -10));
        assert_eq!(clipped.max(), Coord::new(50, -35, 10));
        assert!(region.contains_box(&clipped));

        let far = BBox::centered(Coord::splat(500), Coord::splat(10));
        assert!(region.intersect(&far).is_empty());
    }

    #[test]
    fn test_translate_returns_new_box() {
        let b = BBox::centered(Coord::ZERO, Coord::splat(10));
        let t = b.translate(Coord::splat(5));
        assert_eq!(b.min(), Coord::splat(-5)); // untouched
        assert_eq!(t.min(), Coord::ZERO);
        assert_eq!(t.size(), b.size());
    }

    #[test]
    fn test_merge_all() {
        assert!(merge_all(&[] as &[BBox]).is_none());
        let boxes = [
            BBox::centered(Coord::ZERO, Coord::splat(4)),
            BBox::centered(Coord::ZERO, Coord::new(2, 6, 2)),
        ];
        let m = merge_all(&boxes).unwrap();
        assert_eq!(m.size(), Coord::new(4, 6, 4));
    }
}
