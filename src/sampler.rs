/*

    Random draws used by the box mask augmenter.

    Every function takes the random source explicitly so
    callers (and tests) decide how it is seeded.

    @date: 12 Nov, 2025
    @author: bartu
*/

use rand::{Rng, RngCore};
use rand::distr::Open01;

use crate::error::{AugmentError, AugmentResult};
use crate::interval::Interval;
use crate::numeric::*;

//////////////////////////////////////////////////////////////////////////
/// SAMPLING UTILS
//////////////////////////////////////////////////////////////////////////

/// Per-axis ranges [margin, dim - margin) in mask-local coordinates.
/// Fails if any axis has nothing left to draw from.
pub fn margin_intervals(dim: Coord, margin: Int) -> AugmentResult<[Interval; 3]> {
    let mut out = [Interval::EMPTY; 3];
    for (axis, int) in out.iter_mut().enumerate() {
        *int = Interval::new_with_margin(0, dim[axis], margin);
        if int.is_empty() {
            return Err(AugmentError::InvalidConfiguration(format!(
                "axis {axis} of the bounding region has size {}, must exceed twice the margin {margin}",
                dim[axis]
            )));
        }
    }
    Ok(out)
}

pub fn random_int(rng: &mut dyn RngCore, int: &Interval) -> Int {
    debug_assert!(int.validate());
    rng.random_range(int.min..int.max)
}

pub fn random_location(rng: &mut dyn RngCore, ranges: &[Interval; 3]) -> Coord {
    let z = random_int(rng, &ranges[0]);
    let y = random_int(rng, &ranges[1]);
    let x = random_int(rng, &ranges[2]);
    Coord::new(z, y, x)
}

/// Edge lengths drawn from [min_dim, max_dim] (inclusive), with the
/// Z edge divided by aspect_ratio to mimic thicker sections along Z.
pub fn random_edge_lengths(rng: &mut dyn RngCore, min_dim: Int, max_dim: Int, aspect_ratio: Int) -> Coord {
    let mut size = [0 as Int; 3];
    for s in size.iter_mut() {
        *s = rng.random_range(min_dim..=max_dim);
    }
    size[0] /= aspect_ratio; // Truncates toward zero
    Coord::from_array(size)
}

/// Uniform in (0, alpha), never exactly zero
pub fn random_alpha(rng: &mut dyn RngCore, alpha: Float) -> Float {
    let u: Float = rng.sample(Open01);
    u * alpha
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_margin_intervals() {
        let ranges = margin_intervals(Coord::new(100, 90, 61), 30).unwrap();
        assert_eq!(ranges[0], Interval::new(30, 70));
        assert_eq!(ranges[1], Interval::new(30, 60));
        assert_eq!(ranges[2], Interval::new(30, 31));

        let err = margin_intervals(Coord::new(100, 60, 100), 30).unwrap_err();
        assert!(matches!(err, AugmentError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(795);
        let ranges = margin_intervals(Coord::new(100, 100, 80), 30).unwrap();
        for _ in 0..1000 {
            let loc = random_location(&mut rng, &ranges);
            for axis in 0..3 {
                assert!(ranges[axis].min <= loc[axis] && loc[axis] < ranges[axis].max);
            }

            let size = random_edge_lengths(&mut rng, 30, 80, 10);
            assert!((3..=8).contains(&size[0]));
            assert!((30..=80).contains(&size[1]));
            assert!((30..=80).contains(&size[2]));

            let a = random_alpha(&mut rng, 0.5);
            assert!(a > 0.0 && a < 0.5);
        }
    }

    #[test]
    fn test_edge_lengths_hit_both_ends() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..2000 {
            let size = random_edge_lengths(&mut rng, 2, 4, 1);
            seen_min |= size[1] == 2;
            seen_max |= size[1] == 4;
        }
        assert!(seen_min && seen_max);
    }
}
