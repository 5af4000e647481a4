/*

    Declare numeric types used throughout this repo.

    Box coordinates live on the integer voxel grid, so
    Coord is an integer vector (Z, Y, X ordering, i.e.
    coord.x holds the Z component). Mask values are f32
    to match the sample arrays they get multiplied into.

    WARNING: Coord components are i32, volumes are computed
    in i64 to avoid overflow on large regions.

    @date: 2 Oct, 2025
    @author: Bartu
*/

use bevy_math::IVec3;

pub type Int = i32;
pub type Float = f32; // Mask and sample element type
pub type Coord = IVec3; // (z, y, x) on the voxel grid
pub type Shape = Vec<usize>; // Full shape, leading dims are channels

pub const SPATIAL_DIMS: usize = 3;

pub fn approx_eq(a: Float, b: Float) -> bool {
    (a - b).abs() < 1e-6
}

/// Last three entries of a shape as a grid vector, None if the
/// shape has fewer than three dimensions or does not fit in i32.
pub fn spatial_size(shape: &[usize]) -> Option<Coord> {
    if shape.len() < SPATIAL_DIMS {
        return None;
    }
    let tail = &shape[shape.len() - SPATIAL_DIMS..];
    let mut out = [0 as Int; SPATIAL_DIMS];
    for (o, &s) in out.iter_mut().zip(tail) {
        *o = Int::try_from(s).ok()?;
    }
    Some(Coord::from_array(out))
}

/// Product of components, zero if any component is negative.
pub fn grid_volume(size: Coord) -> i64 {
    size.to_array()
        .iter()
        .map(|&s| s.max(0) as i64)
        .product()
}

pub fn to_usize3(v: Coord) -> [usize; 3] {
    let a = v.to_array();
    [a[0].max(0) as usize, a[1].max(0) as usize, a[2].max(0) as usize]
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_size_ignores_leading_dims() {
        assert_eq!(spatial_size(&[2, 5, 10, 20, 30]), Some(Coord::new(10, 20, 30)));
        assert_eq!(spatial_size(&[4, 8, 16]), Some(Coord::new(4, 8, 16)));
        assert_eq!(spatial_size(&[4, 8]), None);
    }

    #[test]
    fn test_grid_volume() {
        assert_eq!(grid_volume(Coord::new(100, 100, 100)), 1_000_000);
        assert_eq!(grid_volume(Coord::new(3, -1, 4)), 0);
        // Would overflow i32
        assert_eq!(grid_volume(Coord::new(2000, 2000, 2000)), 8_000_000_000);
    }
}
