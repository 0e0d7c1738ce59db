//! Radial terrain displacement from layered noise.
//!
//! Each vertex is pushed along its own direction from the origin by a factor
//! derived from several noise octaves, giving continents, hills and fine
//! detail on top of the base sphere.

use glam::Vec3;
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::noise::NoiseSampler;

/// Noise octaves as `(frequency, weight)` pairs, coarse to fine.
pub const OCTAVES: [(f32, f32); 6] = [
    (1.0, 1.0),
    (3.0, 1.0),
    (7.0, 0.7),
    (11.0, 0.5),
    (15.0, 0.47),
    (21.0, 0.3),
];

/// Value around which the hill shaping term changes sign.
pub const HILL_PIVOT: f32 = 0.8;

/// Frequency of the unweighted detail octave added after hill shaping.
pub const DETAIL_FREQUENCY: f32 = 33.0;

/// Smallest allowed radial scale factor.
///
/// Keeps displaced vertices on the same side of the origin even for extreme
/// influence values.
pub const MIN_RADIAL_SCALE: f32 = 1e-3;

/// Errors that can occur while forming terrain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    #[error("Invalid base radius: {0} (must be positive and finite)")]
    InvalidRadius(f32),
    #[error("Terrain influence must be finite, got {0}")]
    NonFiniteInfluence(f32),
    #[error("Noise offset must be finite, got {0:?}")]
    NonFiniteOffset([f32; 3]),
}

/// Raw (unscaled) displacement at a point in noise space.
///
/// Sums the weighted [`OCTAVES`], sharpens the result with
/// `value += value * (value - HILL_PIVOT)` so high regions bulge into hills,
/// then adds one unweighted sample at [`DETAIL_FREQUENCY`].
pub fn displacement<S: NoiseSampler + ?Sized>(sampler: &S, point: Vec3) -> f32 {
    let Vec3 { x, y, z } = point;

    let mut value = OCTAVES
        .iter()
        .map(|&(frequency, weight)| sampler.sample(x, y, z, frequency) * weight)
        .sum::<f32>();

    // Hills
    value += value * (value - HILL_PIVOT);

    value + sampler.sample(x, y, z, DETAIL_FREQUENCY)
}

/// Displaces sphere vertices radially in place.
///
/// For every vertex `v` the noise is sampled at `offset + v / radius`, scaled
/// by `influence`, and the vertex becomes `v * (1 + value)`. Vertices are
/// independent of each other and processed in parallel.
///
/// # Arguments
/// * `vertices` - Vertex positions of a sphere built at `radius`
/// * `radius` - Base radius the sphere was built with
/// * `offset` - Translation of the sampling point in noise space
/// * `influence` - Displacement strength, typically in [-1, 1]
/// * `sampler` - Noise field to sample
pub fn form_terrain<S: NoiseSampler + ?Sized>(
    vertices: &mut [Vec3],
    radius: f32,
    offset: Vec3,
    influence: f32,
    sampler: &S,
) -> Result<(), TerrainError> {
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(TerrainError::InvalidRadius(radius));
    }
    if !influence.is_finite() {
        return Err(TerrainError::NonFiniteInfluence(influence));
    }
    if !offset.is_finite() {
        return Err(TerrainError::NonFiniteOffset(offset.to_array()));
    }

    vertices.par_iter_mut().for_each(|vertex| {
        let value = displacement(sampler, offset + *vertex / radius) * influence;
        *vertex *= (1.0 + value).max(MIN_RADIAL_SCALE);
    });

    debug!(vertices = vertices.len(), influence, "terrain formed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{build_sphere, is_radial_multiple};
    use crate::noise::{NoiseKind, PerlinNoise, SimplexNoise};

    #[test]
    fn test_displacement_constant_field() {
        let constant = |_x: f32, _y: f32, _z: f32, _f: f32| -> f32 { 0.1 };
        let weight_sum: f32 = OCTAVES.iter().map(|&(_, w)| w).sum();
        let base = 0.1 * weight_sum;
        let expected = base + base * (base - HILL_PIVOT) + 0.1;

        let value = displacement(&constant, Vec3::new(0.3, 0.2, 0.1));
        assert!((value - expected).abs() < 1e-6, "expected {}, got {}", expected, value);
    }

    #[test]
    fn test_detail_octave_is_unshaped() {
        // Only the detail frequency contributes: no hill shaping applies to it
        let detail_only = |_x: f32, _y: f32, _z: f32, f: f32| -> f32 {
            if f == DETAIL_FREQUENCY { 1.0 } else { 0.0 }
        };
        assert_eq!(displacement(&detail_only, Vec3::ONE), 1.0);

        // Only the base octave contributes: 1 + 1 * (1 - 0.8)
        let base_only = |_x: f32, _y: f32, _z: f32, f: f32| -> f32 {
            if f == 1.0 { 1.0 } else { 0.0 }
        };
        assert!((displacement(&base_only, Vec3::ONE) - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_sample_point_uses_offset_and_radius() {
        let x_detail = |x: f32, _y: f32, _z: f32, f: f32| -> f32 {
            if f == DETAIL_FREQUENCY { x } else { 0.0 }
        };
        let mut vertices = vec![Vec3::new(2.0, 0.0, 0.0)];

        form_terrain(&mut vertices, 2.0, Vec3::new(0.5, 0.0, 0.0), 0.1, &x_detail).unwrap();

        // sample.x = 0.5 + 2 / 2 = 1.5, value = 1.5 * 0.1
        assert!((vertices[0].x - 2.0 * 1.15).abs() < 1e-6);
        assert_eq!(vertices[0].y, 0.0);
    }

    #[test]
    fn test_zero_influence_is_identity() {
        let original = build_sphere(3, 1.7).unwrap();
        for kind in NoiseKind::all() {
            let mut vertices = original.vertices.clone();
            let sampler = kind.sampler(0);
            form_terrain(&mut vertices, 1.7, Vec3::new(3.0, -1.0, 0.5), 0.0, sampler.as_ref()).unwrap();
            assert_eq!(vertices, original.vertices);
        }
    }

    #[test]
    fn test_displacement_is_radial() {
        let original = build_sphere(3, 1.0).unwrap();
        let mut vertices = original.vertices.clone();
        form_terrain(&mut vertices, 1.0, Vec3::ZERO, 0.25, &PerlinNoise::new(9)).unwrap();

        let mut moved = 0;
        for (before, after) in original.vertices.iter().zip(&vertices) {
            assert!(is_radial_multiple(*before, *after), "{:?} -> {:?} is not radial", before, after);
            if (before.length() - after.length()).abs() > 1e-6 {
                moved += 1;
            }
        }
        assert!(moved > 0, "terrain should displace at least some vertices");
    }

    #[test]
    fn test_extreme_influence_stays_outside_origin() {
        let strong = |_x: f32, _y: f32, _z: f32, _f: f32| -> f32 { 1.0 };
        let mut vertices = vec![Vec3::new(0.0, 3.0, 0.0), Vec3::new(-3.0, 0.0, 0.0)];
        form_terrain(&mut vertices, 3.0, Vec3::ZERO, -1.0, &strong).unwrap();

        assert!((vertices[0] - Vec3::new(0.0, 3.0 * MIN_RADIAL_SCALE, 0.0)).length() < 1e-6);
        assert!(vertices[1].x < 0.0);
    }

    #[test]
    fn test_purity_across_meshes() {
        let sampler = SimplexNoise::new(5);
        let offset = Vec3::new(10.0, 20.0, 30.0);

        let mut a = build_sphere(3, 2.0).unwrap().vertices;
        let mut b = build_sphere(3, 2.0).unwrap().vertices;
        form_terrain(&mut a, 2.0, offset, 0.05, &sampler).unwrap();
        form_terrain(&mut b, 2.0, offset, 0.05, &sampler).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_order_independent() {
        let sampler = PerlinNoise::new(11);
        let base = build_sphere(2, 1.0).unwrap().vertices;

        let mut forward = base.clone();
        let mut reversed: Vec<Vec3> = base.iter().rev().copied().collect();
        form_terrain(&mut forward, 1.0, Vec3::ONE, 0.1, &sampler).unwrap();
        form_terrain(&mut reversed, 1.0, Vec3::ONE, 0.1, &sampler).unwrap();

        reversed.reverse();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let sampler = PerlinNoise::new(0);
        let mut vertices = vec![Vec3::X];
        assert_eq!(
            form_terrain(&mut vertices, 0.0, Vec3::ZERO, 0.1, &sampler),
            Err(TerrainError::InvalidRadius(0.0))
        );
        assert!(form_terrain(&mut vertices, 1.0, Vec3::ZERO, f32::INFINITY, &sampler).is_err());
        assert!(form_terrain(&mut vertices, 1.0, Vec3::new(f32::NAN, 0.0, 0.0), 0.1, &sampler).is_err());
        assert_eq!(vertices, vec![Vec3::X]);
    }
}
