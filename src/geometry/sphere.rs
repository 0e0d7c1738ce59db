//! Octahedral geodesic sphere construction and caching.

use tracing::debug;

use super::error::GeometryError;
use super::mesh::Mesh;
use super::octahedron::octahedron;
use super::subdivide::surface_subdivide;

/// Highest supported subdivision level.
///
/// Face count grows by 4x per level; anything deeper is not addressable.
pub const MAX_SUBDIVISIONS: u32 = 24;

/// Vertex and face counts of a sphere at the given subdivision level.
///
/// Faces are `8 * 4^n`, and for a closed triangulated sphere `V = F / 2 + 2`.
/// Returns `None` if the counts overflow `u64`.
pub fn expected_counts(subdivisions: u32) -> Option<(u64, u64)> {
    let faces = 4u64.checked_pow(subdivisions)?.checked_mul(8)?;
    Some((faces / 2 + 2, faces))
}

/// Builds a geodesic sphere by subdividing the octahedron `subdivisions` times.
///
/// Every vertex lies at distance `radius` from the origin and every face is
/// wound counter-clockwise seen from outside. The result depends only on the
/// arguments, so callers may cache it (see [`SphereCache`]).
///
/// # Example
/// ```
/// use planetgen::geometry::build_sphere;
///
/// let mesh = build_sphere(1, 2.0).unwrap();
/// assert_eq!(mesh.vertex_count(), 18);
/// assert_eq!(mesh.face_count(), 32);
/// ```
pub fn build_sphere(subdivisions: u32, radius: f32) -> Result<Mesh, GeometryError> {
    if subdivisions > MAX_SUBDIVISIONS {
        return Err(GeometryError::SubdivisionTooDeep(subdivisions, MAX_SUBDIVISIONS));
    }
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(GeometryError::InvalidRadius(radius));
    }
    if let Some((vertex_count, _)) = expected_counts(subdivisions) {
        if vertex_count > u32::MAX as u64 {
            return Err(GeometryError::IndexOverflow(
                usize::try_from(vertex_count).unwrap_or(usize::MAX),
            ));
        }
    }

    let mut mesh = octahedron(radius);
    for level in 0..subdivisions {
        mesh.faces = surface_subdivide(&mut mesh.vertices, &mesh.faces, radius)?;
        debug!(
            level = level + 1,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "sphere level built"
        );
    }

    Ok(mesh)
}

/// Key identifying a cached sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SphereKey {
    subdivisions: u32,
    radius_bits: u32,
}

impl SphereKey {
    fn new(subdivisions: u32, radius: f32) -> Self {
        Self {
            subdivisions,
            radius_bits: radius.to_bits(),
        }
    }
}

/// Caller-owned cache of the undisplaced sphere.
///
/// Keyed by `(subdivisions, radius)`: asking for the same pair again reuses
/// the stored mesh, asking for a different pair rebuilds it. Terrain
/// parameters are not part of the key, so tweaking them never re-subdivides.
#[derive(Debug, Default)]
pub struct SphereCache {
    key: Option<SphereKey>,
    mesh: Mesh,
    builds: usize,
}

impl SphereCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sphere for `(subdivisions, radius)`, building it if needed.
    ///
    /// A failed build leaves the previous entry untouched.
    pub fn get_or_build(&mut self, subdivisions: u32, radius: f32) -> Result<&Mesh, GeometryError> {
        if self.contains(subdivisions, radius) {
            debug!(subdivisions, radius, "sphere cache hit");
        } else {
            self.mesh = build_sphere(subdivisions, radius)?;
            self.key = Some(SphereKey::new(subdivisions, radius));
            self.builds += 1;
        }
        Ok(&self.mesh)
    }

    /// Returns true if the cache holds the sphere for `(subdivisions, radius)`.
    pub fn contains(&self, subdivisions: u32, radius: f32) -> bool {
        self.key == Some(SphereKey::new(subdivisions, radius))
    }

    /// Drops the cached sphere.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.mesh = Mesh::default();
    }

    /// Number of times a sphere has actually been built by this cache.
    pub fn build_count(&self) -> usize {
        self.builds
    }
}
