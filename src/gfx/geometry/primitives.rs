//! # Primitive Shape Generation
//!
//! Procedural primitives with smooth vertex normals.

use super::GeometryData;
use std::f32::consts::PI;

/// Parameters of a torus lying in the XY plane around the Z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusParams {
    /// Distance from the torus center to the center of the tube
    pub radius: f32,
    /// Radius of the tube
    pub tube: f32,
    /// Segments around the tube cross-section
    pub radial_segments: u32,
    /// Segments along the ring
    pub tubular_segments: u32,
    /// Central angle covered by the ring, in radians
    pub arc: f32,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            radius: 0.3,
            tube: 0.2,
            radial_segments: 20,
            tubular_segments: 45,
            arc: 2.0 * PI,
        }
    }
}

/// Generate a torus centered at the origin
///
/// Vertices form a `(radial_segments + 1) x (tubular_segments + 1)` grid with
/// duplicated seams; normals point away from the tube's center line.
pub fn generate_torus(params: &TorusParams) -> GeometryData {
    let mut data = GeometryData::new();

    let radial_segs = params.radial_segments.max(2);
    let tubular_segs = params.tubular_segments.max(3);

    for j in 0..=radial_segs {
        let v = j as f32 / radial_segs as f32 * 2.0 * PI;
        let (sin_v, cos_v) = v.sin_cos();

        for i in 0..=tubular_segs {
            let u = i as f32 / tubular_segs as f32 * params.arc;
            let (sin_u, cos_u) = u.sin_cos();

            let x = (params.radius + params.tube * cos_v) * cos_u;
            let y = (params.radius + params.tube * cos_v) * sin_u;
            let z = params.tube * sin_v;
            data.vertices.push([x, y, z]);

            // Direction from the tube's center line
            let nx = x - params.radius * cos_u;
            let ny = y - params.radius * sin_u;
            let len = (nx * nx + ny * ny + z * z).sqrt();
            if len > 0.0 {
                data.normals.push([nx / len, ny / len, z / len]);
            } else {
                data.normals.push([cos_u, sin_u, 0.0]);
            }
        }
    }

    let row = tubular_segs + 1;
    for j in 1..=radial_segs {
        for i in 1..=tubular_segs {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;

            data.indices.extend_from_slice(&[a, b, d]);
            data.indices.extend_from_slice(&[b, c, d]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_torus_generation() {
        let torus = generate_torus(&TorusParams::default());
        assert_eq!(torus.vertex_count(), 21 * 46);
        assert_eq!(torus.indices.len(), 20 * 45 * 6);
        assert_eq!(torus.vertices.len(), torus.normals.len());
        assert!(torus
            .indices
            .iter()
            .all(|&i| (i as usize) < torus.vertex_count()));
    }

    #[test]
    fn test_torus_extent() {
        let params = TorusParams::default();
        let torus = generate_torus(&params);
        let bounds = torus.bounding_box().unwrap();
        let outer = params.radius + params.tube;

        assert!((bounds.max.x - outer).abs() < 1e-4);
        // 45 tubular segments never land exactly on u = PI
        assert!((bounds.min.x + outer).abs() < 5e-3);
        assert!((bounds.max.z - params.tube).abs() < 1e-4);
        assert!((bounds.min.z + params.tube).abs() < 1e-4);
    }

    #[test]
    fn test_torus_normals_are_unit_length() {
        let torus = generate_torus(&TorusParams::default());
        for n in &torus.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }
}
