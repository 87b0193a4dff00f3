//! # Extruded Text
//!
//! Turns a string laid out with a typeface font into a closed 3D mesh: a front
//! cap, a back cap, side walls and an optional bevel ring on both edges.
//!
//! Every triangle gets its own three vertices and a flat face normal, which
//! keeps the bevel edges crisp under matcap shading.

use std::f32::consts::FRAC_PI_2;

use cgmath::{InnerSpace, Point2, Vector2, Vector3};

use super::GeometryData;
use crate::error::GeometryError;
use crate::gfx::font::{Font, Shape};

/// Bevel vectors longer than this are shortened to avoid spikes at sharp corners.
const MAX_MITER_LENGTH: f32 = 2.0;

/// Extrusion parameters for text geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextGeometryParams {
    /// Glyph height in world units (one em)
    pub size: f32,
    /// Extrusion depth along +Z
    pub depth: f32,
    /// Straight segments used per curve when flattening outlines
    pub curve_segments: u32,
    /// Subdivisions of the side walls along the extrusion
    pub steps: u32,
    pub bevel_enabled: bool,
    /// How far the bevel extends beyond the front and back faces
    pub bevel_thickness: f32,
    /// How far the bevel extends outward from the outline
    pub bevel_size: f32,
    /// Outline offset where the bevel starts
    pub bevel_offset: f32,
    pub bevel_segments: u32,
}

impl Default for TextGeometryParams {
    fn default() -> Self {
        Self {
            size: 0.5,
            depth: 0.2,
            curve_segments: 1,
            steps: 1,
            bevel_enabled: true,
            bevel_thickness: 0.02,
            bevel_size: 0.02,
            bevel_offset: 0.0,
            bevel_segments: 1,
        }
    }
}

/// Generate extruded text geometry
///
/// The text starts at the origin with its baseline on `y = 0` and extends
/// along +Z; call [`GeometryData::center`] to center it.
pub fn generate_text(
    font: &Font,
    text: &str,
    params: &TextGeometryParams,
) -> Result<GeometryData, GeometryError> {
    let shapes = font.generate_shapes(text, params.size, params.curve_segments);
    if shapes.is_empty() {
        return Err(GeometryError::EmptyText);
    }

    let layers = layer_profile(params);
    let mut data = GeometryData::new();
    for shape in &shapes {
        extrude_shape(shape, &layers, &mut data)?;
    }

    Ok(data)
}

/// A slice through the extrusion: its z and how far the outline is pushed out.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layer {
    z: f32,
    offset: f32,
}

fn layer_profile(params: &TextGeometryParams) -> Vec<Layer> {
    let steps = params.steps.max(1);
    let mut layers = Vec::new();

    if !params.bevel_enabled {
        layers.push(Layer { z: 0.0, offset: 0.0 });
        for s in 1..=steps {
            layers.push(Layer {
                z: params.depth * s as f32 / steps as f32,
                offset: 0.0,
            });
        }
        return layers;
    }

    let segments = params.bevel_segments.max(1);
    let bevel = |b: u32| {
        let t = b as f32 / segments as f32;
        (
            params.bevel_thickness * (t * FRAC_PI_2).cos(),
            params.bevel_size * (t * FRAC_PI_2).sin() + params.bevel_offset,
        )
    };

    for b in 0..segments {
        let (z, offset) = bevel(b);
        layers.push(Layer { z: -z, offset });
    }

    let full = params.bevel_size + params.bevel_offset;
    layers.push(Layer { z: 0.0, offset: full });
    for s in 1..=steps {
        layers.push(Layer {
            z: params.depth * s as f32 / steps as f32,
            offset: full,
        });
    }

    for b in (0..segments).rev() {
        let (z, offset) = bevel(b);
        layers.push(Layer {
            z: params.depth + z,
            offset,
        });
    }

    layers
}

fn extrude_shape(
    shape: &Shape,
    layers: &[Layer],
    data: &mut GeometryData,
) -> Result<(), GeometryError> {
    let mut points: Vec<Point2<f32>> = Vec::with_capacity(shape.point_count());
    let mut movements: Vec<Vector2<f32>> = Vec::with_capacity(shape.point_count());
    let mut ring_ranges = Vec::new();
    let mut coords: Vec<f64> = Vec::with_capacity(shape.point_count() * 2);
    let mut hole_indices = Vec::new();

    for (ring_index, ring) in shape.rings().enumerate() {
        if ring_index > 0 {
            hole_indices.push(points.len());
        }
        ring_ranges.push(points.len()..points.len() + ring.len());
        movements.extend(bevel_vectors(ring));
        for p in ring {
            coords.push(p.x as f64);
            coords.push(p.y as f64);
            points.push(*p);
        }
    }

    let triangles = earcutr::earcut(&coords, &hole_indices, 2)
        .map_err(|e| GeometryError::Triangulation(format!("{:?}", e)))?;

    let at = |layer: &Layer, i: usize| -> Vector3<f32> {
        let p = points[i] + movements[i] * layer.offset;
        Vector3::new(p.x, p.y, layer.z)
    };

    let (Some(front), Some(back)) = (layers.first(), layers.last()) else {
        return Ok(());
    };

    // Caps: front faces -Z, back faces +Z
    for tri in triangles.chunks_exact(3) {
        let (a, mut b, mut c) = (tri[0], tri[1], tri[2]);
        if cross_2d(points[a], points[b], points[c]) < 0.0 {
            std::mem::swap(&mut b, &mut c);
        }
        push_triangle(data, at(back, a), at(back, b), at(back, c));
        push_triangle(data, at(front, a), at(front, c), at(front, b));
    }

    // Side walls between consecutive layers
    for range in ring_ranges {
        let len = range.len();
        for pair in layers.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            for k in 0..len {
                let i = range.start + k;
                let j = range.start + (k + 1) % len;
                let (a0, b0) = (at(lower, i), at(lower, j));
                let (a1, b1) = (at(upper, i), at(upper, j));
                push_triangle(data, a0, b0, b1);
                push_triangle(data, a0, b1, a1);
            }
        }
    }

    Ok(())
}

fn cross_2d(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) -> f32 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Right-hand normal of the edge `a -> b`, zero for a degenerate edge.
fn edge_normal(a: Point2<f32>, b: Point2<f32>) -> Vector2<f32> {
    let d = b - a;
    if d.magnitude2() == 0.0 {
        return Vector2::new(0.0, 0.0);
    }
    Vector2::new(d.y, -d.x).normalize()
}

/// Per-vertex offset directions that move every edge outward by one unit.
fn bevel_vectors(ring: &[Point2<f32>]) -> Vec<Vector2<f32>> {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            let n1 = edge_normal(prev, ring[i]);
            let n2 = edge_normal(ring[i], next);

            let denom = 1.0 + n1.dot(n2);
            if denom < 1e-3 {
                return n1;
            }
            let miter = (n1 + n2) / denom;
            if miter.magnitude() > MAX_MITER_LENGTH {
                miter.normalize_to(MAX_MITER_LENGTH)
            } else {
                miter
            }
        })
        .collect()
}

fn push_triangle(data: &mut GeometryData, a: Vector3<f32>, b: Vector3<f32>, c: Vector3<f32>) {
    let normal = (b - a).cross(c - a);
    let normal = if normal.magnitude2() > 0.0 {
        normal.normalize()
    } else {
        Vector3::unit_z()
    };

    let base = data.vertices.len() as u32;
    for v in [a, b, c] {
        data.vertices.push(v.into());
        data.normals.push(normal.into());
    }
    data.indices.extend_from_slice(&[base, base + 1, base + 2]);
}
