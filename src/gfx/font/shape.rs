//! Closed 2D shapes with holes, built from raw glyph contours.

use cgmath::Point2;

/// Contours with less area than this are dropped as degenerate.
const MIN_CONTOUR_AREA: f32 = 1e-9;

/// A filled region: one outer contour and any number of holes.
///
/// The outline winds counter-clockwise and holes wind clockwise (Y up), so
/// the right-hand normal of every edge points away from the filled region.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub outline: Vec<Point2<f32>>,
    pub holes: Vec<Vec<Point2<f32>>>,
}

impl Shape {
    /// The outline followed by every hole
    pub fn rings(&self) -> impl Iterator<Item = &[Point2<f32>]> {
        std::iter::once(self.outline.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    pub fn point_count(&self) -> usize {
        self.outline.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }
}

/// Shoelace area; positive for counter-clockwise contours.
pub fn signed_area(contour: &[Point2<f32>]) -> f32 {
    let n = contour.len();
    let mut area = 0.0;
    for i in 0..n {
        let p = contour[i];
        let q = contour[(i + 1) % n];
        area += p.x * q.y - q.x * p.y;
    }
    area * 0.5
}

/// Even-odd point in polygon test.
pub fn contains_point(contour: &[Point2<f32>], point: Point2<f32>) -> bool {
    let n = contour.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let a = contour[i];
        let b = contour[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Removes repeated consecutive points and a closing point equal to the first.
pub fn clean_contour(mut contour: Vec<Point2<f32>>) -> Vec<Point2<f32>> {
    contour.dedup();
    while contour.len() > 1 && contour.first() == contour.last() {
        contour.pop();
    }
    contour
}

/// Groups the contours of one glyph into shapes.
///
/// A contour nested inside an odd number of other contours is a hole and
/// belongs to the smallest enclosing solid; everything else is a solid. This
/// does not depend on the winding the font happens to use.
pub fn shapes_from_contours(contours: Vec<Vec<Point2<f32>>>) -> Vec<Shape> {
    let contours: Vec<Vec<Point2<f32>>> = contours
        .into_iter()
        .map(clean_contour)
        .filter(|c| c.len() >= 3 && signed_area(c).abs() > MIN_CONTOUR_AREA)
        .collect();

    let depths: Vec<usize> = contours
        .iter()
        .enumerate()
        .map(|(i, contour)| {
            contours
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && contains_point(other, contour[0]))
                .count()
        })
        .collect();

    let mut shapes: Vec<Shape> = Vec::new();
    let mut shape_of_contour: Vec<Option<usize>> = vec![None; contours.len()];

    for (i, contour) in contours.iter().enumerate() {
        if depths[i] % 2 == 0 {
            shape_of_contour[i] = Some(shapes.len());
            shapes.push(Shape {
                outline: oriented(contour.clone(), true),
                holes: Vec::new(),
            });
        }
    }

    for (i, contour) in contours.iter().enumerate() {
        if depths[i] % 2 == 0 {
            continue;
        }

        let parent = contours
            .iter()
            .enumerate()
            .filter(|(j, solid)| depths[*j] + 1 == depths[i] && contains_point(solid, contour[0]))
            .min_by(|(_, a), (_, b)| signed_area(a).abs().total_cmp(&signed_area(b).abs()))
            .and_then(|(j, _)| shape_of_contour[j]);

        match parent {
            Some(shape_index) => shapes[shape_index].holes.push(oriented(contour.clone(), false)),
            None => shapes.push(Shape {
                outline: oriented(contour.clone(), true),
                holes: Vec::new(),
            }),
        }
    }

    shapes
}

fn oriented(mut contour: Vec<Point2<f32>>, counter_clockwise: bool) -> Vec<Point2<f32>> {
    if (signed_area(&contour) > 0.0) != counter_clockwise {
        contour.reverse();
    }
    contour
}
