//! Typeface JSON parsing and text layout.

use std::collections::HashMap;

use cgmath::Point2;
use serde::Deserialize;

use super::shape::{shapes_from_contours, Shape};

/// Glyph used when a character is missing from the font.
const FALLBACK_GLYPH: &str = "?";

/// Raw contents of a typeface JSON file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypefaceData {
    pub glyphs: HashMap<String, GlyphData>,
    #[serde(default)]
    pub family_name: String,
    pub resolution: f32,
    pub bounding_box: FontBounds,
    #[serde(default)]
    pub underline_thickness: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontBounds {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlyphData {
    /// Horizontal advance in font units
    pub ha: f32,
    #[serde(default)]
    pub x_min: Option<f32>,
    #[serde(default)]
    pub x_max: Option<f32>,
    /// Outline command stream; absent for blank glyphs such as space
    #[serde(default)]
    pub o: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PathCommand {
    MoveTo(Point2<f32>),
    LineTo(Point2<f32>),
    QuadTo {
        ctrl: Point2<f32>,
        to: Point2<f32>,
    },
    CubicTo {
        ctrl1: Point2<f32>,
        ctrl2: Point2<f32>,
        to: Point2<f32>,
    },
}

/// A loaded typeface font
#[derive(Debug, Clone)]
pub struct Font {
    data: TypefaceData,
}

impl Font {
    pub fn new(data: TypefaceData) -> Self {
        Self { data }
    }

    /// Parses a typeface JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    pub fn family_name(&self) -> &str {
        &self.data.family_name
    }

    pub fn data(&self) -> &TypefaceData {
        &self.data
    }

    /// Distance between consecutive baselines at the given size
    pub fn line_height(&self, size: f32) -> f32 {
        let bounds = &self.data.bounding_box;
        (bounds.y_max - bounds.y_min + self.data.underline_thickness) * self.scale(size)
    }

    fn scale(&self, size: f32) -> f32 {
        size / self.data.resolution
    }

    fn glyph(&self, ch: char) -> Option<&GlyphData> {
        let mut buf = [0u8; 4];
        let key: &str = ch.encode_utf8(&mut buf);
        self.data.glyphs.get(key).or_else(|| {
            log::warn!(
                "Character '{}' is missing from font '{}', using '{}'",
                ch,
                self.data.family_name,
                FALLBACK_GLYPH
            );
            self.data.glyphs.get(FALLBACK_GLYPH)
        })
    }

    /// Lays out `text` at `size` and returns the filled shapes of every glyph.
    ///
    /// Curves are flattened into `curve_segments` straight segments each.
    /// A `'\n'` starts a new line below the previous one.
    pub fn generate_shapes(&self, text: &str, size: f32, curve_segments: u32) -> Vec<Shape> {
        let scale = self.scale(size);
        let line_height = self.line_height(size);
        let divisions = curve_segments.max(1);

        let mut offset_x = 0.0;
        let mut offset_y = 0.0;
        let mut shapes = Vec::new();

        for ch in text.chars() {
            if ch == '\n' {
                offset_x = 0.0;
                offset_y -= line_height;
                continue;
            }

            let Some(glyph) = self.glyph(ch) else {
                log::warn!("Font '{}' has no fallback glyph, skipping '{}'", self.data.family_name, ch);
                continue;
            };

            if let Some(outline) = glyph.o.as_deref() {
                let commands = parse_outline(outline, scale, offset_x, offset_y);
                shapes.extend(shapes_from_contours(flatten(&commands, divisions)));
            }

            offset_x += glyph.ha * scale;
        }

        shapes
    }
}

/// Parses an outline command stream into absolute, scaled path commands.
///
/// Curve commands list the end point before their control points.
fn parse_outline(outline: &str, scale: f32, offset_x: f32, offset_y: f32) -> Vec<PathCommand> {
    let mut tokens = outline.split_whitespace();
    let mut commands = Vec::new();

    let next_point = |tokens: &mut std::str::SplitWhitespace| -> Option<Point2<f32>> {
        let x: f32 = tokens.next()?.parse().ok()?;
        let y: f32 = tokens.next()?.parse().ok()?;
        Some(Point2::new(x * scale + offset_x, y * scale + offset_y))
    };

    while let Some(token) = tokens.next() {
        let command = match token {
            "m" => next_point(&mut tokens).map(PathCommand::MoveTo),
            "l" => next_point(&mut tokens).map(PathCommand::LineTo),
            "q" => {
                let to = next_point(&mut tokens);
                let ctrl = next_point(&mut tokens);
                to.zip(ctrl).map(|(to, ctrl)| PathCommand::QuadTo { ctrl, to })
            }
            "b" => {
                let to = next_point(&mut tokens);
                let ctrl1 = next_point(&mut tokens);
                let ctrl2 = next_point(&mut tokens);
                match (to, ctrl1, ctrl2) {
                    (Some(to), Some(ctrl1), Some(ctrl2)) => {
                        Some(PathCommand::CubicTo { ctrl1, ctrl2, to })
                    }
                    _ => None,
                }
            }
            _ => continue,
        };

        match command {
            Some(command) => commands.push(command),
            None => {
                log::warn!("Truncated glyph outline command '{}'", token);
                break;
            }
        }
    }

    commands
}

/// Flattens path commands into point contours, one per `MoveTo`.
fn flatten(commands: &[PathCommand], divisions: u32) -> Vec<Vec<Point2<f32>>> {
    let mut contours = Vec::new();
    let mut current: Vec<Point2<f32>> = Vec::new();
    let mut cursor = Point2::new(0.0, 0.0);

    for command in commands {
        match *command {
            PathCommand::MoveTo(p) => {
                if !current.is_empty() {
                    contours.push(std::mem::take(&mut current));
                }
                current.push(p);
                cursor = p;
            }
            PathCommand::LineTo(p) => {
                current.push(p);
                cursor = p;
            }
            PathCommand::QuadTo { ctrl, to } => {
                for step in 1..=divisions {
                    let t = step as f32 / divisions as f32;
                    let s = 1.0 - t;
                    current.push(Point2::new(
                        s * s * cursor.x + 2.0 * s * t * ctrl.x + t * t * to.x,
                        s * s * cursor.y + 2.0 * s * t * ctrl.y + t * t * to.y,
                    ));
                }
                cursor = to;
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                for step in 1..=divisions {
                    let t = step as f32 / divisions as f32;
                    let s = 1.0 - t;
                    let (a, b, c, d) = (s * s * s, 3.0 * s * s * t, 3.0 * s * t * t, t * t * t);
                    current.push(Point2::new(
                        a * cursor.x + b * ctrl1.x + c * ctrl2.x + d * to.x,
                        a * cursor.y + b * ctrl1.y + c * ctrl2.y + d * to.y,
                    ));
                }
                cursor = to;
            }
        }
    }

    if !current.is_empty() {
        contours.push(current);
    }
    contours
}
