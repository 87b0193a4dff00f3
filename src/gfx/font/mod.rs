//! # Typeface Fonts
//!
//! Loads fonts stored in the typeface JSON format (`*.typeface.json`) and lays
//! out strings into closed 2D shapes ready for extrusion.
//!
//! A typeface file stores one outline command stream per glyph, expressed in
//! font units (`resolution` units per em). Layout scales every glyph to the
//! requested size and advances horizontally by the glyph's `ha` value.

pub mod shape;
pub mod typeface;

pub use shape::Shape;
pub use typeface::{Font, TypefaceData};
