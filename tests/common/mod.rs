#![allow(dead_code)]

use bees_knees::gfx::{font::Font, resources::MatcapTexture, scene::SceneAssets};

/// Minimal typeface: every glyph used by the demo text is a box, "e" and "o"
/// have a hole.
pub const FONT_JSON: &str = r#"{
    "familyName": "Box Sans",
    "resolution": 1000,
    "underlineThickness": 50,
    "boundingBox": { "xMin": 0, "yMin": -200, "xMax": 900, "yMax": 800 },
    "glyphs": {
        "t": { "ha": 400, "o": "m 0 0 l 300 0 l 300 700 l 0 700 z " },
        "h": { "ha": 600, "o": "m 0 0 l 500 0 l 500 700 l 0 700 z " },
        "b": { "ha": 600, "o": "m 0 0 l 500 0 l 500 700 l 0 700 z " },
        "k": { "ha": 600, "o": "m 0 0 l 500 0 l 500 700 l 0 700 z " },
        "n": { "ha": 600, "o": "m 0 0 l 500 0 l 500 500 l 0 500 z " },
        "s": { "ha": 500, "o": "m 0 0 l 400 0 l 400 500 l 0 500 z " },
        "'": { "ha": 200, "o": "m 0 500 l 100 500 l 100 700 l 0 700 z " },
        "e": { "ha": 600, "o": "m 0 0 l 500 0 l 500 500 l 0 500 z m 150 150 l 150 350 l 350 350 l 350 150 z " },
        "?": { "ha": 500, "o": "m 0 0 l 400 0 l 400 700 l 0 700 z " },
        " ": { "ha": 250 }
    }
}"#;

pub fn assets() -> SceneAssets {
    SceneAssets {
        font: Font::from_json(FONT_JSON).expect("test font parses"),
        matcap: MatcapTexture::solid([180, 160, 90, 255]),
    }
}
