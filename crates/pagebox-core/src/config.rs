//! Builder configuration.

use crate::color::SerializableColor;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Storage key the page snapshot is saved under.
pub const DEFAULT_STORAGE_KEY: &str = "builderSave";

/// Configuration for the page builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Key of the single storage entry holding the saved page.
    pub storage_key: String,
    /// Base coordinate of the floating box cascade (both axes).
    pub float_origin: f64,
    /// Per-box cascade increment (both axes).
    pub float_step: f64,
    /// Initial size of a new floating box.
    pub float_size: Size,
    pub card_glyph: String,
    pub card_title: String,
    pub card_body: String,
    pub float_glyph: String,
    pub float_text: String,
    pub background: SerializableColor,
    /// Longest glyph accepted from an icon input, in characters.
    pub max_icon_chars: usize,
    /// Rebuild the page from the saved snapshot at startup.
    pub restore_on_load: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            float_origin: 80.0,
            float_step: 40.0,
            float_size: Size::new(220.0, 140.0),
            card_glyph: "✨".to_string(),
            card_title: "Uusi otsikko".to_string(),
            card_body: "Kirjoita teksti tähän...".to_string(),
            float_glyph: "🌸".to_string(),
            float_text: "Kelluva laatikko".to_string(),
            background: SerializableColor::white(),
            max_icon_chars: 2,
            restore_on_load: false,
        }
    }
}
