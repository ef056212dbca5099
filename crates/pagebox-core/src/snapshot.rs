//! Persisted form of a page.
//!
//! A snapshot is a flat list of records, one per card or floating box, plus
//! the container geometry. Cards come first in grid order, then floating
//! boxes in creation order.

use crate::color::SerializableColor;
use crate::geometry::Frame;
use crate::label::Label;
use crate::page::{Card, FloatingBox, Page};
use serde::{Deserialize, Serialize};

/// Kind of a persisted unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Card,
    Floating,
}

/// One card or floating box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub kind: UnitKind,
    /// Floating box creation tag; absent for cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<u32>,
    /// Floating box geometry; absent for cards, whose place is their order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<Frame>,
    /// Background as `#rrggbb`.
    pub background: String,
    #[serde(default)]
    pub glyph: Option<String>,
    /// Card title text; empty for floating boxes.
    #[serde(default)]
    pub title: String,
    /// Card body or floating box text.
    #[serde(default)]
    pub text: String,
}

impl UnitRecord {
    fn from_card(card: &Card) -> Self {
        Self {
            kind: UnitKind::Card,
            tag: None,
            frame: None,
            background: card.background.to_hex(),
            glyph: card.title.glyph.clone(),
            title: card.title.text.clone(),
            text: card.body.clone(),
        }
    }

    fn from_float(float: &FloatingBox) -> Self {
        Self {
            kind: UnitKind::Floating,
            tag: Some(float.tag),
            frame: Some(float.frame),
            background: float.background.to_hex(),
            glyph: float.label.glyph.clone(),
            title: String::new(),
            text: float.label.text.clone(),
        }
    }

    fn background(&self) -> SerializableColor {
        SerializableColor::parse_hex(&self.background).unwrap_or_else(|e| {
            log::warn!("Saved {:?} has a bad background: {}", self.kind, e);
            SerializableColor::default()
        })
    }
}

/// Serializable snapshot of a whole page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub container: Option<Frame>,
    #[serde(default)]
    pub float_counter: u32,
    #[serde(default)]
    pub records: Vec<UnitRecord>,
}

impl PageSnapshot {
    /// Capture the current state of a page.
    pub fn capture(page: &Page) -> Self {
        let records = page
            .cards
            .iter()
            .map(UnitRecord::from_card)
            .chain(page.floats.iter().map(UnitRecord::from_float))
            .collect();
        Self {
            container: page.container,
            float_counter: page.float_counter(),
            records,
        }
    }

    /// Rebuild a page from the snapshot.
    ///
    /// Units get fresh ids. A floating record without a frame is placed at
    /// the origin with zero size. The float counter never goes below the
    /// highest restored tag, so new boxes keep cascading past old ones.
    pub fn into_page(self) -> Page {
        let mut page = Page {
            container: self.container,
            ..Page::new()
        };
        let mut counter = self.float_counter;
        for record in self.records {
            let background = record.background();
            match record.kind {
                UnitKind::Card => {
                    let title = Label {
                        glyph: record.glyph,
                        text: record.title,
                    };
                    page.push_card(Card::new(title, record.text, background));
                }
                UnitKind::Floating => {
                    let tag = record.tag.unwrap_or(0);
                    counter = counter.max(tag);
                    let label = Label {
                        glyph: record.glyph,
                        text: record.text,
                    };
                    let frame = record
                        .frame
                        .unwrap_or_else(|| Frame::new(kurbo::Point::ZERO, 0.0, 0.0));
                    page.floats.push(FloatingBox::new(tag, frame, label, background));
                }
            }
        }
        page.float_counter = counter;
        page
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
