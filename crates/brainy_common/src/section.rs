//! Normalized response content: sections and bundles.
//!
//! The service returns differently shaped payloads depending on mode and
//! server version. Everything is normalized into an ordered list of tagged
//! sections so that presentation never branches on raw object keys.

use serde::{Deserialize, Serialize};

/// Discriminant for a section's content shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Text,
    Flashcard,
    ImageSet,
    VideoSet,
}

/// Content of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionPayload {
    /// Markdown body.
    Text { body: String },
    /// Front/back study card.
    Flashcard { front: String, back: String },
    /// Ordered base64-encoded image references.
    ImageSet { images: Vec<String> },
    /// Ordered video URLs.
    VideoSet { urls: Vec<String> },
}

/// One normalized unit of response content. Order is the order the service
/// returned it in and is significant (display order, clue numbering).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    pub payload: SectionPayload,
}

impl Section {
    pub fn text(key: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            payload: SectionPayload::Text { body: body.into() },
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self.payload {
            SectionPayload::Text { .. } => SectionKind::Text,
            SectionPayload::Flashcard { .. } => SectionKind::Flashcard,
            SectionPayload::ImageSet { .. } => SectionKind::ImageSet,
            SectionPayload::VideoSet { .. } => SectionKind::VideoSet,
        }
    }

    /// Only text sections take part in clue-by-clue disclosure.
    pub fn is_revealable(&self) -> bool {
        self.kind() == SectionKind::Text
    }
}

/// Canonical output of normalization, for both response modes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBundle {
    pub sections: Vec<Section>,
}

impl ResponseBundle {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of sections subject to progressive reveal.
    pub fn text_section_count(&self) -> usize {
        self.sections.iter().filter(|s| s.is_revealable()).count()
    }

    /// Text sections in order, with their 1-based clue numbers.
    pub fn clues(&self) -> impl Iterator<Item = (usize, &Section)> {
        self.sections
            .iter()
            .filter(|s| s.is_revealable())
            .enumerate()
            .map(|(i, s)| (i + 1, s))
    }
}
