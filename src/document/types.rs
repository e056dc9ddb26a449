//! Core chunk types
//!
//! Positioned words come from a word extractor; chunks are built from them
//! and are what the cache stores and the locator returns.

use serde::{Deserialize, Serialize};

/// A single word with its position on the page
///
/// Coordinates are page-local with the origin at the top-left corner,
/// so `top <= bottom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedWord {
    /// Word text (never contains whitespace)
    pub text: String,
    /// Left edge
    pub x0: f64,
    /// Top edge
    pub top: f64,
    /// Right edge
    pub x1: f64,
    /// Bottom edge
    pub bottom: f64,
}

impl PositionedWord {
    pub fn new(text: impl Into<String>, x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            text: text.into(),
            x0,
            top,
            x1,
            bottom,
        }
    }
}

/// Ordered words of one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageWords {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Words in extraction order
    pub words: Vec<PositionedWord>,
}

impl PageWords {
    pub fn new(page_number: u32, words: Vec<PositionedWord>) -> Self {
        Self { page_number, words }
    }
}

/// Smallest axis-aligned rectangle enclosing a set of words
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    /// Box of a single word
    pub fn of_word(word: &PositionedWord) -> Self {
        Self {
            x1: word.x0.min(word.x1),
            y1: word.top.min(word.bottom),
            x2: word.x0.max(word.x1),
            y2: word.top.max(word.bottom),
        }
    }

    /// Merge the boxes of all words; `None` for an empty slice
    pub fn enclosing(words: &[PositionedWord]) -> Option<Self> {
        let (first, rest) = words.split_first()?;
        Some(
            rest.iter()
                .fold(Self::of_word(first), |acc, w| acc.union(&Self::of_word(w))),
        )
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Whether `other` lies fully inside this box
    #[cfg(test)]
    pub(crate) fn contains(&self, other: &Self) -> bool {
        self.x1 <= other.x1 && self.y1 <= other.y1 && self.x2 >= other.x2 && self.y2 >= other.y2
    }
}

/// A fixed-size group of consecutive words from one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Block text
    pub content: String,
    /// Merged bounding box of the block's words
    pub bbox: BoundingBox,
    /// Globally unique identifier
    #[serde(rename = "uuid")]
    pub id: String,
    /// Page number (1-indexed)
    pub page_number: u32,
}

/// A target word paired with the first chunk containing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordMatch {
    pub word: String,
    pub chunk: Option<Chunk>,
}
