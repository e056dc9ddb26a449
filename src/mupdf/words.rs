//! Word Extraction Helpers
//!
//! Groups the characters of MuPDF structured-text lines into positioned
//! words. A word ends at whitespace, at the end of a line, or where the
//! horizontal gap to the next character exceeds `x_tolerance`.

use mupdf::{Page, TextPageOptions};

use crate::document::{PositionedWord, Result};

/// Default horizontal gap (in page units) tolerated inside a word
pub const DEFAULT_X_TOLERANCE: f32 = 3.0;

/// Options for word extraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordOptions {
    /// Largest gap between two characters of the same word
    pub x_tolerance: f32,
}

impl Default for WordOptions {
    fn default() -> Self {
        Self {
            x_tolerance: DEFAULT_X_TOLERANCE,
        }
    }
}

/// Character box in page coordinates (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharBox {
    pub x0: f32,
    pub top: f32,
    pub x1: f32,
    pub bottom: f32,
}

/// Word being assembled from consecutive characters
struct WordBuilder {
    text: String,
    bounds: CharBox,
}

impl WordBuilder {
    fn start(c: char, bounds: CharBox) -> Self {
        Self {
            text: c.to_string(),
            bounds,
        }
    }

    fn push(&mut self, c: char, bounds: CharBox) {
        self.text.push(c);
        self.bounds.x0 = self.bounds.x0.min(bounds.x0);
        self.bounds.top = self.bounds.top.min(bounds.top);
        self.bounds.x1 = self.bounds.x1.max(bounds.x1);
        self.bounds.bottom = self.bounds.bottom.max(bounds.bottom);
    }

    fn finish(self) -> PositionedWord {
        PositionedWord::new(
            self.text,
            self.bounds.x0 as f64,
            self.bounds.top as f64,
            self.bounds.x1 as f64,
            self.bounds.bottom as f64,
        )
    }
}

/// Group one line's characters into words
pub fn group_line_chars<I>(chars: I, options: &WordOptions) -> Vec<PositionedWord>
where
    I: IntoIterator<Item = (char, CharBox)>,
{
    let mut words = Vec::new();
    let mut current: Option<WordBuilder> = None;

    for (c, bounds) in chars {
        if c.is_whitespace() {
            if let Some(word) = current.take() {
                words.push(word.finish());
            }
            continue;
        }

        let continues = current
            .as_ref()
            .is_some_and(|word| bounds.x0 - word.bounds.x1 <= options.x_tolerance);

        if continues {
            if let Some(word) = current.as_mut() {
                word.push(c, bounds);
            }
        } else if let Some(word) = current.replace(WordBuilder::start(c, bounds)) {
            words.push(word.finish());
        }
    }

    if let Some(word) = current {
        words.push(word.finish());
    }

    words
}

/// Extract the positioned words of a page in structured-text order
pub fn extract_page_words(page: &Page, options: &WordOptions) -> Result<Vec<PositionedWord>> {
    let text_page = page.to_text_page(TextPageOptions::empty())?;
    let mut words = Vec::new();

    for block in text_page.blocks() {
        for line in block.lines() {
            let chars = line.chars().filter_map(|ch| {
                let c = ch.char()?;
                let quad = ch.quad();
                Some((
                    c,
                    CharBox {
                        x0: quad.ul.x.min(quad.ll.x),
                        top: quad.ul.y.min(quad.ur.y),
                        x1: quad.ur.x.max(quad.lr.x),
                        bottom: quad.ll.y.max(quad.lr.y),
                    },
                ))
            });
            words.extend(group_line_chars(chars, options));
        }
    }

    Ok(words)
}
