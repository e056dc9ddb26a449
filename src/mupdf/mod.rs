//! Low-level MuPDF Wrapper
//!
//! Page-level helpers over MuPDF's structured text API.
//!
//! # Thread Safety
//!
//! MuPDF's `fz_context` is **NOT thread-safe**. Callers open a fresh
//! `mupdf::Document` per operation and never share it across threads; the
//! chunk cache runs each parse on its own blocking task.
//!
//! # Usage
//!
//! ```rust,ignore
//! let doc = mupdf::Document::from_bytes(&pdf_bytes, "application/pdf")?;
//! let page = doc.load_page(0)?;
//! let words = words::extract_page_words(&page, &WordOptions::default())?;
//! ```

mod words;

pub use words::{
    extract_page_words, group_line_chars, CharBox, WordOptions, DEFAULT_X_TOLERANCE,
};
