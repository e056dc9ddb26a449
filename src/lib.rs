//! Chunklens Server Library
//!
//! Splits PDF pages into fixed-size word chunks and finds, for each
//! configured target word, the first chunk that contains it.
//! The server binary is in main.rs.
//!
//! # Modules
//!
//! - `document`: chunk types, chunk builder, per-document cache
//! - `locator`: first-match word lookup
//! - `pdf`: PDF word extraction via MuPDF
//! - `routes`: HTTP endpoints

pub mod config;
pub mod document;
pub mod error;
pub mod locator;
pub mod pdf;
pub mod routes;
pub mod state;

// Page-level MuPDF helpers used by `pdf`
pub mod mupdf;
