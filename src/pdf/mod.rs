//! PDF module
//!
//! Word extraction from PDF bytes via MuPDF.

mod extractor;

pub use extractor::MupdfWordExtractor;
