//! # tablefix
//!
//! DOCX table formatting library.
//!
//! Applies two idempotent mutations to every table in a word-processing
//! document:
//!
//! 1. **Border normalization** — a uniform solid black border (1pt,
//!    `#000000`) on all four outer edges and both inner grid lines.
//! 2. **Header-repeat suppression** — removes the row flag that makes a
//!    row repeat as a running header when a table spans pages.
//!
//! Everything else in the document round-trips untouched.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> tablefix::Result<()> {
//!     let input = std::fs::read("report.docx")?;
//!     let output = tablefix::process_bytes(&input)?;
//!     std::fs::write("report_formatted.docx", output)?;
//!     Ok(())
//! }
//! ```

pub mod detect;
pub mod document;
pub mod error;
pub mod format;
pub mod package;
pub mod xml;

#[doc(hidden)]
pub mod testutil;

// Re-export commonly used types
pub use detect::is_docx_bytes;
pub use document::{Document, Row, Table};
pub use error::{Error, Result};
pub use format::{format_tables, normalize_borders, suppress_header_repeat};

use std::io::Read;
use std::path::Path;

/// Process a document held in a byte buffer and return the transformed
/// container bytes.
///
/// Formats every table (borders + header-repeat removal) and re-serializes
/// the package. Fails if the input is not a parseable DOCX container; a
/// document with zero tables round-trips unchanged in structure.
pub fn process_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut document = Document::from_bytes(data)?;
    let tables = format_tables(&mut document);
    log::debug!("formatted {} table(s)", tables);
    document.to_bytes()
}

/// Process a document from a reader.
pub fn process_reader<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    process_bytes(&data)
}

/// Process a document file, writing the result to `output`.
pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<()> {
    let data = std::fs::read(input)?;
    let result = process_bytes(&data)?;
    std::fs::write(output, result)?;
    Ok(())
}
