//! DOCX container detection.
//!
//! A `.docx` file is an OPC package: a ZIP archive whose parts hold the
//! WordprocessingML XML. Detection here only checks the ZIP local-file
//! header magic; whether the archive actually contains a word-processing
//! document is validated when the package is opened.

use crate::error::{Error, Result};

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Check that a byte buffer starts with a ZIP container header.
///
/// # Returns
/// * `Ok(())` if the buffer looks like a ZIP archive
/// * `Err(Error::UnknownFormat)` otherwise
pub fn check_container(data: &[u8]) -> Result<()> {
    if data.len() < ZIP_MAGIC.len() || !data.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }
    Ok(())
}

/// Check if bytes could be a DOCX container.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    check_container(data).is_ok()
}
