//! OPC package access.
//!
//! A DOCX file is an Open Packaging Conventions container: a ZIP archive
//! whose named entries ("parts") hold XML and binary payloads. This module
//! reads parts out of an in-memory archive and rebuilds the archive with
//! one part replaced. Untouched entries are raw-copied so their compressed
//! bytes survive the round trip unchanged.

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{Error, Result};

/// The main document part of a word-processing package.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// An OPC package held fully in memory.
#[derive(Debug, Clone)]
pub struct Package {
    raw: Vec<u8>,
    names: Vec<String>,
}

impl Package {
    /// Open a package from container bytes.
    ///
    /// Validates that the bytes form a readable ZIP archive and records
    /// the part names; part contents are decompressed lazily on access.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(&data))?;
        let names = archive.file_names().map(str::to_owned).collect();
        Ok(Self { raw: data, names })
    }

    /// Whether the package contains a part with the given name.
    pub fn has_part(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Part names in archive order.
    pub fn part_names(&self) -> &[String] {
        &self.names
    }

    /// Read and decompress a part.
    pub fn part(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(&self.raw))?;
        let mut file = archive
            .by_name(name)
            .map_err(|_| Error::MissingPart(name.to_string()))?;
        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Rebuild the container with one part replaced.
    ///
    /// Every other entry is raw-copied from the original archive, so
    /// compression method and bytes are preserved exactly. If the named
    /// part did not exist it is appended.
    pub fn to_bytes_with(&self, replaced: &str, data: &[u8]) -> Result<Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(&self.raw))?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut wrote_replacement = false;
        for index in 0..archive.len() {
            let file = archive.by_index_raw(index)?;
            if file.name() == replaced {
                writer.start_file(replaced, options)?;
                writer.write_all(data)?;
                wrote_replacement = true;
            } else {
                writer.raw_copy_file(file)?;
            }
        }
        if !wrote_replacement {
            writer.start_file(replaced, options)?;
            writer.write_all(data)?;
        }

        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }
}
