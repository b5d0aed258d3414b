//! In-memory DOCX fixtures for tests.
//!
//! Not part of the public API; exposed so integration and server tests can
//! build small packages without shipping binary fixtures.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// WordprocessingML main namespace.
pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Body with no tables, paragraphs only.
pub const DOC_NO_TABLES: &str =
    "<w:p><w:r><w:t>First paragraph</w:t></w:r></w:p><w:p><w:r><w:t>Second paragraph</w:t></w:r></w:p>";

/// Body with one 3-row table; row 0 carries a header-repeat flag and the
/// table has no borders. Matches the scenario in the service contract.
pub const DOC_ONE_TABLE: &str = concat!(
    "<w:p><w:r><w:t>Before table</w:t></w:r></w:p>",
    "<w:tbl>",
    "<w:tblPr><w:tblW w:w=\"0\" w:type=\"auto\"/></w:tblPr>",
    "<w:tr><w:trPr><w:tblHeader/></w:trPr><w:tc><w:p><w:r><w:t>Header</w:t></w:r></w:p></w:tc></w:tr>",
    "<w:tr><w:tc><w:p><w:r><w:t>Row A</w:t></w:r></w:p></w:tc></w:tr>",
    "<w:tr><w:tc><w:p><w:r><w:t>Row B</w:t></w:r></w:p></w:tc></w:tr>",
    "</w:tbl>",
    "<w:p><w:r><w:t>After table</w:t></w:r></w:p>",
);

/// Body with two tables: the first has stale borders on some edges, the
/// second has no property block at all and every row flagged as header.
pub const DOC_TWO_TABLES: &str = concat!(
    "<w:tbl>",
    "<w:tblPr>",
    "<w:tblBorders>",
    "<w:top w:val=\"dashed\" w:sz=\"24\" w:space=\"1\" w:color=\"FF0000\"/>",
    "<w:insideV w:val=\"double\" w:sz=\"4\" w:space=\"0\" w:color=\"00FF00\"/>",
    "</w:tblBorders>",
    "</w:tblPr>",
    "<w:tr><w:tc><w:p><w:r><w:t>One</w:t></w:r></w:p></w:tc></w:tr>",
    "</w:tbl>",
    "<w:p/>",
    "<w:tbl>",
    "<w:tr><w:trPr><w:tblHeader/></w:trPr><w:tc><w:p><w:r><w:t>Two</w:t></w:r></w:p></w:tc></w:tr>",
    "<w:tr><w:trPr><w:tblHeader w:val=\"true\"/></w:trPr><w:tc><w:p><w:r><w:t>Three</w:t></w:r></w:p></w:tc></w:tr>",
    "</w:tbl>",
);

const CONTENT_TYPES: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
    "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
    "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
    "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
    "<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>",
    "</Types>",
);

const RELS: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>",
    "</Relationships>",
);

/// Wrap a body fragment into a complete `word/document.xml` part.
pub fn document_xml(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"{W_NS}\"><w:body>{body}</w:body></w:document>"
    )
}

/// Build a minimal DOCX container around the given body fragment.
pub fn docx_bytes(body: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let entries = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", RELS.to_string()),
        ("word/document.xml", document_xml(body)),
    ];
    for (name, data) in entries {
        writer
            .start_file(name, options)
            .expect("in-memory zip write cannot fail");
        writer
            .write_all(data.as_bytes())
            .expect("in-memory zip write cannot fail");
    }
    writer
        .finish()
        .expect("in-memory zip write cannot fail")
        .into_inner()
}
