//! End-to-end tests for the document processor.

use tablefix::testutil::{docx_bytes, DOC_NO_TABLES, DOC_ONE_TABLE, DOC_TWO_TABLES};
use tablefix::xml::Element;
use tablefix::{process_bytes, Document, Error};

const EDGES: [&str; 6] = ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"];

fn collect_tables(element: &Element, out: &mut Vec<Element>) {
    if element.name == "w:tbl" {
        out.push(element.clone());
    }
    for child in element.elements() {
        collect_tables(child, out);
    }
}

fn tables_of(data: &[u8]) -> Vec<Element> {
    let document = Document::from_bytes(data).unwrap();
    let mut tables = Vec::new();
    collect_tables(document.xml_root(), &mut tables);
    tables
}

fn assert_normalized_borders(table: &Element) {
    let borders = table
        .child("w:tblPr")
        .expect("table property block present")
        .child("w:tblBorders")
        .expect("borders sub-block present");

    let names: Vec<&str> = borders.elements().map(|e| e.name.as_str()).collect();
    assert_eq!(names, EDGES);
    for edge in borders.elements() {
        assert_eq!(edge.attr("w:val"), Some("single"), "{}", edge.name);
        assert_eq!(edge.attr("w:sz"), Some("8"), "{}", edge.name);
        assert_eq!(edge.attr("w:space"), Some("0"), "{}", edge.name);
        assert_eq!(edge.attr("w:color"), Some("000000"), "{}", edge.name);
    }
}

fn assert_no_header_flags(table: &Element) {
    for row in table.elements().filter(|e| e.name == "w:tr") {
        if let Some(props) = row.child("w:trPr") {
            assert!(props.child("w:tblHeader").is_none());
        }
    }
}

#[test]
fn processes_flagged_three_row_table() {
    // One 3-row table, row 0 flagged as repeating header, no borders set.
    let output = process_bytes(&docx_bytes(DOC_ONE_TABLE)).unwrap();

    let tables = tables_of(&output);
    assert_eq!(tables.len(), 1);
    let table = &tables[0];
    assert_eq!(table.elements().filter(|e| e.name == "w:tr").count(), 3);
    assert_normalized_borders(table);
    assert_no_header_flags(table);
}

#[test]
fn formats_every_table() {
    let output = process_bytes(&docx_bytes(DOC_TWO_TABLES)).unwrap();

    let tables = tables_of(&output);
    assert_eq!(tables.len(), 2);
    for table in &tables {
        assert_normalized_borders(table);
        assert_no_header_flags(table);
    }
}

#[test]
fn replaces_stale_border_descriptors() {
    // DOC_TWO_TABLES's first table starts with dashed red borders.
    let output = process_bytes(&docx_bytes(DOC_TWO_TABLES)).unwrap();

    let table = &tables_of(&output)[0];
    let borders = table
        .child("w:tblPr")
        .unwrap()
        .child("w:tblBorders")
        .unwrap();
    assert_eq!(borders.elements().count(), 6);
    assert!(borders.elements().all(|e| e.attr("w:val") == Some("single")));
}

#[test]
fn idempotent_processing() {
    let once = process_bytes(&docx_bytes(DOC_ONE_TABLE)).unwrap();
    let twice = process_bytes(&once).unwrap();

    let first = Document::from_bytes(&once).unwrap();
    let second = Document::from_bytes(&twice).unwrap();
    assert_eq!(first.xml_root(), second.xml_root());
}

#[test]
fn zero_table_document_round_trips() {
    let input = docx_bytes(DOC_NO_TABLES);
    let output = process_bytes(&input).unwrap();

    let before = Document::from_bytes(&input).unwrap();
    let after = Document::from_bytes(&output).unwrap();
    assert_eq!(after.table_count(), 0);
    assert_eq!(before.xml_root(), after.xml_root());
}

#[test]
fn preserves_non_table_content() {
    let output = process_bytes(&docx_bytes(DOC_ONE_TABLE)).unwrap();
    let document = Document::from_bytes(&output).unwrap();

    let body = document.xml_root().child("w:body").unwrap();
    let paragraphs: Vec<&Element> = body.elements().filter(|e| e.name == "w:p").collect();
    assert_eq!(paragraphs.len(), 2);

    let texts: Vec<String> = paragraphs
        .iter()
        .map(|p| {
            let run = p.child("w:r").unwrap();
            let text = run.child("w:t").unwrap();
            match &text.children[0] {
                tablefix::xml::Node::Text(t) => t.clone(),
                other => panic!("unexpected node: {other:?}"),
            }
        })
        .collect();
    assert_eq!(texts, vec!["Before table", "After table"]);
}

#[test]
fn preserves_untouched_package_parts() {
    let input = docx_bytes(DOC_ONE_TABLE);
    let output = process_bytes(&input).unwrap();

    let before = tablefix::package::Package::from_bytes(input).unwrap();
    let after = tablefix::package::Package::from_bytes(output).unwrap();
    assert_eq!(before.part_names(), after.part_names());
    assert_eq!(
        before.part("[Content_Types].xml").unwrap(),
        after.part("[Content_Types].xml").unwrap()
    );
    assert_eq!(
        before.part("_rels/.rels").unwrap(),
        after.part("_rels/.rels").unwrap()
    );
}

#[test]
fn rejects_invalid_input() {
    assert!(matches!(process_bytes(&[]), Err(Error::UnknownFormat)));
    assert!(matches!(
        process_bytes(b"this is not a zip archive at all"),
        Err(Error::UnknownFormat)
    ));

    // Valid ZIP magic but corrupt archive.
    let mut truncated = docx_bytes(DOC_ONE_TABLE);
    truncated.truncate(30);
    let err = process_bytes(&truncated).unwrap_err();
    assert!(err.is_invalid_input());
}
