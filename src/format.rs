//! Table formatting mutations.
//!
//! Two independent, idempotent mutations are applied to every table:
//! border normalization and header-repeat suppression. Both operate on
//! property blocks only and never touch cell content.

use crate::document::{Document, Table};
use crate::xml::Element;

/// The six WordprocessingML border edges, in the order they are written.
pub const BORDER_EDGES: [&str; 6] = ["top", "left", "bottom", "right", "insideH", "insideV"];

/// Border line style.
pub const BORDER_STYLE: &str = "single";

/// Border width in eighths of a point (8 ~= 1pt).
pub const BORDER_WIDTH_EIGHTHS: u32 = 8;

/// Border spacing in points.
pub const BORDER_SPACING: u32 = 0;

/// Border color as a hex RGB value.
pub const BORDER_COLOR: &str = "000000";

const TBL_BORDERS: &str = "w:tblBorders";
const TBL_HEADER: &str = "w:tblHeader";

/// Give the table a uniform solid black border on all six edges.
///
/// Any existing descriptor for an edge is removed before the fresh one is
/// appended, so re-running the normalization replaces rather than
/// accumulates. The property block and borders sub-block are created if
/// absent.
pub fn normalize_borders(table: &mut Table<'_>) {
    let borders = table.properties().get_or_insert_child(TBL_BORDERS);
    for edge in BORDER_EDGES {
        let name = format!("w:{edge}");
        borders.remove_children(&name);
        borders.push_element(border_descriptor(&name));
    }
}

fn border_descriptor(name: &str) -> Element {
    let mut element = Element::new(name);
    element.set_attr("w:val", BORDER_STYLE);
    element.set_attr("w:sz", BORDER_WIDTH_EIGHTHS.to_string());
    element.set_attr("w:space", BORDER_SPACING.to_string());
    element.set_attr("w:color", BORDER_COLOR);
    element
}

/// Strip the header-repeat flag from every row of the table.
///
/// Rows without a property block are left untouched; absence of the flag
/// is already the desired end state.
pub fn suppress_header_repeat(table: &mut Table<'_>) {
    for mut row in table.rows() {
        if let Some(properties) = row.properties_mut() {
            properties.remove_children(TBL_HEADER);
        }
    }
}

/// Apply both mutations to every table in the document, returning the
/// number of tables touched.
pub fn format_tables(document: &mut Document) -> usize {
    let mut count = 0;
    document.for_each_table(|mut table| {
        normalize_borders(&mut table);
        suppress_header_repeat(&mut table);
        count += 1;
    });
    count
}
