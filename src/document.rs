//! Word-processing document model.
//!
//! A [`Document`] owns the OPC package plus the parsed main document part.
//! Tables and rows are exposed as borrowed views over the XML tree so the
//! formatter can mutate property blocks in place; everything the views do
//! not touch round-trips byte-identically through the package layer.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::detect;
use crate::error::Result;
use crate::package::{Package, DOCUMENT_PART};
use crate::xml::{Element, Node, XmlDocument};

pub(crate) const TBL: &str = "w:tbl";
pub(crate) const TBL_PR: &str = "w:tblPr";
pub(crate) const TR: &str = "w:tr";
pub(crate) const TR_PR: &str = "w:trPr";

/// A parsed word-processing document.
pub struct Document {
    package: Package,
    xml: XmlDocument,
}

impl Document {
    /// Parse a document from container bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect::check_container(data)?;
        let package = Package::from_bytes(data.to_vec())?;
        let part = package.part(DOCUMENT_PART)?;
        let xml = XmlDocument::parse(&part)?;
        Ok(Self { package, xml })
    }

    /// Parse a document from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Parse a document from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// The root element of the main document part.
    pub fn xml_root(&self) -> &Element {
        &self.xml.root
    }

    /// Number of tables in the document, nested tables included.
    pub fn table_count(&self) -> usize {
        fn count(element: &Element) -> usize {
            let own = usize::from(element.name == TBL);
            own + element.elements().map(count).sum::<usize>()
        }
        count(&self.xml.root)
    }

    /// Visit every table in document order, nested tables included.
    pub fn for_each_table<F>(&mut self, mut f: F)
    where
        F: FnMut(Table<'_>),
    {
        fn walk<F: FnMut(Table<'_>)>(element: &mut Element, f: &mut F) {
            if element.name == TBL {
                f(Table { element: &mut *element });
            }
            for node in element.children.iter_mut() {
                if let Node::Element(child) = node {
                    walk(child, f);
                }
            }
        }
        walk(&mut self.xml.root, &mut f);
    }

    /// Serialize the document back to container bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let part = self.xml.to_bytes()?;
        self.package.to_bytes_with(DOCUMENT_PART, &part)
    }

    /// Serialize the document to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

/// A mutable view over one `w:tbl` element.
pub struct Table<'a> {
    element: &'a mut Element,
}

impl<'a> Table<'a> {
    pub(crate) fn from_element(element: &'a mut Element) -> Self {
        Self { element }
    }
}

impl Table<'_> {
    /// The table-level property block, created as first child if absent.
    pub fn properties(&mut self) -> &mut Element {
        self.element.get_or_insert_child_first(TBL_PR)
    }

    /// Iterate over the table's rows.
    pub fn rows(&mut self) -> impl Iterator<Item = Row<'_>> {
        self.element
            .elements_mut()
            .filter(|e| e.name == TR)
            .map(|element| Row { element })
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.element.elements().filter(|e| e.name == TR).count()
    }
}

/// A mutable view over one `w:tr` element.
pub struct Row<'a> {
    element: &'a mut Element,
}

impl Row<'_> {
    /// The row-level property block, if the row has one.
    pub fn properties_mut(&mut self) -> Option<&mut Element> {
        self.element.child_mut(TR_PR)
    }
}
