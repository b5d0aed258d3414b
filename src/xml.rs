//! Minimal XML element tree for WordprocessingML parts.
//!
//! The main document part is parsed into an owned tree, mutated in place,
//! and serialized back. Names are kept fully qualified (`w:tbl`, `w:trPr`)
//! exactly as they appear in the part, so no namespace resolution is
//! needed and unknown content round-trips untouched.

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Error, Result};

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// A text node (stored unescaped).
    Text(String),
    /// A CDATA section.
    CData(String),
    /// A comment (stored raw, exactly as read).
    Comment(String),
    /// A processing instruction.
    Pi(String),
}

/// An XML element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Qualified tag name, e.g. `w:tbl`.
    pub name: String,
    /// Attributes in document order, values stored unescaped.
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value by qualified name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value for the same name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.attributes.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Iterate over child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Iterate over child elements mutably.
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Find the first child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// Find the first child element with the given name, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements_mut().find(|e| e.name == name)
    }

    /// Append a child element.
    pub fn push_element(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    /// Return the child element with the given name, appending a fresh
    /// empty one if absent.
    pub fn get_or_insert_child(&mut self, name: &str) -> &mut Element {
        let idx = match self.position_of(name) {
            Some(i) => i,
            None => {
                self.children.push(Node::Element(Element::new(name)));
                self.children.len() - 1
            }
        };
        match &mut self.children[idx] {
            Node::Element(e) => e,
            _ => unreachable!("position_of only returns element indices"),
        }
    }

    /// Return the child element with the given name, inserting a fresh
    /// empty one as the first child if absent.
    ///
    /// WordprocessingML requires property blocks (`w:tblPr`, `w:trPr`) to
    /// be the first child of their parent.
    pub fn get_or_insert_child_first(&mut self, name: &str) -> &mut Element {
        let idx = match self.position_of(name) {
            Some(i) => i,
            None => {
                self.children.insert(0, Node::Element(Element::new(name)));
                0
            }
        };
        match &mut self.children[idx] {
            Node::Element(e) => e,
            _ => unreachable!("position_of only returns element indices"),
        }
    }

    /// Remove all child elements with the given name, returning how many
    /// were removed.
    pub fn remove_children(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children
            .retain(|n| !matches!(n, Node::Element(e) if e.name == name));
        before - self.children.len()
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|n| matches!(n, Node::Element(e) if e.name == name))
    }
}

/// The XML declaration of a part.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDecl {
    /// XML version, e.g. "1.0".
    pub version: String,
    /// Declared encoding, if any.
    pub encoding: Option<String>,
    /// Standalone flag, if any.
    pub standalone: Option<String>,
}

impl XmlDecl {
    fn from_event(decl: &BytesDecl) -> Result<Self> {
        let version = decl
            .version()
            .map_err(|e| Error::Xml(e.to_string()))?
            .into_owned();
        let encoding = decl
            .encoding()
            .transpose()
            .map_err(|e| Error::Xml(e.to_string()))?
            .map(|v| v.into_owned());
        let standalone = decl
            .standalone()
            .transpose()
            .map_err(|e| Error::Xml(e.to_string()))?
            .map(|v| v.into_owned());
        Ok(Self {
            version: String::from_utf8_lossy(&version).into_owned(),
            encoding: encoding.map(|v| String::from_utf8_lossy(&v).into_owned()),
            standalone: standalone.map(|v| String::from_utf8_lossy(&v).into_owned()),
        })
    }
}

/// A parsed XML part: optional declaration plus a single root element.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    /// The `<?xml ...?>` declaration, preserved on write.
    pub decl: Option<XmlDecl>,
    /// The root element.
    pub root: Element,
}

impl XmlDocument {
    /// Parse an XML part from bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(data);
        let mut buf = Vec::new();
        let mut decl = None;
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Decl(d) => decl = Some(XmlDecl::from_event(&d)?),
                Event::Start(e) => stack.push(element_from_start(&e)?),
                Event::Empty(e) => {
                    let element = element_from_start(&e)?;
                    attach(&mut stack, &mut root, Node::Element(element))?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::Xml("unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, Node::Element(element))?;
                }
                Event::Text(t) => {
                    let text = t
                        .unescape()
                        .map_err(|e| Error::Xml(e.to_string()))?
                        .into_owned();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Text(text));
                    }
                }
                Event::CData(c) => {
                    let data = String::from_utf8_lossy(&c).into_owned();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::CData(data));
                    }
                }
                Event::Comment(c) => {
                    let raw = String::from_utf8_lossy(&c).into_owned();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Comment(raw));
                    }
                }
                Event::PI(p) => {
                    let raw = String::from_utf8_lossy(&p).into_owned();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Pi(raw));
                    }
                }
                Event::DocType(_) => {}
                Event::Eof => break,
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(Error::Xml("unexpected end of document".to_string()));
        }
        let root = root.ok_or_else(|| Error::Xml("document has no root element".to_string()))?;
        Ok(Self { decl, root })
    }

    /// Serialize the part back to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        if let Some(decl) = &self.decl {
            writer.write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )))?;
        }
        write_element(&mut writer, &self.root)?;
        Ok(writer.into_inner())
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, node: Node) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if let Node::Element(element) = node {
        if root.is_some() {
            return Err(Error::Xml("multiple root elements".to_string()));
        }
        *root = Some(element);
    }
    Ok(())
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Xml(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(t) => writer.write_event(Event::Text(BytesText::new(t)))?,
            Node::CData(c) => writer.write_event(Event::CData(BytesCData::new(c.as_str())))?,
            Node::Comment(c) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(c.as_str())))?
            }
            Node::Pi(p) => writer.write_event(Event::PI(BytesPI::new(p.as_str())))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_document() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="ns"><w:body><w:p/></w:body></w:document>"#;
        let doc = XmlDocument::parse(xml).unwrap();

        assert_eq!(doc.root.name, "w:document");
        assert_eq!(doc.root.attr("xmlns:w"), Some("ns"));
        let body = doc.root.child("w:body").unwrap();
        assert!(body.child("w:p").is_some());

        let decl = doc.decl.unwrap();
        assert_eq!(decl.version, "1.0");
        assert_eq!(decl.encoding.as_deref(), Some("UTF-8"));
        assert_eq!(decl.standalone.as_deref(), Some("yes"));
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let xml = br#"<?xml version="1.0"?><root a="1"><child>text</child><empty/><mixed>a<b/>c</mixed></root>"#;
        let doc = XmlDocument::parse(xml).unwrap();
        let bytes = doc.to_bytes().unwrap();
        let reparsed = XmlDocument::parse(&bytes).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_text_escaping_round_trip() {
        let xml = br#"<root attr="a&amp;b">x &lt; y</root>"#;
        let doc = XmlDocument::parse(xml).unwrap();
        assert_eq!(doc.root.attr("attr"), Some("a&b"));
        assert_eq!(doc.root.children, vec![Node::Text("x < y".to_string())]);

        let bytes = doc.to_bytes().unwrap();
        let reparsed = XmlDocument::parse(&bytes).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(XmlDocument::parse(b"<root><unclosed></root>").is_err());
        assert!(XmlDocument::parse(b"no xml here").is_err());
        assert!(XmlDocument::parse(b"").is_err());
    }

    #[test]
    fn test_get_or_insert_child_appends() {
        let mut el = Element::new("w:tblPr");
        el.push_element(Element::new("w:tblW"));

        el.get_or_insert_child("w:tblBorders");
        assert_eq!(el.elements().count(), 2);
        assert_eq!(el.elements().last().unwrap().name, "w:tblBorders");

        // Idempotent: a second call reuses the existing child.
        el.get_or_insert_child("w:tblBorders");
        assert_eq!(el.elements().count(), 2);
    }

    #[test]
    fn test_get_or_insert_child_first_prepends() {
        let mut el = Element::new("w:tbl");
        el.push_element(Element::new("w:tr"));

        el.get_or_insert_child_first("w:tblPr");
        let names: Vec<_> = el.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["w:tblPr", "w:tr"]);

        el.get_or_insert_child_first("w:tblPr");
        assert_eq!(el.elements().count(), 2);
    }

    #[test]
    fn test_remove_children() {
        let mut el = Element::new("w:trPr");
        el.push_element(Element::new("w:tblHeader"));
        el.push_element(Element::new("w:cantSplit"));
        el.push_element(Element::new("w:tblHeader"));

        assert_eq!(el.remove_children("w:tblHeader"), 2);
        assert_eq!(el.elements().count(), 1);
        assert_eq!(el.remove_children("w:tblHeader"), 0);
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut el = Element::new("w:top");
        el.set_attr("w:val", "single");
        el.set_attr("w:val", "double");
        assert_eq!(el.attr("w:val"), Some("double"));
        assert_eq!(el.attributes.len(), 1);
    }
}
