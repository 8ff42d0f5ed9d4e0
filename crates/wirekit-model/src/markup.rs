//! Parsed markup documents
//!
//! Generic XML payloads are held as an owned element tree built on quick-xml.
//! HTML payloads use scraper's lenient html5ever-backed document.

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use scraper::ElementRef;
use std::fmt;
use std::str::FromStr;

pub use scraper::Html as HtmlDocument;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XmlError {
	#[error("{message} (at byte {position})")]
	Syntax { message: String, position: u64 },
	#[error("Document has no root element")]
	NoRoot,
	#[error("Document has more than one root element")]
	MultipleRoots,
	#[error("Element <{0}> is not closed")]
	Unclosed(String),
	#[error("Text content outside of the root element")]
	StrayText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
	Element(XmlElement),
	Text(String),
	CData(String),
	Comment(String),
}

/// An XML element and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
	pub name: String,
	pub attributes: Vec<(String, String)>,
	pub children: Vec<XmlNode>,
}

impl XmlElement {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.push((name.into(), value.into()));
		self
	}

	pub fn with_child(mut self, child: XmlElement) -> Self {
		self.children.push(XmlNode::Element(child));
		self
	}

	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.children.push(XmlNode::Text(text.into()));
		self
	}

	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	/// Direct text and CDATA content of this element, concatenated.
	pub fn text(&self) -> String {
		self.children
			.iter()
			.filter_map(|child| match child {
				XmlNode::Text(t) | XmlNode::CData(t) => Some(t.as_str()),
				_ => None,
			})
			.collect()
	}

	/// First child element named `name`.
	pub fn find(&self, name: &str) -> Option<&XmlElement> {
		self.children.iter().find_map(|child| match child {
			XmlNode::Element(e) if e.name == name => Some(e),
			_ => None,
		})
	}

	/// Parses a document with exactly one root element.
	///
	/// # Examples
	///
	/// ```
	/// use wirekit_model::XmlElement;
	///
	/// let root = XmlElement::parse(r#"<a x="1"><b>hi &amp; bye</b></a>"#).unwrap();
	/// assert_eq!(root.attribute("x"), Some("1"));
	/// assert_eq!(root.find("b").unwrap().text(), "hi & bye");
	///
	/// assert!(XmlElement::parse("<a><b></a>").is_err());
	/// ```
	pub fn parse(input: &str) -> Result<Self, XmlError> {
		let mut reader = Reader::from_str(input);
		let mut stack: Vec<XmlElement> = Vec::new();
		let mut root: Option<XmlElement> = None;

		loop {
			let event = reader.read_event().map_err(|e| XmlError::Syntax {
				message: e.to_string(),
				position: reader.buffer_position() as u64,
			})?;
			let position = reader.buffer_position() as u64;

			match event {
				Event::Start(start) => stack.push(element_from_start(&start, position)?),
				Event::Empty(start) => {
					let element = element_from_start(&start, position)?;
					attach(&mut stack, &mut root, XmlNode::Element(element))?;
				}
				Event::End(_) => {
					let element = stack.pop().ok_or_else(|| XmlError::Syntax {
						message: "Unexpected closing tag".to_string(),
						position,
					})?;
					attach(&mut stack, &mut root, XmlNode::Element(element))?;
				}
				Event::Text(text) => {
					let text = text.unescape().map_err(|e| XmlError::Syntax {
						message: e.to_string(),
						position,
					})?;
					if stack.is_empty() {
						if !text.trim().is_empty() {
							return Err(XmlError::StrayText);
						}
					} else {
						attach(&mut stack, &mut root, XmlNode::Text(text.into_owned()))?;
					}
				}
				Event::CData(data) => {
					let data = String::from_utf8_lossy(&data).into_owned();
					attach(&mut stack, &mut root, XmlNode::CData(data))?;
				}
				Event::Comment(comment) => {
					let comment = String::from_utf8_lossy(&comment).into_owned();
					attach(&mut stack, &mut root, XmlNode::Comment(comment))?;
				}
				Event::Eof => break,
				// Declarations, processing instructions and doctypes are not kept.
				_ => {}
			}
		}

		if let Some(open) = stack.pop() {
			return Err(XmlError::Unclosed(open.name));
		}
		root.ok_or(XmlError::NoRoot)
	}

	/// Serializes the subtree without an XML declaration.
	pub fn to_xml(&self) -> String {
		let mut out = String::new();
		write_element(&mut out, self);
		out
	}
}

impl fmt::Display for XmlElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_xml())
	}
}

impl FromStr for XmlElement {
	type Err = XmlError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

fn element_from_start(start: &BytesStart<'_>, position: u64) -> Result<XmlElement, XmlError> {
	let mut element = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()));
	for attr in start.attributes() {
		let attr = attr.map_err(|e| XmlError::Syntax {
			message: e.to_string(),
			position,
		})?;
		let value = attr.unescape_value().map_err(|e| XmlError::Syntax {
			message: e.to_string(),
			position,
		})?;
		element.attributes.push((
			String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
			value.into_owned(),
		));
	}
	Ok(element)
}

fn attach(
	stack: &mut [XmlElement],
	root: &mut Option<XmlElement>,
	node: XmlNode,
) -> Result<(), XmlError> {
	if let Some(parent) = stack.last_mut() {
		parent.children.push(node);
		return Ok(());
	}
	match node {
		XmlNode::Element(element) => {
			if root.is_some() {
				return Err(XmlError::MultipleRoots);
			}
			*root = Some(element);
			Ok(())
		}
		// Top-level comments and CDATA carry no document content.
		_ => Ok(()),
	}
}

fn write_element(out: &mut String, element: &XmlElement) {
	out.push('<');
	out.push_str(&element.name);
	for (name, value) in &element.attributes {
		out.push(' ');
		out.push_str(name);
		out.push_str("=\"");
		out.push_str(&escape(value.as_str()));
		out.push('"');
	}
	if element.children.is_empty() {
		out.push_str("/>");
		return;
	}
	out.push('>');
	for child in &element.children {
		match child {
			XmlNode::Element(e) => write_element(out, e),
			XmlNode::Text(text) => out.push_str(&escape(text.as_str())),
			XmlNode::CData(data) => {
				out.push_str("<![CDATA[");
				out.push_str(data);
				out.push_str("]]>");
			}
			XmlNode::Comment(comment) => {
				out.push_str("<!--");
				out.push_str(comment);
				out.push_str("-->");
			}
		}
	}
	out.push_str("</");
	out.push_str(&element.name);
	out.push('>');
}

/// Parses HTML leniently.
///
/// Full documents (starting with a doctype or `<html>`) are parsed as
/// documents, anything else as a body fragment. Malformed markup is repaired
/// rather than rejected.
pub fn parse_html(input: &str) -> HtmlDocument {
	let head: String = input
		.trim_start()
		.chars()
		.take(9)
		.collect::<String>()
		.to_ascii_lowercase();
	if head.starts_with("<!doctype") || head.starts_with("<html") {
		HtmlDocument::parse_document(input)
	} else {
		HtmlDocument::parse_fragment(input)
	}
}

/// Serializes parsed HTML.
///
/// A full document is written whole. A fragment is written as its content
/// alone, without the `<html>` element the parser wraps fragments in.
pub fn html_to_string(document: &HtmlDocument) -> String {
	let root = document.root_element();
	let is_document = root
		.children()
		.filter_map(ElementRef::wrap)
		.any(|child| matches!(child.value().name(), "head" | "body"));
	if is_document {
		document.html()
	} else {
		root.inner_html()
	}
}
