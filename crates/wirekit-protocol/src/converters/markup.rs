//! XML and HTML document converters

use crate::nillable::{nillable_from_string, nillable_string};
use wirekit_model::{
	HtmlDocument, MarshalError, MarshalResult, ModelType, XmlElement, html_to_string, parse_html,
};

pub fn any_xml_to_string(cls: &ModelType, value: Option<&XmlElement>) -> MarshalResult<String> {
	nillable_string(|_: &ModelType, value: &XmlElement| Ok(value.to_xml()))(cls, value)
}

/// Parses a generic XML document; parser diagnostics become validation
/// failures.
///
/// # Examples
///
/// ```
/// use wirekit_model::ModelType;
/// use wirekit_protocol::any_xml_from_string;
///
/// let cls = ModelType::new("anyXml");
/// let root = any_xml_from_string(&cls, Some("<note><to>Tove</to></note>")).unwrap().unwrap();
/// assert_eq!(root.find("to").unwrap().text(), "Tove");
///
/// let err = any_xml_from_string(&cls, Some("<note>")).unwrap_err();
/// assert_eq!(err.as_validation().unwrap().input, "<note>");
/// ```
pub fn any_xml_from_string(cls: &ModelType, string: Option<&str>) -> MarshalResult<Option<XmlElement>> {
	nillable_from_string(|_: &ModelType, string: &str| {
		XmlElement::parse(string)
			.map_err(|e| MarshalError::validation(string, format!("{:?}: {}", string, e)))
	})(cls, string)
}

/// Serializes HTML. A parsed fragment comes back as the fragment itself.
pub fn any_html_to_string(cls: &ModelType, value: Option<&HtmlDocument>) -> MarshalResult<String> {
	nillable_string(|_: &ModelType, value: &HtmlDocument| Ok(html_to_string(value)))(cls, value)
}

/// Parses HTML leniently. Malformed markup is repaired, never rejected.
pub fn any_html_from_string(
	cls: &ModelType,
	string: Option<&str>,
) -> MarshalResult<Option<HtmlDocument>> {
	nillable_from_string(|_: &ModelType, string: &str| Ok(parse_html(string)))(cls, string)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_xml_round_trip() {
		// Arrange
		let cls = ModelType::new("anyXml");
		let tree = XmlElement::new("order")
			.with_attribute("id", "7")
			.with_child(XmlElement::new("item").with_text("a & b"));

		// Act
		let text = any_xml_to_string(&cls, Some(&tree)).unwrap();
		let back = any_xml_from_string(&cls, Some(&text)).unwrap();

		// Assert
		assert_eq!(text, r#"<order id="7"><item>a &amp; b</item></order>"#);
		assert_eq!(back, Some(tree));
	}

	#[rstest]
	#[case("")]
	#[case("<a></b>")]
	#[case("<a/><b/>")]
	fn test_xml_parse_failures_are_validation_errors(#[case] input: &str) {
		let cls = ModelType::new("anyXml");
		let err = any_xml_from_string(&cls, Some(input)).unwrap_err();
		assert_eq!(err.as_validation().unwrap().input, input);
	}

	#[rstest]
	fn test_html_is_lenient() {
		let cls = ModelType::new("anyHtml");

		let doc = any_html_from_string(&cls, Some("<div><p>one<p>two</div>")).unwrap();
		let html = any_html_to_string(&cls, doc.as_ref()).unwrap();

		assert_eq!(html, "<div><p>one</p><p>two</p></div>");
	}

	#[rstest]
	fn test_html_fragment_round_trip() {
		let cls = ModelType::new("anyHtml");

		let doc = any_html_from_string(&cls, Some("<p>x</p>")).unwrap();

		assert_eq!(any_html_to_string(&cls, doc.as_ref()).unwrap(), "<p>x</p>");
	}

	#[rstest]
	fn test_markup_nils() {
		let cls = ModelType::new("anyXml");

		assert_eq!(any_xml_to_string(&cls, None).unwrap(), "");
		assert_eq!(any_xml_from_string(&cls, None).unwrap(), None);
		assert!(any_html_from_string(&cls, None).unwrap().is_none());
	}
}
