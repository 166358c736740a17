//! Pretty printer for `XmlElement` trees

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::borrow::Cow;
use quick_xml::Writer;

use super::element::XmlElement;

const INDENT_WIDTH: usize = 2;

/// Render a full document: encoding declaration followed by the root element
pub fn write_document(root: &XmlElement) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write_element(&mut writer, root)?;
    into_string(writer)
}

/// Render a fragment without a declaration
pub fn write_fragment(root: &XmlElement) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH);
    write_element(&mut writer, root)?;
    into_string(writer)
}

fn write_element<W>(writer: &mut Writer<W>, element: &XmlElement) -> Result<(), quick_xml::Error>
where
    W: std::io::Write,
{
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        let value = escape_attribute(value);
        start.push_attribute((key.as_bytes(), value.as_bytes()));
    }

    if element.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &element.text {
        writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;

    Ok(())
}

/// Escape an attribute value; apostrophes stay literal
fn escape_attribute(value: &str) -> Cow<'_, str> {
    let escaped = partial_escape(value);
    if !escaped.contains(|c: char| matches!(c, '"' | '\n' | '\r' | '\t')) {
        return escaped;
    }
    let mut out = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

fn into_string(writer: Writer<Vec<u8>>) -> Result<String, quick_xml::Error> {
    String::from_utf8(writer.into_inner())
        .map_err(|e| quick_xml::Error::NonDecodable(Some(e.utf8_error())))
}
