use quick_xml::{
    Reader, Writer,
    escape::{partial_escape, resolve_html5_entity, resolve_predefined_entity},
    events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use super::{Document, Element, Node};
use crate::{Error, Result};

pub(super) fn parse(text: &str) -> Result<Document> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut declaration = false;
    let mut root: Option<Element> = None;
    // Open elements, innermost last.
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Decl(_) => declaration = true,
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let element = element_from(&start)?;
                attach(&mut stack, &mut root, Node::Element(element))?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::Markup("unbalanced closing tag".into()))?;
                attach(&mut stack, &mut root, Node::Element(element))?;
            }
            Event::Text(text) => {
                let text = text.unescape_with(html_entity)?.into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(text));
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::CData(utf8(&data.into_inner())?));
                }
            }
            Event::Comment(comment) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Comment(utf8(&comment)?));
                }
            }
            Event::Eof => break,
            // processing instructions and doctypes are not used by Flare files
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Markup(format!("unclosed <{}>", open.name)));
    }
    let root = root.ok_or_else(|| Error::Markup("document has no root element".into()))?;

    Ok(Document { declaration, root })
}

fn element_from(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(utf8(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::Markup(e.to_string()))?;
        let key = utf8(attr.key.as_ref())?;
        let value = attr.unescape_value_with(html_entity)?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Hand a finished node to its parent, or make it the root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, node: Node) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    match node {
        Node::Element(element) if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        Node::Element(element) => Err(Error::Markup(format!(
            "second root element <{}>",
            element.name
        ))),
        _ => Ok(()),
    }
}

/// XML's predefined entities plus the HTML5 named ones hand-edited topics use.
fn html_entity(name: &str) -> Option<&'static str> {
    resolve_predefined_entity(name).or_else(|| resolve_html5_entity(name))
}

fn utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| Error::Markup(e.to_string()))
}

pub(super) fn serialize(document: &Document) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    if document.declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(markup_err)?;
        writer
            .write_event(Event::Text(BytesText::from_escaped("\n")))
            .map_err(markup_err)?;
    }
    write_element(&mut writer, &document.root)?;

    utf8(&writer.into_inner())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(markup_err);
    }

    writer.write_event(Event::Start(start)).map_err(markup_err)?;
    for child in &element.children {
        match child {
            Node::Element(el) => write_element(writer, el)?,
            Node::Text(text) => writer
                .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
                .map_err(markup_err)?,
            Node::CData(data) => writer
                .write_event(Event::CData(BytesCData::new(data.as_str())))
                .map_err(markup_err)?,
            Node::Comment(comment) => writer
                .write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))
                .map_err(markup_err)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(markup_err)
}

fn markup_err(err: impl std::fmt::Display) -> Error {
    Error::Markup(err.to_string())
}
