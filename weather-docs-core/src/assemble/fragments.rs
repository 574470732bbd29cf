//! Flare-specific building blocks.

use crate::markup::Element;

pub const MADCAP_NAMESPACE: &str = "http://www.madcapsoftware.com/Schemas/MadCap.xsd";

pub fn paragraph(text: impl Into<String>) -> Element {
    Element::new("p").with_text(text)
}

/// Text shown only when `conditions` (e.g. `Units.Metric`) is active.
pub fn conditional_text(conditions: impl Into<String>, text: impl Into<String>) -> Element {
    Element::new("MadCap:conditionalText")
        .with_attr("MadCap:conditions", conditions)
        .with_text(text)
}

/// Copyable code block. An empty `language` leaves highlighting off.
pub fn code_snippet(code: impl Into<String>, language: &str) -> Element {
    let mut body = Element::new("MadCap:codeSnippetBody")
        .with_attr("MadCap:useLineNumbers", "False")
        .with_attr("MadCap:lineNumberStart", "1")
        .with_attr("MadCap:continue", "False")
        .with_attr("xml:space", "preserve");
    if !language.is_empty() {
        body.set_attr("style", format!("mc-code-lang: {language}"));
    }

    Element::new("MadCap:codeSnippet")
        .with_child(Element::new("MadCap:codeSnippetCopyButton"))
        .with_child(body.with_text(code))
}

pub fn cross_reference(href: impl Into<String>, text: impl Into<String>) -> Element {
    Element::new("MadCap:xref").with_attr("href", href).with_text(text)
}
