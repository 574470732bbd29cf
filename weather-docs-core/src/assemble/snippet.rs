use std::path::{Path, PathBuf};

use super::fragments::{MADCAP_NAMESPACE, cross_reference};
use crate::{
    Result,
    geography::Continent,
    markup::{Document, Element},
};

/// Regional overview snippet: a single bulleted list of links to topics.
#[derive(Debug)]
pub struct OverviewSnippet {
    path: PathBuf,
    document: Document,
}

impl OverviewSnippet {
    /// Open (or create) the snippet and replace its body with an empty list.
    pub fn open(path: &Path) -> Result<Self> {
        let mut document = Document::load_or_create(path, template)?;
        let body = document.find_section_mut("body", None)?;
        body.clear();
        body.push(Element::new("ul"));

        Ok(Self { path: path.to_path_buf(), document })
    }

    pub fn add_entry(&mut self, continent: Continent, topic: &str) -> Result<()> {
        let href = format!("../../{}/{topic}.htm", continent.folder());
        let item = Element::new("li")
            .with_child(Element::new("p").with_child(cross_reference(href, topic)));
        self.document.find_section_mut("ul", None)?.push(item);
        Ok(())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn save(&self) -> Result<()> {
        self.document.save(&self.path)
    }
}

pub fn template() -> Document {
    Document::new(
        Element::new("html")
            .with_attr("xmlns:MadCap", MADCAP_NAMESPACE)
            .with_child(Element::new("head"))
            .with_child(Element::new("body")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_cross_references() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Europe.flsnp");
        fs::write(
            &path,
            "\u{feff}<?xml version=\"1.0\" encoding=\"utf-8\"?>\
             <html xmlns:MadCap=\"http://www.madcapsoftware.com/Schemas/MadCap.xsd\">\
             <head/><body><p>previous run</p></body></html>",
        )
        .expect("write");

        let mut snippet = OverviewSnippet::open(&path).expect("open");
        snippet.add_entry(Continent::Europe, "Berlin").expect("add");
        snippet.add_entry(Continent::Europe, "Madrid").expect("add");
        snippet.save().expect("save");

        let doc = Document::load(&path).expect("reload");
        let body = doc.root.find("body").expect("body");
        assert_eq!(body.elements().count(), 1);
        assert!(!body.text().contains("previous run"));

        let links: Vec<_> = doc
            .root
            .find_all("MadCap:xref")
            .iter()
            .map(|x| (x.attr("href").unwrap_or_default().to_string(), x.text()))
            .collect();
        assert_eq!(
            links,
            [
                ("../../Europe/Berlin.htm".to_string(), "Berlin".to_string()),
                ("../../Europe/Madrid.htm".to_string(), "Madrid".to_string()),
            ]
        );
    }

    #[test]
    fn missing_snippet_is_created() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Snippets").join("Asia.flsnp");

        let snippet = OverviewSnippet::open(&path).expect("open");
        assert!(path.is_file());
        assert!(snippet.document().root.find("ul").is_some());
    }
}
