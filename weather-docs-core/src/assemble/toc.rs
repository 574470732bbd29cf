use std::path::{Path, PathBuf};

use crate::{
    Result,
    geography::Continent,
    markup::{Document, Element},
};

const TOC_ROOT: &str = "CatapultToc";

/// A flat regional table of contents: one `TocEntry` per topic, no folders.
#[derive(Debug)]
pub struct Toc {
    path: PathBuf,
    document: Document,
}

impl Toc {
    /// Open (or create) the TOC at `path`, drop its entries and write the
    /// emptied file back immediately.
    pub fn open(path: &Path) -> Result<Self> {
        let mut document = Document::load_or_create(path, template)?;
        document.find_section_mut(TOC_ROOT, None)?.clear();
        document.save(path)?;

        Ok(Self { path: path.to_path_buf(), document })
    }

    pub fn add_entry(&mut self, continent: Continent, topic: &str) -> Result<()> {
        let entry = Element::new("TocEntry")
            .with_attr("Title", topic)
            .with_attr("Link", format!("/Content/{}/{topic}.htm", continent.folder()));
        self.document.find_section_mut(TOC_ROOT, None)?.push(entry);
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
    Document::new(Element::new(TOC_ROOT).with_attr("Version", "1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn open_clears_existing_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Europe.fltoc");
        fs::write(
            &path,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n<CatapultToc Version=\"1\">\r\n\
             <TocEntry Title=\"Old\" Link=\"/Content/Europe/Old.htm\"/></CatapultToc>",
        )
        .expect("write");

        let toc = Toc::open(&path).expect("open");
        assert!(toc.document().root.children.is_empty());

        // cleared version is on disk before anything is added
        let on_disk = fs::read_to_string(&path).expect("read");
        assert!(!on_disk.contains("Old"));
        assert!(!on_disk.contains('\r'));
    }

    #[test]
    fn entries_link_to_continent_folder() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("TOCs").join("NorthAmerica.fltoc");

        let mut toc = Toc::open(&path).expect("open");
        toc.add_entry(Continent::NorthAmerica, "Chicago").expect("add");
        toc.add_entry(Continent::NorthAmerica, "Mexico City").expect("add");
        toc.save().expect("save");

        let doc = Document::load(&path).expect("reload");
        let entries: Vec<_> = doc
            .root
            .elements()
            .map(|e| (e.attr("Title").unwrap_or_default(), e.attr("Link").unwrap_or_default()))
            .collect();
        assert_eq!(
            entries,
            [
                ("Chicago", "/Content/NorthAmerica/Chicago.htm"),
                ("Mexico City", "/Content/NorthAmerica/Mexico City.htm"),
            ]
        );
    }
}
