use std::path::{Path, PathBuf};

use super::fragments::{MADCAP_NAMESPACE, paragraph};
use crate::{
    Result,
    markup::{Document, Element},
};

pub const CURRENT_SECTION: &str = "current";
pub const HOURLY_SECTION: &str = "forecast_hourly";
pub const DAILY_SECTION: &str = "forecast_daily";

const PAGE_TITLE: &str = "Weather in [%=Heading.Level1%]";
const PAGE_DESCRIPTION: &str = "This page shows the weather in [%=Heading.Level1%]";
const TABLE_STYLESHEET: &str = "Resources/TableStyles/Alternate-Row-Color.css";

/// A city's weather page, opened with its head rebuilt and all three
/// weather sections emptied.
#[derive(Debug)]
pub struct Topic {
    path: PathBuf,
    document: Document,
}

impl Topic {
    pub fn open(path: &Path, title: &str) -> Result<Self> {
        let mut document = Document::load_or_create(path, || template(title))?;

        let head = document.find_section_mut("head", None)?;
        head.clear();
        head.push(Element::new("title").with_text(PAGE_TITLE));
        head.push(
            Element::new("link")
                .with_attr("href", TABLE_STYLESHEET)
                .with_attr("rel", "stylesheet")
                .with_attr("MadCap:stylesheetType", "table"),
        );
        head.push(
            Element::new("meta")
                .with_attr("name", "description")
                .with_attr("content", PAGE_DESCRIPTION),
        );

        for id in [CURRENT_SECTION, HOURLY_SECTION, DAILY_SECTION] {
            document.find_section_mut("div", Some(id))?.clear();
        }

        Ok(Self { path: path.to_path_buf(), document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn save(&self) -> Result<()> {
        self.document.save(&self.path)
    }
}

fn section(id: &str) -> Element {
    Element::new("div").with_attr("id", id)
}

/// Skeleton for a topic that does not exist yet.
pub fn template(title: &str) -> Document {
    let head = Element::new("head")
        .with_child(Element::new("title").with_text(PAGE_TITLE))
        .with_child(
            Element::new("meta")
                .with_attr("name", "description")
                .with_attr("content", PAGE_DESCRIPTION),
        );

    let body = Element::new("body")
        .with_child(Element::new("h1").with_text(title))
        .with_child(Element::new("h2").with_text("Current Weather"))
        .with_child(section(CURRENT_SECTION).with_child(paragraph("Please note the following alert:")))
        .with_child(Element::new("h2").with_text("Today's forecast"))
        .with_child(section(HOURLY_SECTION))
        .with_child(Element::new("h2").with_text("7 Day Forecast"))
        .with_child(section(DAILY_SECTION));

    Document::new(
        Element::new("html")
            .with_attr("xmlns:MadCap", MADCAP_NAMESPACE)
            .with_child(head)
            .with_child(body),
    )
}
