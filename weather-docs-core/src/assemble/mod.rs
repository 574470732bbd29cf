//! Renders a [`WeatherRecord`] into the sections of a Flare topic and keeps
//! the regional TOCs and overview snippets.

use crate::{
    Result,
    markup::{Document, Element, Node},
    model::{CellValue, Field, WeatherRecord},
};

pub mod fragments;
pub mod snippet;
pub mod table;
pub mod toc;
pub mod topic;

pub use snippet::OverviewSnippet;
pub use table::{RowParity, Table};
pub use toc::Toc;
pub use topic::Topic;

use fragments::{code_snippet, conditional_text, paragraph};
use topic::{CURRENT_SECTION, DAILY_SECTION, HOURLY_SECTION};

const ICON_DIR: &str = "../Resources/Images/weather_icons";

/// Writes the current, hourly and daily sections of a topic.
#[derive(Debug, Clone)]
pub struct TopicAssembler {
    fields: Vec<Field>,
}

impl Default for TopicAssembler {
    fn default() -> Self {
        Self { fields: Field::ALL.to_vec() }
    }
}

impl TopicAssembler {
    /// `fields` are the current-weather table rows, in display order.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn render(&self, document: &mut Document, record: &WeatherRecord) -> Result<()> {
        self.render_current(document, record)?;
        self.render_hourly(document, record)?;
        self.render_daily(document, record)
    }

    pub fn render_current(&self, document: &mut Document, record: &WeatherRecord) -> Result<()> {
        let current = &record.current;
        let section = document.find_section_mut("div", Some(CURRENT_SECTION))?;
        section.clear();

        section.push(paragraph(format!(
            "As of {} local time, the current weather is:",
            current.time
        )));

        let mut overview = Element::new("p").with_attr("class", "weather");
        for (unit, text) in current.temp.units() {
            overview.push(conditional_text(unit.condition(), text));
        }
        if let Some(icon) = current.icon() {
            overview.push(
                Element::new("img")
                    .with_attr("src", format!("{ICON_DIR}/{icon}.png"))
                    .with_attr("class", "icon_big"),
            );
        }
        section.push(overview);

        let mut table = Table::new(&["Metric", "Value"]);
        for &field in &self.fields {
            table.push_row([vec![Node::from(field.label())], render_cell(current.cell(field))]);
        }
        section.push(table.into_element());

        section.push(paragraph("Please note the following alert:"));
        section.push(code_snippet(record.alert.as_str(), ""));
        Ok(())
    }

    pub fn render_hourly(&self, document: &mut Document, record: &WeatherRecord) -> Result<()> {
        let section = document.find_section_mut("div", Some(HOURLY_SECTION))?;
        section.clear();

        let mut table = Table::new(&["Time", "Weather", "Temperature", "Chance of Rain"]);
        for hour in &record.hourly {
            table.push_row([
                render_cell(CellValue::Text(&hour.time)),
                render_cell(CellValue::Conditions(&hour.weather_conditions)),
                render_cell(CellValue::Dual(&hour.temp)),
                render_cell(CellValue::Text(&hour.chance_of_rain)),
            ]);
        }
        section.push(table.into_element());
        Ok(())
    }

    pub fn render_daily(&self, document: &mut Document, record: &WeatherRecord) -> Result<()> {
        let section = document.find_section_mut("div", Some(DAILY_SECTION))?;
        section.clear();

        let mut table = Table::new(&["Time", "Weather", "Min Temp", "Max Temp", "Chance of Rain"]);
        for day in &record.daily {
            table.push_row([
                render_cell(CellValue::Text(&day.time)),
                render_cell(CellValue::Conditions(&day.weather_conditions)),
                render_cell(CellValue::Dual(&day.min_temp)),
                render_cell(CellValue::Dual(&day.max_temp)),
                render_cell(CellValue::Text(&day.chance_of_rain)),
            ]);
        }
        section.push(table.into_element());
        Ok(())
    }
}

/// Markup for one table cell. Only the first weather condition is shown.
pub fn render_cell(value: CellValue<'_>) -> Vec<Node> {
    match value {
        CellValue::Dual(dual) => {
            let span = dual.units().into_iter().fold(Element::new("span"), |span, (unit, text)| {
                span.with_child(conditional_text(unit.condition(), text))
            });
            vec![Node::Element(span)]
        }
        CellValue::Conditions(conditions) => conditions
            .first()
            .map(|c| vec![Node::from(c.description.as_str())])
            .unwrap_or_default(),
        CellValue::Text(text) => vec![Node::from(text)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::Condition, normalize::normalize, units::DualUnitValue};

    fn record() -> WeatherRecord {
        normalize(&crate::normalize::tests::sample_response(24, 8)).expect("valid response")
    }

    fn fresh_topic() -> Document {
        topic::template("Berlin")
    }

    fn section<'a>(doc: &'a Document, id: &str) -> &'a Element {
        doc.root.find_by_id("div", id).expect("section")
    }

    fn rows(section: &Element) -> Vec<Vec<String>> {
        section
            .find("tbody")
            .expect("tbody")
            .elements()
            .map(|tr| tr.elements().map(Element::text).collect())
            .collect()
    }

    #[test]
    fn current_section_layout() {
        let mut doc = fresh_topic();
        TopicAssembler::default().render_current(&mut doc, &record()).expect("render");

        let current = section(&doc, CURRENT_SECTION);
        let names: Vec<_> = current.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["p", "p", "table", "p", "MadCap:codeSnippet"]);

        assert_eq!(
            current.elements().next().map(Element::text).as_deref(),
            Some("As of Tuesday, November 14, 2023 at 11:13 PM local time, the current weather is:")
        );

        let img = current.find("img").expect("icon");
        assert_eq!(img.attr("src"), Some("../Resources/Images/weather_icons/04n.png"));
        assert_eq!(img.attr("class"), Some("icon_big"));

        let labels: Vec<_> = rows(current).into_iter().map(|row| row[0].clone()).collect();
        assert_eq!(
            labels,
            ["Temperature", "Weather Conditions", "Feels like", "Humidity (%)", "UV Index", "Wind speed"]
        );
        assert_eq!(rows(current)[1][1], "broken clouds");
        assert_eq!(rows(current)[3][1], "65 %");

        let alert = current.find("MadCap:codeSnippetBody").expect("alert");
        assert_eq!(alert.text(), "There are no alerts.");
    }

    #[test]
    fn configured_fields_limit_current_table() {
        let mut doc = fresh_topic();
        TopicAssembler::new(vec![Field::Windspeed, Field::Uv])
            .render_current(&mut doc, &record())
            .expect("render");

        let rows = rows(section(&doc, CURRENT_SECTION));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "Wind speed");
        assert_eq!(rows[0][1], "5 m/s11 mph");
        assert_eq!(rows[1], ["UV Index", "0.89"]);
    }

    #[test]
    fn hourly_table_has_twelve_rows() {
        let mut doc = fresh_topic();
        TopicAssembler::default().render_hourly(&mut doc, &record()).expect("render");

        let hourly = section(&doc, HOURLY_SECTION);
        let headers: Vec<_> = hourly.find_all("th").iter().map(|th| th.text()).collect();
        assert_eq!(headers, ["Time", "Weather", "Temperature", "Chance of Rain"]);

        let rows = rows(hourly);
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0], ["11:13 PM", "hour 0", "10 °C50 °F", "10%"]);
        assert_eq!(rows[11][1], "hour 11");
    }

    #[test]
    fn daily_table_shows_first_condition_only() {
        let mut doc = fresh_topic();
        TopicAssembler::default().render_daily(&mut doc, &record()).expect("render");

        let daily = section(&doc, DAILY_SECTION);
        let rows = rows(daily);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], ["November 14", "day 0", "2 °C36 °F", "12 °C53 °F", "42%"]);
        assert!(rows.iter().all(|row| !row[1].contains("mist")));
    }

    #[test]
    fn rendering_twice_does_not_duplicate() {
        let record = record();
        let assembler = TopicAssembler::default();

        let mut once = fresh_topic();
        assembler.render(&mut once, &record).expect("render");

        let mut twice = fresh_topic();
        assembler.render(&mut twice, &record).expect("render");
        assembler.render(&mut twice, &record).expect("render");

        assert_eq!(once, twice);
    }

    #[test]
    fn independently_cleared_documents_match() {
        let record = record();
        let assembler = TopicAssembler::default();

        let mut a = fresh_topic();
        let mut b = fresh_topic();
        assembler.render(&mut a, &record).expect("render");
        assembler.render(&mut b, &record).expect("render");

        assert_eq!(a.to_xml().expect("xml"), b.to_xml().expect("xml"));
    }

    #[test]
    fn missing_section_aborts_rendering() {
        let mut doc = Document::new(Element::new("html").with_child(Element::new("body")));
        let err = TopicAssembler::default().render(&mut doc, &record()).unwrap_err();
        assert!(matches!(err, crate::Error::MissingSection { .. }));
    }

    #[test]
    fn cell_rendering_dispatch() {
        let dual = DualUnitValue::temperature(20.0);
        let nodes = render_cell(CellValue::Dual(&dual));
        let Node::Element(span) = &nodes[0] else { panic!("expected span") };
        assert_eq!(span.name, "span");
        let conditions: Vec<_> = span.elements().filter_map(|e| e.attr("MadCap:conditions")).collect();
        assert_eq!(conditions, ["Units.Metric", "Units.Imperial"]);

        let list = [
            Condition { description: "light rain".into(), icon: "10d".into() },
            Condition { description: "mist".into(), icon: "50d".into() },
        ];
        assert_eq!(render_cell(CellValue::Conditions(&list)), [Node::from("light rain")]);

        assert_eq!(render_cell(CellValue::Text("42%")), [Node::from("42%")]);
        assert!(render_cell(CellValue::Conditions(&[])).is_empty());
    }
}
