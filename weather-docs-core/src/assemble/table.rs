use crate::markup::{Element, Node};

const TABLE_STYLE: &str = "mc-table-style: url('../Resources/TableStyles/Alternate-Row-Color.css');";
const TABLE_CLASS: &str = "TableStyle-Alternate-Row-Color";
const COLUMN_CLASS: &str = "TableStyle-Alternate-Row-Color-Column-Column1";
const HEAD_ROW_CLASS: &str = "TableStyle-Alternate-Row-Color-Head-Header1";
const HEAD_CELL_CLASS: &str = "TableStyle-Alternate-Row-Color-HeadE-Column1-Header1";

/// Style variant of a body row, decided by its 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowParity {
    Odd,
    Even,
}

impl RowParity {
    pub fn of(row: usize) -> Self {
        if row % 2 == 0 { RowParity::Even } else { RowParity::Odd }
    }

    fn row_class(&self) -> &'static str {
        match self {
            RowParity::Odd => "TableStyle-Standard-Body-Body1",
            RowParity::Even => "TableStyle-Standard-Body-Body2",
        }
    }

    fn cell_class(&self) -> &'static str {
        match self {
            RowParity::Odd => "TableStyle-Standard-BodyB-Column1-Body1",
            RowParity::Even => "TableStyle-Standard-BodyB-Column1-Body2",
        }
    }
}

/// A Flare table with a header row and a growing body.
#[derive(Debug, Clone)]
pub struct Table {
    head: Element,
    body: Element,
    columns: usize,
    rows: usize,
}

impl Table {
    pub fn new(columns: &[&str]) -> Self {
        let header = columns.iter().fold(
            Element::new("tr").with_attr("class", HEAD_ROW_CLASS),
            |row, name| row.with_child(Element::new("th").with_attr("class", HEAD_CELL_CLASS).with_text(*name)),
        );

        Self {
            head: Element::new("thead").with_child(header),
            body: Element::new("tbody"),
            columns: columns.len(),
            rows: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Append one body row. `parity` only picks the style classes.
    pub fn append_row<I, C>(&mut self, parity: RowParity, cells: I)
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = Node>,
    {
        let row = cells.into_iter().fold(
            Element::new("tr").with_attr("class", parity.row_class()),
            |row, content| {
                let mut td = Element::new("td").with_attr("class", parity.cell_class());
                td.children.extend(content);
                row.with_child(td)
            },
        );
        self.body.push(row);
        self.rows += 1;
    }

    /// Append a row styled by its position in the body.
    pub fn push_row<I, C>(&mut self, cells: I)
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = Node>,
    {
        self.append_row(RowParity::of(self.rows + 1), cells);
    }

    pub fn into_element(self) -> Element {
        let mut table = Element::new("table")
            .with_attr("style", TABLE_STYLE)
            .with_attr("class", TABLE_CLASS)
            .with_attr("cellspacing", "21");
        for _ in 0..self.columns {
            table.push(Element::new("col").with_attr("class", COLUMN_CLASS));
        }
        table.push(self.head);
        table.push(self.body);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_cells(values: &[&str]) -> Vec<Vec<Node>> {
        values.iter().map(|v| vec![Node::from(*v)]).collect()
    }

    #[test]
    fn header_lists_columns_in_order() {
        let table = Table::new(&["Time", "Weather", "Temperature", "Chance of Rain"]).into_element();

        assert_eq!(table.find_all("col").len(), 4);
        let headers: Vec<_> = table.find_all("th").iter().map(|th| th.text()).collect();
        assert_eq!(headers, ["Time", "Weather", "Temperature", "Chance of Rain"]);
        assert!(table.find("tbody").expect("tbody").children.is_empty());
    }

    #[test]
    fn rows_alternate_by_position() {
        let mut table = Table::new(&["Metric", "Value"]);
        for i in 0..5 {
            let n = i.to_string();
            table.push_row(text_cells(&["same", n.as_str()]));
        }
        assert_eq!(table.rows(), 5);

        let table = table.into_element();
        let body = table.find("tbody").expect("tbody");
        let classes: Vec<_> = body.elements().map(|tr| tr.attr("class").unwrap_or_default()).collect();
        assert_eq!(
            classes,
            [
                "TableStyle-Standard-Body-Body1",
                "TableStyle-Standard-Body-Body2",
                "TableStyle-Standard-Body-Body1",
                "TableStyle-Standard-Body-Body2",
                "TableStyle-Standard-Body-Body1",
            ]
        );
    }

    #[test]
    fn parity_does_not_touch_content() {
        let mut odd = Table::new(&["A", "B"]);
        odd.append_row(RowParity::Odd, text_cells(&["1", "2"]));
        let mut even = Table::new(&["A", "B"]);
        even.append_row(RowParity::Even, text_cells(&["1", "2"]));

        let odd = odd.into_element();
        let even = even.into_element();
        let cells = |t: &Element| -> Vec<String> { t.find_all("td").iter().map(|td| td.text()).collect() };
        assert_eq!(cells(&odd), cells(&even));
        assert_eq!(
            even.find("td").and_then(|td| td.attr("class")),
            Some("TableStyle-Standard-BodyB-Column1-Body2")
        );
    }

    #[test]
    fn parity_is_one_based() {
        assert_eq!(RowParity::of(1), RowParity::Odd);
        assert_eq!(RowParity::of(2), RowParity::Even);
        assert_eq!(RowParity::of(11), RowParity::Odd);
    }
}
