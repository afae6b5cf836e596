use crate::codec::{COORDINATES_TAG, FLAT_TAG, HOUSE_TAG};
use crate::models::FlatInput;
use quick_xml::escape::escape;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "  ";

/// Line-oriented writer for the small, fixed-shape documents the service accepts
struct XmlBuilder {
    out: String,
    depth: usize,
}

impl XmlBuilder {
    fn new() -> Self {
        let mut out = String::from(XML_DECLARATION);
        out.push('\n');
        Self { out, depth: 0 }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn open(&mut self, tag: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    /// Text element; the value is escaped so user input cannot break the document
    fn text(&mut self, tag: &str, value: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
        self.out.push_str(&escape(value));
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Serialize a flat into the `<Flat>` request body used by create and update.
///
/// Absent enums and house strings are written as empty elements. A missing
/// house is left out entirely so that it reads back as missing.
pub fn encode(flat: &FlatInput) -> String {
    let mut xml = XmlBuilder::new();
    xml.open(FLAT_TAG);

    xml.text("name", &flat.name);
    xml.open(COORDINATES_TAG);
    xml.text("x", &flat.coordinates.x.to_string());
    xml.text("y", &flat.coordinates.y.to_string());
    xml.close(COORDINATES_TAG);
    xml.text("area", &flat.area.to_string());
    xml.text("numberOfRooms", &flat.number_of_rooms.to_string());
    xml.text("furnish", flat.furnish.map(|f| f.as_str()).unwrap_or_default());
    xml.text("view", flat.view.map(|v| v.as_str()).unwrap_or_default());
    xml.text("transport", flat.transport.map(|t| t.as_str()).unwrap_or_default());

    if let Some(house) = &flat.house {
        xml.open(HOUSE_TAG);
        xml.text("name", house.name.as_deref().unwrap_or_default());
        xml.text(
            "year",
            &house.year.map(|year| year.to_string()).unwrap_or_default(),
        );
        xml.text("numberOfFloors", &house.number_of_floors.to_string());
        xml.text("numberOfLifts", &house.number_of_lifts.to_string());
        xml.close(HOUSE_TAG);
    }

    xml.close(FLAT_TAG);
    xml.finish()
}
