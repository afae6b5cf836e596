use crate::codec::error::CodecError;
use crate::codec::{COORDINATES_TAG, FLAT_TAG, HOUSE_TAG, NUMBER_TAG};
use crate::models::{Coordinates, Flat, Furnish, House, Transport, View};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

/// Flat-level lookups stop at these elements so a nested record never leaks
/// its fields into the enclosing one.
const FLAT_SCOPE: &[&str] = &[HOUSE_TAG, FLAT_TAG];

/// Owned element tree, just enough structure for tag lookups
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn named(name: &[u8]) -> Self {
        Self {
            name: String::from_utf8_lossy(name).into_owned(),
            ..Self::default()
        }
    }

    /// First descendant named `tag` in document order. Elements listed in
    /// `stop_at` can match but are not searched inside.
    fn find(&self, tag: &str, stop_at: &[&str]) -> Option<&Element> {
        for child in &self.children {
            if child.name == tag {
                return Some(child);
            }
            if stop_at.contains(&child.name.as_str()) {
                continue;
            }
            if let Some(found) = child.find(tag, stop_at) {
                return Some(found);
            }
        }
        None
    }

    fn find_text(&self, tag: &str, stop_at: &[&str]) -> Option<&str> {
        self.find(tag, stop_at).map(|element| element.text.as_str())
    }

    /// Every `tag` element that is not itself inside another `tag` element
    fn collect_outermost<'a>(&'a self, tag: &str, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == tag {
                out.push(child);
            } else {
                child.collect_outermost(tag, out);
            }
        }
    }
}

/// Parse `xml` into a synthetic root whose children are the top-level elements.
///
/// Several top-level elements are accepted since some endpoints return a
/// list of records without a wrapper.
fn parse_document(xml: &str) -> Result<Element, CodecError> {
    let mut reader = Reader::from_str(xml);
    let mut stack = vec![Element::default()];

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::named(start.local_name().as_ref())),
            Event::Empty(start) => {
                let element = Element::named(start.local_name().as_ref());
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(element);
                }
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.local_name().as_ref()).into_owned();
                if stack.len() < 2 {
                    return Err(CodecError::malformed(format!(
                        "unexpected closing tag </{name}>"
                    )));
                }
                let Some(element) = stack.pop() else {
                    break;
                };
                if element.name != name {
                    return Err(CodecError::malformed(format!(
                        "expected </{}>, found </{name}>",
                        element.name
                    )));
                }
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(element);
                }
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(data) => {
                let data = data.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&data))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() > 1 {
        let open: Vec<&str> = stack[1..].iter().map(|e| e.name.as_str()).collect();
        return Err(CodecError::malformed(format!(
            "unclosed elements at end of input: {}",
            open.join(", ")
        )));
    }
    Ok(stack.pop().unwrap_or_default())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), CodecError> {
    match stack {
        [_root] => {
            if text.trim().is_empty() {
                Ok(())
            } else {
                Err(CodecError::malformed("text outside of any element"))
            }
        }
        [.., current] => {
            current.text.push_str(text);
            Ok(())
        }
        [] => Ok(()),
    }
}

fn parse_document_with_root(xml: &str) -> Result<Element, CodecError> {
    let document = parse_document(xml)?;
    if document.children.is_empty() {
        return Err(CodecError::malformed("document has no root element"));
    }
    Ok(document)
}

fn parse_f64(text: Option<&str>) -> f64 {
    text.and_then(|t| t.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn parse_i64_opt(text: Option<&str>) -> Option<i64> {
    let text = text?.trim();
    text.parse::<i64>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| value.trunc() as i64)
    })
}

fn parse_i64(text: Option<&str>) -> i64 {
    parse_i64_opt(text).unwrap_or(0)
}

/// Server timestamps come as RFC 3339, a zone-less local date-time, or a plain
/// date. A trailing `[Region/City]` zone id is ignored.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    let text = match text.find('[') {
        Some(idx) if text.ends_with(']') => &text[..idx],
        _ => text,
    };
    if text.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn decode_house(element: &Element) -> House {
    let field = |tag: &str| element.find_text(tag, &[FLAT_TAG]);

    House {
        name: field("name")
            .filter(|name| !name.is_empty())
            .map(str::to_string),
        year: parse_i64_opt(field("year")),
        number_of_floors: parse_i64(field("numberOfFloors")),
        number_of_lifts: parse_i64(field("numberOfLifts")),
    }
}

fn decode_flat(element: &Element) -> Flat {
    let field = |tag: &str| element.find_text(tag, FLAT_SCOPE);
    let coordinates = element.find(COORDINATES_TAG, FLAT_SCOPE).unwrap_or(element);

    Flat {
        id: parse_i64(field("id")),
        name: field("name").unwrap_or_default().to_string(),
        coordinates: Coordinates {
            x: parse_f64(coordinates.find_text("x", FLAT_SCOPE)),
            y: parse_f64(coordinates.find_text("y", FLAT_SCOPE)),
        },
        creation_date: field("creationDate").and_then(parse_timestamp),
        area: parse_f64(field("area")),
        number_of_rooms: parse_i64(field("numberOfRooms")),
        furnish: field("furnish").and_then(Furnish::from_wire),
        view: field("view").and_then(View::from_wire),
        transport: field("transport").and_then(Transport::from_wire),
        house: element.find(HOUSE_TAG, FLAT_SCOPE).map(decode_house),
    }
}

/// Decode a single flat from the first `<Flat>` element anywhere in `xml`.
///
/// A well-formed document without any `<Flat>` element is read as if the
/// whole document were the record, so every field takes its default.
pub fn decode_one(xml: &str) -> Result<Flat, CodecError> {
    let document = parse_document_with_root(xml)?;
    let flat = match document.find(FLAT_TAG, &[]) {
        Some(element) => decode_flat(element),
        None => {
            debug!("no <{FLAT_TAG}> element in response, decoding from document root");
            decode_flat(&document)
        }
    };
    Ok(flat)
}

/// Decode every flat in `xml`, in document order.
///
/// Handles a `<Flats>` wrapper, a bare `<Flat>`, and several `<Flat>`
/// elements with no common parent alike. An empty body means no flats.
pub fn decode_many(xml: &str) -> Result<Vec<Flat>, CodecError> {
    if xml.trim().is_empty() {
        return Ok(Vec::new());
    }
    let document = parse_document(xml)?;

    let mut elements = Vec::new();
    document.collect_outermost(FLAT_TAG, &mut elements);
    let flats: Vec<Flat> = elements.into_iter().map(decode_flat).collect();

    debug!("decoded {} flats", flats.len());
    Ok(flats)
}

/// Read the value of an aggregate `<number>` response.
///
/// Returns `None` when the element is missing or does not hold a number.
pub fn decode_number(xml: &str) -> Result<Option<f64>, CodecError> {
    let document = parse_document_with_root(xml)?;
    let value = document
        .find_text(NUMBER_TAG, &[])
        .and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite());
    Ok(value)
}
