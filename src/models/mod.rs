use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lower bound (exclusive) accepted for the x coordinate
pub const MIN_X: f64 = -143.0;
/// Lower bound (exclusive) accepted for the y coordinate
pub const MIN_Y: f64 = -903.0;

/// Furnishing level of a flat
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Furnish {
    Designer,
    None,
    Fine,
    Bad,
    Little,
}

impl Furnish {
    pub fn as_str(&self) -> &'static str {
        match self {
            Furnish::Designer => "DESIGNER",
            Furnish::None => "NONE",
            Furnish::Fine => "FINE",
            Furnish::Bad => "BAD",
            Furnish::Little => "LITTLE",
        }
    }

    /// Parse a wire token. Unknown tokens are treated as absent.
    pub fn from_wire(token: &str) -> Option<Self> {
        match token.trim() {
            "DESIGNER" => Some(Furnish::Designer),
            "NONE" => Some(Furnish::None),
            "FINE" => Some(Furnish::Fine),
            "BAD" => Some(Furnish::Bad),
            "LITTLE" => Some(Furnish::Little),
            _ => None,
        }
    }
}

/// What the windows look out on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    Yard,
    Park,
    Normal,
    Good,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Yard => "YARD",
            View::Park => "PARK",
            View::Normal => "NORMAL",
            View::Good => "GOOD",
        }
    }

    pub fn from_wire(token: &str) -> Option<Self> {
        match token.trim() {
            "YARD" => Some(View::Yard),
            "PARK" => Some(View::Park),
            "NORMAL" => Some(View::Normal),
            "GOOD" => Some(View::Good),
            _ => None,
        }
    }
}

/// Public transport availability
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Transport {
    Few,
    None,
    Normal,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Few => "FEW",
            Transport::None => "NONE",
            Transport::Normal => "NORMAL",
        }
    }

    pub fn from_wire(token: &str) -> Option<Self> {
        match token.trim() {
            "FEW" => Some(Transport::Few),
            "NONE" => Some(Transport::None),
            "NORMAL" => Some(Transport::Normal),
            _ => None,
        }
    }
}

/// Position of a flat, always embedded in the flat itself
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

/// Building the flat belongs to
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub name: Option<String>,
    pub year: Option<i64>,
    pub number_of_floors: i64,
    pub number_of_lifts: i64,
}

/// Flat record as returned by the flat service
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Flat {
    pub id: i64,
    pub name: String,
    pub coordinates: Coordinates,
    /// `None` when the server sent no date or one that could not be parsed
    pub creation_date: Option<DateTime<Utc>>,
    pub area: f64,
    pub number_of_rooms: i64,
    pub furnish: Option<Furnish>,
    pub view: Option<View>,
    pub transport: Option<Transport>,
    pub house: Option<House>,
}

impl Flat {
    /// Fields a client may submit back to the server after editing this flat
    pub fn to_input(&self) -> FlatInput {
        FlatInput {
            name: self.name.clone(),
            coordinates: self.coordinates,
            area: self.area,
            number_of_rooms: self.number_of_rooms,
            furnish: self.furnish,
            view: self.view,
            transport: self.transport,
            house: self.house.clone(),
        }
    }
}

/// Flat fields sent on create and update; id and creation date are server-assigned
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlatInput {
    pub name: String,
    pub coordinates: Coordinates,
    pub area: f64,
    pub number_of_rooms: i64,
    pub furnish: Option<Furnish>,
    pub view: Option<View>,
    pub transport: Option<Transport>,
    pub house: Option<House>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("coordinate {axis} must be greater than {min}, got {value}")]
    CoordinateOutOfRange { axis: char, value: f64, min: f64 },
}

impl FlatInput {
    /// Client-side checks applied before a flat is sent to the server
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.coordinates.x <= MIN_X {
            return Err(ValidationError::CoordinateOutOfRange {
                axis: 'x',
                value: self.coordinates.x,
                min: MIN_X,
            });
        }
        if self.coordinates.y <= MIN_Y {
            return Err(ValidationError::CoordinateOutOfRange {
                axis: 'y',
                value: self.coordinates.y,
                min: MIN_Y,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_enum_tokens_are_absent() {
        assert_eq!(Furnish::from_wire("FANCY"), None);
        assert_eq!(View::from_wire(""), None);
        assert_eq!(Transport::from_wire("few"), None);
        assert_eq!(Transport::from_wire(" FEW\n"), Some(Transport::Few));
    }

    #[test]
    fn wire_tokens_match_serde_names() {
        let json = serde_json::to_string(&Furnish::Designer).unwrap();
        assert_eq!(json, format!("\"{}\"", Furnish::Designer.as_str()));
        let json = serde_json::to_string(&View::Park).unwrap();
        assert_eq!(json, "\"PARK\"");
    }

    #[test]
    fn validate_rejects_coordinates_on_the_bound() {
        let mut input = FlatInput::default();
        assert!(input.validate().is_ok());

        input.coordinates.x = -143.0;
        assert_eq!(
            input.validate(),
            Err(ValidationError::CoordinateOutOfRange {
                axis: 'x',
                value: -143.0,
                min: MIN_X
            })
        );

        input.coordinates.x = -142.5;
        input.coordinates.y = -1000.0;
        assert!(matches!(
            input.validate(),
            Err(ValidationError::CoordinateOutOfRange { axis: 'y', .. })
        ));
    }

    #[test]
    fn to_input_drops_server_fields() {
        let flat = Flat {
            id: 7,
            name: "Loft".to_string(),
            number_of_rooms: 3,
            transport: Some(Transport::Normal),
            ..Flat::default()
        };
        let input = flat.to_input();
        assert_eq!(input.name, "Loft");
        assert_eq!(input.number_of_rooms, 3);
        assert_eq!(input.transport, Some(Transport::Normal));
    }
}
