//! XML wire format for flat records.
//!
//! The flat service speaks XML in both directions: request bodies carry a
//! single `<Flat>` document, responses carry either one record, a `<Flats>`
//! collection, or (from some endpoints) bare `<Flat>` elements with no
//! wrapper at all. Aggregate endpoints answer with a lone `<number>` element.
//!
//! Decoding is lenient about missing fields and strict about syntax: an
//! absent element falls back to its default, while text that is not XML is
//! rejected with [`CodecError::MalformedDocument`].

pub mod decode;
pub mod encode;
pub mod error;

pub use decode::{decode_many, decode_number, decode_one};
pub use encode::encode;
pub use error::CodecError;

pub(crate) const FLAT_TAG: &str = "Flat";
pub(crate) const COORDINATES_TAG: &str = "coordinates";
pub(crate) const HOUSE_TAG: &str = "house";
pub(crate) const NUMBER_TAG: &str = "number";
