//! Client-side tooling for the flat management service: typed flat records,
//! the XML codec used on the wire, an HTTP client and a local record store.

pub mod client;
pub mod codec;
pub mod config;
pub mod models;
pub mod store;

pub use client::{FlatApi, HttpFlatClient, ListParams};
pub use codec::CodecError;
pub use models::{Coordinates, Flat, FlatInput, Furnish, House, Transport, View};
pub use store::{FlatStore, StoreAction};
