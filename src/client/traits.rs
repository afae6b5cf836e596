use crate::models::{Flat, FlatInput, Furnish};
use anyhow::Result;
use async_trait::async_trait;

use super::types::ListParams;

/// Operations offered by the flat management and agency services.
/// Keeping them behind a trait lets the CLI and tests run against any backend.
#[async_trait]
pub trait FlatApi: Send + Sync {
    /// Fetch one page of flats
    async fn list(&self, params: &ListParams) -> Result<Vec<Flat>>;

    /// Create a flat; the server assigns id and creation date
    async fn create(&self, flat: &FlatInput) -> Result<Flat>;

    /// Replace the flat with the given id
    async fn update(&self, id: i64, flat: &FlatInput) -> Result<Flat>;

    async fn delete(&self, id: i64) -> Result<()>;

    /// Flat with the smallest coordinates
    async fn min_coordinates(&self) -> Result<Flat>;

    /// Flats whose furnish level is below `max_furnish`
    async fn furnish_less_than(&self, max_furnish: Furnish) -> Result<Vec<Flat>>;

    /// Number of flats with at least `min_rooms` rooms
    async fn count_rooms_at_least(&self, min_rooms: i64) -> Result<i64>;

    /// Total cost of all flats, computed by the agency service
    async fn total_cost(&self) -> Result<f64>;

    /// Cheapest (or most expensive) flat with or without a balcony
    async fn find_with_balcony(&self, cheapest: bool, with_balcony: bool) -> Result<Flat>;

    /// Name of the backend, used in log lines
    fn service_name(&self) -> &'static str;
}
