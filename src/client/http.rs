use crate::client::traits::FlatApi;
use crate::client::types::ListParams;
use crate::codec;
use crate::config::Config;
use crate::models::{Flat, FlatInput, Furnish};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info, warn};

const XML_CONTENT_TYPE: &str = "application/xml";
const FLATS_PATH: &str = "/flat-management/flats";
const AGENCY_PATH: &str = "/agency";

/// reqwest-backed client for the flat management and agency services
pub struct HttpFlatClient {
    client: Client,
    flat_service_url: String,
    agency_service_url: String,
}

impl HttpFlatClient {
    /// Create a client against the default local deployment
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(concat!("flat-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            flat_service_url: config.flat_service_url.clone(),
            agency_service_url: config.agency_service_url.clone(),
        })
    }

    fn flats_url(&self, suffix: &str) -> String {
        format!("{}{}{}", self.flat_service_url, FLATS_PATH, suffix)
    }

    fn agency_url(&self, suffix: &str) -> String {
        format!("{}{}{}", self.agency_service_url, AGENCY_PATH, suffix)
    }

    /// Send a request and return the complete response body.
    /// Non-2xx statuses are reported as errors.
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<String> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to {what}"))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status {} for {}", self.service_name(), status, what);
            anyhow::bail!("Failed to {what}: {status}");
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;
        debug!("Received {} bytes for {}", body.len(), what);
        Ok(body)
    }

    fn xml_body(request: RequestBuilder, flat: &FlatInput) -> Result<RequestBuilder> {
        flat.validate()?;
        Ok(request
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(codec::encode(flat)))
    }

    async fn fetch_one(&self, request: RequestBuilder, what: &str) -> Result<Flat> {
        let body = self.send(request, what).await?;
        codec::decode_one(&body).with_context(|| format!("Failed to decode response to {what}"))
    }

    async fn fetch_many(&self, request: RequestBuilder, what: &str) -> Result<Vec<Flat>> {
        let body = self.send(request, what).await?;
        codec::decode_many(&body).with_context(|| format!("Failed to decode response to {what}"))
    }

    async fn fetch_number(&self, request: RequestBuilder, what: &str) -> Result<f64> {
        let body = self.send(request, what).await?;
        codec::decode_number(&body)
            .with_context(|| format!("Failed to decode response to {what}"))?
            .with_context(|| format!("Response to {what} has no number"))
    }
}

#[async_trait]
impl FlatApi for HttpFlatClient {
    async fn list(&self, params: &ListParams) -> Result<Vec<Flat>> {
        info!("Fetching page {} of flats (sort: {})", params.page, params.sort);
        let request = self
            .client
            .get(self.flats_url(""))
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .query(&params.query_pairs());
        let flats = self.fetch_many(request, "fetch flats").await?;
        info!("Fetched {} flats", flats.len());
        Ok(flats)
    }

    async fn create(&self, flat: &FlatInput) -> Result<Flat> {
        info!("Creating flat {:?}", flat.name);
        let request = Self::xml_body(self.client.post(self.flats_url("")), flat)?;
        self.fetch_one(request, "create flat").await
    }

    async fn update(&self, id: i64, flat: &FlatInput) -> Result<Flat> {
        info!("Updating flat {}", id);
        let request = Self::xml_body(self.client.put(self.flats_url(&format!("/{id}"))), flat)?;
        self.fetch_one(request, "update flat").await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        info!("Deleting flat {}", id);
        let request = self.client.delete(self.flats_url(&format!("/{id}")));
        self.send(request, "delete flat").await?;
        Ok(())
    }

    async fn min_coordinates(&self) -> Result<Flat> {
        let request = self.client.get(self.flats_url("/min-coordinates"));
        self.fetch_one(request, "fetch flat with minimal coordinates")
            .await
    }

    async fn furnish_less_than(&self, max_furnish: Furnish) -> Result<Vec<Flat>> {
        let request = self
            .client
            .get(self.flats_url("/furnish-less-than"))
            .query(&[("maxFurnish", max_furnish.as_str())]);
        self.fetch_many(request, "fetch flats by furnish").await
    }

    async fn count_rooms_at_least(&self, min_rooms: i64) -> Result<i64> {
        let request = self
            .client
            .get(self.flats_url("/number-of-rooms"))
            .query(&[("minRooms", min_rooms)]);
        let count = self.fetch_number(request, "count flats by rooms").await?;
        Ok(count.trunc() as i64)
    }

    async fn total_cost(&self) -> Result<f64> {
        let request = self.client.get(self.agency_url("/get-total-cost"));
        self.fetch_number(request, "fetch total cost").await
    }

    async fn find_with_balcony(&self, cheapest: bool, with_balcony: bool) -> Result<Flat> {
        let request = self
            .client
            .get(self.agency_url(&format!("/find-with-balcony/{cheapest}/{with_balcony}")));
        self.fetch_one(request, "find flat with balcony").await
    }

    fn service_name(&self) -> &'static str {
        "flat-management"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_service_urls() {
        let config = Config {
            flat_service_url: "https://flats.test".to_string(),
            agency_service_url: "https://agency.test:444".to_string(),
            ..Config::default()
        };
        let client = HttpFlatClient::with_config(&config).unwrap();

        assert_eq!(client.flats_url("/5"), "https://flats.test/flat-management/flats/5");
        assert_eq!(
            client.agency_url("/find-with-balcony/true/false"),
            "https://agency.test:444/agency/find-with-balcony/true/false"
        );
    }

    #[test]
    fn invalid_input_is_rejected_before_sending() {
        let client = HttpFlatClient::new().unwrap();
        let mut flat = FlatInput::default();
        flat.coordinates.y = -903.0;

        let request = client.client.post(client.flats_url(""));
        assert!(HttpFlatClient::xml_body(request, &flat).is_err());
    }
}
