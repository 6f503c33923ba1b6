//! HTTP implementation of the location lookup service.
//!
//! Endpoints, relative to the configured base URL:
//!
//! - `GET countries`
//! - `GET country={country}/states`
//! - `GET country={country}/state={state}/cities`
//!
//! Each responds with a JSON array of place names.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use tracing::debug;

use crate::domain::{LevelKey, LocationLookup, LookupFailure, LookupResult};

/// Blocking HTTP client for the location service.
#[derive(Debug, Clone)]
pub struct HttpLookup {
    client: Client,
    base_url: Url,
}

impl HttpLookup {
    /// Builds a client for `base_url`. Without a `timeout` reqwest's default
    /// applies.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    fn get(&self, key: &LevelKey) -> LookupResult<Vec<String>> {
        let url = endpoint(&self.base_url, key)?;
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| LookupFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupFailure::Status(status.as_u16()));
        }
        let body = response
            .text()
            .map_err(|e| LookupFailure::Transport(e.to_string()))?;
        parse_place_names(&body)
    }
}

impl LocationLookup for HttpLookup {
    fn list_countries(&self) -> LookupResult<Vec<String>> {
        self.get(&LevelKey::Countries)
    }

    fn list_states(&self, country: &str) -> LookupResult<Vec<String>> {
        self.get(&LevelKey::States {
            country: country.to_string(),
        })
    }

    fn list_cities(&self, country: &str, state: &str) -> LookupResult<Vec<String>> {
        self.get(&LevelKey::Cities {
            country: country.to_string(),
            state: state.to_string(),
        })
    }
}

/// The request URL for `key`. Path segments are percent-encoded.
pub fn endpoint(base_url: &Url, key: &LevelKey) -> LookupResult<Url> {
    let segments = match key {
        LevelKey::Countries => vec!["countries".to_string()],
        LevelKey::States { country } => vec![format!("country={}", country), "states".to_string()],
        LevelKey::Cities { country, state } => vec![
            format!("country={}", country),
            format!("state={}", state),
            "cities".to_string(),
        ],
    };

    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| LookupFailure::Transport(format!("'{}' cannot be a base URL", base_url)))?
        .pop_if_empty()
        .extend(segments.iter().map(String::as_str));
    Ok(url)
}

/// Decodes a JSON array of names, keeping the service's order.
pub fn parse_place_names(body: &str) -> LookupResult<Vec<String>> {
    serde_json::from_str::<Vec<String>>(body).map_err(|e| LookupFailure::Decode(e.to_string()))
}
