//! Geolocation provider boundary with a primary/secondary fallback chain.
//!
//! Providers are external services (IP databases, reverse geocoders)
//! consumed through an object-safe trait. The chain tries providers in
//! order and absorbs individual failures; a search proceeds without geo
//! bias when every provider comes up empty.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::PartialLocation;

/// External geolocation provider boundary.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Locate a client by IP address. `Ok(None)` means "unknown".
    async fn detect_by_ip(&self, ip: &str) -> Result<Option<PartialLocation>>;

    /// Resolve coordinates to a location. `Ok(None)` means "unknown".
    async fn reverse_geocode(&self, lat: f64, lon: f64) -> Result<Option<PartialLocation>>;
}

/// Ordered provider chain: the first provider to return a location wins;
/// errors and empty answers fall through to the next provider.
#[derive(Clone, Default)]
pub struct GeoProviderChain {
    providers: Vec<Arc<dyn GeoProvider>>,
}

impl GeoProviderChain {
    pub fn new(providers: Vec<Arc<dyn GeoProvider>>) -> Self {
        Self { providers }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Detect a location by IP through the chain. Never errors: provider
    /// failures are logged and absorbed.
    pub async fn detect_by_ip(&self, ip: &str) -> Option<PartialLocation> {
        for (index, provider) in self.providers.iter().enumerate() {
            match provider.detect_by_ip(ip).await {
                Ok(Some(location)) => return Some(location),
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(provider = index, error = %err, "IP detection failed");
                }
            }
        }
        None
    }

    /// Reverse-geocode coordinates through the chain. Never errors.
    pub async fn reverse_geocode(&self, lat: f64, lon: f64) -> Option<PartialLocation> {
        for (index, provider) in self.providers.iter().enumerate() {
            match provider.reverse_geocode(lat, lon).await {
                Ok(Some(location)) => return Some(location),
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(provider = index, error = %err, "reverse geocode failed");
                }
            }
        }
        None
    }
}
