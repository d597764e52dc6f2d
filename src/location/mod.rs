//! Location Lookup Module
//!
//! Best-effort resolution of the device's city name. Every failure path
//! collapses to [`UNKNOWN_CITY`], so callers never need error handling.

use std::future::Future;

use thiserror::Error;
use tracing::debug;

/// City name used whenever the lookup cannot produce one
pub const UNKNOWN_CITY: &str = "Unknown";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location services unavailable: {0}")]
    Unavailable(String),

    #[error("Geocoder failed: {0}")]
    Geocoder(String),
}

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One reverse-geocoding match
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    /// City or town, when the geocoder knows it
    pub locality: Option<String>,
}

/// Device location collaborator.
///
/// Implementations wrap a platform location service; all access is read-only.
pub trait LocationProvider: Send + Sync + 'static {
    /// Whether coarse or fine location access has been granted
    fn has_permission(&self) -> bool;

    fn last_known_location(
        &self,
    ) -> impl Future<Output = Result<Option<Coordinates>, LocationError>> + Send;

    fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> impl Future<Output = Result<Vec<Address>, LocationError>> + Send;
}

/// Resolves the current city name in a single attempt.
///
/// Returns [`UNKNOWN_CITY`] when permission is missing, there is no
/// last-known fix, the geocoder has no match or no locality, or any
/// step fails.
pub async fn resolve_city_name<L: LocationProvider>(provider: &L) -> String {
    match try_resolve(provider).await {
        Ok(Some(city)) => city,
        Ok(None) => UNKNOWN_CITY.to_string(),
        Err(e) => {
            debug!("city lookup failed: {}", e);
            UNKNOWN_CITY.to_string()
        }
    }
}

async fn try_resolve<L: LocationProvider>(
    provider: &L,
) -> Result<Option<String>, LocationError> {
    if !provider.has_permission() {
        return Ok(None);
    }

    let Some(coordinates) = provider.last_known_location().await? else {
        return Ok(None);
    };

    let addresses = provider.reverse_geocode(coordinates).await?;
    Ok(addresses.into_iter().next().and_then(|a| a.locality))
}

/// A provider with a fixed answer, for hosts without location services
#[derive(Debug, Clone, Default)]
pub struct StaticLocation {
    permission: bool,
    fix: Option<Coordinates>,
    locality: Option<String>,
}

impl StaticLocation {
    /// A provider whose permission has not been granted
    pub fn denied() -> Self {
        Self::default()
    }

    /// A granted provider that reports `coordinates` and geocodes them to `locality`
    pub fn at(coordinates: Coordinates, locality: Option<String>) -> Self {
        Self {
            permission: true,
            fix: Some(coordinates),
            locality,
        }
    }

    /// A granted provider that has no last-known fix
    pub fn without_fix() -> Self {
        Self {
            permission: true,
            ..Self::default()
        }
    }
}

impl LocationProvider for StaticLocation {
    fn has_permission(&self) -> bool {
        self.permission
    }

    async fn last_known_location(&self) -> Result<Option<Coordinates>, LocationError> {
        Ok(self.fix)
    }

    async fn reverse_geocode(&self, _coordinates: Coordinates) -> Result<Vec<Address>, LocationError> {
        Ok(vec![Address {
            locality: self.locality.clone(),
        }])
    }
}
