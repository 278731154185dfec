//! Device geolocation collaborator.
//!
//! The host platform's location service is an external collaborator; this
//! module models it as the [`LocationProvider`] seam plus the acquisition
//! step used on submission. A failed or slow position request is never
//! fatal: [`acquire`] folds every failure into
//! [`LocationStamp::Unavailable`].

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::record::LocationStamp;

/// Default bound on the one-shot position request.
pub const DEFAULT_POSITION_WAIT: Duration = Duration::from_secs(10);

/// Errors from a position request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user or platform denied access to the device position.
    #[error("location permission denied")]
    Denied,

    /// No location source exists on this host.
    #[error("no location source available")]
    Unsupported,

    /// The position request exceeded its bounded wait.
    #[error("location request timed out")]
    TimedOut,
}

/// Permission state reported before a position request is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// Position requests will succeed without prompting.
    Granted,
    /// Position requests will be refused.
    Denied,
    /// The platform will ask the user on the first request.
    Prompt,
}

impl std::fmt::Display for PermissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
            Self::Prompt => write!(f, "prompt"),
        }
    }
}

/// A device position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
}

impl Coordinates {
    /// Convert the fix into the record's location stamp.
    #[must_use]
    pub fn stamp(self) -> LocationStamp {
        LocationStamp::Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Source of device position fixes.
///
/// `current_position` is a one-shot, fresh-fix request; implementations
/// must not serve a cached reading. The caller applies the bounded wait.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Report the current permission state without prompting.
    fn permission_state(&self) -> PermissionState;

    /// Request a single fresh position fix, with a high-accuracy hint to
    /// the underlying source.
    ///
    /// # Errors
    ///
    /// Returns an error if access is denied or no source exists.
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

#[async_trait]
impl<L: LocationProvider + ?Sized> LocationProvider for Box<L> {
    fn permission_state(&self) -> PermissionState {
        (**self).permission_state()
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        (**self).current_position().await
    }
}

/// Provider backed by a provisioned position (e.g. a kiosk's surveyed
/// coordinates from the configuration file).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator {
    coordinates: Coordinates,
}

impl FixedLocator {
    /// Create a provider that always reports the given position.
    #[must_use]
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationProvider for FixedLocator {
    fn permission_state(&self) -> PermissionState {
        PermissionState::Granted
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coordinates)
    }
}

/// Provider for hosts without a usable location source.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLocator;

#[async_trait]
impl LocationProvider for UnavailableLocator {
    fn permission_state(&self) -> PermissionState {
        PermissionState::Denied
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Denied)
    }
}

/// Attempt to obtain a position stamp within the bounded wait.
///
/// Denial, missing support, and timeouts all downgrade to
/// [`LocationStamp::Unavailable`]; the attendance write proceeds either way.
pub async fn acquire<L: LocationProvider + ?Sized>(
    provider: &L,
    wait: Duration,
) -> LocationStamp {
    if provider.permission_state() == PermissionState::Denied {
        warn!("location permission denied; marking attendance without location");
        return LocationStamp::Unavailable;
    }

    match tokio::time::timeout(wait, provider.current_position()).await {
        Ok(Ok(fix)) => fix.stamp(),
        Ok(Err(error)) => {
            warn!(%error, "location unavailable");
            LocationStamp::Unavailable
        }
        Err(_) => {
            warn!(wait_secs = wait.as_secs(), "location request timed out");
            LocationStamp::Unavailable
        }
    }
}
