use std::time::Duration;

use geometry::LonLat;

/// Options passed to every geolocation attempt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LocateOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_millis(2500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// The user denied the permission prompt.
    Denied,
    /// No fix within the configured timeout.
    Timeout,
    /// The provider is unavailable on this platform.
    Unavailable(String),
}

impl std::fmt::Display for LocateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocateError::Denied => write!(f, "geolocation permission denied"),
            LocateError::Timeout => write!(f, "geolocation timed out"),
            LocateError::Unavailable(msg) => write!(f, "geolocation unavailable: {msg}"),
        }
    }
}

impl std::error::Error for LocateError {}

/// The geolocation collaborator. One call per session; the result is
/// captured once and immutable afterwards.
#[allow(async_fn_in_trait)]
pub trait LocationProvider {
    async fn locate(&mut self, options: LocateOptions) -> Result<LonLat, LocateError>;
}

/// Provider that always yields the same fix. Serves configured deployments
/// without a positioning backend, and tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedLocation {
    origin: LonLat,
}

impl FixedLocation {
    pub fn new(origin: LonLat) -> Self {
        Self { origin }
    }
}

impl LocationProvider for FixedLocation {
    async fn locate(&mut self, _options: LocateOptions) -> Result<LonLat, LocateError> {
        Ok(self.origin)
    }
}
