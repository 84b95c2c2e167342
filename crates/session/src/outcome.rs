use geojson::FeatureCollection;

/// Message shown when geolocation fails. Wording kept from the original UI.
pub const GEOLOCATION_FAILED: &str = "We couldn't geolocate you!";

/// Message shown when geolocation exceeds its timeout.
pub const GEOLOCATION_TIMED_OUT: &str = "Geolocation timed out";

/// Terminal result of one trigger -> result cycle. Produced exactly once
/// per session; a failure requires a fresh user trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The overlay geometry exactly as the service returned it.
    Success(FeatureCollection),
    /// Permission denied or the provider unavailable.
    GeolocationFailure,
    /// No fix within the geolocation timeout.
    Timeout,
    /// Transport error, non-2xx status, or a malformed 2xx body.
    NetworkFailure(String),
}

impl SessionOutcome {
    /// Feedback text for failed outcomes; `None` for success.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            SessionOutcome::Success(_) => None,
            SessionOutcome::GeolocationFailure => Some(GEOLOCATION_FAILED),
            SessionOutcome::Timeout => Some(GEOLOCATION_TIMED_OUT),
            SessionOutcome::NetworkFailure(msg) => Some(msg),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SessionOutcome::Success(_))
    }
}
