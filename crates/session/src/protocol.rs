//! Wire types for the remote route service.
//!
//! Requests carry a coordinate as `{"lon": .., "lat": ..}`; the legacy
//! client shape `{"coords": {"latitude": .., "longitude": ..}}` is still
//! accepted on deserialization. Responses are a JSON array whose first
//! element is the overlay feature collection; trailing elements (the old
//! bounds array) are ignored. Non-2xx responses may carry
//! `{"message": string}` for display.

use geojson::FeatureCollection;
use geometry::LonLat;
use overlay::RequestKind;
use serde::{Deserialize, Serialize};

/// Fallback feedback text when a failure carries no message of its own.
pub const GENERIC_FAILURE: &str = "Hmm. Something went wrong";

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct RouteRequest {
    pub lon: f64,
    pub lat: f64,
}

impl From<LonLat> for RouteRequest {
    fn from(c: LonLat) -> Self {
        Self {
            lon: c.lon,
            lat: c.lat,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LegacyCoords {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RouteRequestWire {
    Flat { lon: f64, lat: f64 },
    Legacy { coords: LegacyCoords },
}

impl<'de> Deserialize<'de> for RouteRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match RouteRequestWire::deserialize(deserializer)? {
            RouteRequestWire::Flat { lon, lat } => Ok(Self { lon, lat }),
            RouteRequestWire::Legacy { coords } => Ok(Self {
                lon: coords.longitude,
                lat: coords.latitude,
            }),
        }
    }
}

/// Error body shape on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteError {
    /// Non-2xx status, with the body's message when it had one.
    Status { code: u16, message: Option<String> },
    /// Connection or transfer failure.
    Transport(String),
    /// 2xx with an unusable body.
    Malformed(String),
}

impl RouteError {
    /// Text surfaced to the user: the server's message verbatim when
    /// available, else the generic fallback.
    pub fn display_message(&self) -> String {
        match self {
            RouteError::Status {
                message: Some(msg), ..
            } => msg.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

impl std::fmt::Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteError::Status { code, message } => match message {
                Some(msg) => write!(f, "route service returned {code}: {msg}"),
                None => write!(f, "route service returned {code}"),
            },
            RouteError::Transport(msg) => write!(f, "route service unreachable: {msg}"),
            RouteError::Malformed(msg) => write!(f, "malformed route response: {msg}"),
        }
    }
}

impl std::error::Error for RouteError {}

/// The remote collaborator owning route computation.
#[allow(async_fn_in_trait)]
pub trait RouteService {
    async fn fetch(
        &self,
        kind: RequestKind,
        origin: LonLat,
    ) -> Result<FeatureCollection, RouteError>;
}

/// Extract the overlay collection from a 2xx response body.
pub fn parse_route_response(body: &str) -> Result<FeatureCollection, RouteError> {
    let elements: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| RouteError::Malformed(e.to_string()))?;
    let first = elements
        .into_iter()
        .next()
        .ok_or_else(|| RouteError::Malformed("empty response array".to_string()))?;
    serde_json::from_value(first).map_err(|e| RouteError::Malformed(e.to_string()))
}
