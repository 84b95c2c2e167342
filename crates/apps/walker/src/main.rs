use std::env;
use std::time::Duration;

use geojson::FeatureCollection;
use geometry::LonLat;
use overlay::{
    CameraDirector, FeedbackChannel, HeadlessSurface, RequestKind, SourceLayerRegistry,
};
use session::{
    parse_route_response, ErrorBody, FixedLocation, RequestSession, RouteError, RouteRequest,
    RouteService, SessionContext, TriggerControl,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Route service backed by the remote HTTP collaborator.
struct HttpRouteService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRouteService {
    fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

impl RouteService for HttpRouteService {
    async fn fetch(
        &self,
        kind: RequestKind,
        origin: LonLat,
    ) -> Result<FeatureCollection, RouteError> {
        let url = format!("{}{}", self.base_url, kind.endpoint_path());
        let response = self
            .client
            .post(&url)
            .json(&RouteRequest::from(origin))
            .send()
            .await
            .map_err(|e| RouteError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RouteError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(RouteError::Status {
                code: status.as_u16(),
                message,
            });
        }
        parse_route_response(&body)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let service_url =
        env::var("WALKER_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
    // The original client's hard-coded Dublin fallback.
    let origin = LonLat::new(
        env_var_f64("WALKER_LON", -6.271830),
        env_var_f64("WALKER_LAT", 53.331953),
    )
    .expect("invalid WALKER_LON/WALKER_LAT");
    let http_timeout = Duration::from_millis(env_var_u64("WALKER_HTTP_TIMEOUT_MS", 10_000));

    let service = HttpRouteService::new(service_url, http_timeout);
    let mut locator = FixedLocation::new(origin);

    let mut surface = HeadlessSurface::new();
    let mut registry = SourceLayerRegistry::new();
    let mut camera = CameraDirector::new();
    let mut feedback = FeedbackChannel::new();

    let mut streets = RequestSession::new(RequestKind::Streets);
    let mut streets_control = TriggerControl::new("Show my streets");
    let mut walk = RequestSession::new(RequestKind::Walk);
    let mut walk_control = TriggerControl::new("Walk from here");

    info!(
        lon = origin.lon,
        lat = origin.lat,
        "walker ready; triggers: streets | walk | quit"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let (session, control) = match line.trim() {
            "streets" => (&mut streets, &mut streets_control),
            "walk" => (&mut walk, &mut walk_control),
            "quit" | "exit" => break,
            "" => continue,
            other => {
                warn!(command = other, "unknown trigger");
                continue;
            }
        };

        let outcome = session
            .run(
                control,
                &mut locator,
                &service,
                &mut SessionContext {
                    surface: &mut surface,
                    registry: &mut registry,
                    camera: &mut camera,
                    feedback: &mut feedback,
                },
            )
            .await;

        match outcome {
            Some(outcome) if outcome.is_success() => {
                if let Some(plan) = surface.camera() {
                    info!(
                        zoom = plan.zoom,
                        bearing = plan.bearing,
                        pitch = plan.pitch,
                        "camera in motion"
                    );
                }
                info!(
                    sources = surface.source_count(),
                    layers = ?surface.layer_ids(),
                    "overlay updated"
                );
            }
            Some(_) => {
                info!(feedback = feedback.current().unwrap_or(""), "session failed");
            }
            None => {}
        }
    }
}

fn env_var_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_var_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
