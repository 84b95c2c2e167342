use geometry::{DEFAULT_BUFFER_DEGREES, LonLat, buffer};
use overlay::layer::{SOURCE_POINT, SOURCE_ROUTES, point_layers, route_layers};
use overlay::{
    AngleSource, CameraDirector, FeedbackChannel, MapSurface, RequestKind, SourceLayerRegistry,
};
use tracing::{debug, warn};

use crate::control::TriggerControl;
use crate::locate::{LocateError, LocateOptions, LocationProvider};
use crate::outcome::SessionOutcome;
use crate::protocol::RouteService;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Locating,
    Requesting,
    Rendering,
    Failed,
}

/// Shared overlay state a session mutates. Explicit context rather than
/// ambient globals so the whole flow runs against a fake surface.
pub struct SessionContext<'a, S: MapSurface, A: AngleSource> {
    pub surface: &'a mut S,
    pub registry: &'a mut SourceLayerRegistry,
    pub camera: &'a mut CameraDirector<A>,
    pub feedback: &'a mut FeedbackChannel,
}

/// One user-triggered request/response cycle.
///
/// `Idle -> Locating -> Requesting -> Rendering -> Idle` on success, with
/// failure branches out of `Locating` and `Requesting`. The trigger control
/// is waiting for the whole session and restored on every exit path. No
/// automatic retry.
#[derive(Debug)]
pub struct RequestSession {
    kind: RequestKind,
    state: SessionState,
}

impl RequestSession {
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            state: SessionState::Idle,
        }
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive one full session. Returns `None` when the trigger is dropped
    /// because this control's session is still active.
    pub async fn run<L, R, S, A>(
        &mut self,
        control: &mut TriggerControl,
        locator: &mut L,
        service: &R,
        ctx: &mut SessionContext<'_, S, A>,
    ) -> Option<SessionOutcome>
    where
        L: LocationProvider,
        R: RouteService,
        S: MapSurface,
        A: AngleSource,
    {
        if control.is_waiting() {
            debug!(kind = self.kind.label(), "trigger dropped, session active");
            return None;
        }
        control.set_waiting();

        let outcome = self.execute(locator, service, ctx).await;

        if let Some(message) = outcome.failure_message() {
            self.state = SessionState::Failed;
            warn!(kind = self.kind.label(), reason = message, "session failed");
            ctx.feedback.report(message);
        }
        self.state = SessionState::Idle;
        control.set_idle();
        Some(outcome)
    }

    async fn execute<L, R, S, A>(
        &mut self,
        locator: &mut L,
        service: &R,
        ctx: &mut SessionContext<'_, S, A>,
    ) -> SessionOutcome
    where
        L: LocationProvider,
        R: RouteService,
        S: MapSurface,
        A: AngleSource,
    {
        self.state = SessionState::Locating;
        debug!(kind = self.kind.label(), "locating");
        let origin = match locator.locate(LocateOptions::default()).await {
            Ok(origin) => origin,
            Err(LocateError::Timeout) => return SessionOutcome::Timeout,
            Err(err) => {
                debug!(kind = self.kind.label(), %err, "geolocation failed");
                return SessionOutcome::GeolocationFailure;
            }
        };

        self.state = SessionState::Requesting;
        debug!(
            kind = self.kind.label(),
            lon = origin.lon,
            lat = origin.lat,
            "requesting"
        );
        let routes = match service.fetch(self.kind, origin).await {
            Ok(fc) => fc,
            Err(err) => return SessionOutcome::NetworkFailure(err.display_message()),
        };

        self.state = SessionState::Rendering;
        debug!(
            kind = self.kind.label(),
            features = routes.features.len(),
            "rendering"
        );
        self.render(origin, &routes, ctx);
        SessionOutcome::Success(routes)
    }

    /// Fold the response into the map. Within a session the point source is
    /// always upserted before the routes source, and layer attachment
    /// follows the data upsert for each source.
    fn render<S, A>(
        &self,
        origin: LonLat,
        routes: &geojson::FeatureCollection,
        ctx: &mut SessionContext<'_, S, A>,
    ) where
        S: MapSurface,
        A: AngleSource,
    {
        ctx.registry
            .upsert_source(ctx.surface, SOURCE_POINT, origin.point_collection());

        let display = if self.kind.buffers_route() {
            buffer(routes, DEFAULT_BUFFER_DEGREES)
        } else {
            routes.clone()
        };
        ctx.registry
            .upsert_source(ctx.surface, SOURCE_ROUTES, display);

        ctx.registry
            .ensure_layers(ctx.surface, SOURCE_POINT, point_layers());
        ctx.registry
            .ensure_layers(ctx.surface, SOURCE_ROUTES, route_layers(self.kind));

        let plan = ctx.camera.plan_motion(origin, self.kind);
        ctx.surface.fly_to(&plan);
        ctx.feedback.clear();
    }
}
