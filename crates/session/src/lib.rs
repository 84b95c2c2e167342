pub mod control;
pub mod locate;
pub mod outcome;
pub mod protocol;
pub mod session;

pub use control::TriggerControl;
pub use locate::{FixedLocation, LocateError, LocateOptions, LocationProvider};
pub use outcome::SessionOutcome;
pub use protocol::{ErrorBody, RouteError, RouteRequest, RouteService, parse_route_response};
pub use session::{RequestSession, SessionContext, SessionState};

pub use overlay::RequestKind;
