use crate::kind::RequestKind;

/// Shared source ids. Every session writes the same two sources; the last
/// writer wins.
pub const SOURCE_POINT: &str = "point";
pub const SOURCE_ROUTES: &str = "routes";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayerKind {
    Line,
    Fill,
    Circle,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayerPaint {
    pub color: &'static str,
    pub width: f64,
    pub opacity: f64,
}

/// Immutable, style-only layer configuration. Declared once at process
/// start; only attached-or-not state ever changes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayerDescriptor {
    pub id: &'static str,
    pub source: &'static str,
    pub kind: LayerKind,
    pub min_zoom: f64,
    pub paint: LayerPaint,
}

impl LayerDescriptor {
    pub const fn new(
        id: &'static str,
        source: &'static str,
        kind: LayerKind,
        min_zoom: f64,
        paint: LayerPaint,
    ) -> Self {
        Self {
            id,
            source,
            kind,
            min_zoom,
            paint,
        }
    }
}

/// Dot marking the acquired location.
pub const LOCATION_DOT: LayerDescriptor = LayerDescriptor::new(
    "location_dot",
    SOURCE_POINT,
    LayerKind::Circle,
    7.0,
    LayerPaint {
        color: "#007cbf",
        width: 6.0,
        opacity: 0.9,
    },
);

/// Street lines, drawn directly from the response geometry.
pub const ROUTE_LINE: LayerDescriptor = LayerDescriptor::new(
    "routes_polygons",
    SOURCE_ROUTES,
    LayerKind::Line,
    7.0,
    LayerPaint {
        color: "red",
        width: 3.0,
        opacity: 0.2,
    },
);

/// Buffered walking area fill, drawn under the line layer.
pub const WALK_FILL: LayerDescriptor = LayerDescriptor::new(
    "routes_fill",
    SOURCE_ROUTES,
    LayerKind::Fill,
    7.0,
    LayerPaint {
        color: "red",
        width: 0.0,
        opacity: 0.15,
    },
);

/// Layers for the location point source.
pub fn point_layers() -> &'static [LayerDescriptor] {
    &[LOCATION_DOT]
}

/// Layers for the routes source, in draw order (later entries on top).
pub fn route_layers(kind: RequestKind) -> &'static [LayerDescriptor] {
    match kind {
        RequestKind::Streets => &[ROUTE_LINE],
        RequestKind::Walk => &[WALK_FILL, ROUTE_LINE],
    }
}

#[cfg(test)]
mod tests {
    use super::{ROUTE_LINE, SOURCE_ROUTES, WALK_FILL, route_layers};
    use crate::kind::RequestKind;

    #[test]
    fn walk_draws_fill_below_line() {
        let layers = route_layers(RequestKind::Walk);
        assert_eq!(layers, &[WALK_FILL, ROUTE_LINE]);
    }

    #[test]
    fn route_layers_bind_the_shared_source() {
        for kind in [RequestKind::Streets, RequestKind::Walk] {
            for layer in route_layers(kind) {
                assert_eq!(layer.source, SOURCE_ROUTES);
            }
        }
    }
}
