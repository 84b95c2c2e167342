/// The two user-triggerable request kinds.
///
/// Each kind owns its service endpoint, its camera zoom, and whether the
/// response geometry is buffered before display.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Nearby street network, rendered as raw lines.
    Streets,
    /// Reachable walking area, rendered as buffered polygons.
    Walk,
}

impl RequestKind {
    pub fn endpoint_path(self) -> &'static str {
        match self {
            RequestKind::Streets => "/streets",
            RequestKind::Walk => "/route",
        }
    }

    pub fn camera_zoom(self) -> f64 {
        match self {
            RequestKind::Streets => 14.0,
            RequestKind::Walk => 16.0,
        }
    }

    /// Only the walk overlay is buffered; streets render as-is.
    pub fn buffers_route(self) -> bool {
        matches!(self, RequestKind::Walk)
    }

    pub fn label(self) -> &'static str {
        match self {
            RequestKind::Streets => "streets",
            RequestKind::Walk => "walk",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RequestKind;

    #[test]
    fn endpoints_match_service_contract() {
        assert_eq!(RequestKind::Streets.endpoint_path(), "/streets");
        assert_eq!(RequestKind::Walk.endpoint_path(), "/route");
    }

    #[test]
    fn only_walk_buffers() {
        assert!(!RequestKind::Streets.buffers_route());
        assert!(RequestKind::Walk.buffers_route());
    }
}
