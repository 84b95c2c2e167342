use geometry::LonLat;
use rand::Rng;

use crate::kind::RequestKind;

/// Parameters handed to the map surface's animated-camera primitive. The
/// director only plans; it never mutates the map itself.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPlan {
    pub center: LonLat,
    pub zoom: f64,
    pub bearing: f64,
    pub pitch: f64,
    pub curve: f64,
}

/// Source of uniformly distributed angles, injected so plans are
/// reproducible under test.
pub trait AngleSource {
    fn sample(&mut self, lo: f64, hi: f64) -> f64;
}

/// Default angle source backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAngles;

impl AngleSource for RandomAngles {
    fn sample(&mut self, lo: f64, hi: f64) -> f64 {
        rand::thread_rng().gen_range(lo..=hi)
    }
}

const EASE_CURVE: f64 = 1.0;

/// Plans a fly-to animation: randomized bearing and pitch for visual
/// variety, zoom keyed to the request kind.
#[derive(Debug)]
pub struct CameraDirector<A> {
    angles: A,
}

impl CameraDirector<RandomAngles> {
    pub fn new() -> Self {
        Self::with_angles(RandomAngles)
    }
}

impl Default for CameraDirector<RandomAngles> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: AngleSource> CameraDirector<A> {
    pub fn with_angles(angles: A) -> Self {
        Self { angles }
    }

    pub fn plan_motion(&mut self, center: LonLat, kind: RequestKind) -> CameraPlan {
        CameraPlan {
            center,
            zoom: kind.camera_zoom(),
            bearing: self.angles.sample(1.0, 360.0),
            pitch: self.angles.sample(50.0, 70.0),
            curve: EASE_CURVE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AngleSource, CameraDirector, RandomAngles};
    use crate::kind::RequestKind;
    use geometry::LonLat;
    use pretty_assertions::assert_eq;

    /// Replays a fixed angle sequence.
    struct Scripted(Vec<f64>);

    impl AngleSource for Scripted {
        fn sample(&mut self, lo: f64, hi: f64) -> f64 {
            let v = self.0.remove(0);
            assert!((lo..=hi).contains(&v), "scripted angle {v} outside [{lo}, {hi}]");
            v
        }
    }

    fn dublin() -> LonLat {
        LonLat::new(-6.2718, 53.3320).expect("valid")
    }

    #[test]
    fn zoom_follows_request_kind() {
        let mut director = CameraDirector::with_angles(Scripted(vec![90.0, 55.0, 180.0, 65.0]));
        assert_eq!(
            director.plan_motion(dublin(), RequestKind::Streets).zoom,
            14.0
        );
        assert_eq!(director.plan_motion(dublin(), RequestKind::Walk).zoom, 16.0);
    }

    #[test]
    fn scripted_plan_is_reproducible() {
        let mut a = CameraDirector::with_angles(Scripted(vec![42.0, 60.0]));
        let mut b = CameraDirector::with_angles(Scripted(vec![42.0, 60.0]));
        assert_eq!(
            a.plan_motion(dublin(), RequestKind::Walk),
            b.plan_motion(dublin(), RequestKind::Walk)
        );
    }

    #[test]
    fn random_plans_stay_in_bounds() {
        let mut director = CameraDirector::with_angles(RandomAngles);
        for _ in 0..100 {
            let plan = director.plan_motion(dublin(), RequestKind::Streets);
            assert!((1.0..=360.0).contains(&plan.bearing), "bearing {}", plan.bearing);
            assert!((50.0..=70.0).contains(&plan.pitch), "pitch {}", plan.pitch);
            assert_eq!(plan.curve, 1.0);
            assert_eq!(plan.center, dublin());
        }
    }
}
