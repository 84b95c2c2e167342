use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde::{Deserialize, Serialize};

/// WGS84 longitude/latitude pair.
///
/// Captured once from the geolocation collaborator and immutable for the
/// lifetime of the session that owns it.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordError {
    LonOutOfRange(f64),
    LatOutOfRange(f64),
}

impl std::fmt::Display for CoordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordError::LonOutOfRange(lon) => {
                write!(f, "longitude {lon} outside [-180, 180]")
            }
            CoordError::LatOutOfRange(lat) => {
                write!(f, "latitude {lat} outside [-90, 90]")
            }
        }
    }
}

impl std::error::Error for CoordError {}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Result<Self, CoordError> {
        if !(-180.0..=180.0).contains(&lon) || !lon.is_finite() {
            return Err(CoordError::LonOutOfRange(lon));
        }
        if !(-90.0..=90.0).contains(&lat) || !lat.is_finite() {
            return Err(CoordError::LatOutOfRange(lat));
        }
        Ok(Self { lon, lat })
    }

    /// Single-point feature collection for the "current location" source.
    pub fn point_collection(&self) -> FeatureCollection {
        let feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![self.lon, self.lat]))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        }
    }
}

/// An empty feature collection, used as the zero value for overlay sources.
pub fn empty_collection() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: Vec::new(),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::{CoordError, LonLat};
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_in_range_coordinates() {
        let c = LonLat::new(-6.2718, 53.3320).expect("valid");
        assert_eq!(c.lon, -6.2718);
        assert_eq!(c.lat, 53.3320);
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert_eq!(
            LonLat::new(181.0, 0.0),
            Err(CoordError::LonOutOfRange(181.0))
        );
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert_eq!(LonLat::new(0.0, -90.5), Err(CoordError::LatOutOfRange(-90.5)));
    }

    #[test]
    fn rejects_non_finite_input() {
        assert!(LonLat::new(f64::NAN, 0.0).is_err());
        assert!(LonLat::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn point_collection_holds_one_point() {
        let c = LonLat::new(-6.2718, 53.3320).expect("valid");
        let fc = c.point_collection();
        assert_eq!(fc.features.len(), 1);
        let geom = fc.features[0].geometry.as_ref().expect("geometry");
        assert_eq!(
            geom.value,
            geojson::Value::Point(vec![-6.2718, 53.3320])
        );
    }
}
