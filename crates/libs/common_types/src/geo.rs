use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum GeoPointError {
    #[error("latitude {0} is not between -90 and 90")]
    Latitude(f64),
    #[error("longitude {0} is not between -180 and 180")]
    Longitude(f64),
    #[error("latitude and longitude must be given together")]
    Incomplete,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Like `new`, but rejects non-finite and out-of-range values.
    pub fn try_new(lat: f64, lon: f64) -> Result<Self, GeoPointError> {
        let point = Self { lat, lon };
        point.validate()?;
        Ok(point)
    }

    /// NaN fails both range checks.
    pub fn validate(&self) -> Result<(), GeoPointError> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(GeoPointError::Latitude(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(GeoPointError::Longitude(self.lon));
        }
        Ok(())
    }

    /// Builds a point only when both halves of the coordinate are known.
    #[must_use]
    pub const fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) => Some(Self { lat, lon }),
            _ => None,
        }
    }

    /// Validating counterpart of `from_parts` for user input: both or neither, and in range.
    pub fn try_from_parts(
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<Option<Self>, GeoPointError> {
        match (lat, lon) {
            (None, None) => Ok(None),
            (Some(lat), Some(lon)) => Self::try_new(lat, lon).map(Some),
            _ => Err(GeoPointError::Incomplete),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_bounds() {
        assert!(GeoPoint::try_new(90.0, 180.0).is_ok());
        assert!(GeoPoint::try_new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::try_new(42.65, -73.75).is_ok());
    }

    #[test]
    fn rejects_out_of_range_and_non_finite() {
        assert_eq!(
            GeoPoint::try_new(1000.0, 5000.0),
            Err(GeoPointError::Latitude(1000.0))
        );
        assert_eq!(
            GeoPoint::try_new(10.0, 180.5),
            Err(GeoPointError::Longitude(180.5))
        );
        assert!(GeoPoint::try_new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::try_new(0.0, f64::NAN).is_err());
        assert!(GeoPoint::try_new(f64::INFINITY, 0.0).is_err());
        assert!(GeoPoint::try_new(0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn parts_must_come_together() {
        assert_eq!(GeoPoint::try_from_parts(None, None), Ok(None));
        assert_eq!(
            GeoPoint::try_from_parts(Some(1.0), None),
            Err(GeoPointError::Incomplete)
        );
        assert_eq!(
            GeoPoint::try_from_parts(Some(1.0), Some(2.0)),
            Ok(Some(GeoPoint::new(1.0, 2.0)))
        );
        assert!(GeoPoint::try_from_parts(Some(f64::NAN), Some(f64::NAN)).is_err());
    }
}
