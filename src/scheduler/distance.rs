//! Distance collaborators for transit legs.
//!
//! The engine asks a [`DistanceProvider`] for the length of every
//! `Distance`/`Transit` leg. Exact geodesics are left to the caller's
//! implementation; two simple providers ship with the crate.

use std::fmt::Debug;

use super::ScheduleError;
use crate::models::UtmPoint;

/// Measures legs between UTM-referenced points.
pub trait DistanceProvider: Send + Sync + Debug {
    /// Distance in kilometres.
    fn distance_km(&self, from: &UtmPoint, to: &UtmPoint) -> Result<f64, ScheduleError>;
}

/// Every leg has the same length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDistance {
    /// Leg length (km).
    pub km: f64,
}

impl FixedDistance {
    /// Creates a provider returning `km` for any leg.
    pub fn new(km: f64) -> Self {
        Self { km }
    }
}

impl DistanceProvider for FixedDistance {
    fn distance_km(&self, _from: &UtmPoint, _to: &UtmPoint) -> Result<f64, ScheduleError> {
        Ok(self.km)
    }
}

/// Straight-line distance within a single UTM zone.
///
/// Eastings and northings are in metres. Points in different zones are
/// rejected rather than approximated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlanarUtmDistance;

impl DistanceProvider for PlanarUtmDistance {
    fn distance_km(&self, from: &UtmPoint, to: &UtmPoint) -> Result<f64, ScheduleError> {
        if from.zone != to.zone {
            return Err(ScheduleError::Geometry {
                reason: format!("UTM zones differ ({} vs {})", from.zone, to.zone),
            });
        }
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        Ok(dx.hypot(dy) / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_same_zone() {
        let a = UtmPoint::new(500_000.0, 4_300_000.0, "29 S");
        let b = UtmPoint::new(503_000.0, 4_304_000.0, "29 S");
        let km = PlanarUtmDistance.distance_km(&a, &b).unwrap();
        assert!((km - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_planar_cross_zone() {
        let a = UtmPoint::new(500_000.0, 4_300_000.0, "29 S");
        let b = UtmPoint::new(500_000.0, 4_300_000.0, "30 S");
        let err = PlanarUtmDistance.distance_km(&a, &b).unwrap_err();
        assert!(matches!(err, ScheduleError::Geometry { .. }));
    }

    #[test]
    fn test_fixed() {
        let a = UtmPoint::new(0.0, 0.0, "1 N");
        let b = UtmPoint::new(0.0, 0.0, "60 S");
        assert_eq!(FixedDistance::new(42.0).distance_km(&a, &b).unwrap(), 42.0);
    }
}
