//! `tgeogpoint`: a temporal value over the geodetic point base domain.
//! Distinct from [`super::tgeompoint::TGeomPoint`] only in that its
//! reference system is spherical rather than planar.

use crate::value::GeogPoint;

use super::super::dispatch::Temporal;
use super::super::instant::TInstant;
use super::super::sequence::TSequence;
use super::super::sequence_set::TSequenceSet;
use super::tpoint::SpatialPoint;

pub type TGeogPointInst = TInstant<GeogPoint>;
pub type TGeogPointSeq = TSequence<GeogPoint>;
pub type TGeogPointSeqSet = TSequenceSet<GeogPoint>;
pub type TGeogPoint = Temporal<GeogPoint>;

impl SpatialPoint for GeogPoint {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
    fn z(&self) -> Option<f64> {
        self.z
    }
    fn srid(&self) -> i32 {
        self.srid
    }
    fn is_geodetic(&self) -> bool {
        true
    }
    fn with_srid(&self, srid: i32) -> Self {
        GeogPoint { srid, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::datetime::Timestamp;

    #[test]
    fn bbox_is_marked_geodetic() {
        let t = Temporal::Instant(TInstant::new(
            Timestamp::from_micros(0),
            GeogPoint { x: 1.0, y: 2.0, z: None, srid: 4326 },
        ));
        let bbox = t.spatial_bbox();
        assert!(bbox.is_geodetic());
        assert_eq!(bbox.srid(), 4326);
    }
}
