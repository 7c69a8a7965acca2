//! `tgeompoint`: a temporal value over the planar point base domain.

use crate::value::GeomPoint;

use super::super::dispatch::Temporal;
use super::super::instant::TInstant;
use super::super::sequence::TSequence;
use super::super::sequence_set::TSequenceSet;
use super::tpoint::SpatialPoint;

pub type TGeomPointInst = TInstant<GeomPoint>;
pub type TGeomPointSeq = TSequence<GeomPoint>;
pub type TGeomPointSeqSet = TSequenceSet<GeomPoint>;
pub type TGeomPoint = Temporal<GeomPoint>;

impl SpatialPoint for GeomPoint {
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
        false
    }
    fn with_srid(&self, srid: i32) -> Self {
        GeomPoint { srid, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::datetime::Timestamp;

    #[test]
    fn parses_and_formats_a_point_instant() {
        let text = "POINT (1 2)@2000-01-01T00:00:00+00:00";
        let t = TGeomPoint::from_wkt(text).unwrap();
        assert_eq!(t.start_value().x, 1.0);
        assert_eq!(t.start_value().y, 2.0);
    }

    #[test]
    fn bbox_collapses_to_the_single_instant() {
        let t = Temporal::Instant(TInstant::new(Timestamp::from_micros(0), GeomPoint::new_xy(1.0, 2.0, 4326)));
        let bbox = t.spatial_bbox();
        assert_eq!(bbox.xmin(), Some(1.0));
        assert_eq!(bbox.xmax(), Some(1.0));
        assert_eq!(bbox.srid(), 4326);
        assert!(!bbox.is_geodetic());
    }

    #[test]
    fn with_srid_relabels_without_reprojecting() {
        let t = Temporal::Instant(TInstant::new(Timestamp::from_micros(0), GeomPoint::new_xy(1.0, 2.0, 0)));
        let relabelled = t.with_srid(3857);
        assert_eq!(relabelled.start_value().srid, 3857);
        assert_eq!(relabelled.start_value().x, 1.0);
    }
}
