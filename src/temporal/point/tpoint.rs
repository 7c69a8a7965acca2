//! Shared point behavior for `tgeompoint`/`tgeogpoint`: geometry in/out,
//! SRID accessor, point-coordinate extraction, and `at_geometry`/
//! `minus_geometry` operators on a single sequence. Deliberately
//! narrower than a full spatial-database point surface — trajectory,
//! speed, azimuth and tiling are SQL-surface conveniences that build on
//! top of a computational geometry kernel this crate doesn't carry.

use crate::boxes::STBox;
use crate::error::Result;
use crate::value::{BaseValueText, LinearInterpolable};

use super::super::dispatch::Temporal;
use super::super::sequence::TSequence;
use super::super::sequence_set::TSequenceSet;

/// A point base value with a spatial reference system, implemented by
/// both [`crate::value::GeomPoint`] (planar) and
/// [`crate::value::GeogPoint`] (geodetic).
pub trait SpatialPoint: BaseValueText + LinearInterpolable + Clone + PartialEq {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn z(&self) -> Option<f64>;
    fn srid(&self) -> i32;
    fn is_geodetic(&self) -> bool;
    fn with_srid(&self, srid: i32) -> Self;
}

impl<V: SpatialPoint> Temporal<V> {
    /// The spatial bounding box, refining the bare-period one every base
    /// type carries with an axis-aligned extent (mirrors
    /// [`crate::temporal::number::tnumber`]'s numeric `bbox`).
    pub fn spatial_bbox(&self) -> STBox {
        match self {
            Temporal::Instant(i) => {
                point_bbox(i.value(), crate::collections::datetime::TsTzSpan::at(i.timestamp()))
            }
            Temporal::Sequence(s) => sequence_bbox(s),
            Temporal::SequenceSet(ss) => ss
                .sequences()
                .iter()
                .map(sequence_bbox)
                .reduce(|a, b| crate::boxes::BoundingBox::union(&a, &b))
                .expect("sequence set is never empty"),
        }
    }

    pub fn srid(&self) -> i32 {
        self.start_value().srid()
    }

    /// Returns a copy of `self` relabelled to `srid`, without reprojecting
    /// any coordinate: reprojection is a spatial-library concern, this
    /// only carries the SRID accessor/setter the core needs.
    pub fn with_srid(&self, srid: i32) -> Self {
        match self {
            Temporal::Instant(i) => {
                Temporal::Instant(super::super::instant::TInstant::new(i.timestamp(), i.value().with_srid(srid)))
            }
            Temporal::Sequence(s) => Temporal::Sequence(map_sequence(s, srid)),
            Temporal::SequenceSet(ss) => {
                let sequences = ss.sequences().iter().map(|s| map_sequence(s, srid)).collect();
                Temporal::SequenceSet(TSequenceSet::new(sequences, false).expect("srid relabel preserves structure"))
            }
        }
    }
}

fn map_sequence<V: SpatialPoint>(s: &TSequence<V>, srid: i32) -> TSequence<V> {
    let instants = s
        .instants()
        .iter()
        .map(|i| super::super::instant::TInstant::new(i.timestamp(), i.value().with_srid(srid)))
        .collect();
    TSequence::new(instants, s.is_lower_inclusive(), s.is_upper_inclusive(), s.interpolation())
        .expect("srid relabel preserves structure")
}

fn point_bbox<V: SpatialPoint>(v: &V, period: crate::collections::datetime::TsTzSpan) -> STBox {
    STBox::new(
        Some(period),
        v.x(),
        v.x(),
        v.y(),
        v.y(),
        v.z().map(|z| (z, z)),
        v.srid(),
        v.is_geodetic(),
    )
}

fn sequence_bbox<V: SpatialPoint>(s: &TSequence<V>) -> STBox {
    s.instants()
        .iter()
        .map(|i| point_bbox(i.value(), s.period()))
        .reduce(|a, b| crate::boxes::BoundingBox::union(&a, &b))
        .expect("sequence is never empty")
}

#[cfg(feature = "geos")]
impl<V: SpatialPoint> Temporal<V> {
    /// Restricts to the sub-periods during which the point lies within
    /// `geometry`, expressed as a WKT string so callers don't need a
    /// `geos` dependency of their own to use it.
    pub fn at_geometry(&self, geometry_wkt: &str) -> Result<Option<Self>> {
        let geom = parse_geometry(geometry_wkt)?;
        Ok(self.restrict_by_geometry(&geom, true))
    }

    pub fn minus_geometry(&self, geometry_wkt: &str) -> Result<Option<Self>> {
        let geom = parse_geometry(geometry_wkt)?;
        Ok(self.restrict_by_geometry(&geom, false))
    }

    fn restrict_by_geometry(&self, geom: &geos::Geometry, keep_inside: bool) -> Option<Self> {
        let inside = |v: &V| point_in_geometry(v, geom);
        let pieces: Vec<TSequence<V>> = match self {
            Temporal::Instant(i) => {
                if inside(i.value()) == keep_inside {
                    vec![TSequence::new(vec![i.clone()], true, true, Interpolation::Discrete).ok()?]
                } else {
                    Vec::new()
                }
            }
            Temporal::Sequence(s) => restrict_sequence_by(s, &inside, keep_inside),
            Temporal::SequenceSet(ss) => ss.sequences().iter().flat_map(|s| restrict_sequence_by(s, &inside, keep_inside)).collect(),
        };
        wrap(pieces)
    }
}

#[cfg(feature = "geos")]
use super::super::interpolation::Interpolation;

#[cfg(feature = "geos")]
fn restrict_sequence_by<V: SpatialPoint>(
    s: &TSequence<V>,
    inside: &impl Fn(&V) -> bool,
    keep_inside: bool,
) -> Vec<TSequence<V>> {
    struct Run<V> {
        instants: Vec<super::super::instant::TInstant<V>>,
        matches: bool,
    }

    let mut runs: Vec<Run<V>> = Vec::new();
    for inst in s.instants() {
        let matches = inside(inst.value()) == keep_inside;
        match runs.last_mut() {
            Some(cur) if cur.matches == matches => cur.instants.push(inst.clone()),
            _ => runs.push(Run { instants: vec![inst.clone()], matches }),
        }
    }

    let last_idx = runs.len().saturating_sub(1);
    runs.into_iter()
        .enumerate()
        .filter(|(_, r)| r.matches)
        .filter_map(|(idx, r)| {
            let lower_inc = if idx == 0 { s.is_lower_inclusive() } else { true };
            let upper_inc = if idx == last_idx { s.is_upper_inclusive() } else { true };
            TSequence::new(r.instants, lower_inc, upper_inc, s.interpolation()).ok()
        })
        .collect()
}

#[cfg(feature = "geos")]
fn wrap<V: SpatialPoint>(mut pieces: Vec<TSequence<V>>) -> Option<Temporal<V>> {
    match pieces.len() {
        0 => None,
        1 => {
            let seq = pieces.pop().expect("checked len == 1");
            if seq.num_instants() == 1 {
                Some(Temporal::Instant(seq.start_instant().clone()))
            } else {
                Some(Temporal::Sequence(seq))
            }
        }
        _ => TSequenceSet::new(pieces, true).ok().map(Temporal::SequenceSet),
    }
}

#[cfg(feature = "geos")]
fn point_in_geometry<V: SpatialPoint>(v: &V, geom: &geos::Geometry) -> bool {
    use geos::Geom;
    let wkt = format!("POINT({} {})", v.x(), v.y());
    let Ok(point) = geos::Geometry::new_from_wkt(&wkt) else {
        return false;
    };
    geom.contains(&point).unwrap_or(false)
}

#[cfg(feature = "geos")]
fn parse_geometry(wkt: &str) -> Result<geos::Geometry> {
    geos::Geometry::new_from_wkt(wkt).map_err(|e| crate::error::TemporalError::ParseError {
        position: 0,
        reason: format!("invalid geometry WKT: {e}"),
    })
}

#[cfg(all(test, feature = "geos"))]
mod tests {
    use super::*;
    use crate::collections::datetime::Timestamp;
    use crate::temporal::instant::TInstant;
    use crate::temporal::interpolation::Interpolation;
    use crate::value::GeomPoint;

    fn ts(n: i64) -> Timestamp {
        Timestamp::from_micros(n)
    }

    #[test]
    fn restrict_by_geometry_preserves_an_exclusive_edge_bound() {
        let seq = TSequence::new(
            vec![
                TInstant::new(ts(0), GeomPoint::new_xy(0.0, 0.0, 0)),
                TInstant::new(ts(10), GeomPoint::new_xy(10.0, 10.0, 0)),
            ],
            false,
            true,
            Interpolation::Stepwise,
        )
        .unwrap();
        let geom = parse_geometry("POLYGON((-1 -1, -1 20, 20 20, 20 -1, -1 -1))").unwrap();
        let pieces = restrict_sequence_by(&seq, &|v: &GeomPoint| point_in_geometry(v, &geom), true);
        assert_eq!(pieces.len(), 1);
        assert!(!pieces[0].is_lower_inclusive());
        assert!(pieces[0].is_upper_inclusive());
    }

    #[test]
    fn restrict_by_geometry_drops_points_outside_and_keeps_the_rest_exclusive() {
        let seq = TSequence::new(
            vec![
                TInstant::new(ts(0), GeomPoint::new_xy(0.0, 0.0, 0)),
                TInstant::new(ts(3), GeomPoint::new_xy(1.0, 1.0, 0)),
                TInstant::new(ts(5), GeomPoint::new_xy(100.0, 100.0, 0)),
                TInstant::new(ts(7), GeomPoint::new_xy(2.0, 2.0, 0)),
                TInstant::new(ts(10), GeomPoint::new_xy(3.0, 3.0, 0)),
            ],
            false,
            false,
            Interpolation::Stepwise,
        )
        .unwrap();
        let geom = parse_geometry("POLYGON((-1 -1, -1 20, 20 20, 20 -1, -1 -1))").unwrap();
        let pieces = restrict_sequence_by(&seq, &|v: &GeomPoint| point_in_geometry(v, &geom), true);
        assert_eq!(pieces.len(), 2);
        assert!(!pieces[0].is_lower_inclusive());
        assert!(pieces[0].is_upper_inclusive());
        assert!(pieces[1].is_lower_inclusive());
        assert!(!pieces[1].is_upper_inclusive());
    }
}
