use crate::collections::base::Span;
use crate::collections::datetime::{Timestamp, TsTzSpan};

use super::bbox::BoundingBox;

/// Bounding box for spatial temporal values (`tgeompoint`, `tgeogpoint`):
/// a period plus an axis-aligned spatial extent. `zmin`/`zmax` are absent
/// for 2D points; `geodetic` marks a geography (great-circle) reference
/// system rather than a planar one.
#[derive(Clone, Debug, PartialEq)]
pub struct STBox {
    period: Option<TsTzSpan>,
    xmin: Option<f64>,
    xmax: Option<f64>,
    ymin: Option<f64>,
    ymax: Option<f64>,
    zmin: Option<f64>,
    zmax: Option<f64>,
    srid: i32,
    geodetic: bool,
}

impl STBox {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        period: Option<TsTzSpan>,
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
        z: Option<(f64, f64)>,
        srid: i32,
        geodetic: bool,
    ) -> Self {
        Self {
            period,
            xmin: Some(xmin),
            xmax: Some(xmax),
            ymin: Some(ymin),
            ymax: Some(ymax),
            zmin: z.map(|(lo, _)| lo),
            zmax: z.map(|(_, hi)| hi),
            srid,
            geodetic,
        }
    }

    pub fn from_period(period: TsTzSpan, srid: i32, geodetic: bool) -> Self {
        Self {
            period: Some(period),
            xmin: None,
            xmax: None,
            ymin: None,
            ymax: None,
            zmin: None,
            zmax: None,
            srid,
            geodetic,
        }
    }

    pub fn tstzspan(&self) -> Option<&TsTzSpan> {
        self.period.as_ref()
    }

    pub fn has_t(&self) -> bool {
        self.period.is_some()
    }

    pub fn has_x(&self) -> bool {
        self.xmin.is_some()
    }

    pub fn has_z(&self) -> bool {
        self.zmin.is_some()
    }

    pub fn is_geodetic(&self) -> bool {
        self.geodetic
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn xmin(&self) -> Option<f64> {
        self.xmin
    }
    pub fn xmax(&self) -> Option<f64> {
        self.xmax
    }
    pub fn ymin(&self) -> Option<f64> {
        self.ymin
    }
    pub fn ymax(&self) -> Option<f64> {
        self.ymax
    }
    pub fn zmin(&self) -> Option<f64> {
        self.zmin
    }
    pub fn zmax(&self) -> Option<f64> {
        self.zmax
    }

    pub fn tmin(&self) -> Option<Timestamp> {
        self.period.as_ref().map(|p| *p.lower())
    }

    pub fn tmax(&self) -> Option<Timestamp> {
        self.period.as_ref().map(|p| *p.upper())
    }
}

impl BoundingBox for STBox {
    fn union(&self, other: &Self) -> Self {
        debug_assert_eq!(self.srid, other.srid, "cannot union boxes from different SRIDs");
        let period = match (&self.period, &other.period) {
            (Some(a), Some(b)) => {
                let lower_is_a = *a.lower() <= *b.lower();
                let upper_is_a = *a.upper() >= *b.upper();
                Some(Span::new(
                    if lower_is_a { *a.lower() } else { *b.lower() },
                    if upper_is_a { *a.upper() } else { *b.upper() },
                    if lower_is_a { a.is_lower_inclusive() } else { b.is_lower_inclusive() },
                    if upper_is_a { a.is_upper_inclusive() } else { b.is_upper_inclusive() },
                ))
            }
            (Some(a), None) => Some(a.clone()),
            (None, Some(b)) => Some(b.clone()),
            (None, None) => None,
        };
        Self {
            period,
            xmin: min_opt(self.xmin, other.xmin),
            xmax: max_opt(self.xmax, other.xmax),
            ymin: min_opt(self.ymin, other.ymin),
            ymax: max_opt(self.ymax, other.ymax),
            zmin: min_opt(self.zmin, other.zmin),
            zmax: max_opt(self.zmax, other.zmax),
            srid: self.srid,
            geodetic: self.geodetic,
        }
    }
}

fn min_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

fn max_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}
