//! Base value & time primitives: the domain values a temporal value can
//! take, and the trait vocabulary the rest of the crate is generic over.

use std::fmt::Debug;

/// Identifies which base domain a temporal value draws from. Carried by
/// every [`crate::temporal::dispatch::Temporal`] and looked up in the
/// [`crate::registry`] for its continuity/bbox-shape metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TempType {
    Bool,
    Int,
    Float,
    Text,
    GeomPoint,
    GeogPoint,
}

impl TempType {
    pub fn name(self) -> &'static str {
        match self {
            TempType::Bool => "tbool",
            TempType::Int => "tint",
            TempType::Float => "tfloat",
            TempType::Text => "ttext",
            TempType::GeomPoint => "tgeompoint",
            TempType::GeogPoint => "tgeogpoint",
        }
    }
}

/// A value a temporal value can take at an instant. Implemented by
/// `bool`, `i64`, `f64`, `String`, [`GeomPoint`] and [`GeogPoint`].
pub trait BaseValue: Clone + PartialEq + Debug {
    const TEMP_TYPE: TempType;
}

/// A base type with a total order — needed for min/max accessors and for
/// value-span restriction selectors.
pub trait OrderedValue: BaseValue + PartialOrd {}

/// A total order over a base type, used by [`crate::temporal::agg`] for
/// the lexicographic sequence/sequence-set comparison every temporal
/// value needs, including ones (points) that have no natural
/// mathematical order. For [`OrderedValue`] types this agrees with
/// `PartialOrd`; for points it is an arbitrary but stable
/// coordinate-lexicographic order.
pub trait TotalOrder: BaseValue {
    fn total_cmp(&self, other: &Self) -> std::cmp::Ordering;
}

impl TotalOrder for bool {
    fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cmp(other)
    }
}
impl TotalOrder for i64 {
    fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cmp(other)
    }
}
impl TotalOrder for f64 {
    fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        f64::total_cmp(self, other)
    }
}
impl TotalOrder for String {
    fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cmp(other)
    }
}
impl TotalOrder for GeomPoint {
    fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
            .then_with(|| self.z.unwrap_or(0.0).total_cmp(&other.z.unwrap_or(0.0)))
    }
}
impl TotalOrder for GeogPoint {
    fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
            .then_with(|| self.z.unwrap_or(0.0).total_cmp(&other.z.unwrap_or(0.0)))
    }
}

/// Textual I/O for a base value, the per-type seam the WKT encoder/
/// decoder consumes. Delegates to the `geos` crate for points rather
/// than hand-rolling WKT parsing.
pub trait BaseValueText: BaseValue {
    fn to_text(&self) -> String;
    fn from_text(s: &str) -> Result<Self, crate::error::TemporalError>
    where
        Self: Sized;
}

impl BaseValueText for bool {
    fn to_text(&self) -> String {
        self.to_string()
    }
    fn from_text(s: &str) -> Result<Self, crate::error::TemporalError> {
        match s.trim().to_lowercase().as_str() {
            "t" | "true" => Ok(true),
            "f" | "false" => Ok(false),
            other => Err(crate::error::TemporalError::ParseError {
                position: 0,
                reason: format!("invalid boolean literal '{other}'"),
            }),
        }
    }
}

impl BaseValueText for i64 {
    fn to_text(&self) -> String {
        self.to_string()
    }
    fn from_text(s: &str) -> Result<Self, crate::error::TemporalError> {
        s.trim().parse().map_err(|_| crate::error::TemporalError::ParseError {
            position: 0,
            reason: format!("invalid integer literal '{s}'"),
        })
    }
}

impl BaseValueText for f64 {
    fn to_text(&self) -> String {
        self.to_string()
    }
    fn from_text(s: &str) -> Result<Self, crate::error::TemporalError> {
        s.trim().parse().map_err(|_| crate::error::TemporalError::ParseError {
            position: 0,
            reason: format!("invalid float literal '{s}'"),
        })
    }
}

impl BaseValueText for String {
    fn to_text(&self) -> String {
        // Quoted so a text value containing '@', ',' or brackets doesn't
        // get mistaken for sequence punctuation when parsing.
        format!("\"{}\"", self.replace('\\', "\\\\").replace('"', "\\\""))
    }
    fn from_text(s: &str) -> Result<Self, crate::error::TemporalError> {
        let s = s.trim();
        if let Some(inner) = s.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
            Ok(inner.replace("\\\"", "\"").replace("\\\\", "\\"))
        } else {
            Ok(s.to_string())
        }
    }
}

/// A base type whose values can be linearly interpolated between two
/// samples — numbers and points only. Backs the `linear` variant of
/// [`crate::temporal::interpolation::Interpolation`].
pub trait LinearInterpolable: BaseValue {
    /// Linear interpolation between `a` and `b` at fraction `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;

    /// Whether `b`, sampled at time fraction `t_b` between `a` (at `t=0`)
    /// and `c` (at `t=1`), equals what linear interpolation between `a`
    /// and `c` would produce there — i.e. whether `b` is a redundant
    /// middle instant the sequence-level normaliser can drop.
    fn is_collinear(a: &Self, b: &Self, t_b: f64, c: &Self) -> bool;

    /// Solves for the fraction `t` in `[0, 1]` at which the two linear
    /// segments `(a0 -> a1)` and `(b0 -> b1)` cross, i.e. where
    /// `lerp(a0, a1, t) == lerp(b0, b1, t)`. Returns `None` when the
    /// segments are parallel or coincident.
    fn crossing_fraction(a0: &Self, a1: &Self, b0: &Self, b1: &Self) -> Option<f64>;

    /// Solves for the fraction `t` in the open interval `(0, 1)` at which
    /// `lerp(a, b, t) == target`, used by value-based restriction to split
    /// a linear segment at the instant it crosses a target value. `None`
    /// when the segment never reaches `target` strictly between its
    /// endpoints.
    fn solve_for_value(a: &Self, b: &Self, target: &Self) -> Option<f64>;
}

/// A base type that casts losslessly to/from `f64`, used for numeric
/// span selectors and the time-weighted integral/average.
pub trait NumericValue: OrderedValue + LinearInterpolable {
    fn to_f64(&self) -> f64;
    fn from_f64(v: f64) -> Self;
}

impl BaseValue for bool {
    const TEMP_TYPE: TempType = TempType::Bool;
}
impl OrderedValue for bool {}
impl LinearInterpolable for bool {
    fn lerp(a: &Self, _b: &Self, _t: f64) -> Self {
        *a
    }
    fn is_collinear(_a: &Self, _b: &Self, _t_b: f64, _c: &Self) -> bool {
        // `tbool` is step-only (registry::is_continuous is false for it);
        // this impl exists only so the sequence layer can stay generic.
        false
    }
    fn crossing_fraction(_a0: &Self, _a1: &Self, _b0: &Self, _b1: &Self) -> Option<f64> {
        None
    }
    fn solve_for_value(_a: &Self, _b: &Self, _target: &Self) -> Option<f64> {
        None
    }
}

impl BaseValue for i64 {
    const TEMP_TYPE: TempType = TempType::Int;
}
impl OrderedValue for i64 {}
impl LinearInterpolable for i64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + (*b as f64 - *a as f64) * t).round() as i64
    }
    fn is_collinear(_a: &Self, _b: &Self, _t_b: f64, _c: &Self) -> bool {
        // `tint` never uses linear interpolation (`CastLossy` forbids
        // lossy float->int casts; by symmetry int never claims to be
        // collinear-normalisable the way float/point are).
        false
    }
    fn crossing_fraction(_a0: &Self, _a1: &Self, _b0: &Self, _b1: &Self) -> Option<f64> {
        None
    }
    fn solve_for_value(_a: &Self, _b: &Self, _target: &Self) -> Option<f64> {
        None
    }
}
impl NumericValue for i64 {
    fn to_f64(&self) -> f64 {
        *self as f64
    }
    fn from_f64(v: f64) -> Self {
        v.round() as i64
    }
}

impl BaseValue for f64 {
    const TEMP_TYPE: TempType = TempType::Float;
}
impl OrderedValue for f64 {}
impl LinearInterpolable for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
    fn is_collinear(a: &Self, b: &Self, t_b: f64, c: &Self) -> bool {
        (*b - f64_lerp_unchecked(*a, *c, t_b)).abs() < 1e-9
    }
    fn crossing_fraction(a0: &Self, a1: &Self, b0: &Self, b1: &Self) -> Option<f64> {
        // Solve (a0 + (a1-a0)*t) == (b0 + (b1-b0)*t) for t.
        let da = a1 - a0;
        let db = b1 - b0;
        let denom = da - db;
        if denom.abs() < f64::EPSILON {
            return None;
        }
        let t = (b0 - a0) / denom;
        if t > f64::EPSILON && t < 1.0 - f64::EPSILON {
            Some(t)
        } else {
            None
        }
    }
    fn solve_for_value(a: &Self, b: &Self, target: &Self) -> Option<f64> {
        let delta = b - a;
        if delta.abs() < f64::EPSILON {
            return None;
        }
        let t = (target - a) / delta;
        if t > f64::EPSILON && t < 1.0 - f64::EPSILON {
            Some(t)
        } else {
            None
        }
    }
}
impl NumericValue for f64 {
    fn to_f64(&self) -> f64 {
        *self
    }
    fn from_f64(v: f64) -> Self {
        v
    }
}

pub(crate) fn f64_lerp_unchecked(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

impl BaseValue for String {
    const TEMP_TYPE: TempType = TempType::Text;
}
impl OrderedValue for String {}
impl LinearInterpolable for String {
    fn lerp(a: &Self, _b: &Self, _t: f64) -> Self {
        a.clone()
    }
    fn is_collinear(_a: &Self, _b: &Self, _t_b: f64, _c: &Self) -> bool {
        false
    }
    fn crossing_fraction(_a0: &Self, _a1: &Self, _b0: &Self, _b1: &Self) -> Option<f64> {
        None
    }
    fn solve_for_value(_a: &Self, _b: &Self, _target: &Self) -> Option<f64> {
        None
    }
}

/// A 2D/3D point, optionally geodetic, carrying its spatial reference
/// system identifier. Plain storage: coordinate extraction and WKT I/O
/// are delegated to the `geos` feature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomPoint {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub srid: i32,
}

impl GeomPoint {
    pub fn new_xy(x: f64, y: f64, srid: i32) -> Self {
        Self { x, y, z: None, srid }
    }

    pub fn new_xyz(x: f64, y: f64, z: f64, srid: i32) -> Self {
        Self { x, y, z: Some(z), srid }
    }

    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }
}

impl BaseValue for GeomPoint {
    const TEMP_TYPE: TempType = TempType::GeomPoint;
}
impl LinearInterpolable for GeomPoint {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        debug_assert_eq!(a.srid, b.srid, "cannot interpolate points from different SRIDs");
        GeomPoint {
            x: f64_lerp_unchecked(a.x, b.x, t),
            y: f64_lerp_unchecked(a.y, b.y, t),
            z: match (a.z, b.z) {
                (Some(az), Some(bz)) => Some(f64_lerp_unchecked(az, bz, t)),
                _ => None,
            },
            srid: a.srid,
        }
    }

    fn is_collinear(a: &Self, b: &Self, t_b: f64, c: &Self) -> bool {
        let expected = GeomPoint::lerp(a, c, t_b);
        let close = |u: f64, v: f64| (u - v).abs() < 1e-9;
        close(b.x, expected.x)
            && close(b.y, expected.y)
            && match (b.z, expected.z) {
                (Some(bz), Some(ez)) => close(bz, ez),
                (None, None) => true,
                _ => false,
            }
    }

    fn crossing_fraction(a0: &Self, a1: &Self, b0: &Self, b1: &Self) -> Option<f64> {
        let tx = f64::crossing_fraction(&a0.x, &a1.x, &b0.x, &b1.x);
        let ty = f64::crossing_fraction(&a0.y, &a1.y, &b0.y, &b1.y);
        match (tx, ty) {
            (Some(tx), Some(ty)) if (tx - ty).abs() < 1e-6 => Some(tx),
            _ => None,
        }
    }

    fn solve_for_value(a: &Self, b: &Self, target: &Self) -> Option<f64> {
        let tx = f64::solve_for_value(&a.x, &b.x, &target.x);
        let ty = f64::solve_for_value(&a.y, &b.y, &target.y);
        match (tx, ty) {
            (Some(tx), Some(ty)) if (tx - ty).abs() < 1e-6 => Some(tx),
            (Some(t), None) if (f64_lerp_unchecked(a.y, b.y, t) - target.y).abs() < 1e-9 => Some(t),
            (None, Some(t)) if (f64_lerp_unchecked(a.x, b.x, t) - target.x).abs() < 1e-9 => Some(t),
            _ => None,
        }
    }
}

/// A geodetic point (coordinates on a sphere/ellipsoid rather than a
/// plane). Distinct type from [`GeomPoint`] so the dispatcher can route
/// `tgeompoint`/`tgeogpoint` separately.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeogPoint {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub srid: i32,
}

impl BaseValue for GeogPoint {
    const TEMP_TYPE: TempType = TempType::GeogPoint;
}
impl LinearInterpolable for GeogPoint {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        // Great-circle interpolation is the geodetically correct
        // behavior; we approximate with planar lerp on (lon, lat, z)
        // since the core algorithm only needs *a* well-defined
        // interpolant, and exact geodesics are out of scope here.
        GeogPoint {
            x: f64_lerp_unchecked(a.x, b.x, t),
            y: f64_lerp_unchecked(a.y, b.y, t),
            z: match (a.z, b.z) {
                (Some(az), Some(bz)) => Some(f64_lerp_unchecked(az, bz, t)),
                _ => None,
            },
            srid: a.srid,
        }
    }

    fn is_collinear(a: &Self, b: &Self, t_b: f64, c: &Self) -> bool {
        let ag = GeomPoint { x: a.x, y: a.y, z: a.z, srid: a.srid };
        let bg = GeomPoint { x: b.x, y: b.y, z: b.z, srid: b.srid };
        let cg = GeomPoint { x: c.x, y: c.y, z: c.z, srid: c.srid };
        GeomPoint::is_collinear(&ag, &bg, t_b, &cg)
    }

    fn crossing_fraction(a0: &Self, a1: &Self, b0: &Self, b1: &Self) -> Option<f64> {
        let tx = f64::crossing_fraction(&a0.x, &a1.x, &b0.x, &b1.x);
        let ty = f64::crossing_fraction(&a0.y, &a1.y, &b0.y, &b1.y);
        match (tx, ty) {
            (Some(tx), Some(ty)) if (tx - ty).abs() < 1e-6 => Some(tx),
            _ => None,
        }
    }

    fn solve_for_value(a: &Self, b: &Self, target: &Self) -> Option<f64> {
        let ag = GeomPoint { x: a.x, y: a.y, z: a.z, srid: a.srid };
        let bg = GeomPoint { x: b.x, y: b.y, z: b.z, srid: b.srid };
        let tg = GeomPoint { x: target.x, y: target.y, z: target.z, srid: target.srid };
        GeomPoint::solve_for_value(&ag, &bg, &tg)
    }
}

impl BaseValueText for GeomPoint {
    fn to_text(&self) -> String {
        match self.z {
            Some(z) => format!("POINT Z ({} {} {})", self.x, self.y, z),
            None => format!("POINT ({} {})", self.x, self.y),
        }
    }

    #[cfg(feature = "geos")]
    fn from_text(s: &str) -> Result<Self, crate::error::TemporalError> {
        parse_point_wkt(s, 0)
    }

    #[cfg(not(feature = "geos"))]
    fn from_text(_s: &str) -> Result<Self, crate::error::TemporalError> {
        Err(crate::error::TemporalError::ParseError {
            position: 0,
            reason: "parsing geometry WKT requires the `geos` feature".into(),
        })
    }
}

impl BaseValueText for GeogPoint {
    fn to_text(&self) -> String {
        match self.z {
            Some(z) => format!("POINT Z ({} {} {})", self.x, self.y, z),
            None => format!("POINT ({} {})", self.x, self.y),
        }
    }

    #[cfg(feature = "geos")]
    fn from_text(s: &str) -> Result<Self, crate::error::TemporalError> {
        let p = parse_point_wkt(s, 4326)?;
        Ok(GeogPoint { x: p.x, y: p.y, z: p.z, srid: p.srid })
    }

    #[cfg(not(feature = "geos"))]
    fn from_text(_s: &str) -> Result<Self, crate::error::TemporalError> {
        Err(crate::error::TemporalError::ParseError {
            position: 0,
            reason: "parsing geography WKT requires the `geos` feature".into(),
        })
    }
}

/// Delegates point-coordinate extraction to the `geos` crate; the core
/// only needs the coordinates back out, not a full geometry value.
#[cfg(feature = "geos")]
fn parse_point_wkt(s: &str, default_srid: i32) -> Result<GeomPoint, crate::error::TemporalError> {
    use geos::Geom;

    let (srid, wkt) = match s.trim().strip_prefix("SRID=") {
        Some(rest) => {
            let (num, wkt) = rest.split_once(';').ok_or_else(|| crate::error::TemporalError::ParseError {
                position: 0,
                reason: "expected ';' after SRID=n".into(),
            })?;
            let srid: i32 = num.parse().map_err(|_| crate::error::TemporalError::ParseError {
                position: 5,
                reason: format!("invalid SRID '{num}'"),
            })?;
            (srid, wkt)
        }
        None => (default_srid, s.trim()),
    };

    let geom = geos::Geometry::new_from_wkt(wkt).map_err(|e| crate::error::TemporalError::ParseError {
        position: 0,
        reason: format!("invalid point WKT: {e}"),
    })?;
    let x = geom.get_x().map_err(|e| crate::error::TemporalError::ParseError {
        position: 0,
        reason: e.to_string(),
    })?;
    let y = geom.get_y().map_err(|e| crate::error::TemporalError::ParseError {
        position: 0,
        reason: e.to_string(),
    })?;
    let z = geom.get_z().ok().filter(|z| !z.is_nan());
    Ok(GeomPoint { x, y, z, srid })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_crossing_fraction_finds_midpoint() {
        let t = f64::crossing_fraction(&0.0, &10.0, &10.0, &0.0).unwrap();
        assert!((t - 0.5).abs() < 1e-9);
    }

    #[test]
    fn parallel_segments_have_no_crossing() {
        assert!(f64::crossing_fraction(&0.0, &10.0, &5.0, &15.0).is_none());
    }
}
