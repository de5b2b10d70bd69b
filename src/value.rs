//! Cell values
//!
//! A store column holds one conceptual type, but rows arrive as mixed
//! sequences, so every cell is a tagged `Value`.
//!
//! ## Ordering
//! `Value` is totally ordered so the index column can be binary searched:
//! - `Int` and `Float` compare numerically with each other
//! - `Int` against `Float` is exact, even past 2^53
//! - `Float` uses IEEE total ordering (`-NaN < -inf < ... < inf < NaN`),
//!   except that `-0.0 == 0.0`
//! - different kinds order by rank: Null < Bool < numeric < Text < Timestamp

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

const MICROS_PER_SECOND: i64 = 1_000_000;

/// A single cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Absent value
    Null,

    Bool(bool),

    Int(i64),

    Float(f64),

    Text(String),

    /// Absolute time without zone (treated as UTC for epoch conversion)
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Name of this value's kind, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Timestamp(_) => "timestamp",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of `Int` and `Float` cells
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Text(_) => 3,
            Value::Timestamp(_) => 4,
        }
    }
}

// =============================================================================
// Epoch Conversion
// =============================================================================

/// Seconds since 1970-01-01T00:00:00, with microsecond precision
pub fn datetime_to_seconds(ts: &NaiveDateTime) -> f64 {
    ts.and_utc().timestamp_micros() as f64 / MICROS_PER_SECOND as f64
}

/// Inverse of [`datetime_to_seconds`], rounded to the nearest microsecond
///
/// Returns `None` for non-finite input or instants chrono cannot represent.
pub fn seconds_to_datetime(seconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    let micros = (seconds * MICROS_PER_SECOND as f64).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }
    let micros = micros as i64;
    let secs = micros.div_euclid(MICROS_PER_SECOND);
    let nanos = (micros.rem_euclid(MICROS_PER_SECOND) * 1_000) as u32;
    DateTime::from_timestamp(secs, nanos).map(|dt| dt.naive_utc())
}

// =============================================================================
// Ordering
// =============================================================================

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => cmp_floats(*a, *b),
            (Value::Int(a), Value::Float(b)) => cmp_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// `-0.0` and `0.0` are equal, as both equal `Int(0)`
fn cmp_floats(a: f64, b: f64) -> Ordering {
    if a == b {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Exact comparison; casting `i` to `f64` would round above 2^53
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, the first float above every i64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }

    // In range, so the truncated float is an exact i64
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&f).unwrap_or(Ordering::Equal),
        unequal => unequal,
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
            Value::Timestamp(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_int_and_float_compare_numerically() {
        assert!(Value::Int(1) < Value::Float(1.5));
        assert!(Value::Float(2.5) > Value::Int(2));
        assert_eq!(Value::Int(3), Value::Float(3.0));
        assert!(Value::Int(-3) > Value::Float(-3.5));
        assert!(Value::Int(-4) < Value::Float(-3.5));
    }

    #[test]
    fn test_int_float_exact_past_two_pow_53() {
        let big = 1_i64 << 53;
        let float = Value::Float(big as f64);

        assert_eq!(Value::Int(big), float);
        assert!(Value::Int(big + 1) > float);
        assert!(float < Value::Int(big + 1));
        assert!(Value::Int(big - 1) < float);

        // Transitive across the three
        assert!(Value::Int(big) < Value::Int(big + 1));
        assert!(Value::Int(big) <= float && float < Value::Int(big + 1));
    }

    #[test]
    fn test_int_float_extremes() {
        assert!(Value::Int(i64::MAX) < Value::Float(9.3e18));
        assert!(Value::Int(i64::MAX) < Value::Float(i64::MAX as f64));
        assert_eq!(Value::Int(i64::MIN), Value::Float(i64::MIN as f64));
        assert!(Value::Int(i64::MIN) > Value::Float(-9.3e18));

        assert!(Value::Int(i64::MAX) < Value::Float(f64::INFINITY));
        assert!(Value::Int(i64::MIN) > Value::Float(f64::NEG_INFINITY));
        assert!(Value::Int(i64::MAX) < Value::Float(f64::NAN));
        assert!(Value::Int(i64::MIN) > Value::Float(-f64::NAN));
        assert!(Value::Float(f64::NAN) > Value::Float(f64::INFINITY));
    }

    #[test]
    fn test_signed_zeros_equal() {
        assert_eq!(Value::Float(-0.0), Value::Float(0.0));
        assert_eq!(Value::Int(0), Value::Float(-0.0));
        assert!(Value::Float(-0.0) > Value::Int(-1));
    }

    #[test]
    fn test_kinds_order_by_rank() {
        assert!(Value::Null < Value::Bool(false));
        assert!(Value::Bool(true) < Value::Int(i64::MIN));
        assert!(Value::Float(f64::INFINITY) < Value::Text(String::new()));
        assert!(Value::from("zzz") < Value::Timestamp(NaiveDateTime::MIN));
    }

    #[test]
    fn test_epoch_conversion_inverts() {
        let ts = NaiveDate::from_ymd_opt(2017, 1, 23)
            .unwrap()
            .and_hms_micro_opt(9, 0, 1, 500_000)
            .unwrap();
        let secs = datetime_to_seconds(&ts);
        assert_eq!(secs, 1_485_162_001.5);
        assert_eq!(seconds_to_datetime(secs), Some(ts));
    }

    #[test]
    fn test_seconds_before_epoch() {
        let ts = seconds_to_datetime(-1.25).unwrap();
        assert_eq!(ts.to_string(), "1969-12-31 23:59:58.750");
    }

    #[test]
    fn test_non_finite_seconds_rejected() {
        assert_eq!(seconds_to_datetime(f64::NAN), None);
        assert_eq!(seconds_to_datetime(f64::INFINITY), None);
    }
}
