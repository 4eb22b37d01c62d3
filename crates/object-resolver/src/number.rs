use serde::{Deserialize, Serialize};
use serde_json::Number as JsonNumber;

use crate::CanonicalizeError;

/// Represents a JSON number using IEEE-754 double precision.
///
/// Every constructor, deserialization included, rejects NaN and infinities.
#[derive(Clone, Copy, Debug, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Number(f64);

impl Number {
    /// Creates a new [`Number`] after validating finiteness.
    ///
    /// ```
    /// # use object_resolver::Number;
    /// let num = Number::new(42.0)?;
    /// assert_eq!(num.get(), 42.0);
    /// assert!(Number::new(f64::NAN).is_err());
    /// # Ok::<(), object_resolver::CanonicalizeError>(())
    /// ```
    pub fn new(value: f64) -> Result<Self, CanonicalizeError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(CanonicalizeError::NotFinite { value })
        }
    }

    /// Returns the raw floating-point value.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Whether the number is `0` or `-0`.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Converts the number into a `serde_json::Number` using minimal integer representation when possible.
    ///
    /// Negative zero renders as `0`, matching its equality with zero.
    #[must_use]
    pub fn to_json_number(self) -> JsonNumber {
        if self.0.fract() == 0.0 {
            if (i64::MIN as f64) <= self.0 && self.0 <= (i64::MAX as f64) {
                return JsonNumber::from(self.0 as i64);
            }
            if self.0 >= 0.0 && self.0 <= (u64::MAX as f64) {
                return JsonNumber::from(self.0 as u64);
            }
        }
        JsonNumber::from_f64(self.0).expect("Number is finite by construction")
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

impl From<u8> for Number {
    fn from(value: u8) -> Self {
        Self(f64::from(value))
    }
}

impl From<Number> for f64 {
    fn from(value: Number) -> Self {
        value.0
    }
}

impl TryFrom<f64> for Number {
    type Error = CanonicalizeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_render_without_fraction() {
        assert_eq!(Number::from(5).to_json_number().to_string(), "5");
        assert_eq!(Number::new(2.5).unwrap().to_json_number().to_string(), "2.5");
    }

    #[test]
    fn negative_zero_equals_zero() {
        let neg = Number::new(-0.0).unwrap();
        assert_eq!(neg, Number::from(0));
        assert!(neg.is_zero());
        assert_eq!(neg.to_json_number().to_string(), "0");
    }

    #[test]
    fn deserialization_keeps_numbers_finite() {
        let err = serde_yaml::from_str::<Number>(".inf").unwrap_err();
        assert!(err.to_string().contains("non-finite"), "{err}");
        assert_eq!(serde_json::to_string(&Number::from(3)).unwrap(), "3.0");
    }

    #[test]
    fn infinity_is_rejected() {
        let err = Number::try_from(f64::INFINITY).unwrap_err();
        assert!(matches!(err, CanonicalizeError::NotFinite { .. }));
    }
}
