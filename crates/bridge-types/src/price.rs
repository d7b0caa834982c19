use std::fmt;

use serde::{Deserialize, Serialize};

use crate::amount::{Amount, STROOPS_PER_UNIT};
use crate::error::TypeError;

/// A positive rational price `n / d`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

impl Price {
    pub fn new(n: i32, d: i32) -> Result<Self, TypeError> {
        if n <= 0 || d <= 0 {
            return Err(TypeError::InvalidPrice(format!("{n}/{d}")));
        }
        Ok(Self { n, d })
    }

    /// Parse a positive decimal string (same grammar as [`Amount`]) into the
    /// reduced fraction it denotes.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let scaled = Amount::parse(s)
            .map_err(|_| TypeError::InvalidPrice(s.to_owned()))?
            .stroops();
        if scaled == 0 {
            return Err(TypeError::InvalidPrice(s.to_owned()));
        }
        let divisor = gcd(scaled, STROOPS_PER_UNIT);
        let n = i32::try_from(scaled / divisor)
            .map_err(|_| TypeError::InvalidPrice(format!("{s}: numerator out of range")))?;
        let d = i32::try_from(STROOPS_PER_UNIT / divisor)
            .map_err(|_| TypeError::InvalidPrice(format!("{s}: denominator out of range")))?;
        Self::new(n, d)
    }
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.n, self.d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reduces_fraction() {
        assert_eq!(Price::parse("1.5").unwrap(), Price { n: 3, d: 2 });
        assert_eq!(Price::parse("2").unwrap(), Price { n: 2, d: 1 });
        assert_eq!(Price::parse("0.0000001").unwrap(), Price { n: 1, d: 10_000_000 });
    }

    #[test]
    fn parse_rejects_zero_and_garbage() {
        assert!(Price::parse("0").is_err());
        assert!(Price::parse("0.0").is_err());
        assert!(Price::parse("abc").is_err());
        assert!(Price::parse("-1").is_err());
    }

    #[test]
    fn parse_rejects_numerator_overflow() {
        assert!(Price::parse("3000000000").is_err());
    }

    #[test]
    fn new_rejects_non_positive() {
        assert!(Price::new(0, 1).is_err());
        assert!(Price::new(1, 0).is_err());
        assert!(Price::new(-1, 2).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Price::new(3, 2).unwrap().to_string(), "3/2");
    }
}
