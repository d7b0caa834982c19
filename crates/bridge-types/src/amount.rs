use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Number of stroops in one unit.
pub const STROOPS_PER_UNIT: i64 = 10_000_000;

const DECIMALS: usize = 7;

/// A fixed-point amount stored as a signed count of stroops.
///
/// Amounts are written as decimal strings with at most seven fractional
/// digits (`"10"`, `"0.0000001"`, `"1234.5"`). [`Display`](fmt::Display)
/// always renders the seven-digit canonical form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Amount(i64);

impl Amount {
    /// Create an amount from a raw stroop count.
    pub const fn from_stroops(stroops: i64) -> Self {
        Self(stroops)
    }

    /// The raw stroop count.
    pub const fn stroops(&self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parse a non-negative decimal string.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let (whole, frac) = match s.split_once('.') {
            Some((_, "")) => {
                return Err(TypeError::InvalidAmount(format!("{s}: missing fractional digits")))
            }
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypeError::InvalidAmount(s.to_owned()));
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypeError::InvalidAmount(s.to_owned()));
        }
        if frac.len() > DECIMALS {
            return Err(TypeError::TooPrecise(s.to_owned()));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| TypeError::AmountOverflow(s.to_owned()))?;
        let frac: i64 = if frac.is_empty() {
            0
        } else {
            format!("{frac:0<DECIMALS$}")
                .parse()
                .map_err(|_| TypeError::InvalidAmount(s.to_owned()))?
        };

        whole
            .checked_mul(STROOPS_PER_UNIT)
            .and_then(|v| v.checked_add(frac))
            .map(Self)
            .ok_or_else(|| TypeError::AmountOverflow(s.to_owned()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let unit = STROOPS_PER_UNIT as u64;
        write!(f, "{sign}{}.{:07}", abs / unit, abs % unit)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_whole_units() {
        assert_eq!(Amount::parse("10").unwrap().stroops(), 100_000_000);
    }

    #[test]
    fn parses_fractional_units() {
        assert_eq!(Amount::parse("0.0000001").unwrap().stroops(), 1);
        assert_eq!(Amount::parse("1234.5").unwrap().stroops(), 12_345_000_000);
    }

    #[test]
    fn rejects_too_many_decimals() {
        assert!(matches!(
            Amount::parse("1.00000001"),
            Err(TypeError::TooPrecise(_))
        ));
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", ".", "1.", ".5", "-1", "1e5", "abc", "1.2.3", " 1"] {
            assert!(Amount::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_overflow() {
        assert!(matches!(
            Amount::parse("922337203685.4775808"),
            Err(TypeError::AmountOverflow(_))
        ));
        assert_eq!(
            Amount::parse("922337203685.4775807").unwrap().stroops(),
            i64::MAX
        );
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(Amount::from_stroops(100_000_000).to_string(), "10.0000000");
        assert_eq!(Amount::from_stroops(1).to_string(), "0.0000001");
        assert_eq!(Amount::from_stroops(-5).to_string(), "-0.0000005");
    }

    #[test]
    fn zero_is_not_positive() {
        assert!(!Amount::parse("0").unwrap().is_positive());
        assert!(!Amount::default().is_positive());
    }

    proptest! {
        #[test]
        fn canonical_form_parses_back(stroops in 0i64..=i64::MAX) {
            let amount = Amount::from_stroops(stroops);
            prop_assert_eq!(Amount::parse(&amount.to_string()).unwrap(), amount);
        }

        #[test]
        fn eight_decimals_always_rejected(whole in 0u32..1_000_000, frac in 0u32..100_000_000) {
            let s = format!("{whole}.{frac:08}");
            prop_assert!(Amount::parse(&s).is_err());
        }
    }
}
