use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// An account sequence number. Always strictly greater than zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct SequenceNumber(u64);

impl SequenceNumber {
    pub fn new(value: u64) -> Result<Self, TypeError> {
        if value == 0 {
            return Err(TypeError::ZeroSequence);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for SequenceNumber {
    type Error = TypeError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SequenceNumber> for u64 {
    fn from(seq: SequenceNumber) -> Self {
        seq.0
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert_eq!(SequenceNumber::new(0), Err(TypeError::ZeroSequence));
    }

    #[test]
    fn non_zero_is_accepted() {
        assert_eq!(SequenceNumber::new(42).unwrap().value(), 42);
        assert_eq!(SequenceNumber::new(u64::MAX).unwrap().value(), u64::MAX);
    }

    #[test]
    fn serde_enforces_non_zero() {
        assert!(serde_json::from_str::<SequenceNumber>("0").is_err());
        let seq: SequenceNumber = serde_json::from_str("7").unwrap();
        assert_eq!(seq.value(), 7);
    }
}
