use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("percentage must be between 0 and 100, got {0}")]
pub struct PercentError(pub u32);

/// Whole percentage in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const FULL: Percent = Percent(100);

    /// # Errors
    ///
    /// Returns `PercentError` if `value` is above 100.
    pub fn new(value: u32) -> Result<Self, PercentError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .map(Self)
            .ok_or(PercentError(value))
    }

    /// Clamp into range instead of failing.
    #[must_use]
    pub fn saturating(value: u32) -> Self {
        Self(u8::try_from(value.min(100)).unwrap_or(100))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for Percent {
    type Error = PercentError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for u32 {
    fn from(value: Percent) -> Self {
        u32::from(value.0)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_enforced() {
        assert_eq!(Percent::new(100).unwrap(), Percent::FULL);
        assert_eq!(Percent::new(101).unwrap_err(), PercentError(101));
        assert_eq!(Percent::saturating(250), Percent::FULL);
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&Percent::new(67).unwrap()).unwrap();
        assert_eq!(json, "67");
        assert!(serde_json::from_str::<Percent>("140").is_err());
    }
}
