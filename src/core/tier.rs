//! Service tiers that bias flight, hotel, attraction, and restaurant selection.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three fixed service-quality levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Cheapest options first
    Economy,
    /// Best rated options, hotels capped well below the nightly ceiling
    Balanced,
    /// Best rated options, most expensive among equals
    Luxury,
}

impl Tier {
    /// All tiers in the order options are generated and returned.
    pub const ALL: [Self; 3] = [Self::Economy, Self::Balanced, Self::Luxury];

    /// Display label, also used in log fields and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Economy => "Economy",
            Self::Balanced => "Balanced",
            Self::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::validation(format!("unknown tier: {s}")))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_tier_case_insensitive() {
        assert_eq!("economy".parse::<Tier>().unwrap(), Tier::Economy);
        assert_eq!(" Balanced ".parse::<Tier>().unwrap(), Tier::Balanced);
        assert_eq!("LUXURY".parse::<Tier>().unwrap(), Tier::Luxury);
        assert!(matches!(
            "first-class".parse::<Tier>(),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_tier_order_is_fixed() {
        assert_eq!(Tier::ALL, [Tier::Economy, Tier::Balanced, Tier::Luxury]);
        assert_eq!(Tier::Luxury.to_string(), "Luxury");
    }
}
