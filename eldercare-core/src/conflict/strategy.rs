use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How each elder's sorted events are scanned for overlaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStrategy {
    /// Compare each event with its predecessor only
    #[default]
    Adjacent,
    /// Compare each event with every event still open at its start
    Sweep,
}

impl fmt::Display for ScanStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanStrategy::Adjacent => write!(f, "adjacent"),
            ScanStrategy::Sweep => write!(f, "sweep"),
        }
    }
}

impl FromStr for ScanStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adjacent" => Ok(ScanStrategy::Adjacent),
            "sweep" | "full" => Ok(ScanStrategy::Sweep),
            other => Err(format!(
                "Unknown scan strategy '{}'. Expected 'adjacent' or 'sweep'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategy() {
        assert_eq!("Sweep".parse::<ScanStrategy>(), Ok(ScanStrategy::Sweep));
        assert_eq!("adjacent".parse::<ScanStrategy>(), Ok(ScanStrategy::Adjacent));
        assert!("random".parse::<ScanStrategy>().is_err());
    }
}
