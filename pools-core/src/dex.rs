//! Known DEX tags

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PoolsError;

/// Supported decentralized exchanges
///
/// The serialized form is the tag carried in `Pool::dex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dex {
    /// WX Network liquidity pools
    #[serde(rename = "WX")]
    Wx,
    /// Puzzle Swap
    #[serde(rename = "puzzle")]
    Puzzle,
    /// Swop.fi
    #[serde(rename = "swop.fi")]
    Swop,
    /// Axly leveraged farms
    #[serde(rename = "axly.io")]
    Axly,
}

impl Dex {
    /// Every known DEX, in the default fan-out order
    pub const ALL: [Dex; 4] = [Dex::Wx, Dex::Puzzle, Dex::Swop, Dex::Axly];

    /// The tag written into `Pool::dex`
    pub fn tag(&self) -> &'static str {
        match self {
            Dex::Wx => "WX",
            Dex::Puzzle => "puzzle",
            Dex::Swop => "swop.fi",
            Dex::Axly => "axly.io",
        }
    }
}

impl fmt::Display for Dex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl std::str::FromStr for Dex {
    type Err = PoolsError;

    /// Tags are matched exactly, the same way the presenter dispatches on them
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WX" => Ok(Dex::Wx),
            "puzzle" => Ok(Dex::Puzzle),
            "swop.fi" => Ok(Dex::Swop),
            "axly.io" => Ok(Dex::Axly),
            _ => Err(PoolsError::UnknownDex(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        for dex in Dex::ALL {
            assert_eq!(dex.tag().parse::<Dex>().unwrap(), dex);
        }
    }

    #[test]
    fn test_unknown_tag() {
        let err = "uniswap".parse::<Dex>().unwrap_err();
        assert!(matches!(err, PoolsError::UnknownDex(tag) if tag == "uniswap"));
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!("wx".parse::<Dex>().is_err());
        assert!("Puzzle".parse::<Dex>().is_err());
    }

    #[test]
    fn test_serde_uses_tag() {
        assert_eq!(serde_json::to_string(&Dex::Swop).unwrap(), "\"swop.fi\"");
        let dex: Dex = serde_json::from_str("\"axly.io\"").unwrap();
        assert_eq!(dex, Dex::Axly);
    }
}
