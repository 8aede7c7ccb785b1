//! Membership categories offered by the club.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    Regular,
    Junior,
    Family,
    Honorary,
}

impl MembershipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipType::Regular => "regular",
            MembershipType::Junior => "junior",
            MembershipType::Family => "family",
            MembershipType::Honorary => "honorary",
        }
    }
}

impl std::fmt::Display for MembershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(MembershipType::Regular),
            "junior" => Ok(MembershipType::Junior),
            "family" => Ok(MembershipType::Family),
            "honorary" => Ok(MembershipType::Honorary),
            other => Err(format!("unknown membership type '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Junior".parse::<MembershipType>(), Ok(MembershipType::Junior));
        assert!("platinum".parse::<MembershipType>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&MembershipType::Honorary).unwrap();
        assert_eq!(json, "\"honorary\"");
    }
}
