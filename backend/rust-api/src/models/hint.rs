use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Concept name -> one-sentence explanation.
pub type HintTable = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Concept {
    Principal,
    Rate,
    Time,
    Compounding,
}

impl Concept {
    pub const ALL: [Concept; 4] = [
        Concept::Principal,
        Concept::Rate,
        Concept::Time,
        Concept::Compounding,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Concept::Principal => "Principal",
            Concept::Rate => "Rate",
            Concept::Time => "Time",
            Concept::Compounding => "Compounding",
        }
    }
}

impl FromStr for Concept {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Concept::ALL
            .into_iter()
            .find(|concept| concept.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown concept: {}", s))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HintResponse {
    pub concept: String,
    pub hint: String,
}
