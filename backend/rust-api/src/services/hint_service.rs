use crate::models::hint::{Concept, HintTable};

pub const FALLBACK_HINT: &str = "No hint available.";

pub fn hint_for(concept: Concept) -> &'static str {
    match concept {
        Concept::Principal => "The initial amount invested (P).",
        Concept::Rate => "The interest rate as a percentage per year (r).",
        Concept::Time => "The total number of years the money is invested (t).",
        Concept::Compounding => "How many times per year interest is added (n).",
    }
}

/// Looks a hint up by concept name, case-insensitively.
pub fn hint_by_name(name: &str) -> Option<(Concept, &'static str)> {
    name.parse::<Concept>()
        .ok()
        .map(|concept| (concept, hint_for(concept)))
}

/// Every concept with its hint, as returned next to worked solutions.
pub fn all_hints() -> HintTable {
    Concept::ALL
        .into_iter()
        .map(|concept| (concept.name().to_string(), hint_for(concept).to_string()))
        .collect()
}
