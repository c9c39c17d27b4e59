//! Booster catalog: named bundles of stats that receive a flat bonus.

use serde::{Deserialize, Serialize};

/// Reserved bundle that boosts every non-goalkeeping stat.
pub const TOTAL_PACKAGE: &str = "Total Package";
/// Sentinel for "no booster selected".
pub const BOOSTER_NONE: &str = "NONE";
/// Name prefix shared by all goalkeeping stats.
pub const GOALKEEPING_PREFIX: &str = "GK";

pub fn is_goalkeeping_stat(stat: &str) -> bool {
    stat.starts_with(GOALKEEPING_PREFIX)
}

/// `None` for the sentinel or a blank name, otherwise the trimmed name.
pub fn normalize_booster_name(name: &str) -> Option<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(BOOSTER_NONE) {
        None
    } else {
        Some(trimmed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BoosterGroup {
    Universal,
    Attack,
    Defense,
    #[serde(rename = "GK")]
    Goalkeeping,
    Unique,
    Conditional,
}

impl BoosterGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Universal => "Universal",
            Self::Attack => "Attack",
            Self::Defense => "Defense",
            Self::Goalkeeping => "GK",
            Self::Unique => "Unique",
            Self::Conditional => "Conditional",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booster {
    pub name: String,
    pub group: BoosterGroup,
    /// Affected stats. Empty for [TOTAL_PACKAGE], which is resolved by rule.
    #[serde(default)]
    pub stats: Vec<String>,
}

impl Booster {
    fn new(group: BoosterGroup, name: &str, stats: [&str; 4]) -> Self {
        Self {
            name: name.to_string(),
            group,
            stats: stats.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Which stats a selected booster touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoosterEffect<'a> {
    None,
    AllOutfield,
    Stats(&'a [String]),
}

impl BoosterEffect<'_> {
    pub fn applies_to(&self, stat: &str) -> bool {
        match self {
            Self::None => false,
            Self::AllOutfield => !is_goalkeeping_stat(stat),
            Self::Stats(stats) => stats.iter().any(|s| s == stat),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoosterCatalog {
    boosters: Vec<Booster>,
}

impl BoosterCatalog {
    pub fn new(boosters: Vec<Booster>) -> Self {
        Self { boosters }
    }

    #[rustfmt::skip]
    pub fn builtin() -> Self {
        use BoosterGroup::*;

        Self::new(vec![
            Booster::new(Universal, "Agility", ["Speed", "Acceleration", "Balance", "Stamina"]),
            Booster::new(Universal, "Free Kick", ["Finishing", "Place Kicking", "Curl", "Kicking Power"]),
            Booster::new(Universal, "Aerial", ["Finishing", "Heading", "Jump", "Physical Contact"]),
            Booster::new(Universal, "Physical", ["Jump", "Physical Contact", "Balance", "Stamina"]),
            Booster::new(Attack, "Technique", ["Ball Control", "Dribbling", "Tight Possession", "Low Pass"]),
            Booster::new(Attack, "Passing", ["Low Pass", "Lofted Pass", "Curl", "Kicking Power"]),
            Booster::new(Attack, "Shooting", ["Ball Control", "Finishing", "Kicking Power", "Physical Contact"]),
            Booster::new(Attack, "Ball Carry", ["Dribbling", "Tight Possession", "Speed", "Balance"]),
            Booster::new(Attack, "Striker Sense", ["Offensive Awareness", "Ball Control", "Finishing", "Acceleration"]),
            Booster::new(Attack, "Cross", ["Lofted Pass", "Curl", "Speed", "Stamina"]),
            Booster::new(Attack, "Fantasista", ["Ball Control", "Dribbling", "Finishing", "Balance"]),
            Booster::new(Defense, "Defense", ["Defensive Awareness", "Tackling", "Acceleration", "Jump"]),
            Booster::new(Defense, "Duel", ["Defensive Awareness", "Tackling", "Speed", "Stamina"]),
            Booster::new(Defense, "Shutdown", ["Defensive Awareness", "Tackling", "Defensive Engagement", "Speed"]),
            Booster::new(Defense, "Hard Work", ["Aggression", "Acceleration", "Physical Contact", "Stamina"]),
            Booster::new(Goalkeeping, "Goalkeeping", ["GK Awareness", "GK Catching", "GK Clearing", "GK Collapsing"]),
            Booster::new(Goalkeeping, "Goal Saving", ["GK Awareness", "GK Clearing", "GK Collapsing", "GK Parrying"]),
            Booster::new(Unique, "Bearer of Fate", ["Finishing", "Heading", "Speed", "Acceleration"]),
            Booster::new(Unique, "Son of God", ["Dribbling", "Low Pass", "Finishing", "Kicking Power"]),
            Booster::new(Unique, "King", ["Dribbling", "Ball Control", "Tight Possession", "Physical Contact"]),
            Booster::new(Unique, "Little Prince", ["Offensive Awareness", "Low Pass", "Finishing", "Kicking Power"]),
            Booster::new(Unique, "Rare Genius", ["Offensive Awareness", "Ball Control", "Dribbling", "Physical Contact"]),
            Booster::new(Unique, "Magical", ["Offensive Awareness", "Dribbling", "Tight Possession", "Acceleration"]),
            Booster::new(Unique, "Ball Protection", ["Ball Control", "Tight Possession", "Physical Contact", "Balance"]),
            Booster::new(Unique, "Regista", ["Tight Possession", "Low Pass", "Defensive Awareness", "Tackling"]),
            Booster::new(Unique, "Strength", ["Speed", "Kicking Power", "Jump", "Physical Contact"]),
            Booster::new(Unique, "Aerial Block", ["Heading", "Defensive Awareness", "Jump", "Physical Contact"]),
            Booster::new(Unique, "Off the Ball", ["Offensive Awareness", "Speed", "Acceleration", "Stamina"]),
            Booster::new(Unique, "Balancer", ["Offensive Awareness", "Defensive Awareness", "Acceleration", "Stamina"]),
            Booster::new(Unique, "Rebuild", ["Low Pass", "Defensive Awareness", "Aggression", "Defensive Engagement"]),
            Booster::new(Unique, "Offensive Creator", ["Offensive Awareness", "Ball Control", "Low Pass", "Kicking Power"]),
            Booster::new(Unique, "Natural-Born", ["Offensive Awareness", "Ball Control", "Dribbling", "Finishing"]),
            Booster::new(Unique, "Steal", ["Tackling", "Aggression", "Acceleration", "Physical Contact"]),
            Booster::new(Unique, "Accuracy", ["Low Pass", "Lofted Pass", "Finishing", "Kicking Power"]),
            Booster::new(Unique, "Counter", ["Low Pass", "Tackling", "Defensive Engagement", "Physical Contact"]),
            Booster::new(Unique, "Breakthrough", ["Dribbling", "Speed", "Kicking Power", "Physical Contact"]),
            Booster::new(Unique, "Striking", ["Offensive Awareness", "Acceleration", "Kicking Power", "Physical Contact"]),
            Booster {
                name: TOTAL_PACKAGE.to_string(),
                group: Conditional,
                stats: Vec::new(),
            },
        ])
    }

    pub fn boosters(&self) -> &[Booster] {
        &self.boosters
    }

    pub fn get(&self, name: &str) -> Option<&Booster> {
        self.boosters.iter().find(|b| b.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Boosters of one group in catalog order.
    pub fn in_group(&self, group: BoosterGroup) -> impl Iterator<Item = &Booster> {
        self.boosters.iter().filter(move |b| b.group == group)
    }

    /// Resolve a selected booster name. Unknown names affect nothing.
    pub fn effect(&self, name: Option<&str>) -> BoosterEffect<'_> {
        let Some(name) = name.and_then(normalize_booster_name) else {
            return BoosterEffect::None;
        };
        if name == TOTAL_PACKAGE {
            return BoosterEffect::AllOutfield;
        }
        match self.get(name) {
            Some(booster) => BoosterEffect::Stats(&booster.stats),
            None => BoosterEffect::None,
        }
    }
}

impl Default for BoosterCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_package_skips_goalkeeping_stats() {
        let catalog = BoosterCatalog::builtin();
        let effect = catalog.effect(Some(TOTAL_PACKAGE));
        assert_eq!(effect, BoosterEffect::AllOutfield);
        assert!(effect.applies_to("Finishing"));
        assert!(!effect.applies_to("GK Reach"));
    }

    #[test]
    fn unknown_and_none_boosters_affect_nothing() {
        let catalog = BoosterCatalog::builtin();
        assert_eq!(catalog.effect(Some("Imaginary")), BoosterEffect::None);
        assert_eq!(catalog.effect(Some("NONE")), BoosterEffect::None);
        assert_eq!(catalog.effect(Some("  ")), BoosterEffect::None);
        assert_eq!(catalog.effect(None), BoosterEffect::None);
    }

    #[test]
    fn named_booster_lists_its_four_stats() {
        let catalog = BoosterCatalog::builtin();
        let effect = catalog.effect(Some("Son of God"));
        assert!(effect.applies_to("Dribbling"));
        assert!(effect.applies_to("Kicking Power"));
        assert!(!effect.applies_to("Speed"));
    }

    #[test]
    fn every_regular_booster_names_four_stats() {
        let catalog = BoosterCatalog::builtin();
        for booster in catalog.boosters() {
            if booster.name != TOTAL_PACKAGE {
                assert_eq!(booster.stats.len(), 4, "{}", booster.name);
            }
        }
        assert_eq!(catalog.in_group(BoosterGroup::Unique).count(), 20);
    }
}
