//! Player catalog: base stat tables for the entities the planner trains.

use serde::{Deserialize, Serialize};

use crate::training::{ModifierSelection, StatLine};

pub const DEFAULT_PLAYER_ID: &str = "messi_2015";

/// Canonical display order of the stat sheet.
pub const STAT_ORDER: [&str; 26] = [
    "Offensive Awareness",
    "Ball Control",
    "Dribbling",
    "Tight Possession",
    "Low Pass",
    "Lofted Pass",
    "Finishing",
    "Heading",
    "Place Kicking",
    "Curl",
    "Speed",
    "Acceleration",
    "Kicking Power",
    "Jump",
    "Physical Contact",
    "Balance",
    "Stamina",
    "Defensive Awareness",
    "Tackling",
    "Aggression",
    "Defensive Engagement",
    "GK Awareness",
    "GK Catching",
    "GK Parrying",
    "GK Reflexes",
    "GK Reach",
];

/// Stat names of `stats` in [STAT_ORDER], unknown names appended alphabetically.
pub fn ordered_stat_names(stats: &StatLine) -> Vec<&str> {
    let mut names: Vec<&str> = STAT_ORDER
        .iter()
        .copied()
        .filter(|name| stats.contains_key(*name))
        .collect();
    names.extend(
        stats
            .keys()
            .map(String::as_str)
            .filter(|name| !STAT_ORDER.contains(name)),
    );
    names
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub position: String,
    /// Training budget the card ships with.
    pub total_points: i64,
    pub initial_stats: StatLine,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_booster: Option<String>,
}

impl PlayerDef {
    /// The selection a fresh build starts from: the card's own booster at +1.
    pub fn default_selection(&self) -> ModifierSelection {
        ModifierSelection {
            primary_booster: self.fixed_booster.clone(),
            ..ModifierSelection::default()
        }
    }
}

fn stat_line(values: [i32; 26]) -> StatLine {
    STAT_ORDER
        .iter()
        .zip(values)
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

pub fn builtin_players() -> Vec<PlayerDef> {
    vec![
        PlayerDef {
            id: DEFAULT_PLAYER_ID.to_string(),
            name: "Lionel Messi (2015)".to_string(),
            team: "FC Barcelona".to_string(),
            position: "RWF".to_string(),
            total_points: 80,
            initial_stats: stat_line([
                92, 95, 94, 96, 89, 88, 90, 70, 93, 94, 82, 87, 85, 72, 75, 95, 80, 45, 42, 48, 40,
                40, 40, 40, 40, 40,
            ]),
            fixed_booster: Some("Son of God".to_string()),
        },
        PlayerDef {
            id: "bojan_krkic".to_string(),
            name: "Bojan Krkic".to_string(),
            team: "Vissel Kobe".to_string(),
            position: "ST".to_string(),
            total_points: 60,
            initial_stats: stat_line([
                73, 89, 92, 90, 73, 68, 78, 60, 70, 75, 80, 84, 72, 65, 55, 88, 70, 40, 35, 45, 40,
                40, 40, 40, 40, 40,
            ]),
            fixed_booster: Some("Technique".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_players_carry_the_full_stat_sheet() {
        for player in builtin_players() {
            assert_eq!(player.initial_stats.len(), STAT_ORDER.len(), "{}", player.id);
        }
    }

    #[test]
    fn messi_sheet_matches_reference_values() {
        let messi = &builtin_players()[0];
        assert_eq!(messi.initial_stats["Finishing"], 90);
        assert_eq!(messi.initial_stats["Tight Possession"], 96);
        assert_eq!(messi.initial_stats["GK Reach"], 40);
    }

    #[test]
    fn default_selection_uses_fixed_booster_at_level_one() {
        let bojan = &builtin_players()[1];
        let selection = bojan.default_selection();
        assert_eq!(selection.primary_booster.as_deref(), Some("Technique"));
        assert_eq!(selection.primary_level, 1);
        assert_eq!(selection.manager_tier, 0);
    }

    #[test]
    fn ordered_names_follow_sheet_order_then_extras() {
        let mut stats = StatLine::new();
        stats.insert("Weak Foot".to_string(), 3);
        stats.insert("Speed".to_string(), 80);
        stats.insert("Finishing".to_string(), 90);
        assert_eq!(ordered_stat_names(&stats), vec!["Finishing", "Speed", "Weak Foot"]);
    }
}
