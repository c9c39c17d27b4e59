//! Training categories: named groups of stats that level up together.
//! The map keeps declaration order and builds a stat -> category index once.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::training::Allocation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingCategory {
    pub name: String,
    pub stats: Vec<String>,
}

impl TrainingCategory {
    pub fn new(name: &str, stats: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            stats: stats.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoryMap {
    categories: Vec<TrainingCategory>,
    /// Stat name -> positions in `categories`, ascending.
    by_stat: HashMap<String, Vec<usize>>,
}

impl CategoryMap {
    pub fn new(categories: Vec<TrainingCategory>) -> Self {
        let mut by_stat: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, category) in categories.iter().enumerate() {
            for stat in &category.stats {
                let positions = by_stat.entry(stat.clone()).or_default();
                // A category listing a stat twice still trains it once.
                if positions.last() != Some(&position) {
                    positions.push(position);
                }
            }
        }
        Self {
            categories,
            by_stat,
        }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            TrainingCategory::new("Shooting", &["Finishing", "Place Kicking", "Curl"]),
            TrainingCategory::new("Passing", &["Low Pass", "Lofted Pass"]),
            TrainingCategory::new(
                "Dribbling",
                &["Dribbling", "Ball Control", "Tight Possession"],
            ),
            TrainingCategory::new(
                "Dexterity",
                &["Offensive Awareness", "Acceleration", "Balance"],
            ),
            TrainingCategory::new(
                "Lower Body Strength",
                &["Speed", "Kicking Power", "Stamina"],
            ),
            TrainingCategory::new("Aerial Strength", &["Heading", "Jump", "Physical Contact"]),
            TrainingCategory::new(
                "Defending",
                &[
                    "Defensive Awareness",
                    "Tackling",
                    "Aggression",
                    "Defensive Engagement",
                ],
            ),
            TrainingCategory::new("Goalkeeping 1", &["GK Awareness", "Jump"]),
            TrainingCategory::new("Goalkeeping 2", &["GK Catching", "GK Reach"]),
            TrainingCategory::new("Goalkeeping 3", &["GK Parrying", "GK Reflexes"]),
        ])
    }

    pub fn categories(&self) -> &[TrainingCategory] {
        &self.categories
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&TrainingCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Every category that trains `stat`, in declaration order.
    pub fn categories_for(&self, stat: &str) -> Vec<&TrainingCategory> {
        self.by_stat
            .get(stat)
            .map(|positions| positions.iter().map(|&i| &self.categories[i]).collect())
            .unwrap_or_default()
    }

    /// The first category listing `stat`; this is the one the solver raises.
    pub fn owning_category(&self, stat: &str) -> Option<&TrainingCategory> {
        self.by_stat
            .get(stat)
            .and_then(|positions| positions.first())
            .map(|&i| &self.categories[i])
    }

    /// Sum of allocation levels over every category that trains `stat`, saturating.
    pub fn level_bonus(&self, stat: &str, allocation: &Allocation) -> i32 {
        self.categories_for(stat)
            .into_iter()
            .map(|category| allocation.get(&category.name).copied().unwrap_or(0))
            .fold(0, i32::saturating_add)
    }

    /// Stats trainable by at least one category, sorted and de-duplicated.
    pub fn trainable_stats(&self) -> Vec<String> {
        self.by_stat
            .keys()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// An allocation with every category at level 0.
    pub fn zero_allocation(&self) -> Allocation {
        self.names().map(|name| (name.to_string(), 0)).collect()
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Serialize for CategoryMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.categories.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CategoryMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<TrainingCategory>::deserialize(deserializer).map(CategoryMap::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_is_trained_by_two_categories_and_owned_by_the_first() {
        let map = CategoryMap::builtin();
        let names: Vec<&str> = map
            .categories_for("Jump")
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Aerial Strength", "Goalkeeping 1"]);
        assert_eq!(
            map.owning_category("Jump").map(|c| c.name.as_str()),
            Some("Aerial Strength")
        );
    }

    #[test]
    fn level_bonus_sums_every_listing_category() {
        let map = CategoryMap::builtin();
        let mut allocation = Allocation::new();
        allocation.insert("Aerial Strength".to_string(), 3);
        allocation.insert("Goalkeeping 1".to_string(), 2);
        assert_eq!(map.level_bonus("Jump", &allocation), 5);
        assert_eq!(map.level_bonus("Heading", &allocation), 3);
        assert_eq!(map.level_bonus("Finishing", &allocation), 0);
    }

    #[test]
    fn unknown_stat_has_no_category() {
        let map = CategoryMap::builtin();
        assert!(map.owning_category("Weak Foot").is_none());
        assert!(map.categories_for("Weak Foot").is_empty());
    }

    #[test]
    fn trainable_stats_are_sorted_and_unique() {
        let stats = CategoryMap::builtin().trainable_stats();
        assert_eq!(stats.iter().filter(|s| s.as_str() == "Jump").count(), 1);
        let mut sorted = stats.clone();
        sorted.sort();
        assert_eq!(stats, sorted);
        assert_eq!(stats.len(), 26);
    }

    #[test]
    fn overlapping_levels_saturate() {
        let map = CategoryMap::builtin();
        let mut allocation = Allocation::new();
        allocation.insert("Aerial Strength".to_string(), i32::MAX);
        allocation.insert("Goalkeeping 1".to_string(), 7);
        assert_eq!(map.level_bonus("Jump", &allocation), i32::MAX);
        assert_eq!(map.level_bonus("Heading", &allocation), i32::MAX);
        assert_eq!(map.level_bonus("GK Awareness", &allocation), 7);
    }

    #[test]
    fn deserializes_from_plain_list() {
        let raw = r#"[{"name":"Shooting","stats":["Finishing"]}]"#;
        let map: CategoryMap = serde_json::from_str(raw).expect("category list should parse");
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.owning_category("Finishing").map(|c| c.name.as_str()),
            Some("Shooting")
        );
    }
}
