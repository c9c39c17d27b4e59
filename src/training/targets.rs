//! Target stat thresholds with priority ranks (1 is processed first).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub stat: String,
    pub value: i32,
    pub priority: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub value: i32,
    pub priority: u32,
}

/// One target per stat. Serialises as `{ "Stat": { "value": .., "priority": .. } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetSet {
    targets: BTreeMap<String, TargetSpec>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, stat: &str) -> Option<TargetSpec> {
        self.targets.get(stat).copied()
    }

    /// Insert or replace a target verbatim, priority included.
    pub fn insert(&mut self, stat: impl Into<String>, value: i32, priority: u32) {
        self.targets
            .insert(stat.into(), TargetSpec { value, priority });
    }

    /// Editing rule of the target screen: a value of 0 or less removes the
    /// target and closes the gap in priorities; an existing target keeps its
    /// rank; a new target goes to the back of the queue.
    pub fn set_value(&mut self, stat: &str, value: i32) {
        if value <= 0 {
            self.remove(stat);
            return;
        }
        if let Some(spec) = self.targets.get_mut(stat) {
            spec.value = value;
            return;
        }
        let priority = self.targets.len() as u32 + 1;
        self.targets
            .insert(stat.to_string(), TargetSpec { value, priority });
    }

    pub fn remove(&mut self, stat: &str) -> Option<TargetSpec> {
        let removed = self.targets.remove(stat)?;
        for spec in self.targets.values_mut() {
            if spec.priority > removed.priority {
                spec.priority -= 1;
            }
        }
        Some(removed)
    }

    /// Solve order: ascending priority, equal priorities by stat name.
    pub fn ordered(&self) -> Vec<Target> {
        let mut ordered: Vec<Target> = self
            .targets
            .iter()
            .map(|(stat, spec)| Target {
                stat: stat.clone(),
                value: spec.value,
                priority: spec.priority,
            })
            .collect();
        // The map already iterates by name, so a stable sort keeps the tie-break.
        ordered.sort_by_key(|t| t.priority);
        ordered
    }
}

impl FromIterator<Target> for TargetSet {
    fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
        let mut set = TargetSet::new();
        for target in iter {
            set.insert(target.stat, target.value, target.priority);
        }
        set
    }
}

/// Compact share form: `Speed:90:1|Finishing:93:2`.
impl fmt::Display for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, target) in self.ordered().iter().enumerate() {
            if index > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}:{}:{}", target.stat, target.value, target.priority)?;
        }
        Ok(())
    }
}

/// Lenient parse of the share form; malformed segments are dropped.
impl FromStr for TargetSet {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut set = TargetSet::new();
        for part in raw.split('|') {
            let mut fields = part.split(':');
            let (Some(stat), Some(value), Some(priority)) =
                (fields.next(), fields.next(), fields.next())
            else {
                continue;
            };
            let stat = stat.trim();
            if stat.is_empty() {
                continue;
            }
            if let (Ok(value), Ok(priority)) =
                (value.trim().parse::<i32>(), priority.trim().parse::<u32>())
            {
                set.insert(stat, value, priority);
            }
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_targets_queue_behind_existing_ones() {
        let mut set = TargetSet::new();
        set.set_value("Speed", 90);
        set.set_value("Finishing", 93);
        set.set_value("Speed", 91);
        assert_eq!(set.get("Speed"), Some(TargetSpec { value: 91, priority: 1 }));
        assert_eq!(set.get("Finishing"), Some(TargetSpec { value: 93, priority: 2 }));
    }

    #[test]
    fn clearing_a_target_shifts_later_priorities() {
        let mut set = TargetSet::new();
        set.set_value("Speed", 90);
        set.set_value("Finishing", 93);
        set.set_value("Curl", 88);
        set.set_value("Speed", 0);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("Finishing").map(|t| t.priority), Some(1));
        assert_eq!(set.get("Curl").map(|t| t.priority), Some(2));
    }

    #[test]
    fn equal_priorities_break_ties_by_stat_name() {
        let mut set = TargetSet::new();
        set.insert("Speed", 90, 1);
        set.insert("Balance", 96, 1);
        set.insert("Curl", 95, 0);
        let order: Vec<String> = set.ordered().into_iter().map(|t| t.stat).collect();
        assert_eq!(order, vec!["Curl", "Balance", "Speed"]);
    }

    #[test]
    fn share_form_parses_and_skips_garbage() {
        let set: TargetSet = "Speed:90:1|bogus|Finishing:x:2|Low Pass:91:2"
            .parse()
            .expect("parse is infallible");
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_string(), "Speed:90:1|Low Pass:91:2");
    }

    #[test]
    fn serialises_as_stat_keyed_map() {
        let mut set = TargetSet::new();
        set.insert("Speed", 90, 1);
        let json = serde_json::to_value(&set).expect("targets serialise");
        assert_eq!(json["Speed"]["value"], 90);
        assert_eq!(json["Speed"]["priority"], 1);
    }
}
