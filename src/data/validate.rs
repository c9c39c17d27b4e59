use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use crate::data::boosters::{is_goalkeeping_stat, normalize_booster_name, TOTAL_PACKAGE};
use crate::data::registry::GameData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

/// Check a loaded catalog for structural problems. Overlapping category
/// membership is legal (the calculator sums it) so it is only a warning.
pub fn validate_game_data(data: &GameData) -> ValidationReport {
    let mut report = ValidationReport::default();

    validate_categories(&mut report, data);
    validate_boosters(&mut report, data);
    validate_managers(&mut report, data);
    validate_players(&mut report, data);

    report.diagnostics.sort_by(|a, b| a.severity.cmp(&b.severity));
    report
}

fn validate_categories(report: &mut ValidationReport, data: &GameData) {
    let mut seen = HashSet::new();
    let mut owners: HashMap<&str, Vec<&str>> = HashMap::new();

    for (index, category) in data.categories.categories().iter().enumerate() {
        let context = format!("categories[{index}] '{}'", category.name);
        if category.name.trim().is_empty() {
            report.push(ValidationSeverity::Error, &context, "missing non-empty name");
        }
        if !seen.insert(category.name.as_str()) {
            report.push(
                ValidationSeverity::Error,
                &context,
                format!("duplicate category '{}'", category.name),
            );
        }
        if category.stats.is_empty() {
            report.push(ValidationSeverity::Error, &context, "category trains no stats");
        }
        for stat in &category.stats {
            owners.entry(stat.as_str()).or_default().push(&category.name);
        }
    }

    let mut shared: Vec<_> = owners.into_iter().filter(|(_, c)| c.len() > 1).collect();
    shared.sort();
    for (stat, categories) in shared {
        report.push(
            ValidationSeverity::Warning,
            format!("stat '{stat}'"),
            format!(
                "trained by {} categories ({}); levels are summed, auto-allocation uses '{}'",
                categories.len(),
                categories.join(", "),
                categories[0]
            ),
        );
    }
}

fn validate_boosters(report: &mut ValidationReport, data: &GameData) {
    let known_stats: BTreeSet<&str> = data
        .players
        .iter()
        .flat_map(|p| p.initial_stats.keys().map(String::as_str))
        .chain(
            data.categories
                .categories()
                .iter()
                .flat_map(|c| c.stats.iter().map(String::as_str)),
        )
        .collect();

    let mut seen = HashSet::new();
    for (index, booster) in data.boosters.boosters().iter().enumerate() {
        let context = format!("boosters[{index}] '{}'", booster.name);
        if normalize_booster_name(&booster.name).is_none() {
            report.push(
                ValidationSeverity::Error,
                &context,
                "booster name is blank or reserved",
            );
        }
        if !seen.insert(booster.name.as_str()) {
            report.push(
                ValidationSeverity::Error,
                &context,
                format!("duplicate booster '{}'", booster.name),
            );
        }
        if booster.name != TOTAL_PACKAGE && booster.stats.is_empty() {
            report.push(ValidationSeverity::Error, &context, "booster affects no stats");
        }
        for stat in &booster.stats {
            // Goalkeeping bundles name keeper stats the sheet does not track yet.
            if !known_stats.contains(stat.as_str()) && !is_goalkeeping_stat(stat) {
                report.push(
                    ValidationSeverity::Warning,
                    &context,
                    format!("stat '{stat}' is not on any player sheet or category"),
                );
            }
        }
    }
}

fn validate_managers(report: &mut ValidationReport, data: &GameData) {
    let mut seen = HashSet::new();
    for tier in data.managers.tiers() {
        let context = format!("managers[{}]", tier.tier);
        if tier.tier == 0 {
            report.push(ValidationSeverity::Error, &context, "tier 0 is reserved for 'off'");
        }
        if !seen.insert(tier.tier) {
            report.push(ValidationSeverity::Error, &context, "duplicate tier");
        }
        let descending = tier
            .thresholds
            .windows(2)
            .all(|pair| pair[0].threshold > pair[1].threshold);
        if !descending {
            report.push(
                ValidationSeverity::Error,
                &context,
                "thresholds must be strictly descending",
            );
        }
    }
}

fn validate_players(report: &mut ValidationReport, data: &GameData) {
    let mut seen = HashSet::new();
    for player in &data.players {
        let context = format!("players '{}'", player.id);
        if player.id.trim().is_empty() {
            report.push(ValidationSeverity::Error, &context, "missing non-empty id");
        }
        if !seen.insert(player.id.as_str()) {
            report.push(ValidationSeverity::Error, &context, "duplicate player id");
        }
        if let Some(booster) = player.fixed_booster.as_deref().and_then(normalize_booster_name) {
            if !data.boosters.contains(booster) {
                report.push(
                    ValidationSeverity::Error,
                    &context,
                    format!("fixed booster '{booster}' is not in the catalog"),
                );
            }
        }
        for stat in player.initial_stats.keys() {
            if data.categories.owning_category(stat).is_none() {
                report.push(
                    ValidationSeverity::Info,
                    &context,
                    format!("stat '{stat}' cannot be trained"),
                );
            }
        }
    }
}
