use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::error;

use crate::config::Settings;
use crate::data::players::{ordered_stat_names, PlayerDef, DEFAULT_PLAYER_ID};
use crate::data::registry::GameData;
use crate::data::validate::validate_game_data;
use crate::optimizer::{compare_builds, solve_for_player, Build, SolveReport, TargetStatus};
use crate::parallel::WorkerPool;
use crate::presets::PresetStore;
use crate::server::{self, AppState};
use crate::training::{budget_status, stat_breakdown, Allocation, ModifierSelection, TargetSet};

/// Training point planner: stat calculator, cost model and auto-allocation.
#[derive(Debug, Parser)]
#[command(name = "ef-trainer", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve,
    /// List catalog players
    Players,
    /// Final stats of a build with a per-layer breakdown
    Stats(StatsArgs),
    /// Points consumed by an allocation
    Cost(CostArgs),
    /// Auto-allocate a budget to prioritized stat targets
    Solve(SolveArgs),
    /// Compare two players' builds stat by stat
    Compare(CompareArgs),
    /// Validate the builtin catalog or a catalog file
    Validate(ValidateArgs),
    /// Manage named target presets
    #[command(subcommand)]
    Presets(PresetCommand),
}

#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Manager proficiency tier (0 = off)
    #[arg(long)]
    pub manager: Option<u32>,
    /// Primary booster name (NONE to clear the player's own)
    #[arg(long)]
    pub booster: Option<String>,
    /// Primary booster strength
    #[arg(long)]
    pub booster_level: Option<i32>,
    /// Stat receiving a manager +1 (up to two)
    #[arg(long = "boost")]
    pub boosts: Vec<String>,
    /// Crafting-slot booster name
    #[arg(long)]
    pub crafted: Option<String>,
}

impl SelectionArgs {
    /// Start from the player's default selection and apply the given flags.
    pub fn apply(&self, mut selection: ModifierSelection) -> ModifierSelection {
        if let Some(tier) = self.manager {
            selection.manager_tier = tier;
        }
        if let Some(booster) = &self.booster {
            selection.primary_booster = Some(booster.clone());
        }
        if let Some(level) = self.booster_level {
            selection.primary_level = level;
        }
        if !self.boosts.is_empty() {
            selection.manager_boosts = self.boosts.clone();
        }
        if let Some(crafted) = &self.crafted {
            selection.crafted_booster = Some(crafted.clone());
        }
        selection
    }
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[arg(default_value = DEFAULT_PLAYER_ID)]
    pub player: String,
    /// Category levels, e.g. "Shooting=3,Passing=2"
    #[arg(long, value_parser = parse_allocation, default_value = "")]
    pub alloc: Allocation,
    #[command(flatten)]
    pub selection: SelectionArgs,
    /// Emit a CSV table instead of JSON
    #[arg(long)]
    pub csv: bool,
}

#[derive(Debug, Args)]
pub struct CostArgs {
    #[arg(long, value_parser = parse_allocation, default_value = "")]
    pub alloc: Allocation,
    #[arg(long, default_value_t = 0)]
    pub budget: i64,
}

#[derive(Debug, Args)]
pub struct SolveArgs {
    #[arg(default_value = DEFAULT_PLAYER_ID)]
    pub player: String,
    /// Targets as "Stat:value:priority|Stat:value:priority"
    #[arg(long)]
    pub targets: Option<String>,
    /// Load targets from a saved preset id instead
    #[arg(long, conflicts_with = "targets")]
    pub preset: Option<String>,
    /// Defaults to the player's total points
    #[arg(long)]
    pub budget: Option<i64>,
    #[command(flatten)]
    pub selection: SelectionArgs,
    #[arg(long)]
    pub csv: bool,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    pub player_a: String,
    pub player_b: String,
    #[arg(long, value_parser = parse_allocation, default_value = "")]
    pub alloc_a: Allocation,
    #[arg(long, value_parser = parse_allocation, default_value = "")]
    pub alloc_b: Allocation,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Catalog file (.json/.yaml); defaults to the builtin tables
    pub path: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum PresetCommand {
    List,
    Save {
        name: String,
        #[arg(long)]
        targets: String,
    },
    Show {
        id: String,
    },
    Delete {
        id: String,
    },
}

/// Parse "Category=level,Category=level". Blank input is an empty allocation.
pub fn parse_allocation(raw: &str) -> Result<Allocation, String> {
    let mut allocation = Allocation::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (category, level) = part
            .split_once('=')
            .ok_or_else(|| format!("expected Category=level, got '{part}'"))?;
        let level = level
            .trim()
            .parse::<i32>()
            .map_err(|err| format!("invalid level for '{}': {err}", category.trim()))?;
        allocation.insert(category.trim().to_string(), level);
    }
    Ok(allocation)
}

pub fn run_with_args(args: &[String]) -> i32 {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };
    run(cli, &Settings::from_env())
}

pub fn run(cli: Cli, settings: &Settings) -> i32 {
    let data = GameData::load_or_builtin(settings.data_path.as_deref());
    let presets = PresetStore::new(&settings.presets_dir);

    match cli.command {
        Command::Serve => handle_serve(data, presets, settings),
        Command::Players => print_json(&data.players),
        Command::Stats(args) => handle_stats(&data, &args),
        Command::Cost(args) => print_json(&budget_status(&args.alloc, args.budget)),
        Command::Solve(args) => handle_solve(&data, &presets, &args),
        Command::Compare(args) => handle_compare(&data, &args),
        Command::Validate(args) => handle_validate(args.path, &data),
        Command::Presets(command) => handle_presets(&presets, command),
    }
}

fn handle_serve(data: std::sync::Arc<GameData>, presets: PresetStore, settings: &Settings) -> i32 {
    let state = AppState::new(data, presets, WorkerPool::with_workers(settings.workers));
    match server::run_server(&state, &settings.bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            error!("server error: {err}");
            1
        }
    }
}

fn find_player<'a>(data: &'a GameData, id: &str) -> Option<&'a PlayerDef> {
    let player = data.player(id);
    if player.is_none() {
        eprintln!("unknown player '{id}'");
    }
    player
}

fn handle_stats(data: &GameData, args: &StatsArgs) -> i32 {
    let Some(player) = find_player(data, &args.player) else {
        return 1;
    };
    let selection = args.selection.apply(player.default_selection());
    let breakdown = stat_breakdown(data, &player.initial_stats, &args.alloc, &selection);

    if args.csv {
        let mut writer = csv::Writer::from_writer(io::stdout());
        let header = [
            "stat", "base", "training", "manager", "booster", "crafted", "manager_boost", "total",
        ];
        let mut result = writer.write_record(header);
        for stat in ordered_stat_names(&player.initial_stats) {
            if result.is_err() {
                break;
            }
            let b = breakdown[stat];
            result = writer.write_record([
                stat.to_string(),
                b.base.to_string(),
                b.training.to_string(),
                b.manager.to_string(),
                b.booster.to_string(),
                b.crafted.to_string(),
                b.manager_boost.to_string(),
                b.total.to_string(),
            ]);
        }
        return finish_csv(result.and_then(|()| writer.flush().map_err(csv::Error::from)));
    }

    print_json(&serde_json::json!({
        "player": player.id,
        "selection": selection,
        "budget": budget_status(&args.alloc, player.total_points),
        "breakdown": breakdown,
    }))
}

fn handle_solve(data: &GameData, presets: &PresetStore, args: &SolveArgs) -> i32 {
    let Some(player) = find_player(data, &args.player) else {
        return 1;
    };
    let targets = match (&args.targets, &args.preset) {
        (Some(raw), _) => raw.parse::<TargetSet>().unwrap_or_default(),
        (None, Some(id)) => match presets.get(id) {
            Ok(preset) => preset.targets,
            Err(err) => {
                eprintln!("preset '{id}': {err}");
                return 1;
            }
        },
        (None, None) => {
            eprintln!("usage: ef-trainer solve <player> --targets <Stat:value:priority|...>");
            return 2;
        }
    };

    let selection = args.selection.apply(player.default_selection());
    let budget = args.budget.unwrap_or(player.total_points);
    let report = solve_for_player(data, player, &selection, &targets, budget);

    if args.csv {
        return finish_csv(write_outcomes_csv(&report));
    }
    print_json(&report)
}

fn write_outcomes_csv(report: &SolveReport) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["stat", "threshold", "priority", "status", "category", "level"])?;
    for outcome in &report.outcomes {
        let (status, category, level) = match &outcome.status {
            TargetStatus::Satisfied { category, level } => {
                ("satisfied", category.as_str(), level.to_string())
            }
            TargetStatus::OverBudget { category } => {
                ("over_budget", category.as_str(), String::new())
            }
            TargetStatus::Unreachable { category } => {
                ("unreachable", category.as_str(), String::new())
            }
            TargetStatus::Untrainable => ("untrainable", "", String::new()),
        };
        writer.write_record([
            outcome.target.stat.clone(),
            outcome.target.value.to_string(),
            outcome.target.priority.to_string(),
            status.to_string(),
            category.to_string(),
            level,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn handle_compare(data: &GameData, args: &CompareArgs) -> i32 {
    let (Some(a), Some(b)) = (
        find_player(data, &args.player_a),
        find_player(data, &args.player_b),
    ) else {
        return 1;
    };
    let build = |player: &PlayerDef, allocation: &Allocation| Build {
        base: player.initial_stats.clone(),
        allocation: allocation.clone(),
        selection: player.default_selection(),
        budget: player.total_points,
    };
    print_json(&compare_builds(
        data,
        &build(a, &args.alloc_a),
        &build(b, &args.alloc_b),
    ))
}

fn handle_validate(path: Option<PathBuf>, loaded: &GameData) -> i32 {
    let (label, data) = match path {
        Some(path) => match GameData::load(&path) {
            Ok(data) => (path.display().to_string(), data),
            Err(err) => {
                eprintln!("validation failed: {err}");
                return 1;
            }
        },
        None => ("builtin catalog".to_string(), loaded.clone()),
    };

    let report = validate_game_data(&data);
    for diagnostic in &report.diagnostics {
        eprintln!("- {diagnostic}");
    }
    if report.has_errors() {
        eprintln!("validation failed: {} issue(s)", report.diagnostics.len());
        1
    } else {
        println!("validation passed: {label}");
        0
    }
}

fn handle_presets(presets: &PresetStore, command: PresetCommand) -> i32 {
    let result = match command {
        PresetCommand::List => presets.list().map(|list| print_json(&list)),
        PresetCommand::Save { name, targets } => {
            let targets = targets.parse::<TargetSet>().unwrap_or_default();
            presets.save(&name, &targets).map(|preset| print_json(&preset))
        }
        PresetCommand::Show { id } => presets.get(&id).map(|preset| print_json(&preset)),
        PresetCommand::Delete { id } => presets.delete(&id).map(|()| {
            println!("deleted preset '{id}'");
            0
        }),
    };
    result.unwrap_or_else(|err| {
        eprintln!("preset command failed: {err}");
        1
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize output: {err}");
            1
        }
    }
}

fn finish_csv(result: Result<(), csv::Error>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("failed to write csv: {err}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_allocation_lists() {
        let allocation = parse_allocation("Shooting=3, Lower Body Strength = 2").expect("valid");
        assert_eq!(allocation["Shooting"], 3);
        assert_eq!(allocation["Lower Body Strength"], 2);
        assert!(parse_allocation("").expect("blank").is_empty());
        assert!(parse_allocation("Shooting").is_err());
        assert!(parse_allocation("Shooting=x").is_err());
    }

    #[test]
    fn selection_flags_override_player_defaults() {
        let args = SelectionArgs {
            manager: Some(88),
            booster: Some("NONE".to_string()),
            boosts: vec!["Speed".to_string()],
            ..SelectionArgs::default()
        };
        let base = ModifierSelection {
            primary_booster: Some("Son of God".to_string()),
            ..ModifierSelection::default()
        };
        let selection = args.apply(base);
        assert_eq!(selection.manager_tier, 88);
        assert_eq!(selection.primary(), None);
        assert_eq!(selection.manager_boosts, vec!["Speed".to_string()]);
        assert_eq!(selection.primary_level, 1);
    }

    #[test]
    fn cli_parses_solve_flags() {
        let cli = Cli::try_parse_from([
            "ef-trainer",
            "solve",
            "bojan_krkic",
            "--targets",
            "Finishing:85:1",
            "--budget",
            "30",
            "--boost",
            "Speed",
            "--boost",
            "Curl",
        ])
        .expect("valid solve command");
        let Command::Solve(args) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(args.player, "bojan_krkic");
        assert_eq!(args.budget, Some(30));
        assert_eq!(args.selection.boosts.len(), 2);
    }
}
