use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::players::DEFAULT_PLAYER_ID;
use crate::data::registry::GameData;
use crate::data::{BoosterGroup, PlayerDef};
use crate::error::{PresetError, RequestError};
use crate::optimizer::{compare_builds, solve_for_player, Build};
use crate::parallel::{solve_batch, SolveRequest, WorkerPool};
use crate::presets::PresetStore;
use crate::training::{
    adjust_level, budget_status, compute_stats, stat_breakdown, Allocation, ModifierSelection,
    StatLine, TargetSet,
};

/// Everything a handler needs; built once at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub data: Arc<GameData>,
    pub presets: PresetStore,
    pub pool: WorkerPool,
}

impl AppState {
    pub fn new(data: Arc<GameData>, presets: PresetStore, pool: WorkerPool) -> Self {
        Self {
            data,
            presets,
            pool,
        }
    }

    fn player(&self, id: Option<&str>) -> Result<&PlayerDef, RequestError> {
        let id = id.unwrap_or(DEFAULT_PLAYER_ID);
        self.data
            .player(id)
            .ok_or_else(|| RequestError::UnknownPlayer(id.to_string()))
    }

    /// Explicit base stats win over a player lookup.
    fn base_stats(
        &self,
        player: Option<&str>,
        base: Option<StatLine>,
    ) -> Result<StatLine, RequestError> {
        match base {
            Some(base) => Ok(base),
            None => Ok(self.player(player)?.initial_stats.clone()),
        }
    }
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "ef-trainer-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerListItem {
    pub id: String,
    pub name: String,
    pub team: String,
    pub position: String,
    pub total_points: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_booster: Option<String>,
}

pub fn players_payload(state: &AppState) -> Result<String, serde_json::Error> {
    let list: Vec<PlayerListItem> = state
        .data
        .players
        .iter()
        .map(|p| PlayerListItem {
            id: p.id.clone(),
            name: p.name.clone(),
            team: p.team.clone(),
            position: p.position.clone(),
            total_points: p.total_points,
            fixed_booster: p.fixed_booster.clone(),
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "players": list }))
}

pub fn catalog_payload(state: &AppState) -> Result<String, serde_json::Error> {
    let boosters = &state.data.boosters;
    let groups: BTreeMap<&str, Vec<&str>> = [
        BoosterGroup::Universal,
        BoosterGroup::Attack,
        BoosterGroup::Defense,
        BoosterGroup::Goalkeeping,
        BoosterGroup::Unique,
        BoosterGroup::Conditional,
    ]
    .into_iter()
    .map(|group| {
        (
            group.as_str(),
            boosters.in_group(group).map(|b| b.name.as_str()).collect(),
        )
    })
    .collect();

    serde_json::to_string_pretty(&serde_json::json!({
        "categories": state.data.categories,
        "trainable_stats": state.data.categories.trainable_stats(),
        "boosters": boosters,
        "booster_groups": groups,
        "manager_tiers": state.data.managers,
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsRequest {
    pub player: Option<String>,
    pub base: Option<StatLine>,
    #[serde(default)]
    pub allocation: Allocation,
    #[serde(default)]
    pub selection: ModifierSelection,
    pub budget: Option<i64>,
}

pub fn stats_payload(state: &AppState, body: &str) -> Result<String, RequestError> {
    let request: StatsRequest = serde_json::from_str(body)?;
    let budget = match request.budget {
        Some(budget) => budget,
        None if request.base.is_some() => 0,
        None => state.player(request.player.as_deref())?.total_points,
    };
    let base = state.base_stats(request.player.as_deref(), request.base)?;
    let data = &state.data;

    let payload = serde_json::json!({
        "stats": compute_stats(data, &base, &request.allocation, &request.selection),
        "breakdown": stat_breakdown(data, &base, &request.allocation, &request.selection),
        "budget": budget_status(&request.allocation, budget),
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

#[derive(Debug, Clone, Deserialize)]
pub struct CostRequest {
    #[serde(default)]
    pub allocation: Allocation,
    #[serde(default)]
    pub budget: i64,
}

pub fn cost_payload(body: &str) -> Result<String, RequestError> {
    let request: CostRequest = serde_json::from_str(body)?;
    Ok(serde_json::to_string_pretty(&budget_status(
        &request.allocation,
        request.budget,
    ))?)
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdjustRequest {
    #[serde(default)]
    pub allocation: Allocation,
    pub category: String,
    pub delta: i32,
    pub budget: i64,
}

pub fn adjust_payload(body: &str) -> Result<String, RequestError> {
    let request: AdjustRequest = serde_json::from_str(body)?;
    let allocation = adjust_level(
        &request.allocation,
        &request.category,
        request.delta,
        request.budget,
    )?;
    let payload = serde_json::json!({
        "budget": budget_status(&allocation, request.budget),
        "allocation": allocation,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolveApiRequest {
    pub player: Option<String>,
    /// Defaults to the player's own booster at +1.
    pub selection: Option<ModifierSelection>,
    pub targets: TargetSet,
    /// Defaults to the player's total points.
    pub budget: Option<i64>,
}

pub fn solve_payload(state: &AppState, body: &str) -> Result<String, RequestError> {
    let request: SolveApiRequest = serde_json::from_str(body)?;
    let player = state.player(request.player.as_deref())?;
    let selection = request
        .selection
        .unwrap_or_else(|| player.default_selection());
    let budget = request.budget.unwrap_or(player.total_points);

    let report = solve_for_player(&state.data, player, &selection, &request.targets, budget);
    let payload = serde_json::json!({
        "player": player.id,
        "report": report,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolveAllRequest {
    pub targets: TargetSet,
    pub selection: Option<ModifierSelection>,
}

/// Same targets against every catalog player, each on its own budget.
pub fn solve_all_payload(state: &AppState, body: &str) -> Result<String, RequestError> {
    let request: SolveAllRequest = serde_json::from_str(body)?;
    let players = &state.data.players;
    let requests: Vec<SolveRequest> = players
        .iter()
        .map(|player| SolveRequest {
            base: player.initial_stats.clone(),
            selection: request
                .selection
                .clone()
                .unwrap_or_else(|| player.default_selection()),
            targets: request.targets.clone(),
            budget: player.total_points,
        })
        .collect();

    let reports = solve_batch(&state.data, &requests, &state.pool);
    let results: Vec<serde_json::Value> = players
        .iter()
        .zip(reports)
        .map(|(player, report)| {
            serde_json::json!({
                "player": player.id,
                "satisfied": report.satisfied_count(),
                "report": report,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&serde_json::json!({ "results": results }))?)
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildSpec {
    pub player: Option<String>,
    #[serde(default)]
    pub allocation: Allocation,
    pub selection: Option<ModifierSelection>,
    pub budget: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompareRequest {
    pub a: BuildSpec,
    pub b: BuildSpec,
}

fn resolve_build(state: &AppState, spec: BuildSpec) -> Result<Build, RequestError> {
    let player = state.player(spec.player.as_deref())?;
    Ok(Build {
        base: player.initial_stats.clone(),
        allocation: spec.allocation,
        selection: spec
            .selection
            .unwrap_or_else(|| player.default_selection()),
        budget: spec.budget.unwrap_or(player.total_points),
    })
}

pub fn compare_payload(state: &AppState, body: &str) -> Result<String, RequestError> {
    let request: CompareRequest = serde_json::from_str(body)?;
    let a = resolve_build(state, request.a)?;
    let b = resolve_build(state, request.b)?;
    Ok(serde_json::to_string_pretty(&compare_builds(&state.data, &a, &b))?)
}

pub fn presets_list_payload(state: &AppState) -> Result<String, PresetError> {
    let list = state.presets.list()?;
    Ok(serde_json::to_string_pretty(&serde_json::json!({ "presets": list }))?)
}

pub fn preset_get_payload(state: &AppState, id: &str) -> Result<String, PresetError> {
    let preset = state.presets.get(id)?;
    Ok(serde_json::to_string_pretty(&preset)?)
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresetPostRequest {
    pub name: String,
    #[serde(default)]
    pub targets: TargetSet,
}

pub fn preset_post_payload(state: &AppState, body: &str) -> Result<String, PresetError> {
    let request: PresetPostRequest = serde_json::from_str(body)?;
    let preset = state.presets.save(&request.name, &request.targets)?;
    Ok(serde_json::to_string_pretty(&preset)?)
}

pub fn preset_delete_payload(state: &AppState, id: &str) -> Result<String, PresetError> {
    state.presets.delete(id)?;
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "status": "deleted",
        "id": id,
    }))?)
}
