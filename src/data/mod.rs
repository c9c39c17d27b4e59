pub mod boosters;
pub mod categories;
pub mod manager;
pub mod players;
pub mod registry;
pub mod validate;

pub use boosters::{
    is_goalkeeping_stat, normalize_booster_name, Booster, BoosterCatalog, BoosterEffect,
    BoosterGroup, BOOSTER_NONE, TOTAL_PACKAGE,
};
pub use categories::{CategoryMap, TrainingCategory};
pub use manager::{ManagerTables, ManagerTier, ThresholdBonus};
pub use players::{builtin_players, ordered_stat_names, PlayerDef, DEFAULT_PLAYER_ID, STAT_ORDER};
pub use registry::GameData;
pub use validate::{validate_game_data, ValidationDiagnostic, ValidationReport, ValidationSeverity};
