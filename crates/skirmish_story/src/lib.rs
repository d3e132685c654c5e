//! Turns battle configs into narrated reports on top of `skirmish_engine`.

pub mod analysis;
pub mod battlefield;
pub mod catalog;
pub mod config;
pub mod report;

pub use analysis::pre_battle_analysis;
pub use battlefield::{pick_preset, presets, Battlefield};
pub use catalog::{load_catalog, CatalogFile, UnitEntry};
pub use config::{discover_configs, BattleConfig, ConfigFormat, TeamConfig, STDIN_PATH};
pub use report::{
    generate_report, title_case, BattleReport, RosterEntry, RosterListing, RoundSection,
    StoryOptions,
};
