//! Battle-resolution engine: rosters in, three rounds of seeded combat,
//! a winner out.

pub mod abilities;
pub mod battle;
pub mod catalog;
pub mod combat;
pub mod context;
pub mod error;
pub mod outcome;
pub mod rng;
pub mod roster;
pub mod team;
pub mod unit;

pub use battle::{Battle, BattleRecord, RoundLog, ROUNDS};
pub use catalog::{
    LeaderAbility, Role, RoundGate, Synergy, SynergyEffect, UnitCatalog, UnitTemplate,
};
pub use combat::{summarize_counts, AttackOutcome};
pub use context::{AttackContext, RevivedUnit, RoundContext};
pub use error::{BattleError, BattleResult};
pub use outcome::{determine_winner, Outcome, Tiebreak};
pub use rng::{BattleRng, DEFAULT_SEED};
pub use roster::instantiate;
pub use team::{Side, Team, TeamRoster, TeamSnapshot};
pub use unit::Unit;
