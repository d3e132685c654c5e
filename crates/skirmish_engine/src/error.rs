//! Setup errors. Nothing fails once a battle is running.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    /// A roster references a name missing from the unit catalog.
    #[error("unknown unit '{name}'; add it to the unit catalog or fix the roster")]
    UnknownUnit { name: String },
    /// A team costs more than the agreed budget.
    #[error("team {team} exceeds the budget (cost {cost} > {budget})")]
    BudgetExceeded { team: String, cost: u64, budget: u32 },
    #[error("exactly two teams must be specified, got {count}")]
    InvalidTeamCount { count: usize },
}

pub type BattleResult<T> = Result<T, BattleError>;
