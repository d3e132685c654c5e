use serde::{Deserialize, Serialize};

use crate::team::Side;

/// Modifiers shared by every round of one battle.
///
/// Leader abilities write here at the start of a round; attacks read the
/// accuracy modifier. `defense_buff` accumulates but nothing consumes it
/// yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundContext {
    pub accuracy_modifier: f64,
    pub defense_buff: i32,
    pub revived: Vec<RevivedUnit>,
}

impl Default for RoundContext {
    fn default() -> Self {
        Self {
            accuracy_modifier: 1.0,
            defense_buff: 0,
            revived: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevivedUnit {
    pub side: Side,
    pub index: usize,
    pub name: String,
    pub round: u32,
}

/// Built fresh for every attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackContext {
    pub attacker_morale: f64,
    pub accuracy_modifier: f64,
    /// Compounded by synergies; recorded for the narrative layer only.
    pub enemy_accuracy_multiplier: f64,
}

impl AttackContext {
    pub fn new(attacker_morale: f64, round: &RoundContext) -> Self {
        Self {
            attacker_morale,
            accuracy_modifier: round.accuracy_modifier,
            enemy_accuracy_multiplier: 1.0,
        }
    }
}

impl Default for AttackContext {
    fn default() -> Self {
        Self::new(1.0, &RoundContext::default())
    }
}
