use serde::{Deserialize, Serialize};

use crate::team::{Side, Team};

/// Which comparison settled the battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tiebreak {
    Survivors,
    RemainingHealth,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Side,
    pub winner_name: String,
    pub loser_name: String,
    pub decided_by: Tiebreak,
}

/// More survivors wins; otherwise more remaining health, with the first
/// team taking exact ties.
pub fn determine_winner(first: &Team, second: &Team) -> (Side, Tiebreak) {
    let first_alive = first.alive_count();
    let second_alive = second.alive_count();
    if first_alive != second_alive {
        let side = if first_alive > second_alive {
            Side::First
        } else {
            Side::Second
        };
        return (side, Tiebreak::Survivors);
    }
    let side = if first.alive_health() >= second.alive_health() {
        Side::First
    } else {
        Side::Second
    };
    (side, Tiebreak::RemainingHealth)
}

pub fn resolve_outcome(teams: &[Team; 2]) -> Outcome {
    let (winner, decided_by) = determine_winner(&teams[0], &teams[1]);
    Outcome {
        winner,
        winner_name: teams[winner.index()].name().to_string(),
        loser_name: teams[winner.opponent().index()].name().to_string(),
        decided_by,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::UnitTemplate;
    use crate::unit::Unit;

    fn team(name: &str, healths: &[i32]) -> Team {
        let units = healths
            .iter()
            .map(|&hp| Unit::new(Arc::new(UnitTemplate::new("Grunt", 3, 5, hp.max(1), 1))))
            .collect();
        let mut team = Team::new(name, units);
        for (idx, &hp) in healths.iter().enumerate() {
            if hp <= 0 {
                team.unit_mut(idx).unwrap().take_damage(1);
            }
        }
        team
    }

    #[test]
    fn more_survivors_wins() {
        let a = team("A", &[1, 0]);
        let b = team("B", &[1, 1]);
        assert_eq!((Side::Second, Tiebreak::Survivors), determine_winner(&a, &b));
        assert_eq!((Side::First, Tiebreak::Survivors), determine_winner(&b, &a));
    }

    #[test]
    fn health_breaks_equal_survivor_counts() {
        let a = team("A", &[10]);
        let b = team("B", &[30]);
        assert_eq!(
            (Side::Second, Tiebreak::RemainingHealth),
            determine_winner(&a, &b)
        );
    }

    #[test]
    fn exact_tie_goes_to_first_team() {
        let a = team("A", &[7, 0]);
        let b = team("B", &[0, 7]);
        assert_eq!(
            (Side::First, Tiebreak::RemainingHealth),
            determine_winner(&a, &b)
        );
        assert_eq!(
            (Side::First, Tiebreak::RemainingHealth),
            determine_winner(&b, &a)
        );

        let wiped = [team("A", &[0]), team("B", &[0])];
        let outcome = resolve_outcome(&wiped);
        assert_eq!("A", outcome.winner_name);
        assert_eq!("B", outcome.loser_name);
    }
}
