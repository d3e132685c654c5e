//! Battle setup and the fixed three-round loop.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::abilities::apply_leader_abilities;
use crate::catalog::{UnitCatalog, UnitTemplate};
use crate::combat::simulate_round;
use crate::context::RoundContext;
use crate::error::{BattleError, BattleResult};
use crate::outcome::{resolve_outcome, Outcome};
use crate::rng::BattleRng;
use crate::roster::resolve_templates;
use crate::team::{split_sides, Side, Team, TeamRoster, TeamSnapshot};
use crate::unit::Unit;

pub const ROUNDS: u32 = 3;

/// Everything a single round produced, in narrative order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundLog {
    pub round: u32,
    /// Leader ability lines, first team before second.
    pub abilities: Vec<String>,
    /// Attack lines followed by the round's casualties line.
    pub events: Vec<String>,
    pub casualties: Vec<String>,
    /// Team state once the round's fighting is over.
    pub teams: [TeamSnapshot; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleRecord {
    pub seed: u64,
    pub rounds: Vec<RoundLog>,
    pub outcome: Outcome,
    pub context: RoundContext,
    pub teams: [TeamSnapshot; 2],
}

impl BattleRecord {
    pub fn winner(&self) -> &str {
        &self.outcome.winner_name
    }
}

#[derive(Debug, Clone)]
pub struct Battle {
    teams: [Team; 2],
}

impl Battle {
    /// Validates both rosters and builds the teams.
    ///
    /// Roster names and the budget are checked before any unit is created,
    /// so a rejected battle leaves nothing half-built.
    pub fn new(
        rosters: &[TeamRoster],
        catalog: &UnitCatalog,
        budget: Option<u32>,
    ) -> BattleResult<Self> {
        if rosters.len() != 2 {
            return Err(BattleError::InvalidTeamCount {
                count: rosters.len(),
            });
        }
        let resolved = rosters
            .iter()
            .map(|roster| resolve_templates(&roster.units, catalog))
            .collect::<BattleResult<Vec<_>>>()?;

        if let Some(budget) = budget {
            for (roster, templates) in rosters.iter().zip(&resolved) {
                check_budget(&roster.name, roster_cost(templates), budget)?;
            }
        }

        let teams: Vec<Team> = rosters
            .iter()
            .zip(resolved)
            .map(|(roster, templates)| {
                Team::new(
                    roster.name.clone(),
                    templates.into_iter().map(Unit::new).collect(),
                )
            })
            .collect();
        let teams = <[Team; 2]>::try_from(teams).map_err(|teams| BattleError::InvalidTeamCount {
            count: teams.len(),
        })?;
        info!(
            target: "skirmish_engine.battle",
            first = %teams[0].name(),
            second = %teams[1].name(),
            first_cost = teams[0].total_cost(),
            second_cost = teams[1].total_cost(),
            "battle assembled"
        );
        Ok(Self { teams })
    }

    /// Wraps teams that were built elsewhere, applying the same budget rule.
    pub fn from_teams(first: Team, second: Team, budget: Option<u32>) -> BattleResult<Self> {
        if let Some(budget) = budget {
            for team in [&first, &second] {
                check_budget(team.name(), team.total_cost(), budget)?;
            }
        }
        Ok(Self {
            teams: [first, second],
        })
    }

    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side.index()]
    }

    pub fn into_teams(self) -> [Team; 2] {
        self.teams
    }

    /// Resets both teams and fights exactly [`ROUNDS`] rounds.
    ///
    /// Rounds keep counting even after one side is wiped out; their attack
    /// phase is simply empty.
    pub fn run(&mut self, rng: &mut BattleRng) -> BattleRecord {
        for team in &mut self.teams {
            team.reset();
        }
        let mut context = RoundContext::default();
        let mut rounds = Vec::new();

        for round in 1..=ROUNDS {
            let mut abilities = Vec::new();
            for side in Side::BOTH {
                let (team, enemy) = split_sides(&mut self.teams, side);
                abilities.extend(apply_leader_abilities(
                    side,
                    team,
                    enemy,
                    &mut context,
                    round,
                    rng,
                ));
            }
            let events = simulate_round(&mut self.teams, &context, round, rng);
            rounds.push(RoundLog {
                round,
                abilities,
                events: events.lines,
                casualties: events.casualties,
                teams: self.snapshot(),
            });
        }

        let outcome = resolve_outcome(&self.teams);
        info!(
            target: "skirmish_engine.battle",
            seed = rng.seed(),
            winner = %outcome.winner_name,
            decided_by = ?outcome.decided_by,
            "battle decided"
        );
        BattleRecord {
            seed: rng.seed(),
            rounds,
            outcome,
            context,
            teams: self.snapshot(),
        }
    }

    fn snapshot(&self) -> [TeamSnapshot; 2] {
        [self.teams[0].snapshot(), self.teams[1].snapshot()]
    }
}

fn roster_cost(templates: &[Arc<UnitTemplate>]) -> u64 {
    templates.iter().map(|t| u64::from(t.cost)).sum()
}

fn check_budget(team: &str, cost: u64, budget: u32) -> BattleResult<()> {
    if cost > u64::from(budget) {
        return Err(BattleError::BudgetExceeded {
            team: team.to_string(),
            cost,
            budget,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rosters(first: &[&str], second: &[&str]) -> Vec<TeamRoster> {
        vec![
            TeamRoster::new("Vader's Fist", first.iter().copied()),
            TeamRoster::new("Saw's Renegades", second.iter().copied()),
        ]
    }

    #[test]
    fn requires_exactly_two_teams() {
        let catalog = UnitCatalog::standard();
        let one = vec![TeamRoster::new("Solo", ["Jedi"])];
        assert_eq!(
            BattleError::InvalidTeamCount { count: 1 },
            Battle::new(&one, &catalog, None).unwrap_err()
        );
    }

    #[test]
    fn budget_names_the_offending_team() {
        let catalog = UnitCatalog::standard();
        let err = Battle::new(
            &rosters(&["Stormtrooper"], &["Stormtrooper", "Stormtrooper"]),
            &catalog,
            Some(50),
        )
        .unwrap_err();
        assert_eq!(
            BattleError::BudgetExceeded {
                team: "Saw's Renegades".into(),
                cost: 80,
                budget: 50,
            },
            err
        );
    }

    #[test]
    fn huge_costs_do_not_wrap_past_the_budget() {
        let mut catalog = UnitCatalog::standard();
        catalog.insert(UnitTemplate::new("Star Destroyer", 1, 2_147_483_648, 100, 50));
        let err = Battle::new(
            &rosters(&["Stormtrooper"], &["Star Destroyer", "Star Destroyer"]),
            &catalog,
            Some(100),
        )
        .unwrap_err();
        assert_eq!(
            BattleError::BudgetExceeded {
                team: "Saw's Renegades".into(),
                cost: 4_294_967_296,
                budget: 100,
            },
            err
        );
    }

    #[test]
    fn unknown_unit_wins_over_budget() {
        let catalog = UnitCatalog::standard();
        let err = Battle::new(
            &rosters(&["Darth Vader", "Darth Vader"], &["Boba Fett"]),
            &catalog,
            Some(10),
        )
        .unwrap_err();
        assert_eq!(
            BattleError::UnknownUnit {
                name: "Boba Fett".into()
            },
            err
        );
    }

    #[test]
    fn from_teams_checks_budget() {
        let catalog = UnitCatalog::standard();
        let cheap = Team::new(
            "Cheap",
            crate::roster::instantiate(&["Stormtrooper"], &catalog).unwrap(),
        );
        let pricey = Team::new(
            "Pricey",
            crate::roster::instantiate(&["Emperor Palpatine"], &catalog).unwrap(),
        );
        let err = Battle::from_teams(cheap, pricey, Some(100)).unwrap_err();
        assert!(matches!(err, BattleError::BudgetExceeded { ref team, .. } if team == "Pricey"));
    }

    #[test]
    fn always_fights_three_rounds() {
        let mut catalog = UnitCatalog::standard();
        catalog.insert(UnitTemplate::new("Titan", 1, 10, 10_000, 10_000));
        let mut battle =
            Battle::new(&rosters(&["Titan"], &["Stormtrooper"]), &catalog, None).unwrap();
        let record = battle.run(&mut BattleRng::new(4));
        assert_eq!(ROUNDS as usize, record.rounds.len());
        assert_eq!(vec![1, 2, 3], record.rounds.iter().map(|r| r.round).collect::<Vec<_>>());
    }

    #[test]
    fn harmless_duel_still_has_a_winner() {
        let mut catalog = UnitCatalog::new();
        catalog.insert(UnitTemplate::new("Training Droid", 3, 1, 1, 0));
        let mut battle = Battle::new(
            &rosters(&["Training Droid"], &["Training Droid"]),
            &catalog,
            None,
        )
        .unwrap();
        let record = battle.run(&mut BattleRng::new(99));
        assert!(battle.teams().iter().all(|t| t.alive_count() == 1));
        assert_eq!(Side::First, record.outcome.winner);
        assert_eq!("Vader's Fist", record.winner());
    }

    #[test]
    fn same_seed_replays_identically() {
        let catalog = UnitCatalog::standard();
        let setup = rosters(
            &["Darth Vader", "Emperor Palpatine", "Stormtrooper", "Stormtrooper"],
            &["Saw Gerrera", "Clone Trooper", "Clone Trooper", "Mother Talzin"],
        );
        let mut first = Battle::new(&setup, &catalog, Some(500)).unwrap();
        let mut second = first.clone();
        let a = first.run(&mut BattleRng::new(2024));
        let b = second.run(&mut BattleRng::new(2024));
        assert_eq!(a, b);
        // Replaying the same battle object resets it first.
        let c = first.run(&mut BattleRng::new(2024));
        assert_eq!(a, c);
    }

    #[test]
    fn invariants_hold_across_many_seeds() {
        let catalog = UnitCatalog::standard();
        let setup = rosters(
            &["Darth Vader", "Stormtrooper", "Stormtrooper", "Grand Admiral Thrawn"],
            &["Mother Talzin", "Jedi", "Clone Trooper", "Wookiee Warrior"],
        );
        for seed in 0..200 {
            let mut battle = Battle::new(&setup, &catalog, None).unwrap();
            let record = battle.run(&mut BattleRng::new(seed));
            assert_eq!(3, record.rounds.len());
            for team in battle.teams() {
                assert!((0.1..=2.0).contains(&team.morale()));
                for unit in team.units() {
                    assert_eq!(unit.is_alive(), unit.current_health() > 0);
                    assert!(unit.current_health() <= unit.template().health);
                }
                for &idx in team.killed_indices() {
                    assert!(!team.units()[idx].is_alive());
                }
            }
            for revived in &record.context.revived {
                assert!(revived.round >= 2);
                assert_eq!(Side::Second, revived.side);
            }
            let (winner, _) =
                crate::outcome::determine_winner(&battle.teams()[0], &battle.teams()[1]);
            assert_eq!(winner, record.outcome.winner);
        }
    }
}
