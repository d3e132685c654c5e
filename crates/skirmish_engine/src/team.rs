use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::unit::Unit;

pub const BASE_MORALE: f64 = 1.0;
pub const MORALE_FLOOR: f64 = 0.1;
pub const MORALE_CEILING: f64 = 2.0;

/// Which of the two battle slots a team occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// Request to field a team: a display name plus unit names in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub name: String,
    pub units: Vec<String>,
}

impl TeamRoster {
    pub fn new<I, S>(name: impl Into<String>, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            units: units.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Team {
    name: String,
    units: Vec<Unit>,
    morale: f64,
    /// Indices into `units`, in order of death.
    killed: Vec<usize>,
}

impl Team {
    pub fn new(name: impl Into<String>, units: Vec<Unit>) -> Self {
        Self {
            name: name.into(),
            units,
            morale: BASE_MORALE,
            killed: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, index: usize) -> Option<&Unit> {
        self.units.get(index)
    }

    pub(crate) fn unit_mut(&mut self, index: usize) -> Option<&mut Unit> {
        self.units.get_mut(index)
    }

    pub fn morale(&self) -> f64 {
        self.morale
    }

    pub fn total_cost(&self) -> u64 {
        self.units.iter().map(|u| u64::from(u.template().cost)).sum()
    }

    pub fn alive_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_alive())
    }

    pub fn alive_indices(&self) -> Vec<usize> {
        self.units
            .iter()
            .enumerate()
            .filter(|(_, u)| u.is_alive())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn alive_count(&self) -> usize {
        self.alive_units().count()
    }

    pub fn has_alive_units(&self) -> bool {
        self.units.iter().any(Unit::is_alive)
    }

    /// Summed current health of the living.
    pub fn alive_health(&self) -> i64 {
        self.alive_units()
            .map(|u| i64::from(u.current_health()))
            .sum()
    }

    /// Whether at least one living unit of the named type remains.
    pub fn has_alive(&self, unit_name: &str) -> bool {
        self.alive_units().any(|u| u.name() == unit_name)
    }

    pub fn killed_indices(&self) -> &[usize] {
        &self.killed
    }

    /// Units that died this battle and are still down.
    pub fn killed_units(&self) -> impl Iterator<Item = &Unit> {
        self.killed
            .iter()
            .filter_map(|&idx| self.units.get(idx))
            .filter(|u| !u.is_alive())
    }

    pub fn fallen_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| !u.is_alive())
    }

    /// Restores the team to its pre-battle state so it can be replayed.
    pub fn reset(&mut self) {
        for unit in &mut self.units {
            unit.heal_full();
        }
        self.killed.clear();
        self.morale = BASE_MORALE;
    }

    /// Shifts morale by `delta`, clamped to `[MORALE_FLOOR, MORALE_CEILING]`.
    pub fn apply_morale_change(&mut self, delta: f64) {
        let raw = self.morale + delta;
        // NaN saturates high, like `max(floor, min(ceiling, x))`.
        let next = if raw.is_nan() {
            MORALE_CEILING
        } else {
            raw.clamp(MORALE_FLOOR, MORALE_CEILING)
        };
        trace!(target: "skirmish_engine.morale", team = %self.name, delta, morale = next, "morale shifted");
        self.morale = next;
    }

    pub(crate) fn record_kill(&mut self, index: usize) {
        self.killed.push(index);
    }

    /// Candidates a reviver may raise: dead, listed as killed, with a
    /// positive template health.
    pub(crate) fn revival_candidates(&self) -> Vec<usize> {
        self.killed
            .iter()
            .copied()
            .filter(|&idx| {
                self.units
                    .get(idx)
                    .is_some_and(|u| !u.is_alive() && u.template().health > 0)
            })
            .collect()
    }

    /// Revives the unit at `index` and drops it from the killed list.
    pub(crate) fn revive(&mut self, index: usize) -> bool {
        let Some(position) = self.killed.iter().position(|&idx| idx == index) else {
            return false;
        };
        let Some(unit) = self.units.get_mut(index) else {
            return false;
        };
        if unit.is_alive() {
            return false;
        }
        unit.revive();
        self.killed.remove(position);
        true
    }

    pub fn snapshot(&self) -> TeamSnapshot {
        TeamSnapshot {
            name: self.name.clone(),
            morale: self.morale,
            alive_health: self.alive_health(),
            survivors: self.alive_units().map(|u| u.name().to_string()).collect(),
            fallen: self.fallen_units().map(|u| u.name().to_string()).collect(),
        }
    }
}

/// Splits the battle's teams into `(side, opponent)` borrows.
pub(crate) fn split_sides(teams: &mut [Team; 2], side: Side) -> (&mut Team, &mut Team) {
    let [first, second] = teams;
    match side {
        Side::First => (first, second),
        Side::Second => (second, first),
    }
}

/// Serializable view of a team at one point in the battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub name: String,
    pub morale: f64,
    pub alive_health: i64,
    pub survivors: Vec<String>,
    pub fallen: Vec<String>,
}
