//! Helpers for deterministic regression tests.

use serde_json::json;
use skirmish_engine::{Battle, BattleRecord, BattleResult, BattleRng, TeamRoster, UnitCatalog, UnitTemplate};

pub use skirmish_engine::DEFAULT_SEED;

pub fn standard_rosters() -> [TeamRoster; 2] {
    [
        TeamRoster::new(
            "Vader's Fist",
            ["Darth Vader", "Emperor Palpatine", "Stormtrooper", "Stormtrooper"],
        ),
        TeamRoster::new(
            "Saw's Renegades",
            ["Saw Gerrera", "Clone Trooper", "Clone Trooper", "Mother Talzin"],
        ),
    ]
}

pub fn run_standard(seed: u64) -> BattleResult<BattleRecord> {
    let mut battle = Battle::new(&standard_rosters(), &UnitCatalog::standard(), Some(500))?;
    Ok(battle.run(&mut BattleRng::new(seed)))
}

/// Float-free digest of a standard battle.
pub fn sample_battle(seed: u64) -> BattleResult<serde_json::Value> {
    Ok(summarize(&run_standard(seed)?))
}

/// Two unarmed droids: nothing can die, so every seed yields the same digest.
pub fn training_duel(seed: u64) -> BattleResult<serde_json::Value> {
    let mut catalog = UnitCatalog::new();
    catalog.insert(UnitTemplate::new("Practice Droid", 3, 5, 1, 0));
    let rosters = [
        TeamRoster::new("Blue", ["Practice Droid"]),
        TeamRoster::new("Gold", ["Practice Droid"]),
    ];
    let mut battle = Battle::new(&rosters, &catalog, Some(5))?;
    Ok(summarize(&battle.run(&mut BattleRng::new(seed))))
}

fn summarize(record: &BattleRecord) -> serde_json::Value {
    let casualties: usize = record.rounds.iter().map(|r| r.casualties.len()).sum();
    let survivors: usize = record.teams.iter().map(|t| t.survivors.len()).sum();
    json!({
        "rounds": record.rounds.len(),
        "winner": record.outcome.winner_name,
        "loser": record.outcome.loser_name,
        "decided_by": record.outcome.decided_by,
        "casualties": casualties,
        "survivors": survivors,
    })
}
