use skirmish_regression::{run_standard, sample_battle, DEFAULT_SEED};
use skirmish_story::{generate_report, BattleConfig, ConfigFormat, StoryOptions};
use skirmish_engine::UnitCatalog;

#[test]
fn same_seed_replays_every_line() {
    let baseline = run_standard(DEFAULT_SEED).unwrap();
    let repeat = run_standard(DEFAULT_SEED).unwrap();
    assert_eq!(baseline.rounds, repeat.rounds, "same seed should match");
    assert_eq!(baseline.outcome, repeat.outcome);
}

#[test]
fn seeds_diverge() {
    let baseline = run_standard(DEFAULT_SEED).unwrap();
    let diverged = (0..20)
        .map(|seed| run_standard(seed).unwrap())
        .any(|record| record.rounds != baseline.rounds);
    assert!(diverged, "different seeds should produce different battles");
}

#[test]
fn digest_accounts_for_every_unit() {
    for seed in 0..30 {
        let digest = sample_battle(seed).unwrap();
        assert_eq!(3, digest["rounds"]);
        let survivors = digest["survivors"].as_u64().unwrap();
        assert!(survivors <= 8, "seed {seed}: {digest}");
        assert_ne!(digest["winner"], digest["loser"]);
    }
}

#[test]
fn report_narrative_replays_from_config_seed() {
    let config = BattleConfig::parse(
        r#"
budget = 500
seed = 1977

[[teams]]
name = "Vader's Fist"
units = ["Darth Vader", "Emperor Palpatine", "Stormtrooper", "Stormtrooper"]

[[teams]]
name = "Saw's Renegades"
units = ["Saw Gerrera", "Clone Trooper", "Clone Trooper", "Mother Talzin"]
"#,
        ConfigFormat::Toml,
    )
    .unwrap();
    let catalog = UnitCatalog::standard();
    let a = generate_report(&config, &catalog, &StoryOptions::new("a")).unwrap();
    let b = generate_report(&config, &catalog, &StoryOptions::new("b")).unwrap();
    assert_eq!(1977, a.seed);
    assert_eq!(a.battlefield, b.battlefield);
    assert_eq!(a.rounds, b.rounds);
    assert_eq!(a.final_state, b.final_state);
}
