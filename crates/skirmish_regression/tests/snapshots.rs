use skirmish_regression::{training_duel, DEFAULT_SEED};

#[test]
fn training_duel_digest() {
    let digest = training_duel(DEFAULT_SEED).unwrap();
    insta::assert_json_snapshot!(digest, @r###"
    {
      "casualties": 0,
      "decided_by": "remaining_health",
      "loser": "Gold",
      "rounds": 3,
      "survivors": 2,
      "winner": "Blue"
    }
    "###);
}

#[test]
fn training_duel_ignores_seed() {
    let baseline = training_duel(DEFAULT_SEED).unwrap();
    for seed in [0, 7, 1977] {
        assert_eq!(baseline, training_duel(seed).unwrap());
    }
}
