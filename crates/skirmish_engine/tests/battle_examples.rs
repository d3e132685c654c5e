use skirmish_engine::{
    instantiate, Battle, BattleError, BattleRng, Side, Team, TeamRoster, Tiebreak, UnitCatalog,
    UnitTemplate,
};

fn roster(name: &str, units: &[&str]) -> TeamRoster {
    TeamRoster::new(name, units.iter().copied())
}

#[test]
fn second_team_over_budget_is_named() {
    let catalog = UnitCatalog::standard();
    let rosters = [
        roster("Patrol", &["Stormtrooper"]),
        roster("Squad", &["Stormtrooper", "Stormtrooper"]),
    ];
    match Battle::new(&rosters, &catalog, Some(50)) {
        Err(BattleError::BudgetExceeded { team, cost, budget }) => {
            assert_eq!("Squad", team);
            assert_eq!(80, cost);
            assert_eq!(50, budget);
        }
        other => panic!("expected budget error, got {other:?}"),
    }
}

#[test]
fn boba_fett_is_not_in_the_catalog() {
    let catalog = UnitCatalog::standard();
    let err = instantiate(&["Boba Fett"], &catalog).unwrap_err();
    assert_eq!(
        BattleError::UnknownUnit {
            name: "Boba Fett".to_string()
        },
        err
    );
    assert_eq!(
        "unknown unit 'Boba Fett'; add it to the unit catalog or fix the roster",
        err.to_string()
    );
}

#[test]
fn three_teams_are_rejected() {
    let catalog = UnitCatalog::standard();
    let rosters = [
        roster("A", &["Jedi"]),
        roster("B", &["Jedi"]),
        roster("C", &["Jedi"]),
    ];
    assert!(matches!(
        Battle::new(&rosters, &catalog, None),
        Err(BattleError::InvalidTeamCount { count: 3 })
    ));
}

#[test]
fn harmless_units_resolve_by_tiebreak() {
    let mut catalog = UnitCatalog::new();
    catalog.insert(UnitTemplate::new("Practice Droid", 3, 5, 1, 0));
    let rosters = [
        roster("Blue", &["Practice Droid"]),
        roster("Gold", &["Practice Droid"]),
    ];
    for seed in 0..25 {
        let mut battle = Battle::new(&rosters, &catalog, Some(5)).unwrap();
        let record = battle.run(&mut BattleRng::new(seed));
        assert_eq!(3, record.rounds.len());
        assert_eq!(Side::First, record.outcome.winner);
        assert_eq!(Tiebreak::RemainingHealth, record.outcome.decided_by);
        assert!(record.teams.iter().all(|t| t.survivors.len() == 1));
        assert!(record.rounds.iter().all(|r| r.casualties.is_empty()));
        assert!(record
            .rounds
            .iter()
            .all(|r| r.events.last().map(String::as_str) == Some("No casualties this round.")));
    }
}

#[test]
fn teams_can_be_replayed_after_reset() {
    let catalog = UnitCatalog::standard();
    let first = Team::new(
        "Vader's Fist",
        instantiate(
            &["Darth Vader", "Emperor Palpatine", "Stormtrooper", "Stormtrooper"],
            &catalog,
        )
        .unwrap(),
    );
    let second = Team::new(
        "Saw's Renegades",
        instantiate(
            &["Saw Gerrera", "Clone Trooper", "Clone Trooper", "Mother Talzin"],
            &catalog,
        )
        .unwrap(),
    );
    let mut battle = Battle::from_teams(first, second, Some(500)).unwrap();
    battle.run(&mut BattleRng::new(8));

    let [mut first, mut second] = battle.into_teams();
    for team in [&mut first, &mut second] {
        team.reset();
        assert_eq!(1.0, team.morale());
        assert!(team.killed_indices().is_empty());
        assert!(team
            .units()
            .iter()
            .all(|u| u.is_alive() && u.current_health() == u.template().health));
    }
}

#[test]
fn round_snapshots_track_the_fighting() {
    let catalog = UnitCatalog::standard();
    let rosters = [
        roster("Empire", &["Darth Vader", "Stormtrooper", "Stormtrooper"]),
        roster("Republic", &["Jedi", "Clone Trooper", "Clone Trooper"]),
    ];
    let mut battle = Battle::new(&rosters, &catalog, None).unwrap();
    let record = battle.run(&mut BattleRng::new(77));

    let opening = &record.rounds[0];
    assert_eq!(2, opening.abilities.len(), "fear aura and protective aura");
    assert_eq!(5, record.context.defense_buff);
    for round in &record.rounds {
        for snapshot in &round.teams {
            assert_eq!(3, snapshot.survivors.len() + snapshot.fallen.len());
            assert!((0.1..=2.0).contains(&snapshot.morale));
        }
    }
    assert_eq!(record.teams, record.rounds[2].teams);
}
