//! Attack resolution and the round loop.

use tracing::{debug, info};

use crate::abilities::apply_synergies;
use crate::catalog::{Role, UnitTemplate};
use crate::context::{AttackContext, RoundContext};
use crate::rng::BattleRng;
use crate::team::{split_sides, Side, Team};
use crate::unit::Unit;

const BASE_HIT_CHANCE: f64 = 0.6;
const HIT_CHANCE_PER_DAMAGE: f64 = 0.1 / 30.0;
const MIN_HIT_CHANCE: f64 = 0.10;
const MAX_HIT_CHANCE: f64 = 0.95;
const MORALE_DAMAGE_WEIGHT: f64 = 0.2;

const LEADER_LOSS_MORALE: f64 = -0.3;
const TROOPER_LOSS_MORALE: f64 = -0.05;
const PRESSURE_MORALE: f64 = 0.02;

pub const LETHAL_PHRASES: [&str; 5] = [
    "carving through armour, blood spraying into the mud",
    "searing flesh and leaving smoking armour plates",
    "splitting bone and sinew with a wet crack",
    "sending limbs flying in a shower of sparks and gore",
    "driving a blade cleanly through the heart with a hiss of steam",
];

pub const WOUND_PHRASES: [&str; 5] = [
    "leaving a smoking gash",
    "ripping open armour and drawing blood",
    "searing through flesh and eliciting a scream",
    "blasting a chunk of armour away",
    "carving a deep wound that sprays crimson",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackOutcome {
    pub hit: bool,
    pub killed: bool,
    pub damage: i32,
    pub description: String,
}

/// Hit probability after the accuracy modifier, clamped to `[0.10, 0.95]`.
pub fn hit_chance(attacker: &UnitTemplate, context: &AttackContext) -> f64 {
    let base = BASE_HIT_CHANCE + HIT_CHANCE_PER_DAMAGE * f64::from(attacker.damage);
    (base * context.accuracy_modifier).clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

/// Damage dealt on a hit, scaled by the attacking team's morale.
pub fn attack_damage(attacker: &UnitTemplate, morale: f64) -> i32 {
    let multiplier = 1.0 + MORALE_DAMAGE_WEIGHT * (morale - 1.0);
    (f64::from(attacker.damage) * multiplier).floor() as i32
}

pub fn resolve_attack(
    attacker: &UnitTemplate,
    defender: &mut Unit,
    context: &AttackContext,
    rng: &mut BattleRng,
) -> AttackOutcome {
    let chance = hit_chance(attacker, context);
    let roll = rng.roll();
    if roll >= chance {
        return AttackOutcome {
            hit: false,
            killed: false,
            damage: 0,
            description: format!(
                "{} fires at {} but the shot goes wide",
                attacker.name,
                defender.name()
            ),
        };
    }

    let damage = attack_damage(attacker, context.attacker_morale);
    let killed = defender.take_damage(damage);
    let description = if killed {
        let phrase = rng.choose(&LETHAL_PHRASES).copied().unwrap_or_default();
        format!("{} strikes down {}, {phrase}", attacker.name, defender.name())
    } else {
        let phrase = rng.choose(&WOUND_PHRASES).copied().unwrap_or_default();
        format!("{} hits {}, {phrase}", attacker.name, defender.name())
    };
    debug!(
        target: "skirmish_engine.combat",
        attacker = %attacker.name,
        defender = %defender.name(),
        chance,
        roll,
        damage,
        killed,
        "attack landed"
    );
    AttackOutcome {
        hit: true,
        killed,
        damage,
        description,
    }
}

/// What happened during one round's exchange of fire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundEvents {
    /// Attack results, shockwave lines and the closing casualties line.
    pub lines: Vec<String>,
    /// Names of units killed this round, in order.
    pub casualties: Vec<String>,
    /// Number of attacks actually resolved.
    pub actions: usize,
}

/// Every living unit acts once, in a freshly shuffled order.
///
/// A unit killed before its turn is skipped. Once one side has nobody left
/// standing the rest of the round is dropped.
pub fn simulate_round(
    teams: &mut [Team; 2],
    context: &RoundContext,
    round: u32,
    rng: &mut BattleRng,
) -> RoundEvents {
    let mut order: Vec<(Side, usize)> = Side::BOTH
        .iter()
        .flat_map(|&side| {
            teams[side.index()]
                .alive_indices()
                .into_iter()
                .map(move |idx| (side, idx))
        })
        .collect();
    rng.shuffle(&mut order);

    let mut events = RoundEvents::default();
    for (side, idx) in order {
        let (friendly, enemy) = split_sides(teams, side);
        let Some(template) = friendly
            .unit(idx)
            .filter(|unit| unit.is_alive())
            .map(|unit| unit.template().clone())
        else {
            continue;
        };
        if !enemy.has_alive_units() {
            debug!(target: "skirmish_engine.combat", round, team = %enemy.name(), "no defenders left");
            break;
        }
        let targets = enemy.alive_indices();
        let Some(&target) = rng.choose(&targets) else {
            break;
        };

        let mut attack = AttackContext::new(friendly.morale(), context);
        apply_synergies(&template, friendly, &mut attack);
        let Some(defender) = enemy.unit_mut(target) else {
            continue;
        };
        let outcome = resolve_attack(&template, defender, &attack, rng);
        let defender_role = defender.role();
        let defender_name = defender.name().to_string();
        events.actions += 1;
        events.lines.push(outcome.description);

        if outcome.killed {
            enemy.record_kill(target);
            match defender_role {
                Role::Leader => {
                    enemy.apply_morale_change(LEADER_LOSS_MORALE);
                    events.lines.push(format!(
                        "The death of {defender_name} sends shockwaves through {}'s ranks",
                        enemy.name()
                    ));
                }
                Role::Trooper => enemy.apply_morale_change(TROOPER_LOSS_MORALE),
            }
            events.casualties.push(defender_name);
        } else {
            friendly.apply_morale_change(PRESSURE_MORALE);
        }
    }

    let summary = summarize_counts(events.casualties.iter().map(String::as_str));
    events.lines.push(match summary {
        Some(summary) => format!("Casualties this round: {summary}"),
        None => "No casualties this round.".to_string(),
    });
    info!(
        target: "skirmish_engine.combat",
        round,
        actions = events.actions,
        casualties = events.casualties.len(),
        "round resolved"
    );
    events
}

/// Formats names as `"N× Name"` counts in first-seen order.
pub fn summarize_counts<'a, I>(names: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for name in names {
        match counts.iter_mut().find(|(seen, _)| *seen == name) {
            Some((_, count)) => *count += 1,
            None => counts.push((name, 1)),
        }
    }
    if counts.is_empty() {
        return None;
    }
    Some(
        counts
            .iter()
            .map(|(name, count)| format!("{count}× {name}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}
