//! Leader abilities and synergies.

use tracing::{debug, info};

use crate::catalog::{LeaderAbility, SynergyEffect, UnitTemplate};
use crate::context::{AttackContext, RevivedUnit, RoundContext};
use crate::rng::BattleRng;
use crate::team::{Side, Team};

/// Fires the start-of-round abilities of every living leader on `team`.
///
/// The set of leaders is fixed before any ability resolves, so a unit
/// revived here does not act until the next round. Returns one narrative
/// line per triggered ability.
pub fn apply_leader_abilities(
    side: Side,
    team: &mut Team,
    enemy: &mut Team,
    context: &mut RoundContext,
    round: u32,
    rng: &mut BattleRng,
) -> Vec<String> {
    let leaders: Vec<(String, LeaderAbility)> = team
        .alive_units()
        .filter_map(|unit| {
            unit.template()
                .leader_ability
                .map(|ability| (unit.name().to_string(), ability))
        })
        .collect();

    let mut lines = Vec::new();
    for (leader, ability) in leaders {
        if !ability.gate().allows(round) {
            continue;
        }
        let line = match ability {
            LeaderAbility::FearAura { accuracy_factor } => {
                context.accuracy_modifier *= accuracy_factor;
                Some(format!(
                    "{leader}'s menacing presence unsettles the enemy, making their shots waver"
                ))
            }
            LeaderAbility::MoraleBreak { enemy_morale_delta } => {
                enemy.apply_morale_change(enemy_morale_delta);
                Some(format!(
                    "{leader} cackles as dark energy fractures enemy resolve"
                ))
            }
            LeaderAbility::TacticalBoost { accuracy_factor } => {
                context.accuracy_modifier *= accuracy_factor;
                Some(format!(
                    "{leader}'s calculated strategies sharpen their troops' aim"
                ))
            }
            LeaderAbility::Revive => revive_fallen(side, team, context, round, rng).map(|raised| {
                format!(
                    "{leader} chants ancient Dathomirian spells, reviving {raised} from death"
                )
            }),
            LeaderAbility::InspiresRebels { morale_delta } => {
                team.apply_morale_change(morale_delta);
                Some(format!(
                    "{leader}'s defiant roar emboldens their troops to fight harder"
                ))
            }
            LeaderAbility::ProtectiveAura { defense } => {
                context.defense_buff += defense;
                Some(format!(
                    "{leader} projects a shimmering aura, shielding nearby allies"
                ))
            }
        };
        if let Some(line) = line {
            info!(
                target: "skirmish_engine.abilities",
                round,
                team = %team.name(),
                leader = %leader,
                ability = ability.key(),
                "leader ability triggered"
            );
            lines.push(line);
        }
    }
    lines
}

fn revive_fallen(
    side: Side,
    team: &mut Team,
    context: &mut RoundContext,
    round: u32,
    rng: &mut BattleRng,
) -> Option<String> {
    let candidates = team.revival_candidates();
    let index = *rng.choose(&candidates)?;
    if !team.revive(index) {
        return None;
    }
    let name = team.unit(index)?.name().to_string();
    context.revived.push(RevivedUnit {
        side,
        index,
        name: name.clone(),
        round,
    });
    Some(name)
}

/// Applies the attacker's synergies for one attack.
///
/// Checked per attack: an ally that died earlier in the round no longer
/// counts.
pub fn apply_synergies(attacker: &UnitTemplate, friendly: &mut Team, context: &mut AttackContext) {
    for synergy in &attacker.synergies {
        if !friendly.has_alive(&synergy.ally) {
            continue;
        }
        for effect in &synergy.effects {
            debug!(
                target: "skirmish_engine.abilities",
                attacker = %attacker.name,
                ally = %synergy.ally,
                effect = effect.key(),
                "synergy active"
            );
            match *effect {
                SynergyEffect::EnemyAccuracyMultiplier(factor) => {
                    context.enemy_accuracy_multiplier *= factor;
                }
                SynergyEffect::MoraleBonus(bonus) => friendly.apply_morale_change(bonus),
            }
        }
    }
}
