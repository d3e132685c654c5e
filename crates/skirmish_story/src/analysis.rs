//! Pre-battle read of each roster's strengths and weaknesses.

use skirmish_engine::{LeaderAbility, Role, Team};

pub fn pre_battle_analysis(team: &Team) -> String {
    let mut strengths: Vec<String> = Vec::new();
    let mut weaknesses: Vec<String> = Vec::new();

    for unit in team.alive_units() {
        if unit.role() != Role::Leader {
            continue;
        }
        if let Some(ability) = unit.template().leader_ability {
            strengths.push(leader_strength(ability).to_string());
        }
    }

    let troopers = team
        .alive_units()
        .filter(|u| u.role() == Role::Trooper)
        .count();
    if troopers > 0 {
        strengths.push(format!(
            "a cadre of {troopers} troopers providing steady fire support"
        ));
    }

    let has_leader = team.alive_units().any(|u| u.role() == Role::Leader);
    if has_leader && troopers <= 2 {
        weaknesses.push("over‑reliance on a few powerful leaders".to_string());
    }
    if troopers > 4 {
        weaknesses.push("limited heavy support for so many troops".to_string());
    }

    dedup_in_order(&mut strengths);
    dedup_in_order(&mut weaknesses);
    let strengths = if strengths.is_empty() {
        "unknown strengths".to_string()
    } else {
        strengths.join("; ")
    };
    let weaknesses = if weaknesses.is_empty() {
        "few obvious weaknesses".to_string()
    } else {
        weaknesses.join("; ")
    };
    format!(
        "{} enters the fray with {strengths}. However, they may suffer from {weaknesses}.",
        team.name()
    )
}

fn leader_strength(ability: LeaderAbility) -> &'static str {
    match ability {
        LeaderAbility::FearAura { .. } | LeaderAbility::MoraleBreak { .. } => {
            "terrifying Force abilities and crowd control"
        }
        LeaderAbility::TacticalBoost { .. } => "keen strategic insight and coordination",
        LeaderAbility::Revive => "dark magic and the power to raise the dead",
        LeaderAbility::InspiresRebels { .. } => "guerrilla tactics and high morale",
        LeaderAbility::ProtectiveAura { .. } => {
            "a protective aura and disciplined lightsaber skills"
        }
    }
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = Vec::with_capacity(items.len());
    items.retain(|item| {
        if seen.contains(item) {
            false
        } else {
            seen.push(item.clone());
            true
        }
    });
}
