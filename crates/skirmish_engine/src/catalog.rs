//! Unit templates and the catalog that owns them.
//!
//! Templates are shared read-only through `Arc`; every [`crate::Unit`] of a
//! given type points at the same template.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{BattleError, BattleResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Leader,
    #[default]
    Trooper,
}

impl Role {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Leader" | "leader" => Some(Role::Leader),
            "Trooper" | "trooper" => Some(Role::Trooper),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Leader => f.write_str("Leader"),
            Role::Trooper => f.write_str("Trooper"),
        }
    }
}

/// Rounds in which a leader ability may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundGate {
    OpeningRound,
    FromRound(u32),
}

impl RoundGate {
    pub fn allows(self, round: u32) -> bool {
        match self {
            RoundGate::OpeningRound => round == 1,
            RoundGate::FromRound(first) => round >= first,
        }
    }
}

/// Start-of-round effect owned by a leader unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeaderAbility {
    /// Scales the shared accuracy modifier.
    FearAura { accuracy_factor: f64 },
    /// Lowers the enemy team's morale.
    MoraleBreak { enemy_morale_delta: f64 },
    /// Scales the shared accuracy modifier.
    TacticalBoost { accuracy_factor: f64 },
    /// Raises one fallen ally at half health.
    Revive,
    /// Raises the owning team's morale.
    InspiresRebels { morale_delta: f64 },
    /// Adds to the battle's defense buff.
    ProtectiveAura { defense: i32 },
}

impl LeaderAbility {
    pub const FEAR_AURA: Self = LeaderAbility::FearAura {
        accuracy_factor: 0.85,
    };
    pub const MORALE_BREAK: Self = LeaderAbility::MoraleBreak {
        enemy_morale_delta: -0.2,
    };
    pub const TACTICAL_BOOST: Self = LeaderAbility::TacticalBoost {
        accuracy_factor: 1.15,
    };
    pub const INSPIRES_REBELS: Self = LeaderAbility::InspiresRebels { morale_delta: 0.2 };
    pub const PROTECTIVE_AURA: Self = LeaderAbility::ProtectiveAura { defense: 5 };

    /// Looks up an ability by its catalog key with its stock magnitude.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "fear_aura" => Some(Self::FEAR_AURA),
            "morale_break" => Some(Self::MORALE_BREAK),
            "tactical_boost" => Some(Self::TACTICAL_BOOST),
            "revive" => Some(LeaderAbility::Revive),
            "inspires_rebels" => Some(Self::INSPIRES_REBELS),
            "protective_aura" => Some(Self::PROTECTIVE_AURA),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            LeaderAbility::FearAura { .. } => "fear_aura",
            LeaderAbility::MoraleBreak { .. } => "morale_break",
            LeaderAbility::TacticalBoost { .. } => "tactical_boost",
            LeaderAbility::Revive => "revive",
            LeaderAbility::InspiresRebels { .. } => "inspires_rebels",
            LeaderAbility::ProtectiveAura { .. } => "protective_aura",
        }
    }

    pub fn gate(&self) -> RoundGate {
        match self {
            LeaderAbility::Revive => RoundGate::FromRound(2),
            LeaderAbility::FearAura { .. }
            | LeaderAbility::MoraleBreak { .. }
            | LeaderAbility::TacticalBoost { .. }
            | LeaderAbility::InspiresRebels { .. }
            | LeaderAbility::ProtectiveAura { .. } => RoundGate::OpeningRound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SynergyEffect {
    /// Compounds into the attack's enemy-accuracy multiplier.
    EnemyAccuracyMultiplier(f64),
    /// Applied straight to the attacker's team morale.
    MoraleBonus(f64),
}

impl SynergyEffect {
    pub fn from_key(key: &str, magnitude: f64) -> Option<Self> {
        match key {
            "enemy_accuracy_multiplier" => Some(SynergyEffect::EnemyAccuracyMultiplier(magnitude)),
            "morale_bonus" => Some(SynergyEffect::MoraleBonus(magnitude)),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SynergyEffect::EnemyAccuracyMultiplier(_) => "enemy_accuracy_multiplier",
            SynergyEffect::MoraleBonus(_) => "morale_bonus",
        }
    }
}

/// Effects that switch on while an ally of type `ally` is alive.
#[derive(Debug, Clone, PartialEq)]
pub struct Synergy {
    pub ally: String,
    pub effects: Vec<SynergyEffect>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitTemplate {
    pub name: String,
    pub tier: u8,
    pub cost: u32,
    pub health: i32,
    pub damage: i32,
    pub description: String,
    pub role: Role,
    pub abilities: Vec<String>,
    pub synergies: Vec<Synergy>,
    pub leader_ability: Option<LeaderAbility>,
}

impl UnitTemplate {
    pub fn new(name: impl Into<String>, tier: u8, cost: u32, health: i32, damage: i32) -> Self {
        Self {
            name: name.into(),
            tier,
            cost,
            health,
            damage,
            description: String::new(),
            role: Role::Trooper,
            abilities: Vec::new(),
            synergies: Vec::new(),
            leader_ability: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities = abilities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_synergy(mut self, ally: impl Into<String>, effects: Vec<SynergyEffect>) -> Self {
        self.synergies.push(Synergy {
            ally: ally.into(),
            effects,
        });
        self
    }

    /// Leaders are promoted automatically; every leader ability belongs to one.
    pub fn with_leader_ability(mut self, ability: LeaderAbility) -> Self {
        self.role = Role::Leader;
        self.leader_ability = Some(ability);
        self
    }

    pub fn is_leader(&self) -> bool {
        self.role == Role::Leader
    }
}

/// Registry of named unit templates.
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    templates: BTreeMap<String, Arc<UnitTemplate>>,
}

impl UnitCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in roster of galactic skirmishers.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for template in standard_templates() {
            catalog.insert(template);
        }
        catalog
    }

    /// Adds or replaces a template, returning the one it displaced.
    pub fn insert(&mut self, template: UnitTemplate) -> Option<Arc<UnitTemplate>> {
        self.templates
            .insert(template.name.clone(), Arc::new(template))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<UnitTemplate>> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn resolve(&self, name: &str) -> BattleResult<Arc<UnitTemplate>> {
        self.get(name).cloned().ok_or_else(|| BattleError::UnknownUnit {
            name: name.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<UnitTemplate>> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn standard_templates() -> Vec<UnitTemplate> {
    vec![
        UnitTemplate::new("Darth Vader", 1, 120, 120, 35)
            .with_description("Sith Lord wielding a red lightsaber and the Dark Side")
            .with_abilities(["dark_presence", "force_strike"])
            .with_synergy(
                "Stormtrooper",
                vec![SynergyEffect::EnemyAccuracyMultiplier(0.8)],
            )
            .with_leader_ability(LeaderAbility::FEAR_AURA),
        UnitTemplate::new("Emperor Palpatine", 1, 130, 100, 40)
            .with_description("Galactic Emperor and master of the Sith, unleashing Force lightning")
            .with_abilities(["force_lightning"])
            .with_leader_ability(LeaderAbility::MORALE_BREAK),
        UnitTemplate::new("Grand Admiral Thrawn", 2, 80, 80, 15)
            .with_description("Strategic genius providing tactical insight")
            .with_abilities(["tactical_insight"])
            .with_leader_ability(LeaderAbility::TACTICAL_BOOST),
        UnitTemplate::new("Mother Talzin", 2, 90, 90, 20)
            .with_description("Dathomirian witch with necromantic powers")
            .with_abilities(["resurrection"])
            .with_leader_ability(LeaderAbility::Revive),
        UnitTemplate::new("Stormtrooper", 3, 40, 40, 10)
            .with_description("Imperial foot soldier with blaster rifle"),
        UnitTemplate::new("Clone Trooper", 3, 45, 45, 12)
            .with_description("Elite soldier cloned from Jango Fett")
            .with_synergy("Jedi", vec![SynergyEffect::MoraleBonus(0.1)]),
        UnitTemplate::new("Saw Gerrera", 2, 70, 85, 20)
            .with_description("Hard-boiled guerrilla leader")
            .with_abilities(["reckless_attack"])
            .with_leader_ability(LeaderAbility::INSPIRES_REBELS),
        UnitTemplate::new("Jedi", 2, 90, 95, 25)
            .with_description("Force-sensitive warrior with a lightsaber")
            .with_abilities(["force_push"])
            .with_leader_ability(LeaderAbility::PROTECTIVE_AURA),
        UnitTemplate::new("Wookiee Warrior", 3, 50, 60, 18)
            .with_description("Large, strong combatant wielding a bowcaster")
            .with_abilities(["furious_charge"]),
    ]
}
