use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Role, UnitTemplate};

/// One combatant on the field.
///
/// `alive` always mirrors `current_health > 0` after damage lands. Dead
/// units stay in their team so they can be counted and revived.
#[derive(Debug, Clone)]
pub struct Unit {
    template: Arc<UnitTemplate>,
    current_health: i32,
    alive: bool,
    status_effects: Vec<String>,
}

impl Unit {
    pub fn new(template: Arc<UnitTemplate>) -> Self {
        let current_health = template.health;
        Self {
            template,
            current_health,
            alive: true,
            status_effects: Vec::new(),
        }
    }

    pub fn template(&self) -> &Arc<UnitTemplate> {
        &self.template
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn role(&self) -> Role {
        self.template.role
    }

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn status_effects(&self) -> &[String] {
        &self.status_effects
    }

    /// Applies damage and returns `true` when this blow killed the unit.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.current_health -= amount;
        self.alive = self.current_health > 0;
        debug!(
            target: "skirmish_engine.unit",
            unit = %self.template.name,
            amount,
            current = self.current_health,
            max = self.template.health,
            "damage applied"
        );
        !self.alive
    }

    pub fn heal_full(&mut self) {
        self.current_health = self.template.health;
        self.alive = true;
        self.status_effects.clear();
    }

    /// Brings a dead unit back at half health (never below 1).
    pub fn revive(&mut self) {
        self.current_health = (self.template.health / 2).max(1);
        self.alive = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trooper(health: i32) -> Unit {
        Unit::new(Arc::new(UnitTemplate::new("Trooper", 3, 10, health, 5)))
    }

    #[test]
    fn starts_at_full_health() {
        let unit = trooper(40);
        assert_eq!(40, unit.current_health());
        assert!(unit.is_alive());
    }

    #[test]
    fn lethal_damage_kills_once() {
        let mut unit = trooper(10);
        assert!(!unit.take_damage(4));
        assert!(unit.is_alive());
        assert!(unit.take_damage(6));
        assert!(!unit.is_alive());
        assert_eq!(0, unit.current_health());
        assert!(!unit.take_damage(3), "dead units cannot die again");
    }

    #[test]
    fn zero_damage_keeps_unit_alive() {
        let mut unit = trooper(1);
        assert!(!unit.take_damage(0));
        assert!(unit.is_alive());
    }

    #[test]
    fn revive_restores_half_health() {
        let mut unit = trooper(45);
        unit.take_damage(100);
        unit.revive();
        assert!(unit.is_alive());
        assert_eq!(22, unit.current_health());

        let mut frail = trooper(1);
        frail.take_damage(5);
        frail.revive();
        assert_eq!(1, frail.current_health());
    }
}
