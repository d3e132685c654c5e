//! Custom unit definitions layered over the standard catalog.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use skirmish_engine::{LeaderAbility, Role, SynergyEffect, UnitCatalog, UnitTemplate};
use tracing::{info, warn};

use crate::config::ConfigFormat;

#[derive(Debug, Deserialize, Default)]
pub struct CatalogFile {
    #[serde(default)]
    pub units: Vec<UnitEntry>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UnitEntry {
    pub name: String,
    #[serde(default = "default_tier")]
    pub tier: u8,
    pub cost: u32,
    pub health: i32,
    pub damage: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Ally unit name to `{effect key: magnitude}`.
    #[serde(default)]
    pub synergies: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub leader_ability: Option<String>,
}

fn default_tier() -> u8 {
    3
}

impl UnitEntry {
    pub fn into_template(self) -> Result<UnitTemplate> {
        if self.name.trim().is_empty() {
            bail!("unit entry without a name");
        }
        if self.health <= 0 {
            bail!("unit '{}' needs positive health, got {}", self.name, self.health);
        }
        if self.damage < 0 {
            bail!("unit '{}' has negative damage {}", self.name, self.damage);
        }

        let leader_ability = match self.leader_ability.as_deref() {
            Some(key) => Some(LeaderAbility::from_key(key).with_context(|| {
                format!("unit '{}' has unknown leader ability '{key}'", self.name)
            })?),
            None => None,
        };
        let role = match self.role.as_deref() {
            Some(key) => Role::from_key(key)
                .with_context(|| format!("unit '{}' has unknown role '{key}'", self.name))?,
            None if leader_ability.is_some() => Role::Leader,
            None => Role::Trooper,
        };
        if leader_ability.is_some() && role != Role::Leader {
            warn!(
                target: "skirmish_story.catalog",
                unit = %self.name,
                "leader ability on a non-leader unit"
            );
        }

        let mut template = UnitTemplate::new(
            self.name.clone(),
            self.tier,
            self.cost,
            self.health,
            self.damage,
        )
        .with_description(self.description)
        .with_role(role)
        .with_abilities(self.abilities);
        template.leader_ability = leader_ability;

        for (ally, effects) in self.synergies {
            let effects = effects
                .into_iter()
                .map(|(key, magnitude)| {
                    if !magnitude.is_finite() {
                        bail!(
                            "unit '{}' has non-finite synergy value {magnitude} for '{key}'",
                            self.name
                        );
                    }
                    SynergyEffect::from_key(&key, magnitude).with_context(|| {
                        format!("unit '{}' has unknown synergy effect '{key}'", self.name)
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            template = template.with_synergy(ally, effects);
        }
        Ok(template)
    }
}

impl CatalogFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read unit catalog {}", path.display()))?;
        Self::parse(&data, ConfigFormat::from_path(path))
            .with_context(|| format!("invalid unit catalog {}", path.display()))
    }

    pub fn parse(data: &str, format: ConfigFormat) -> Result<Self> {
        let file = match format {
            ConfigFormat::Json => serde_json::from_str(data)?,
            ConfigFormat::Toml => toml::from_str(data)?,
        };
        Ok(file)
    }

    /// Adds every entry to `catalog`, replacing same-named units.
    pub fn apply_to(self, catalog: &mut UnitCatalog) -> Result<usize> {
        let mut added = 0;
        for entry in self.units {
            let template = entry.into_template()?;
            if catalog.contains(&template.name) {
                info!(target: "skirmish_story.catalog", unit = %template.name, "overriding built-in unit");
            }
            catalog.insert(template);
            added += 1;
        }
        Ok(added)
    }
}

/// The standard catalog, extended by an optional catalog file.
pub fn load_catalog(extra: Option<&Path>) -> Result<UnitCatalog> {
    let mut catalog = UnitCatalog::standard();
    if let Some(path) = extra {
        let added = CatalogFile::from_path(path)?.apply_to(&mut catalog)?;
        info!(target: "skirmish_story.catalog", path = %path.display(), added, "custom units loaded");
    }
    Ok(catalog)
}
