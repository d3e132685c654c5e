use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skirmish_engine::rng::roster_seed;
use skirmish_engine::{TeamRoster, UnitCatalog};
use walkdir::WalkDir;

use crate::battlefield::Battlefield;
use crate::catalog::load_catalog;

/// Path that means "read the config from stdin".
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// TOML for `.toml` files, JSON for everything else.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// One battle request: two rosters plus optional budget, scenery and seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleConfig {
    #[serde(default)]
    pub budget: Option<u32>,
    pub teams: Vec<TeamConfig>,
    #[serde(default)]
    pub battlefield: Option<Battlefield>,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Extra unit definitions, relative to the config file.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    #[serde(skip)]
    origin: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub units: Vec<String>,
}

impl BattleConfig {
    pub fn new(teams: Vec<TeamConfig>) -> Self {
        Self {
            budget: None,
            teams,
            battlefield: None,
            seed: None,
            catalog: None,
            origin: None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if path == Path::new(STDIN_PATH) {
            let mut data = String::new();
            std::io::stdin()
                .read_to_string(&mut data)
                .context("failed to read battle config from stdin")?;
            return Self::parse(&data, ConfigFormat::Json);
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("configuration file '{}' not found", path.display()))?;
        let mut cfg = Self::parse(&data, ConfigFormat::from_path(path))
            .with_context(|| format!("invalid battle config {}", path.display()))?;
        cfg.origin = Some(path.to_path_buf());
        Ok(cfg)
    }

    pub fn parse(data: &str, format: ConfigFormat) -> Result<Self> {
        let cfg = match format {
            ConfigFormat::Json => serde_json::from_str(data)?,
            ConfigFormat::Toml => toml::from_str(data)?,
        };
        Ok(cfg)
    }

    /// The file this config was read from, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// Rosters in file order; unnamed teams become `Team 1`, `Team 2`, ...
    pub fn rosters(&self) -> Vec<TeamRoster> {
        self.teams
            .iter()
            .enumerate()
            .map(|(idx, team)| {
                let name = team
                    .name
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("Team {}", idx + 1));
                TeamRoster::new(name, team.units.iter().cloned())
            })
            .collect()
    }

    /// Seed used when none is forced: stable for a given pair of rosters.
    pub fn derived_seed(&self) -> u64 {
        let rosters = self.rosters();
        roster_seed(
            rosters
                .iter()
                .map(|roster| (roster.name.as_str(), roster.units.as_slice())),
        )
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        let path = self.catalog.as_ref()?;
        if path.is_absolute() {
            return Some(path.clone());
        }
        let base = self
            .origin
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new(""));
        Some(base.join(path))
    }

    /// Standard units plus the config's own catalog and `extra`, in that
    /// order.
    pub fn load_catalog(&self, extra: Option<&Path>) -> Result<UnitCatalog> {
        let mut catalog = load_catalog(self.catalog_path().as_deref())?;
        if let Some(path) = extra {
            crate::catalog::CatalogFile::from_path(path)?.apply_to(&mut catalog)?;
        }
        Ok(catalog)
    }
}

/// Every battle config (`.json` / `.toml`) under `root`, sorted.
pub fn discover_configs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored(e.file_name()))
    {
        let entry = entry.with_context(|| format!("failed to scan {}", root.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let is_config = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("toml"));
        if is_config {
            found.push(path.to_path_buf());
        }
    }
    found.sort();
    Ok(found)
}

fn is_ignored(name: &std::ffi::OsStr) -> bool {
    let ignored = ["target", ".git", "reports"];
    name.to_str().is_some_and(|name| ignored.contains(&name))
}
