use chrono::Utc;
use serde::{Deserialize, Serialize};
use skirmish_engine::{summarize_counts, Battle, BattleRng, Team, TeamSnapshot, UnitCatalog};
use tracing::info;

use crate::analysis::pre_battle_analysis;
use crate::battlefield::{pick_preset, Battlefield};
use crate::config::BattleConfig;

/// A finished battle narrative, ready to render or store as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub id: String,
    pub timestamp: String,
    pub seed: u64,
    pub title: String,
    pub battlefield: Battlefield,
    pub introduction: String,
    pub rosters: Vec<RosterListing>,
    pub analysis: Vec<String>,
    pub rounds: Vec<RoundSection>,
    pub final_state: Vec<String>,
    pub winner: String,
    pub recap: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterListing {
    pub name: String,
    pub total_cost: u64,
    pub units: Vec<RosterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub tier: u8,
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSection {
    pub number: u32,
    pub lines: Vec<String>,
}

pub struct StoryOptions {
    pub id: String,
    /// Overrides both the config seed and the roster-derived seed.
    pub seed: Option<u64>,
}

impl StoryOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Validates the config, fights the battle and narrates it.
pub fn generate_report(
    config: &BattleConfig,
    catalog: &UnitCatalog,
    options: &StoryOptions,
) -> anyhow::Result<BattleReport> {
    let rosters = config.rosters();
    let mut battle = Battle::new(&rosters, catalog, config.budget)?;

    let seed = options
        .seed
        .or(config.seed)
        .unwrap_or_else(|| config.derived_seed());
    let mut rng = BattleRng::new(seed);
    let battlefield = config
        .battlefield
        .clone()
        .unwrap_or_else(|| pick_preset(&mut rng));

    let listings = battle.teams().iter().map(roster_listing).collect();
    let analysis = battle.teams().iter().map(pre_battle_analysis).collect();

    let record = battle.run(&mut rng);
    let rounds = record
        .rounds
        .iter()
        .map(|round| {
            let mut lines = round.abilities.clone();
            lines.extend(round.events.iter().cloned());
            lines.extend(round.teams.iter().map(losses_line));
            RoundSection {
                number: round.round,
                lines,
            }
        })
        .collect();
    let final_state = record.teams.iter().map(final_state_line).collect();

    let winner = record.outcome.winner_name.clone();
    let loser = &record.outcome.loser_name;
    let recap = format!(
        "In the end, {winner} prevailed over {loser}. While {loser} fought bravely, \
         {winner}'s remaining fighters outlasted their foes."
    );

    info!(
        target: "skirmish_story.report",
        id = %options.id,
        seed,
        winner = %winner,
        "battle narrated"
    );
    Ok(BattleReport {
        id: options.id.clone(),
        timestamp: Utc::now().to_rfc3339(),
        seed,
        title: format!("The Battle of {}", title_case(&battlefield.location)),
        introduction: format!(
            "On {}, the forces assemble at {}. The terrain consists of {}. \
             Visibility is poor, and every shadow could hide an enemy.",
            battlefield.weather, battlefield.location, battlefield.terrain
        ),
        battlefield,
        rosters: listings,
        analysis,
        rounds,
        final_state,
        winner,
        recap,
    })
}

impl BattleReport {
    pub fn render_markdown(&self) -> String {
        let mut parts = vec![
            format!("# {}", self.title),
            self.introduction.clone(),
            "Team Rosters:".to_string(),
        ];
        parts.extend(self.rosters.iter().map(RosterListing::render));
        parts.push(format!("Pre‑Battle Analysis:\n{}", self.analysis.join("\n")));
        for round in &self.rounds {
            let mut lines = vec![format!("* Round {}", round.number)];
            lines.extend(round.lines.iter().map(|line| format!("* {line}")));
            parts.push(lines.join("\n"));
        }
        parts.push(format!(
            "Casualties & Survivors:\n{}\n\nWinner: **{}**\n{}",
            self.final_state.join("\n"),
            self.winner,
            self.recap
        ));
        parts.join("\n\n")
    }
}

impl RosterListing {
    fn render(&self) -> String {
        let mut lines = vec![format!("**{}** (Total: {} pts)", self.name, self.total_cost)];
        lines.extend(
            self.units
                .iter()
                .map(|u| format!("  - {} (Tier {}, {} pts)", u.name, u.tier, u.cost)),
        );
        lines.join("\n")
    }
}

fn roster_listing(team: &Team) -> RosterListing {
    RosterListing {
        name: team.name().to_string(),
        total_cost: team.total_cost(),
        units: team
            .units()
            .iter()
            .map(|u| RosterEntry {
                name: u.name().to_string(),
                tier: u.template().tier,
                cost: u.template().cost,
            })
            .collect(),
    }
}

fn losses_line(team: &TeamSnapshot) -> String {
    match summarize_counts(team.fallen.iter().map(String::as_str)) {
        Some(summary) => format!("{} casualties: {summary}.", team.name),
        None => format!("No significant losses for {}.", team.name),
    }
}

fn final_state_line(team: &TeamSnapshot) -> String {
    let mut parts = Vec::new();
    if team.survivors.is_empty() {
        parts.push(format!("No survivors for {}.", team.name));
    } else {
        parts.push(format!(
            "Survivors for {}: {}.",
            team.name,
            team.survivors.join(", ")
        ));
    }
    if !team.fallen.is_empty() {
        parts.push(format!(
            "Fallen for {}: {}.",
            team.name,
            team.fallen.join(", ")
        ));
    }
    parts.join(" ")
}

/// Capitalizes the first letter of every word and lowercases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for ch in text.chars() {
        if prev_is_letter {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        prev_is_letter = ch.is_alphabetic();
    }
    out
}
