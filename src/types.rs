use once_cell::sync::Lazy;
use std::{collections::BTreeMap, fmt::Display, fs, path::Path, str::FromStr};
use strsim::jaro_winkler;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::GymError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Uomo", alias = "male")]
    #[value(alias = "uomo")]
    Male,
    #[serde(rename = "Donna", alias = "female")]
    #[value(alias = "donna")]
    Female,
    #[serde(rename = "Altro", alias = "other")]
    #[value(alias = "altro")]
    Other,
}

impl Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Male => "Uomo",
            Self::Female => "Donna",
            Self::Other => "Altro",
        };

        write!(f, "{}", s)
    }
}

/// Workout library section. Serialized with the display names the app shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Massa")]
    Massa,
    #[serde(rename = "Definizione")]
    Definizione,
    #[serde(rename = "Perdita Peso")]
    PerditaPeso,
    #[serde(rename = "Resistenza")]
    Resistenza,
}

impl Category {
    pub fn goal(self) -> Goal {
        match self {
            Self::Massa => Goal::Muscle,
            Self::Definizione => Goal::Definition,
            Self::PerditaPeso => Goal::WeightLoss,
            Self::Resistenza => Goal::Endurance,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Massa => "Massa",
            Self::Definizione => "Definizione",
            Self::PerditaPeso => "Perdita Peso",
            Self::Resistenza => "Resistenza",
        };

        write!(f, "{}", s)
    }
}

/// The training goal picked during onboarding. Each goal owns one library
/// category and one intensity (fraction of 1RM).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    #[value(aliases = ["massa", "hypertrophy"])]
    Muscle,
    #[value(aliases = ["definizione", "cut"])]
    Definition,
    #[value(aliases = ["weight_loss", "fat-loss"])]
    WeightLoss,
    #[value(alias = "resistenza")]
    Endurance,
}

impl Goal {
    /// Generation order when no goal takes priority.
    pub const ALL: [Goal; 4] = [
        Goal::Muscle,
        Goal::Definition,
        Goal::WeightLoss,
        Goal::Endurance,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Muscle => "muscle",
            Self::Definition => "definition",
            Self::WeightLoss => "weight_loss",
            Self::Endurance => "endurance",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Self::Muscle => Category::Massa,
            Self::Definition => Category::Definizione,
            Self::WeightLoss => Category::PerditaPeso,
            Self::Endurance => Category::Resistenza,
        }
    }

    /// Working intensity as a fraction of the base lift's 1RM.
    pub fn percentage(self) -> f64 {
        match self {
            Self::Muscle => 0.75,
            Self::Definition => 0.65,
            Self::WeightLoss => 0.60,
            Self::Endurance => 0.50,
        }
    }

    /// Appended to each card's focus line.
    pub fn focus_suffix(self) -> &'static str {
        match self {
            Self::Muscle => "Massa",
            Self::Definition => "Definizione",
            Self::WeightLoss => "Metabolico",
            Self::Endurance => "Resistenza",
        }
    }
}

impl Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Every spelling accepted for a goal, mapped to its canonical value.
pub static GOAL_NAMES: Lazy<BTreeMap<&'static str, Goal>> = Lazy::new(|| {
    BTreeMap::from([
        ("muscle", Goal::Muscle),
        ("massa", Goal::Muscle),
        ("hypertrophy", Goal::Muscle),
        ("definition", Goal::Definition),
        ("definizione", Goal::Definition),
        ("cut", Goal::Definition),
        ("weight_loss", Goal::WeightLoss),
        ("weight-loss", Goal::WeightLoss),
        ("perdita peso", Goal::WeightLoss),
        ("fat-loss", Goal::WeightLoss),
        ("endurance", Goal::Endurance),
        ("resistenza", Goal::Endurance),
    ])
});

impl FromStr for Goal {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        GOAL_NAMES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| GymError::UnknownGoal(s.to_string()))
    }
}

/// Return the closest goal spelling for `input`
/// if similarity ≥ 0.80 *and* clearly better than the runner-up.
pub fn best_goal_suggestion(input: &str) -> Option<&'static str> {
    let inp = input.trim().to_ascii_lowercase();
    if inp.is_empty() {
        return None;
    }

    let mut scores: Vec<(&'static str, f64)> = GOAL_NAMES
        .keys()
        .copied()
        .map(|g| (g, jaro_winkler(&inp, g)))
        .collect();

    // Highest score first.
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (best, best_score) = scores[0];
    let second_score = scores
        .iter()
        .skip(1)
        .find(|(g, _)| GOAL_NAMES.get(g) != GOAL_NAMES.get(best))
        .map(|(_, s)| *s)
        .unwrap_or(0.0);

    const MIN_SCORE: f64 = 0.80;
    const GAP: f64 = 0.02;

    if best_score >= MIN_SCORE && best_score - second_score >= GAP {
        Some(best)
    } else {
        None
    }
}

//
// CLI plumbing shared by every command.
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFmt {
    Text,
    Json,
}

/// Print `value` as JSON, or run `pretty` for the human-readable form.
pub fn emit<T: Serialize + ?Sized>(fmt: OutputFmt, value: &T, pretty: impl FnOnce()) {
    match fmt {
        OutputFmt::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => tracing::error!(error = %e, "failed to serialize output"),
        },
        OutputFmt::Text => pretty(),
    }
}

/// Flat `key = "value"` TOML file.
#[derive(Debug, Default)]
pub struct Config {
    pub map: BTreeMap<String, String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let map = toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(Self { map })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(&self.map)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to save config to {}", path.display()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_parses_every_spelling() {
        assert_eq!("Massa".parse::<Goal>().unwrap(), Goal::Muscle);
        assert_eq!("weight_loss".parse::<Goal>().unwrap(), Goal::WeightLoss);
        assert_eq!(" cut ".parse::<Goal>().unwrap(), Goal::Definition);
        assert_eq!(
            "yoga".parse::<Goal>(),
            Err(GymError::UnknownGoal("yoga".to_string()))
        );
    }

    #[test]
    fn goal_suggestion_catches_typos() {
        assert_eq!(best_goal_suggestion("endurnce"), Some("endurance"));
        assert_eq!(best_goal_suggestion("xyz"), None);
    }

    #[test]
    fn category_serializes_with_display_name() {
        let json = serde_json::to_string(&Category::PerditaPeso).unwrap();
        assert_eq!(json, "\"Perdita Peso\"");
        assert_eq!(Category::PerditaPeso.goal(), Goal::WeightLoss);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gymbro").join("config");

        let mut cfg = Config::default();
        cfg.map.insert("user".into(), "guest_1".into());
        cfg.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.get("user"), Some("guest_1"));
        assert!(Config::load(&dir.path().join("missing")).unwrap().map.is_empty());
    }
}
