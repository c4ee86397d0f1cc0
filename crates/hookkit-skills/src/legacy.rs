use hookkit_core::{HookError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::descriptor::{Priority, SkillDescriptor};
use crate::provider::{PriorityBonus, ScoringPolicy, ScoringWeights, SkillProvider};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSkill {
    description: String,
    priority: Option<String>,
    user_invocable: Option<bool>,
    triggers: RawTriggers,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawTriggers {
    keywords: Vec<String>,
    intent_patterns: Vec<String>,
}

// Weights are JSON numbers, so fractional values are accepted and rounded.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawScoring {
    keyword_match: Option<f64>,
    pattern_match: Option<f64>,
    priority_bonus: Option<RawPriorityBonus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPriorityBonus {
    critical: Option<f64>,
    high: Option<f64>,
    medium: Option<f64>,
    low: Option<f64>,
}

/// Round to the nearest whole weight, clamped to `0..=u32::MAX`.
fn weight(raw: Option<f64>) -> Option<u32> {
    raw.filter(|w| w.is_finite())
        .map(|w| w.round().clamp(0.0, f64::from(u32::MAX)) as u32)
}

impl From<RawScoring> for ScoringWeights {
    fn from(raw: RawScoring) -> Self {
        let defaults = ScoringWeights::default();
        let priority_bonus = match raw.priority_bonus {
            // An explicit table is taken as-is; omitted tiers score nothing
            Some(b) => PriorityBonus {
                critical: weight(b.critical).unwrap_or(0),
                high: weight(b.high).unwrap_or(0),
                medium: weight(b.medium).unwrap_or(0),
                low: weight(b.low).unwrap_or(0),
            },
            None => defaults.priority_bonus,
        };
        Self {
            keyword_match: weight(raw.keyword_match)
                .filter(|w| *w != 0)
                .unwrap_or(defaults.keyword_match),
            pattern_match: weight(raw.pattern_match)
                .filter(|w| *w != 0)
                .unwrap_or(defaults.pattern_match),
            priority_bonus,
        }
    }
}

/// Parsed contents of a `skill-rules.json` document.
#[derive(Debug, Clone, Default)]
pub struct RulesDocument {
    pub skills: Vec<SkillDescriptor>,
    pub weights: ScoringWeights,
}

impl RulesDocument {
    /// Parse the document. Skill entries that do not fit the expected shape
    /// are skipped; a malformed `scoring` block falls back to defaults.
    pub fn parse(raw: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(raw)?;

        let mut skills = Vec::new();
        if let Some(map) = root.get("skills").and_then(Value::as_object) {
            for (name, value) in map {
                match serde_json::from_value::<RawSkill>(value.clone()) {
                    Ok(raw) => skills.push(Self::descriptor(name, raw)),
                    Err(e) => warn!(skill = %name, error = %e, "skipping malformed skill entry"),
                }
            }
        }

        let weights = match root.get("scoring") {
            Some(value) => match serde_json::from_value::<RawScoring>(value.clone()) {
                Ok(raw) => raw.into(),
                Err(e) => {
                    warn!(error = %e, "malformed scoring block, using default weights");
                    ScoringWeights::default()
                }
            },
            None => ScoringWeights::default(),
        };

        Ok(Self { skills, weights })
    }

    fn descriptor(name: &str, raw: RawSkill) -> SkillDescriptor {
        let priority = match raw.priority.as_deref() {
            Some(p) => p.parse::<Priority>().unwrap_or_else(|e| {
                warn!(skill = %name, error = %e, "falling back to medium priority");
                Priority::Medium
            }),
            None => Priority::Medium,
        };
        SkillDescriptor {
            name: name.to_string(),
            description: raw.description,
            keywords: raw.triggers.keywords,
            patterns: raw.triggers.intent_patterns,
            priority,
            user_invocable: raw.user_invocable.unwrap_or(true),
            source_path: None,
        }
    }
}

/// Reads every skill from one `skill-rules.json` document.
///
/// The document is read once at construction. A missing or unparseable
/// file behaves as an empty skill table.
pub struct LegacyRulesProvider {
    path: PathBuf,
    document: Option<RulesDocument>,
}

impl LegacyRulesProvider {
    pub fn open(path: &Path) -> Self {
        let document = if path.is_file() {
            match std::fs::read_to_string(path)
                .map_err(HookError::from)
                .and_then(|raw| RulesDocument::parse(&raw))
            {
                Ok(doc) => Some(doc),
                Err(e) => {
                    warn!(?path, error = %e, "failed to load skill rules");
                    None
                }
            }
        } else {
            debug!(?path, "no skill rules file");
            None
        };
        Self {
            path: path.to_path_buf(),
            document,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SkillProvider for LegacyRulesProvider {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn list_descriptors(&self) -> Result<Vec<SkillDescriptor>> {
        let mut skills = self
            .document
            .as_ref()
            .map(|d| d.skills.clone())
            .unwrap_or_default();
        for skill in &mut skills {
            skill.source_path = Some(self.path.clone());
        }
        Ok(skills)
    }

    fn scoring(&self) -> ScoringPolicy {
        ScoringPolicy::Weighted(
            self.document
                .as_ref()
                .map(|d| d.weights)
                .unwrap_or_default(),
        )
    }
}
