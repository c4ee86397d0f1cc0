//! # hookkit-skills
//!
//! Suggests skills for a submitted prompt. Skills come from a
//! [`SkillProvider`]: either per-skill `SKILL.md` documents with front
//! matter (current) or a single `skill-rules.json` document (legacy).
//!
//! ## SKILL.md
//!
//! ```markdown
//! ---
//! name: refactor
//! description: Restructure code without changing behaviour. 触发词: refactor, cleanup.
//! user-invocable: true
//! ---
//!
//! # Refactor
//! ...
//! ```
//!
//! Trigger keywords come from the labelled segment of `description`. Every
//! front-matter skill has `medium` priority and scores 10 per keyword.
//!
//! ## skill-rules.json
//!
//! Each skill lists `triggers.keywords` and `triggers.intentPatterns`
//! (regexes) with a `priority`. Scores are weighted by the document's
//! `scoring` block.

pub mod descriptor;
pub mod frontmatter;
pub mod keywords;
pub mod legacy;
pub mod matcher;
pub mod provider;
pub mod report;
pub mod rules;

pub use descriptor::{Priority, SkillDescriptor};
pub use legacy::{LegacyRulesProvider, RulesDocument};
pub use matcher::{SkillMatch, match_skills};
pub use provider::{FrontmatterProvider, ScoringPolicy, ScoringWeights, SkillProvider};
pub use report::Suggestion;
pub use rules::scan_rules;

use hookkit_config::{SkillSource, SkillsConfig};
use hookkit_core::{HookPayload, env_fallback_with};
use std::path::Path;
use tracing::{debug, info, warn};

/// Env vars consulted when stdin carries no prompt.
pub const PROMPT_ENV: [&str; 2] = ["USER_PROMPT", "PROMPT"];

/// Pick the prompt text: payload `prompt`/`user_prompt`, raw stdin when it
/// is not JSON, then the environment.
pub fn resolve_prompt(payload: &HookPayload) -> Option<String> {
    resolve_prompt_with(payload, |name| std::env::var(name).ok())
}

pub fn resolve_prompt_with<F>(payload: &HookPayload, env: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let from_stdin = if payload.is_json() {
        payload.first_field(&[&["prompt"], &["user_prompt"]])
    } else if !payload.is_empty() {
        Some(payload.raw().to_string())
    } else {
        None
    };
    from_stdin.or_else(|| env_fallback_with(&PROMPT_ENV, env))
}

/// Descriptors and scoring from whichever provider supplied them.
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    pub source: Option<&'static str>,
    pub skills: Vec<SkillDescriptor>,
    pub scoring: ScoringPolicy,
}

impl SkillCatalog {
    /// Take the first provider in the chain that yields any descriptors.
    /// Provider failures are logged and the next provider is tried.
    pub fn load(providers: &[&dyn SkillProvider]) -> Self {
        for provider in providers {
            match provider.list_descriptors() {
                Ok(skills) if !skills.is_empty() => {
                    info!(source = provider.name(), count = skills.len(), "using skill source");
                    return Self {
                        source: Some(provider.name()),
                        skills,
                        scoring: provider.scoring(),
                    };
                }
                Ok(_) => debug!(source = provider.name(), "skill source is empty"),
                Err(e) => warn!(source = provider.name(), error = %e, "skill source failed"),
            }
        }
        Self::default()
    }

    /// Build the provider chain for `config.source` and load it.
    pub fn from_config(project_dir: &Path, config: &SkillsConfig) -> Self {
        let frontmatter = FrontmatterProvider::for_project(
            &config.skills_path(project_dir),
            config.include_user_skills,
        );
        let legacy = || LegacyRulesProvider::open(&config.rules_file_path(project_dir));

        match config.source {
            SkillSource::Frontmatter => Self::load(&[&frontmatter]),
            SkillSource::Legacy => Self::load(&[&legacy()]),
            SkillSource::Auto => {
                let legacy = legacy();
                Self::load(&[&frontmatter, &legacy])
            }
        }
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Matches prompts against a loaded catalog and reports the rule documents
/// found alongside.
pub struct SkillSuggester {
    catalog: SkillCatalog,
    rules: Vec<String>,
}

impl SkillSuggester {
    pub fn new(catalog: SkillCatalog, rules: Vec<String>) -> Self {
        Self { catalog, rules }
    }

    pub fn from_config(project_dir: &Path, config: &SkillsConfig) -> Self {
        let catalog = SkillCatalog::from_config(project_dir, config);
        let rules = scan_rules(&config.rules_dir_path(project_dir));
        Self::new(catalog, rules)
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn suggest(&self, prompt: Option<&str>) -> Suggestion {
        let rules = self.rules.clone();
        let prompt = match prompt.map(str::trim).filter(|p| !p.is_empty()) {
            Some(p) => p,
            None => {
                return Suggestion::EmptyPrompt {
                    skills: self.catalog.len(),
                    rules,
                };
            }
        };

        let matches = match_skills(prompt, &self.catalog.skills, &self.catalog.scoring);
        debug!(matches = matches.len(), "matched prompt against skills");
        if matches.is_empty() {
            Suggestion::NoMatches {
                skills: self.catalog.len(),
                rules,
            }
        } else {
            Suggestion::Matches { matches, rules }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prompt_from_json_fields() {
        let payload = HookPayload::from_json(json!({ "prompt": "", "user_prompt": "refactor it" }));
        assert_eq!(
            resolve_prompt_with(&payload, |_| None),
            Some("refactor it".to_string())
        );
    }

    #[test]
    fn raw_text_when_not_json() {
        let payload = HookPayload::parse("please refactor this");
        assert_eq!(
            resolve_prompt_with(&payload, |_| Some("env".into())),
            Some("please refactor this".to_string())
        );
    }

    #[test]
    fn json_without_prompt_falls_to_env() {
        let payload = HookPayload::from_json(json!({ "session_id": "abc" }));
        let env = |name: &str| (name == "PROMPT").then(|| "from env".to_string());
        assert_eq!(resolve_prompt_with(&payload, env), Some("from env".to_string()));
        assert_eq!(resolve_prompt_with(&HookPayload::default(), |_| None), None);
    }

    struct Failing;

    impl SkillProvider for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }
        fn list_descriptors(&self) -> hookkit_core::Result<Vec<SkillDescriptor>> {
            Err(hookkit_core::HookError::Skill("boom".into()))
        }
        fn scoring(&self) -> ScoringPolicy {
            ScoringPolicy::default()
        }
    }

    struct Fixed(Vec<SkillDescriptor>, ScoringPolicy);

    impl SkillProvider for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }
        fn list_descriptors(&self) -> hookkit_core::Result<Vec<SkillDescriptor>> {
            Ok(self.0.clone())
        }
        fn scoring(&self) -> ScoringPolicy {
            self.1
        }
    }

    #[test]
    fn catalog_falls_through_failing_and_empty_providers() {
        let weighted = ScoringPolicy::Weighted(ScoringWeights::default());
        let empty = Fixed(vec![], ScoringPolicy::default());
        let full = Fixed(vec![SkillDescriptor::new("x", "x")], weighted);
        let catalog = SkillCatalog::load(&[&Failing, &empty, &full]);
        assert_eq!(catalog.source, Some("fixed"));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.scoring, weighted);
    }

    #[test]
    fn catalog_of_nothing_is_empty() {
        let catalog = SkillCatalog::load(&[&Failing]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.source, None);
    }

    #[test]
    fn suggester_outcomes() {
        let catalog = SkillCatalog {
            source: Some("fixed"),
            skills: vec![SkillDescriptor::new("refactor", "x").with_keywords(["refactor"])],
            scoring: ScoringPolicy::default(),
        };
        let suggester = SkillSuggester::new(catalog, vec!["style".into()]);

        assert_eq!(
            suggester.suggest(None),
            Suggestion::EmptyPrompt {
                skills: 1,
                rules: vec!["style".into()]
            }
        );
        assert!(matches!(suggester.suggest(Some("  ")), Suggestion::EmptyPrompt { .. }));
        assert!(matches!(
            suggester.suggest(Some("write tests")),
            Suggestion::NoMatches { skills: 1, .. }
        ));
        let hit = suggester.suggest(Some("Refactor the parser"));
        assert_eq!(hit.matches().len(), 1);
        assert_eq!(hit.matches()[0].score, 10);
        assert_eq!(hit.rules(), ["style".to_string()]);
    }
}
