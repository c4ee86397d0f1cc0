use hookkit_core::{HookError, Result};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::debug;

use crate::descriptor::{Priority, SkillDescriptor};
use crate::provider::ScoringPolicy;

/// One skill whose triggers fired on a prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillMatch {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub user_invocable: bool,
    pub matched_keywords: Vec<String>,
    pub matched_patterns: Vec<String>,
    pub score: u32,
}

/// Keywords contained in the prompt, compared case-insensitively.
pub fn match_keywords(prompt: &str, keywords: &[String]) -> Vec<String> {
    let lowered = prompt.to_lowercase();
    keywords
        .iter()
        .filter(|kw| !kw.is_empty() && lowered.contains(&kw.to_lowercase()))
        .cloned()
        .collect()
}

/// Patterns that match the prompt as case-insensitive regexes. Patterns
/// that do not compile are skipped.
pub fn match_patterns(prompt: &str, patterns: &[String]) -> Vec<String> {
    patterns
        .iter()
        .filter(|pattern| {
            match compile_intent(pattern) {
                Ok(re) => re.is_match(prompt),
                Err(e) => {
                    debug!(error = %e, "skipping intent pattern");
                    false
                }
            }
        })
        .cloned()
        .collect()
}

fn compile_intent(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| HookError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

/// Match every skill against the prompt and rank by score, highest first.
/// Equal scores keep descriptor order.
pub fn match_skills(
    prompt: &str,
    skills: &[SkillDescriptor],
    scoring: &ScoringPolicy,
) -> Vec<SkillMatch> {
    if prompt.trim().is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<SkillMatch> = skills
        .iter()
        .filter_map(|skill| {
            let matched_keywords = match_keywords(prompt, &skill.keywords);
            let matched_patterns = match_patterns(prompt, &skill.patterns);
            if matched_keywords.is_empty() && matched_patterns.is_empty() {
                return None;
            }
            let score = scoring.score(
                matched_keywords.len(),
                matched_patterns.len(),
                skill.priority,
            );
            Some(SkillMatch {
                name: skill.name.clone(),
                description: skill.description.clone(),
                priority: skill.priority,
                user_invocable: skill.user_invocable,
                matched_keywords,
                matched_patterns,
                score,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

/// Group ranked matches into priority tiers, in display order. Empty tiers
/// are left out.
pub fn group_by_priority(matches: &[SkillMatch]) -> Vec<(Priority, Vec<&SkillMatch>)> {
    Priority::ALL
        .iter()
        .filter_map(|tier| {
            let group: Vec<&SkillMatch> = matches.iter().filter(|m| m.priority == *tier).collect();
            (!group.is_empty()).then_some((*tier, group))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ScoringWeights;

    fn legacy() -> ScoringPolicy {
        ScoringPolicy::Weighted(ScoringWeights::default())
    }

    #[test]
    fn keyword_substring_case_insensitive() {
        let kws = vec!["Refactor".to_string(), "cleanup".to_string(), String::new()];
        assert_eq!(match_keywords("Please REFACTORING now", &kws), vec!["Refactor"]);
        assert!(match_keywords("nothing here", &kws).is_empty());
    }

    #[test]
    fn unicode_keywords() {
        let kws = vec!["重构".to_string(), "Ärger".to_string()];
        assert_eq!(match_keywords("帮我重构这段代码", &kws), vec!["重构"]);
        assert_eq!(match_keywords("kein ÄRGER bitte", &kws), vec!["Ärger"]);
    }

    #[test]
    fn invalid_patterns_are_skipped() {
        let patterns = vec!["(unclosed".to_string(), "fix.*bug".to_string()];
        assert_eq!(match_patterns("Fix this BUG", &patterns), vec!["fix.*bug"]);
    }

    #[test]
    fn legacy_score_example() {
        let skill = SkillDescriptor::new("deploy", "Deploy")
            .with_keywords(["deploy", "prod", "rollback"])
            .with_patterns(["ship.*prod", "never-matches-xyz"])
            .with_priority(Priority::High);
        let matches = match_skills("deploy and ship to prod", &[skill], &legacy());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_keywords, vec!["deploy", "prod"]);
        assert_eq!(matches[0].matched_patterns, vec!["ship.*prod"]);
        assert_eq!(matches[0].score, 115);
    }

    #[test]
    fn keyword_only_score_example() {
        let skill = SkillDescriptor::new("refactor", "x").with_keywords(["refactor", "cleanup"]);
        let matches = match_skills("please refactor this", &[skill], &ScoringPolicy::default());
        assert_eq!(matches[0].score, 10);
    }

    #[test]
    fn non_matching_skills_are_excluded() {
        let a = SkillDescriptor::new("a", "a").with_keywords(["alpha"]);
        let b = SkillDescriptor::new("b", "b")
            .with_keywords(["beta"])
            .with_patterns(["gamma\\d"]);
        let matches = match_skills("alpha only", &[a, b], &legacy());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "a");
    }

    #[test]
    fn empty_prompt_matches_nothing() {
        let skill = SkillDescriptor::new("any", "x").with_patterns([".*"]);
        assert!(match_skills("", &[skill.clone()], &legacy()).is_empty());
        assert!(match_skills("   ", &[skill], &legacy()).is_empty());
    }

    #[test]
    fn ranking_is_stable_by_score() {
        let skills = vec![
            SkillDescriptor::new("low", "x").with_keywords(["a"]).with_priority(Priority::Low),
            SkillDescriptor::new("first-medium", "x").with_keywords(["a"]),
            SkillDescriptor::new("crit", "x")
                .with_keywords(["a"])
                .with_priority(Priority::Critical),
            SkillDescriptor::new("second-medium", "x").with_keywords(["a"]),
        ];
        let matches = match_skills("a", &skills, &legacy());
        let order: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(order, vec!["crit", "first-medium", "second-medium", "low"]);
    }

    #[test]
    fn grouping_follows_tier_order() {
        let skills = vec![
            SkillDescriptor::new("l", "x").with_keywords(["k"]).with_priority(Priority::Low),
            SkillDescriptor::new("h", "x").with_keywords(["k"]).with_priority(Priority::High),
            SkillDescriptor::new("h2", "x")
                .with_keywords(["k", "kk"])
                .with_priority(Priority::High),
        ];
        let matches = match_skills("kk", &skills, &legacy());
        let groups = group_by_priority(&matches);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Priority::High);
        let high: Vec<&str> = groups[0].1.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(high, vec!["h2", "h"]);
        assert_eq!(groups[1].0, Priority::Low);
    }
}
