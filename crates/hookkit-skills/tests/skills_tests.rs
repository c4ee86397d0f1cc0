#[cfg(test)]
mod tests {
    use hookkit_config::{SkillSource, SkillsConfig};
    use hookkit_skills::{Priority, SkillCatalog, SkillSuggester, Suggestion};
    use std::path::Path;

    fn config(source: SkillSource) -> SkillsConfig {
        SkillsConfig {
            source,
            include_user_skills: false,
            ..SkillsConfig::default()
        }
    }

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn write_frontmatter_skill(root: &Path) {
        write(
            &root.join(".claude/skills/refactor/SKILL.md"),
            "---\nname: refactor\ndescription: \"Restructure code. 触发词: refactor, cleanup.\"\n---\n\n# Refactor\n",
        );
    }

    fn write_legacy_rules(root: &Path) {
        write(
            &root.join(".claude/skills/skill-rules.json"),
            r#"{
  "skills": {
    "deploy": {
      "description": "Ship a release",
      "priority": "high",
      "triggers": {
        "keywords": ["deploy", "release", "rollback"],
        "intentPatterns": ["push.*(prod|production)", "[invalid"]
      }
    },
    "docs": {
      "description": "Write docs",
      "priority": "low",
      "triggers": { "keywords": ["readme"] }
    }
  }
}"#,
        );
    }

    #[test]
    fn test_frontmatter_example_scores_ten() {
        let dir = tempfile::tempdir().unwrap();
        write_frontmatter_skill(dir.path());

        let suggester = SkillSuggester::from_config(dir.path(), &config(SkillSource::Frontmatter));
        assert_eq!(suggester.catalog().skills[0].keywords, vec!["refactor", "cleanup"]);

        let suggestion = suggester.suggest(Some("please refactor this"));
        let matches = suggestion.matches();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "refactor");
        assert_eq!(matches[0].priority, Priority::Medium);
        assert_eq!(matches[0].score, 10);
    }

    #[test]
    fn test_legacy_example_scores_115() {
        let dir = tempfile::tempdir().unwrap();
        write_legacy_rules(dir.path());

        let suggester = SkillSuggester::from_config(dir.path(), &config(SkillSource::Legacy));
        let suggestion = suggester.suggest(Some("Deploy the release and push it to production"));
        let matches = suggestion.matches();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_keywords, vec!["deploy", "release"]);
        assert_eq!(matches[0].matched_patterns.len(), 1);
        assert_eq!(matches[0].score, 115);
    }

    #[test]
    fn test_auto_prefers_frontmatter() {
        let dir = tempfile::tempdir().unwrap();
        write_frontmatter_skill(dir.path());
        write_legacy_rules(dir.path());

        let catalog = SkillCatalog::from_config(dir.path(), &config(SkillSource::Auto));
        assert_eq!(catalog.source, Some("frontmatter"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_auto_falls_back_to_legacy() {
        let dir = tempfile::tempdir().unwrap();
        write_legacy_rules(dir.path());

        let catalog = SkillCatalog::from_config(dir.path(), &config(SkillSource::Auto));
        assert_eq!(catalog.source, Some("legacy"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_missing_configuration_means_no_skills() {
        let dir = tempfile::tempdir().unwrap();
        let suggester = SkillSuggester::from_config(dir.path(), &config(SkillSource::Auto));
        assert!(suggester.catalog().is_empty());
        assert_eq!(
            suggester.suggest(Some("refactor")),
            Suggestion::NoMatches {
                skills: 0,
                rules: vec![]
            }
        );
    }

    #[test]
    fn test_empty_prompt_reports_counts() {
        let dir = tempfile::tempdir().unwrap();
        write_frontmatter_skill(dir.path());
        write(&dir.path().join(".claude/rules/backend/api.md"), "# API");
        write(&dir.path().join(".claude/rules/style.md"), "# Style");

        let suggester = SkillSuggester::from_config(dir.path(), &config(SkillSource::Auto));
        let suggestion = suggester.suggest(None);
        assert_eq!(
            suggestion,
            Suggestion::EmptyPrompt {
                skills: 1,
                rules: vec!["backend/api".into(), "style".into()]
            }
        );
        assert_eq!(
            suggestion.render(),
            "No prompt received; 1 skills and 2 rules available.\n"
        );
    }

    #[test]
    fn test_prompt_without_keywords_never_lists_skill() {
        let dir = tempfile::tempdir().unwrap();
        write_legacy_rules(dir.path());
        let suggester = SkillSuggester::from_config(dir.path(), &config(SkillSource::Legacy));

        let suggestion = suggester.suggest(Some("update the README please"));
        let names: Vec<&str> = suggestion.matches().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["docs"]);
        assert!(suggestion.render().contains("[LOW]:\n  -> /docs: Write docs"));
    }
}
