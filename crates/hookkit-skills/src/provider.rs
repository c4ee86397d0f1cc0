use hookkit_core::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::descriptor::{Priority, SkillDescriptor};
use crate::frontmatter::read_skill_file;

/// File name of a per-skill descriptor document.
pub const SKILL_FILE: &str = "SKILL.md";

/// Source of skill descriptors.
///
/// Matching only sees descriptors and the provider's [`ScoringPolicy`], so
/// sources can be swapped or chained without touching the matcher.
pub trait SkillProvider {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn list_descriptors(&self) -> Result<Vec<SkillDescriptor>>;

    fn scoring(&self) -> ScoringPolicy;
}

// ── Scoring ────────────────────────────────────────────────────

/// Bonus added per priority tier under weighted scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityBonus {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl Default for PriorityBonus {
    fn default() -> Self {
        Self {
            critical: 100,
            high: 75,
            medium: 50,
            low: 25,
        }
    }
}

impl PriorityBonus {
    pub fn get(&self, priority: Priority) -> u32 {
        match priority {
            Priority::Critical => self.critical,
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub keyword_match: u32,
    pub pattern_match: u32,
    pub priority_bonus: PriorityBonus,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword_match: 10,
            pattern_match: 20,
            priority_bonus: PriorityBonus::default(),
        }
    }
}

/// How a match is scored. The two sources score differently and are kept
/// apart on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPolicy {
    /// `keywords × keyword_match + patterns × pattern_match + bonus[priority]`
    Weighted(ScoringWeights),
    /// `keywords × keyword_match`
    KeywordOnly { keyword_match: u32 },
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        ScoringPolicy::KeywordOnly { keyword_match: 10 }
    }
}

impl ScoringPolicy {
    pub fn score(&self, keywords: usize, patterns: usize, priority: Priority) -> u32 {
        match self {
            ScoringPolicy::Weighted(w) => (keywords as u32)
                .saturating_mul(w.keyword_match)
                .saturating_add((patterns as u32).saturating_mul(w.pattern_match))
                .saturating_add(w.priority_bonus.get(priority)),
            ScoringPolicy::KeywordOnly { keyword_match } => {
                (keywords as u32).saturating_mul(*keyword_match)
            }
        }
    }
}

// ── Front-matter provider ──────────────────────────────────────

/// Discovers `SKILL.md` descriptors.
///
/// Directories are listed in precedence order: when two define the same
/// skill name, the earlier directory wins.
pub struct FrontmatterProvider {
    skills_dirs: Vec<PathBuf>,
}

impl FrontmatterProvider {
    pub fn new(dirs: &[&Path]) -> Self {
        Self {
            skills_dirs: dirs.iter().map(|d| d.to_path_buf()).collect(),
        }
    }

    /// Project skills directory, optionally followed by `~/.claude/skills`.
    pub fn for_project(skills_dir: &Path, include_user_skills: bool) -> Self {
        let mut skills_dirs = vec![skills_dir.to_path_buf()];
        if include_user_skills {
            if let Some(home) = dirs::home_dir() {
                let user_dir = home.join(".claude").join("skills");
                if user_dir != skills_dir {
                    skills_dirs.push(user_dir);
                }
            }
        }
        Self { skills_dirs }
    }

    pub fn skills_dirs(&self) -> &[PathBuf] {
        &self.skills_dirs
    }

    /// `SKILL.md` files in one directory: each subdirectory's, plus one
    /// sitting directly in the directory. Sorted by path.
    fn skill_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                let skill_md = path.join(SKILL_FILE);
                if skill_md.is_file() {
                    files.push(skill_md);
                }
            } else if path.file_name().is_some_and(|n| n == SKILL_FILE) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl SkillProvider for FrontmatterProvider {
    fn name(&self) -> &'static str {
        "frontmatter"
    }

    fn list_descriptors(&self) -> Result<Vec<SkillDescriptor>> {
        let mut seen = HashSet::new();
        let mut descriptors = Vec::new();

        for dir in &self.skills_dirs {
            if !dir.is_dir() {
                debug!(?dir, "skills directory does not exist, skipping");
                continue;
            }

            for path in Self::skill_files(dir)? {
                match read_skill_file(&path) {
                    Ok(def) => {
                        if seen.insert(def.name.clone()) {
                            debug!(skill = %def.name, ?path, "loaded skill");
                            descriptors.push(def);
                        } else {
                            debug!(
                                skill = %def.name,
                                ?path,
                                "skill already loaded from higher-priority directory, skipping"
                            );
                        }
                    }
                    Err(e) => {
                        warn!(?path, error = %e, "failed to load skill");
                    }
                }
            }
        }

        info!(count = descriptors.len(), "discovered front-matter skills");
        Ok(descriptors)
    }

    fn scoring(&self) -> ScoringPolicy {
        ScoringPolicy::KeywordOnly { keyword_match: 10 }
    }
}
