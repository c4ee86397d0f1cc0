use crate::matcher::{SkillMatch, group_by_priority};

const HEADER: &str = "========== Skill suggestions ==========";
const FOOTER: &str = "=======================================";

/// What the matcher concluded for one prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion {
    /// No prompt text reached the hook.
    EmptyPrompt { skills: usize, rules: Vec<String> },
    /// A prompt arrived but no skill's triggers fired.
    NoMatches { skills: usize, rules: Vec<String> },
    /// Ranked matches, highest score first.
    Matches {
        matches: Vec<SkillMatch>,
        rules: Vec<String>,
    },
}

impl Suggestion {
    pub fn matches(&self) -> &[SkillMatch] {
        match self {
            Suggestion::Matches { matches, .. } => matches,
            _ => &[],
        }
    }

    pub fn rules(&self) -> &[String] {
        match self {
            Suggestion::EmptyPrompt { rules, .. }
            | Suggestion::NoMatches { rules, .. }
            | Suggestion::Matches { rules, .. } => rules,
        }
    }

    /// Text printed to stdout for the host.
    pub fn render(&self) -> String {
        match self {
            Suggestion::EmptyPrompt { skills, rules } => format!(
                "No prompt received; {} skills and {} rules available.\n",
                skills,
                rules.len()
            ),
            Suggestion::NoMatches { skills, rules } => format!(
                "No matching skills for this prompt ({} skills checked, {} rules available).\n",
                skills,
                rules.len()
            ),
            Suggestion::Matches { matches, rules } => render_matches(matches, rules),
        }
    }
}

fn render_matches(matches: &[SkillMatch], rules: &[String]) -> String {
    let mut out = String::from("\n");
    out.push_str(HEADER);
    out.push('\n');

    for (tier, group) in group_by_priority(matches) {
        out.push_str(&format!("[{}]:\n", tier.label()));
        for m in group {
            let slash = if m.user_invocable { "/" } else { "" };
            out.push_str(&format!("  -> {}{}: {}\n", slash, m.name, m.description));
            if !m.matched_keywords.is_empty() {
                out.push_str(&format!(
                    "     matched keywords: {}\n",
                    m.matched_keywords.join(", ")
                ));
            }
            if !m.matched_patterns.is_empty() {
                out.push_str(&format!(
                    "     matched patterns: {}\n",
                    m.matched_patterns.join(", ")
                ));
            }
        }
    }

    if !rules.is_empty() {
        out.push_str(&format!("Rules ({}): {}\n", rules.len(), rules.join(", ")));
    }

    out.push_str(FOOTER);
    out.push('\n');
    out.push_str("Tip: type /<skill-name> to activate a skill\n");
    out
}
