use hookkit_core::{HookError, Result};
use std::path::Path;

use crate::descriptor::{Priority, SkillDescriptor};
use crate::keywords::extract_trigger_keywords;

/// Fields read from a `SKILL.md` front-matter block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub user_invocable: Option<bool>,
}

/// Split a document into its front-matter block and Markdown body.
pub fn split_frontmatter(content: &str) -> Result<(String, String)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim();

    if !trimmed.starts_with("---") {
        return Err(HookError::Frontmatter(
            "document must start with front matter (---)".into(),
        ));
    }

    let after_first = &trimmed[3..];
    let end_pos = after_first
        .find("\n---")
        .ok_or_else(|| HookError::Frontmatter("missing closing --- for front matter".into()))?;

    let frontmatter = after_first[..end_pos].trim_matches(['\r', '\n']).to_string();
    let body = after_first[end_pos + 4..].trim().to_string();

    Ok((frontmatter, body))
}

/// Parse simple `key: value` front matter.
///
/// Supports `name`, `description`, `user-invocable`. Indented lines continue
/// the previous key, which covers YAML block scalars (`|`, `>`) and wrapped
/// plain values.
pub fn parse_frontmatter(yaml: &str) -> Frontmatter {
    let mut entries: Vec<(String, Vec<String>, bool)> = Vec::new();

    for line in yaml.lines() {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let indented = line.starts_with([' ', '\t']);
        if indented {
            if let Some((_, lines, _)) = entries.last_mut() {
                lines.push(line.trim().to_string());
            }
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim();
            let literal = value.starts_with('|');
            let first = if matches!(value, "|" | "|-" | "|+" | ">" | ">-" | ">+") {
                Vec::new()
            } else {
                vec![value.to_string()]
            };
            entries.push((key.trim().to_string(), first, literal));
        }
    }

    let mut fm = Frontmatter::default();
    for (key, lines, literal) in entries {
        let joined = if literal {
            lines.join("\n")
        } else {
            lines.join(" ")
        };
        let value = unquote(joined.trim());
        match key.as_str() {
            "name" => fm.name = Some(value).filter(|v| !v.is_empty()),
            "description" => fm.description = Some(value).filter(|v| !v.is_empty()),
            "user-invocable" | "user_invocable" | "userInvocable" => {
                fm.user_invocable = parse_bool(&value);
            }
            _ => {}
        }
    }
    fm
}

/// Build a descriptor from `SKILL.md` content.
///
/// `fallback_name` (usually the skill's directory name) is used when the
/// front matter has no `name`. A missing description is an error.
pub fn parse_skill_document(content: &str, fallback_name: &str) -> Result<SkillDescriptor> {
    let (frontmatter, _body) = split_frontmatter(content)?;
    let fm = parse_frontmatter(&frontmatter);

    let name = fm
        .name
        .or_else(|| Some(fallback_name.to_string()).filter(|n| !n.is_empty()))
        .ok_or_else(|| HookError::Frontmatter("skill name is empty".into()))?;
    let description = fm
        .description
        .ok_or_else(|| HookError::Frontmatter(format!("skill '{name}' has no description")))?;

    Ok(SkillDescriptor {
        keywords: extract_trigger_keywords(&description),
        name,
        description,
        patterns: Vec::new(),
        priority: Priority::Medium,
        user_invocable: fm.user_invocable.unwrap_or(true),
        source_path: None,
    })
}

/// Read and parse a `SKILL.md` file.
pub fn read_skill_file(path: &Path) -> Result<SkillDescriptor> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        HookError::Skill(format!("failed to read {}: {}", path.display(), e))
    })?;

    let fallback_name = path
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut descriptor = parse_skill_document(&content, &fallback_name)?;
    descriptor.source_path = Some(path.to_path_buf());
    Ok(descriptor)
}

/// Remove surrounding quotes from a YAML value.
fn unquote(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
    {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => Some(true),
        "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
