use hookkit_config::{AreaConfig, default_areas};
use hookkit_core::{HookError, Result};
use regex::Regex;
use tracing::warn;

/// Tag given to files no area claims.
pub const OTHER_AREA: &str = "other";

struct CompiledArea {
    name: String,
    patterns: Vec<Regex>,
}

/// Classifies file paths into project areas.
///
/// Areas are tested in table order and a file may land in several of them.
/// Patterns run against the path with `\` normalized to `/`.
pub struct AreaClassifier {
    areas: Vec<CompiledArea>,
}

impl AreaClassifier {
    /// Compile an area table. Patterns that fail to compile are dropped.
    pub fn new(table: &[AreaConfig]) -> Self {
        let areas = table
            .iter()
            .map(|area| CompiledArea {
                name: area.name.clone(),
                patterns: area
                    .patterns
                    .iter()
                    .filter_map(|p| match compile(p) {
                        Ok(re) => Some(re),
                        Err(e) => {
                            warn!(area = %area.name, error = %e, "skipping area pattern");
                            None
                        }
                    })
                    .collect(),
            })
            .collect();
        Self { areas }
    }

    pub fn builtin() -> Self {
        Self::new(&default_areas())
    }

    /// Area tags for `path`, in table order. Never empty: unmatched paths
    /// are tagged [`OTHER_AREA`].
    pub fn classify(&self, path: &str) -> Vec<String> {
        let normalized = path.replace('\\', "/");
        let mut tags: Vec<String> = Vec::new();

        for area in &self.areas {
            if area.patterns.iter().any(|re| re.is_match(&normalized))
                && !tags.iter().any(|t| t == &area.name)
            {
                tags.push(area.name.clone());
            }
        }

        if tags.is_empty() {
            tags.push(OTHER_AREA.to_string());
        }
        tags
    }

    pub fn area_names(&self) -> impl Iterator<Item = &str> {
        self.areas.iter().map(|a| a.name.as_str())
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| HookError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}
