use serde_json::Value;

/// The event a host pipes to a hook on stdin.
///
/// Keeps the raw text alongside the parsed JSON, since some hooks accept
/// plain text when the payload is not structured.
#[derive(Debug, Clone, Default)]
pub struct HookPayload {
    raw: String,
    json: Option<Value>,
}

impl HookPayload {
    /// Parse raw stdin text. Blank input and invalid JSON are both kept,
    /// with `json` left empty.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let json = if raw.trim().is_empty() {
            None
        } else {
            serde_json::from_str::<Value>(&raw).ok()
        };
        Self { raw, json }
    }

    /// Build a payload from an already-parsed JSON value.
    pub fn from_json(value: Value) -> Self {
        Self {
            raw: value.to_string(),
            json: Some(value),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    pub fn is_json(&self) -> bool {
        self.json.is_some()
    }

    pub fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Look up a string at a nested key path, e.g. `["tool_input", "file_path"]`.
    /// Empty strings and non-string values count as absent.
    pub fn str_field(&self, path: &[&str]) -> Option<&str> {
        let mut node = self.json.as_ref()?;
        for key in path {
            node = node.get(*key)?;
        }
        node.as_str().filter(|s| !s.is_empty())
    }

    /// First non-empty string among several key paths, in order.
    pub fn first_field(&self, paths: &[&[&str]]) -> Option<String> {
        paths
            .iter()
            .find_map(|path| self.str_field(path))
            .map(str::to_string)
    }
}

/// First non-empty value among the named environment variables.
pub fn env_fallback(names: &[&str]) -> Option<String> {
    env_fallback_with(names, |name| std::env::var(name).ok())
}

/// Same as [`env_fallback`] with an injectable lookup.
pub fn env_fallback_with<F>(names: &[&str], lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .find_map(|name| lookup(name).filter(|v| !v.is_empty()))
}
