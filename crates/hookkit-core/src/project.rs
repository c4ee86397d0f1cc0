use std::path::{Path, PathBuf};

use crate::payload::HookPayload;

/// Environment variable the host sets to the project root.
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

/// Resolve the project root: `CLAUDE_PROJECT_DIR` > payload `cwd` > process cwd.
pub fn resolve_project_dir(payload: &HookPayload) -> PathBuf {
    resolve_project_dir_with(payload, |name| std::env::var(name).ok(), || {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    })
}

pub fn resolve_project_dir_with<E, C>(payload: &HookPayload, env: E, cwd: C) -> PathBuf
where
    E: Fn(&str) -> Option<String>,
    C: FnOnce() -> PathBuf,
{
    if let Some(dir) = env(PROJECT_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    if let Some(dir) = payload.str_field(&["cwd"]) {
        return PathBuf::from(dir);
    }
    cwd()
}

/// Anchor a configured path at the project root unless it is already absolute.
pub fn resolve_in_project(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Render `path` relative to `root` when it lives underneath it.
pub fn display_relative(root: &Path, path: &str) -> String {
    match Path::new(path).strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().into_owned(),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn env_wins_over_payload_cwd() {
        let payload = HookPayload::from_json(json!({ "cwd": "/from/payload" }));
        let dir = resolve_project_dir_with(
            &payload,
            |_| Some("/from/env".to_string()),
            || PathBuf::from("/cwd"),
        );
        assert_eq!(dir, PathBuf::from("/from/env"));
    }

    #[test]
    fn payload_cwd_then_process_cwd() {
        let payload = HookPayload::from_json(json!({ "cwd": "/from/payload" }));
        let dir =
            resolve_project_dir_with(&payload, |_| Some(String::new()), || PathBuf::from("/cwd"));
        assert_eq!(dir, PathBuf::from("/from/payload"));

        let dir =
            resolve_project_dir_with(&HookPayload::default(), |_| None, || PathBuf::from("/cwd"));
        assert_eq!(dir, PathBuf::from("/cwd"));
    }

    #[test]
    fn relative_display() {
        let root = Path::new("/repo");
        assert_eq!(display_relative(root, "/repo/apps/server/main.ts"), "apps/server/main.ts");
        assert_eq!(display_relative(root, "/elsewhere/notes.md"), "/elsewhere/notes.md");
        assert_eq!(display_relative(root, "src/lib.rs"), "src/lib.rs");
    }

    #[test]
    fn configured_paths_anchor_at_root() {
        let root = Path::new("/repo");
        assert_eq!(
            resolve_in_project(root, Path::new(".claude/rules")),
            PathBuf::from("/repo/.claude/rules")
        );
        assert_eq!(
            resolve_in_project(root, Path::new("/abs/rules")),
            PathBuf::from("/abs/rules")
        );
    }
}
