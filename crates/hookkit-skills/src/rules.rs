use std::path::Path;
use tracing::debug;

/// List the rule documents under `dir`.
///
/// Walks depth-first with entries in name order and returns each `.md`
/// file's path relative to `dir`, `/`-separated and without the extension
/// (e.g. `backend/api-style`). A missing or unreadable directory yields
/// an empty list.
pub fn scan_rules(dir: &Path) -> Vec<String> {
    let mut names = Vec::new();
    walk(dir, "", &mut names);
    names
}

fn walk(dir: &Path, prefix: &str, names: &mut Vec<String>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(?dir, error = %e, "rules directory not readable");
            return;
        }
    };

    let mut paths: Vec<_> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        if path.is_dir() {
            walk(&path, &format!("{prefix}{file_name}/"), names);
        } else if path.extension().is_some_and(|ext| ext == "md") {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or(file_name);
            names.push(format!("{prefix}{stem}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_rules_depth_first() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("backend").join("db")).unwrap();
        std::fs::write(root.join("style.md"), "x").unwrap();
        std::fs::write(root.join("backend").join("api.md"), "x").unwrap();
        std::fs::write(root.join("backend").join("db").join("migrations.md"), "x").unwrap();
        std::fs::write(root.join("backend").join("notes.txt"), "x").unwrap();
        std::fs::write(root.join("commits.md"), "x").unwrap();

        assert_eq!(
            scan_rules(root),
            vec!["backend/api", "backend/db/migrations", "commits", "style"]
        );
    }

    #[test]
    fn missing_dir_is_empty() {
        assert!(scan_rules(Path::new("/nonexistent/rules")).is_empty());
    }
}
