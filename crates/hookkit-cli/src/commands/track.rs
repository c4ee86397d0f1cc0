use hookkit_tracker::{EditTracker, resolve_file_path_with};
use tracing::debug;

use super::HookContext;

/// Record the edited file. Returns the status block to print, or `None`
/// when neither the payload nor the environment names a file.
pub fn track_edit(ctx: &HookContext) -> Option<String> {
    track_edit_with(ctx, |name| std::env::var(name).ok())
}

/// Same as [`track_edit`], with the environment lookup supplied by the caller.
pub fn track_edit_with<F>(ctx: &HookContext, env: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(file_path) = resolve_file_path_with(&ctx.payload, env) else {
        debug!("no file path in payload, nothing to track");
        return None;
    };
    let tracker = EditTracker::new(&ctx.project_dir, &ctx.config.tracker);
    Some(tracker.track(&file_path).render())
}
