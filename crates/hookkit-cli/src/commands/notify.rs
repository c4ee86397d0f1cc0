use hookkit_notify::{Notifier, PlaybackOutcome, Player};
use tracing::debug;

use super::HookContext;

/// Play the completion sound. The outcome is informational only.
pub async fn notify_complete(ctx: &HookContext) -> PlaybackOutcome {
    let notifier = Notifier::from_config(&ctx.project_dir, &ctx.config.notify);
    finish(notifier).await
}

/// Play the completion sound through `player` instead of the platform one.
pub async fn notify_complete_with(ctx: &HookContext, player: Box<dyn Player>) -> PlaybackOutcome {
    let notifier = Notifier::from_config(&ctx.project_dir, &ctx.config.notify).with_player(player);
    finish(notifier).await
}

async fn finish(notifier: Notifier) -> PlaybackOutcome {
    let outcome = notifier.notify().await;
    debug!(?outcome, "notify-complete finished");
    outcome
}
