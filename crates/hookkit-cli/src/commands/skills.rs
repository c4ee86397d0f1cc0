use hookkit_skills::{SkillSuggester, Suggestion, resolve_prompt};

use super::HookContext;

pub fn suggest_skills(ctx: &HookContext) -> Suggestion {
    let prompt = resolve_prompt(&ctx.payload);
    let suggester = SkillSuggester::from_config(&ctx.project_dir, &ctx.config.skills);
    suggester.suggest(prompt.as_deref())
}
