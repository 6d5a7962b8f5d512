//! Prompt construction for the ranking oracle

use crate::models::RankableTask;

/// Instruction used when the caller supplies no custom prompt
const DEFAULT_INSTRUCTION: &str =
    "Prioritize student tasks by urgency, module weight, and required effort.";

/// Build the ranking prompt
///
/// Instructs the oracle to answer with JSON only, in the exact shape the
/// normalizer expects, and embeds the task list as JSON.
#[must_use]
pub fn build_priority_prompt(tasks: &[RankableTask], custom_prompt: &str) -> String {
    let instruction = if custom_prompt.trim().is_empty() {
        DEFAULT_INSTRUCTION
    } else {
        custom_prompt.trim()
    };

    let task_json =
        serde_json::to_string_pretty(tasks).unwrap_or_else(|_| "[]".to_string());

    format!(
        "{instruction}\n\n\
         Return JSON only in this shape:\n\
         {{\n\
         \x20 \"summary\": \"short summary\",\n\
         \x20 \"rated_tasks\": [\n\
         \x20   {{\n\
         \x20     \"id\": \"task-id\",\n\
         \x20     \"title\": \"task title\",\n\
         \x20     \"priority_score\": 0,\n\
         \x20     \"priority_band\": \"critical|high|medium|low\",\n\
         \x20     \"reason\": \"short reason\"\n\
         \x20   }}\n\
         \x20 ]\n\
         }}\n\n\
         Tasks:\n{task_json}\n"
    )
}
