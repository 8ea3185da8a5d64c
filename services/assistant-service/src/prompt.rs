// System prompt and conversation assembly for the provider chain
use shared::legal::{guidance_for, lang_name, Category, DEFAULT_LANG};

use crate::providers::{ChatPrompt, ChatTurn};
use crate::domain::ChatRole;

pub const BASE_SYSTEM_PROMPT: &str = "You are VidhiSahayak, a helpful legal assistant for India. Be concise, factual, cite sources when possible, and suggest next steps. Provide general information, not legal advice.";

pub fn language_instruction(lang: &str) -> String {
    let name = lang_name(lang);
    if lang == DEFAULT_LANG {
        format!("Reply in {}.", name)
    } else {
        format!(
            "Reply in {}. Keep statute names, section numbers and official document names in English where that helps the user.",
            name
        )
    }
}

fn push_list(out: &mut String, label: &str, items: &[&str]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{}: {}", label, items.join("; ")));
}

/// Category context appended when the message matched a category
pub fn guidance_block(category: &Category) -> String {
    let mut block = format!(
        "The user is asking about: {} ({})",
        category.name, category.create_hint
    );

    if let Some(g) = guidance_for(category.slug) {
        push_list(&mut block, "Where to get it", g.where_to_get);
        push_list(&mut block, "Documents required", g.type_required);
        push_list(&mut block, "Who can verify", g.verification_contacts);
        push_list(&mut block, "Where to submit", g.submission_offices);
        push_list(&mut block, "Printing", g.print_guidance);

        if !g.steps.is_empty() {
            block.push_str("\nSteps:");
            for (i, step) in g.steps.iter().enumerate() {
                block.push_str(&format!("\n{}. {}", i + 1, step));
            }
        }
    }

    block
}

pub fn build_system_prompt(lang: &str, category: Option<&Category>) -> String {
    let mut prompt = format!("{}\n\n{}", BASE_SYSTEM_PROMPT, language_instruction(lang));
    if let Some(category) = category {
        prompt.push_str("\n\n");
        prompt.push_str(&guidance_block(category));
    }
    prompt
}

/// Make sure the conversation ends with the current user message
pub fn with_current_turn(mut history: Vec<ChatTurn>, current: &str) -> Vec<ChatTurn> {
    let already_last = history
        .last()
        .is_some_and(|turn| turn.role == ChatRole::User && turn.content == current);

    if !already_last {
        history.push(ChatTurn::user(current));
    }
    history
}

pub fn build_prompt(
    system: String,
    history: Vec<ChatTurn>,
    current: &str,
    temperature: f32,
    max_output_tokens: u32,
) -> ChatPrompt {
    ChatPrompt {
        system,
        turns: with_current_turn(history, current),
        temperature,
        max_output_tokens,
    }
}

/// Deterministic answer used when no provider produced text
pub fn fallback_reply(text: &str) -> String {
    format!(
        "I heard: \"{}\". Here’s a quick next step: tell me the category or document you need (e.g., rental agreement, affidavit, IPC query), and I’ll guide you with steps and options.",
        text
    )
}
