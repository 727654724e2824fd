use crate::models::{GeneratedSections, SectionSpec, Template};

use super::llm::TextCompleter;

pub const SYSTEM_PROMPT: &str = "You are an academic writing assistant. Use the provided proposal text and the user's notes \
to write high-quality academic sections. Respect the section titles and lengths from the template.";

/// Prompt for a single section.
pub fn build_user_prompt(section: &SectionSpec, proposal_text: &str, notes: &str) -> String {
    format!(
        "Write the section titled \"{title}\". Target length: {words} words.\n\n\
         Guidance: {guidance}\n\n\
         Proposal Text:\n{proposal_text}\n\n\
         Additional Notes:\n{notes}\n\n\
         If information is missing, write a clear placeholder and suggest what the student should add.",
        title = section.title,
        words = section.words,
        guidance = section.guidance,
    )
}

pub fn error_placeholder(error: &impl std::fmt::Display) -> String {
    format!("[ERROR generating section: {error}]")
}

/// Generate every template section in order, one remote call each.
///
/// A failed call never aborts the run: that section gets a placeholder body.
pub async fn generate_sections<C: TextCompleter>(
    client: &C,
    template: &Template,
    proposal_text: &str,
    notes: &str,
) -> GeneratedSections {
    let mut sections = GeneratedSections::new();

    for section in &template.sections {
        let user_prompt = build_user_prompt(section, proposal_text, notes);
        let body = match client.complete(SYSTEM_PROMPT, &user_prompt).await {
            Ok(text) => {
                log::info!("Generated section \"{}\" ({} chars)", section.title, text.len());
                text
            }
            Err(e) => {
                log::warn!("Section \"{}\" failed: {e}", section.title);
                error_placeholder(&e)
            }
        };
        sections.insert(section.title.clone(), body);
    }

    sections
}
