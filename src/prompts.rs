//! Prompt for the `/analyze` passthrough.
//!
//! Kept in one place so the wording can change without touching the
//! provider plumbing in [`crate::pipeline::llm`], and so tests can inspect it.

/// Instructions sent ahead of the caller's text.
pub const ANALYSIS_INSTRUCTIONS: &str = r#"You are an experienced social media editor. Review the post below and respond in Markdown with these sections:

1. TONE
   - Describe the overall tone (e.g. formal, casual, promotional, humorous)
   - Note whether the tone fits a social media audience

2. CLARITY
   - List sentences or phrases that are confusing, wordy, or ambiguous
   - Point out spelling and grammar problems

3. ENGAGEMENT
   - Suggest concrete changes that would increase likes, shares, and comments
   - Suggest hashtags or a call to action where appropriate

4. REWRITE
   - Provide an improved version of the full post that applies your suggestions"#;

/// Build the full prompt, embedding `text` verbatim.
pub fn analysis_prompt(text: &str) -> String {
    format!("{}\n\nPost:\n\"\"\"\n{}\n\"\"\"", ANALYSIS_INSTRUCTIONS, text)
}
