//! Prompt composition
//!
//! Turns the user's free-text prompt plus their structured style answers
//! into the final prompt sent to the image model. Answers the user left
//! blank contribute nothing.

use serde::{Deserialize, Serialize};

/// Structured style answers collected alongside the free-text prompt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromptAnswers {
    pub category: Option<String>,
    pub mood: Option<String>,
    pub theme: Option<String>,
    pub primary_color: Option<String>,
    pub include_text: Option<String>,
    pub text_style: Option<String>,
    pub thumbnail_style: Option<String>,
    pub custom_prompt: Option<String>,
}

impl PromptAnswers {
    pub fn is_empty(&self) -> bool {
        self.requirement_lines().is_empty()
    }

    /// Labeled requirement lines, in their fixed order
    fn requirement_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(category) = filled(&self.category) {
            lines.push(format!("Category: {}", category));
        }
        if let Some(mood) = filled(&self.mood) {
            lines.push(format!("Mood: {}", mood));
        }
        if let Some(theme) = filled(&self.theme) {
            lines.push(format!("Theme: {}", theme));
        }
        if let Some(color) = filled(&self.primary_color) {
            lines.push(format!("Primary color: {}", color));
        }
        match filled(&self.include_text) {
            Some("Yes") => {
                if let Some(style) = filled(&self.text_style) {
                    lines.push(format!("Text style: {}", style));
                }
            }
            Some("No") => lines.push("No text overlay".to_string()),
            _ => {}
        }
        if let Some(style) = filled(&self.thumbnail_style) {
            lines.push(format!("Style: {}", style));
        }
        if let Some(custom) = filled(&self.custom_prompt) {
            lines.push(custom.to_string());
        }

        lines
    }
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Append the answers as an "Additional requirements" block.
///
/// With no answers set, the base prompt passes through untouched.
pub fn compose_prompt(base: &str, answers: &PromptAnswers) -> String {
    let lines = answers.requirement_lines();
    if lines.is_empty() {
        return base.to_string();
    }

    format!(
        "{}\n\nAdditional requirements:\n{}",
        base,
        lines.join("\n")
    )
}
