//! Prompt templating with simple `{{placeholder}}` substitution.
//!
//! Given a text `template` and a set of named inputs, replaces every
//! `{{ key }}` occurrence with the matching input value. Unknown
//! placeholders are an error so a typo never reaches the model.
use std::collections::HashMap;

use crate::error::{AppError, AppResult};

#[derive(Debug, Default, Clone)]
pub struct PromptConstructor {
    inputs: HashMap<String, String>,
}

impl PromptConstructor {
    pub fn new() -> Self {
        PromptConstructor::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.inputs.insert(key.to_string(), value.into());
        self
    }

    /// Construct a prompt by substituting placeholders inside `template`.
    pub fn construct_prompt(&self, template: &str) -> AppResult<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or_else(|| AppError::Validation("Unclosed placeholder in prompt template".to_string()))?;
            let key = after[..end].trim();
            let value = self
                .inputs
                .get(key)
                .ok_or_else(|| AppError::Validation(format!("Missing input for placeholder: {}", key)))?;
            out.push_str(value);
            rest = &after[end + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}
