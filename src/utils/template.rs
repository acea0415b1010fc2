// file: src/utils/template.rs
// description: placeholder substitution for prompt templates
// reference: Internal code standards

/// A template with `{{ name }}` placeholders. Unknown placeholders are left
/// in place; values are inserted without escaping.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut result = self.template.clone();

        for (key, value) in values {
            result = result.replace(&placeholder(key), value);
        }

        result
    }
}

fn placeholder(key: &str) -> String {
    format!("{{{{ {} }}}}", key)
}
