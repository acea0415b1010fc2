// file: src/prompts/keyword.rs
// description: few-shot prompt turning a question into PubMed search keywords

use crate::utils::template::PromptTemplate;

const KEYWORD_TEMPLATE: &str = r#"
Your task is to convert the following question into 3 keywords that can be used to find relevant medical research papers on PubMed.
Here is an examples:
question: "What are the latest treatments for major depressive disorder?"
keywords:
Antidepressive Agents
Depressive Disorder, Major
Treatment-Resistant depression
---
question: {{ question }}
keywords:
"#;

#[derive(Debug, Clone, Copy)]
pub struct KeywordPrompt<'a> {
    pub question: &'a str,
}

impl<'a> KeywordPrompt<'a> {
    pub fn new(question: &'a str) -> Self {
        Self { question }
    }

    pub fn render(&self) -> String {
        PromptTemplate::new(KEYWORD_TEMPLATE).render(&[("question", self.question)])
    }
}
