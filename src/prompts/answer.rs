// file: src/prompts/answer.rs
// description: prompt asking the model to answer from fetched abstracts

use crate::models::Document;
use crate::utils::template::PromptTemplate;

const ANSWER_HEADER: &str = r#"
Answer the question truthfully based on the given documents.
If the documents don't contain an answer, use your existing knowledge base.

q: {{ question }}
Articles:
"#;

#[derive(Debug, Clone, Copy)]
pub struct AnswerPrompt<'a> {
    pub question: &'a str,
    pub articles: &'a [Document],
}

impl<'a> AnswerPrompt<'a> {
    pub fn new(question: &'a str, articles: &'a [Document]) -> Self {
        Self { question, articles }
    }

    /// Articles are embedded in list order as content, keywords, title.
    pub fn render(&self) -> String {
        let mut prompt = PromptTemplate::new(ANSWER_HEADER).render(&[("question", self.question)]);

        for article in self.articles {
            prompt.push_str(&format!(
                "\n  {}\n\n  keywords: {}\n\n  title: {}\n\n",
                article.content,
                article.keywords().join(", "),
                article.title()
            ));
        }

        prompt.push('\n');
        prompt
    }
}
