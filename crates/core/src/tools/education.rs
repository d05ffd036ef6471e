//! Study aids.

use super::Toolbox;
use crate::error::{GENERIC_FAILURE, Result};
use crate::schema::{Schema, StructuredOutput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathSolution {
    pub steps: Vec<String>,
    pub answer: String,
}

impl StructuredOutput for MathSolution {
    fn schema() -> Schema {
        Schema::object()
            .property("steps", Schema::strings())
            .property("answer", Schema::string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub answer_index: u32,
    pub explanation: String,
}

impl StructuredOutput for QuizQuestion {
    fn schema() -> Schema {
        Schema::object()
            .property("question", Schema::string())
            .property("options", Schema::strings())
            .property("answer_index", Schema::integer().describe("Zero-based index of the correct option"))
            .property("explanation", Schema::string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

impl StructuredOutput for Flashcard {
    fn schema() -> Schema {
        Schema::object()
            .property("front", Schema::string())
            .property("back", Schema::string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordDefinition {
    pub word: String,
    pub part_of_speech: String,
    pub definition: String,
    pub examples: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl StructuredOutput for WordDefinition {
    fn schema() -> Schema {
        Schema::object()
            .property("word", Schema::string())
            .property("part_of_speech", Schema::string())
            .property("definition", Schema::string())
            .property("examples", Schema::strings())
            .optional_property("synonyms", Schema::strings())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub summary: String,
    pub date: String,
    pub key_figures: Vec<String>,
    pub significance: String,
}

impl StructuredOutput for HistorySummary {
    fn schema() -> Schema {
        Schema::object()
            .property("summary", Schema::string())
            .property("date", Schema::string().describe("When it happened, as precisely as known"))
            .property("key_figures", Schema::strings())
            .property("significance", Schema::string())
    }
}

impl Toolbox {
    /// Returns the balanced equation exactly as the model wrote it.
    pub async fn balance_equation(&self, equation: &str) -> Result<String> {
        let prompt = format!(
            "Balance the following chemical equation. Return only the balanced equation, \
             nothing else.\n\n{equation}"
        );
        self.dispatcher().generate_text(prompt, GENERIC_FAILURE).await
    }

    pub async fn solve_math(&self, problem: &str) -> Result<MathSolution> {
        let prompt = format!(
            "Solve the following math problem step by step. List each step separately and give \
             the final answer.\n\nProblem: {problem}"
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn quiz(&self, topic: &str, question_count: u32) -> Result<Vec<QuizQuestion>> {
        let prompt = format!(
            "Create a multiple-choice quiz with {question_count} questions about {topic}. \
             Each question has 4 options, exactly one correct. Give the zero-based index of the \
             correct option and a one-sentence explanation."
        );
        self.dispatcher()
            .generate_json(prompt, "Failed to generate quiz. Please try again.")
            .await
    }

    pub async fn flashcards(&self, topic: &str, card_count: u32) -> Result<Vec<Flashcard>> {
        let prompt = format!(
            "Create {card_count} study flashcards about {topic}. The front holds a term or question, \
             the back a concise answer."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn define_word(&self, word: &str) -> Result<WordDefinition> {
        let prompt = format!(
            "Define the word \"{word}\". Give its part of speech, a clear definition, two example \
             sentences and a few synonyms."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn explain_simply(&self, concept: &str) -> Result<String> {
        let prompt = format!(
            "Explain {concept} as if I were five years old. Use simple words and a friendly \
             analogy. Keep it to two short paragraphs."
        );
        self.dispatcher().generate_text(prompt, GENERIC_FAILURE).await
    }

    pub async fn historical_event(&self, event: &str) -> Result<HistorySummary> {
        let prompt = format!(
            "Summarize the historical event \"{event}\": what happened, when, the key people \
             involved, and why it matters."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }
}
