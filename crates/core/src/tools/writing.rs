//! Writing assistants: rewriting, summarising, drafting.

use super::Toolbox;
use crate::error::{GENERIC_FAILURE, Result};
use crate::schema::{Schema, StructuredOutput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarReport {
    pub corrected: String,
    /// One human-readable line per change made.
    pub changes: Vec<String>,
}

impl StructuredOutput for GrammarReport {
    fn schema() -> Schema {
        Schema::object()
            .property("corrected", Schema::string())
            .property("changes", Schema::strings())
    }
}

/// A two-level outline: sections, each with its points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub title: String,
    pub sections: Vec<OutlineSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineSection {
    pub heading: String,
    pub points: Vec<String>,
}

impl StructuredOutput for Outline {
    fn schema() -> Schema {
        Schema::object()
            .property("title", Schema::string())
            .property(
                "sections",
                Schema::array(
                    Schema::object()
                        .property("heading", Schema::string())
                        .property("points", Schema::strings()),
                ),
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub story: String,
}

impl StructuredOutput for Story {
    fn schema() -> Schema {
        Schema::object()
            .property("title", Schema::string())
            .property("story", Schema::string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    pub subject: String,
    pub body: String,
}

impl StructuredOutput for Email {
    fn schema() -> Schema {
        Schema::object()
            .property("subject", Schema::string())
            .property("body", Schema::string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lyrics {
    pub title: String,
    pub verses: Vec<String>,
    pub chorus: String,
}

impl StructuredOutput for Lyrics {
    fn schema() -> Schema {
        Schema::object()
            .property("title", Schema::string())
            .property("verses", Schema::strings().describe("Each verse as one string, lines separated by newlines"))
            .property("chorus", Schema::string())
    }
}

impl Toolbox {
    pub async fn paraphrase(&self, text: &str, style: &str) -> Result<String> {
        let prompt = format!(
            "Rewrite the following text in a {style} style. Keep the original meaning. \
             Return only the rewritten text.\n\nText:\n{text}"
        );
        self.dispatcher().generate_text(prompt, GENERIC_FAILURE).await
    }

    /// `length` is free-form, e.g. "one sentence" or "three paragraphs".
    pub async fn summarize(&self, text: &str, length: &str) -> Result<String> {
        let prompt = format!(
            "Summarize the following text. The summary should be {length} long and capture \
             the key points.\n\nText:\n{text}"
        );
        self.dispatcher().generate_text(prompt, GENERIC_FAILURE).await
    }

    pub async fn fix_grammar(&self, text: &str) -> Result<GrammarReport> {
        let prompt = format!(
            "Correct the grammar, spelling and punctuation of the following text without changing \
             its meaning or tone. Return the corrected text and a short list describing each change.\n\n\
             Text:\n{text}"
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let prompt = format!(
            "Translate the following text into {target_language}. Return only the translation.\n\n{text}"
        );
        self.dispatcher()
            .generate_text(prompt, "Failed to translate text. Please try again.")
            .await
    }

    pub async fn essay_outline(&self, topic: &str) -> Result<Outline> {
        let prompt = format!(
            "Create a detailed essay outline on the topic \"{topic}\". Give the essay a title and \
             4 to 6 sections, each with a heading and 2 to 4 supporting points."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn write_poem(&self, topic: &str, style: &str) -> Result<String> {
        let prompt = format!("Write a {style} poem about {topic}. Return only the poem.");
        self.dispatcher().generate_text(prompt, GENERIC_FAILURE).await
    }

    pub async fn short_story(&self, premise: &str, genre: &str) -> Result<Story> {
        let prompt = format!(
            "Write a short {genre} story of about 400 words based on this premise: {premise}. \
             Give it a title."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn write_email(&self, purpose: &str, recipient: &str, tone: &str) -> Result<Email> {
        let prompt = format!(
            "Write a {tone} email to {recipient}. Purpose of the email: {purpose}. \
             Provide a subject line and the email body."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn cover_letter(&self, job_title: &str, company: &str, experience: &str) -> Result<String> {
        let prompt = format!(
            "Write a professional cover letter for the position of {job_title} at {company}. \
             The applicant's relevant experience: {experience}. Keep it under 350 words."
        );
        self.dispatcher().generate_text(prompt, GENERIC_FAILURE).await
    }

    pub async fn resume_bullets(&self, role: &str, achievements: &str) -> Result<Vec<String>> {
        let prompt = format!(
            "Turn the following achievements of a {role} into 4 to 6 strong resume bullet points. \
             Start each with an action verb and quantify results where possible.\n\n\
             Achievements:\n{achievements}"
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn song_lyrics(&self, theme: &str, genre: &str) -> Result<Lyrics> {
        let prompt = format!(
            "Write original {genre} song lyrics about {theme}. Include a title, two or three verses \
             and a chorus."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }
}
