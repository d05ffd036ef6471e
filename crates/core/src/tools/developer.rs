//! Developer utilities.

use super::Toolbox;
use crate::error::{GENERIC_FAILURE, Result};
use crate::schema::{Schema, StructuredOutput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegexSuggestion {
    pub pattern: String,
    pub explanation: String,
    pub matching_examples: Vec<String>,
}

impl StructuredOutput for RegexSuggestion {
    fn schema() -> Schema {
        Schema::object()
            .property("pattern", Schema::string())
            .property("explanation", Schema::string())
            .property("matching_examples", Schema::strings())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewIssue {
    pub severity: Severity,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeReview {
    pub score: f64,
    pub summary: String,
    pub issues: Vec<ReviewIssue>,
}

impl StructuredOutput for CodeReview {
    fn schema() -> Schema {
        Schema::object()
            .property("score", Schema::number().describe("Code quality from 0 to 10"))
            .property("summary", Schema::string())
            .property(
                "issues",
                Schema::array(
                    Schema::object()
                        .property("severity", Schema::string().one_of(["low", "medium", "high"]))
                        .property("description", Schema::string()),
                ),
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CronExpression {
    pub expression: String,
    pub explanation: String,
}

impl StructuredOutput for CronExpression {
    fn schema() -> Schema {
        Schema::object()
            .property("expression", Schema::string().describe("Standard five-field cron syntax"))
            .property("explanation", Schema::string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub name: String,
    pub hex: String,
}

impl StructuredOutput for PaletteColor {
    fn schema() -> Schema {
        Schema::object()
            .property("name", Schema::string())
            .property("hex", Schema::string().describe("Hex code such as #1A2B3C"))
    }
}

impl Toolbox {
    pub async fn explain_code(&self, code: &str, language: &str) -> Result<String> {
        let prompt = format!(
            "Explain what the following {language} code does, step by step, in plain language.\n\n\
             ```{language}\n{code}\n```"
        );
        self.dispatcher().generate_text(prompt, GENERIC_FAILURE).await
    }

    pub async fn regex(&self, description: &str) -> Result<RegexSuggestion> {
        let prompt = format!(
            "Write a regular expression that matches: {description}. Explain how it works and give \
             three example strings it matches."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn sql_query(&self, description: &str, dialect: &str) -> Result<String> {
        let prompt = format!(
            "Write a {dialect} SQL query for the following request. Return only the SQL.\n\n\
             {description}"
        );
        self.dispatcher().generate_text(prompt, GENERIC_FAILURE).await
    }

    pub async fn commit_message(&self, changes: &str) -> Result<String> {
        let prompt = format!(
            "Write a concise git commit message for the following changes. Use an imperative \
             subject line under 72 characters, a blank line, then a short body.\n\n{changes}"
        );
        self.dispatcher().generate_text(prompt, GENERIC_FAILURE).await
    }

    pub async fn review_code(&self, code: &str) -> Result<CodeReview> {
        let prompt = format!(
            "Review the following code for bugs, readability and performance. Score it from 0 to \
             10, summarise your review, and list individual issues with a severity of low, medium \
             or high.\n\n{code}"
        );
        self.dispatcher()
            .generate_json(prompt, "Failed to review code. Please try again.")
            .await
    }

    pub async fn cron_expression(&self, schedule: &str) -> Result<CronExpression> {
        let prompt = format!(
            "Convert this schedule into a standard five-field cron expression and explain each \
             field: {schedule}"
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn color_palette(&self, theme: &str) -> Result<Vec<PaletteColor>> {
        let prompt = format!(
            "Create a harmonious 5-color palette for the theme \"{theme}\". Name each color and \
             give its hex code."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }
}
