//! Name-based access to every tool.
//!
//! Front ends (the CLI, or any form-driven UI) look tools up by their
//! kebab-case name, collect the listed fields and images, and hand them to
//! [`Toolbox::run_tool`]. Inputs are checked before anything is sent.

use crate::error::{AppError, Result};
use crate::media::InlineImage;
use crate::tools::Toolbox;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Writing,
    Marketing,
    Education,
    Lifestyle,
    Developer,
    Imaging,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Writing => "writing",
            Category::Marketing => "marketing",
            Category::Education => "education",
            Category::Lifestyle => "lifestyle",
            Category::Developer => "developer",
            Category::Imaging => "imaging",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        TOOLS
            .iter()
            .map(|tool| tool.category)
            .find(|category| category.as_str().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub category: Category,
    pub summary: &'static str,
    /// Required text fields, in prompt order.
    pub fields: &'static [&'static str],
    /// Number of input images the tool expects.
    pub images: usize,
}

const fn tool(
    name: &'static str,
    category: Category,
    summary: &'static str,
    fields: &'static [&'static str],
    images: usize,
) -> ToolSpec {
    ToolSpec {
        name,
        category,
        summary,
        fields,
        images,
    }
}

use Category::*;

pub static TOOLS: &[ToolSpec] = &[
    tool("paraphrase", Writing, "Rewrite text in another style", &["text", "style"], 0),
    tool("summarize", Writing, "Summarize text to a given length", &["text", "length"], 0),
    tool("fix-grammar", Writing, "Correct grammar and list the changes", &["text"], 0),
    tool("translate", Writing, "Translate text into another language", &["text", "language"], 0),
    tool("essay-outline", Writing, "Two-level outline for an essay", &["topic"], 0),
    tool("poem", Writing, "Write a poem", &["topic", "style"], 0),
    tool("short-story", Writing, "Short story from a premise", &["premise", "genre"], 0),
    tool("email", Writing, "Draft an email with subject line", &["purpose", "recipient", "tone"], 0),
    tool("cover-letter", Writing, "Cover letter for a job application", &["job_title", "company", "experience"], 0),
    tool("resume-bullets", Writing, "Resume bullet points from achievements", &["role", "achievements"], 0),
    tool("song-lyrics", Writing, "Song lyrics with verses and chorus", &["theme", "genre"], 0),
    tool("ad-copy", Marketing, "Headline and body copy for an ad", &["product_info", "tone"], 0),
    tool("headline-grader", Marketing, "Score a headline and suggest improvements", &["headline"], 0),
    tool("product-description", Marketing, "E-commerce product description", &["product_name", "features"], 0),
    tool("slogans", Marketing, "Slogan ideas for a brand", &["brand", "description"], 0),
    tool("business-names", Marketing, "Business name ideas with rationale", &["industry", "keywords"], 0),
    tool("hashtags", Marketing, "Hashtags for a social post", &["topic"], 0),
    tool("seo-meta", Marketing, "SEO title and meta description", &["page_topic", "keywords"], 0),
    tool("social-post", Marketing, "Social media post with hashtags", &["topic", "platform"], 0),
    tool("blog-ideas", Marketing, "Blog post ideas for a niche", &["niche"], 0),
    tool("tweet-thread", Marketing, "Thread of tweets on a topic", &["topic"], 0),
    tool("equation-balancer", Education, "Balance a chemical equation", &["equation"], 0),
    tool("math-solver", Education, "Step-by-step math solution", &["problem"], 0),
    tool("quiz", Education, "Multiple-choice quiz", &["topic", "count"], 0),
    tool("flashcards", Education, "Study flashcards", &["topic", "count"], 0),
    tool("define-word", Education, "Dictionary entry for a word", &["word"], 0),
    tool("explain-simply", Education, "Explain a concept like I'm five", &["concept"], 0),
    tool("history", Education, "Summary of a historical event", &["event"], 0),
    tool("dream-interpreter", Lifestyle, "Interpret a dream", &["dream"], 0),
    tool("recipe", Lifestyle, "Recipe from ingredients", &["ingredients", "diet"], 0),
    tool("workout-plan", Lifestyle, "Weekly workout plan", &["goal", "days_per_week"], 0),
    tool("travel-itinerary", Lifestyle, "Day-by-day travel itinerary", &["destination", "days"], 0),
    tool("gift-ideas", Lifestyle, "Gift ideas for someone", &["recipient", "budget", "interests"], 0),
    tool("horoscope", Lifestyle, "Daily horoscope", &["sign"], 0),
    tool("movie-recommendations", Lifestyle, "Movie suggestions", &["preferences"], 0),
    tool("joke", Lifestyle, "A clean joke", &["topic"], 0),
    tool("pet-names", Lifestyle, "Pet name ideas", &["animal", "personality"], 0),
    tool("pros-cons", Lifestyle, "Pros, cons and a verdict for a decision", &["decision"], 0),
    tool("explain-code", Developer, "Explain a code snippet", &["code", "language"], 0),
    tool("regex", Developer, "Regular expression from a description", &["description"], 0),
    tool("sql-query", Developer, "SQL query from a description", &["description", "dialect"], 0),
    tool("commit-message", Developer, "Git commit message for changes", &["changes"], 0),
    tool("code-review", Developer, "Scored code review with issues", &["code"], 0),
    tool("cron", Developer, "Cron expression from a schedule", &["schedule"], 0),
    tool("color-palette", Developer, "Five-color palette for a theme", &["theme"], 0),
    tool("image", Imaging, "Generate an image", &["description", "style"], 0),
    tool("logo", Imaging, "Generate a logo", &["brand", "style"], 0),
    tool("edit-image", Imaging, "Edit an image with an instruction", &["instruction"], 1),
    tool("remove-background", Imaging, "Remove an image's background", &[], 1),
    tool("colorize", Imaging, "Colorize a black and white photo", &[], 1),
    tool("restyle", Imaging, "Redraw an image in another style", &["style"], 1),
    tool("sketch-to-image", Imaging, "Render a sketch as a detailed image", &["description"], 1),
    tool("face-swap", Imaging, "Put the face from image 1 onto image 2", &[], 2),
    tool("virtual-try-on", Imaging, "Dress the person in image 1 with the garment in image 2", &[], 2),
];

pub fn find(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|tool| tool.name == name)
}

pub fn by_category(category: Category) -> impl Iterator<Item = &'static ToolSpec> {
    TOOLS.iter().filter(move |tool| tool.category == category)
}

/// Named text fields and input images collected for one tool run.
#[derive(Debug, Clone, Default)]
pub struct ToolInput {
    pub fields: HashMap<String, String>,
    pub images: Vec<InlineImage>,
}

impl ToolInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn image(mut self, image: InlineImage) -> Self {
        self.images.push(image);
        self
    }

    fn text(&self, name: &str) -> Result<&str> {
        match self.fields.get(name) {
            Some(value) if !value.trim().is_empty() => Ok(value.as_str()),
            _ => Err(AppError::invalid_input(format!("missing field '{}'", name))),
        }
    }

    fn count(&self, name: &str) -> Result<u32> {
        let raw = self.text(name)?;
        match raw.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(AppError::invalid_input(format!(
                "field '{}' must be a positive whole number, got {:?}",
                name, raw
            ))),
        }
    }
}

/// Result of a tool run, in a front-end friendly shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Text(String),
    Json(serde_json::Value),
    Image(InlineImage),
}

impl ToolOutput {
    fn json<T: Serialize>(value: T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }
}

impl Toolbox {
    /// Runs the tool called `name` with the given input.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] for an unknown tool, a missing field,
    /// a malformed count, or the wrong number of images; nothing is sent in
    /// that case. Otherwise returns whatever the tool itself returns.
    pub async fn run_tool(&self, name: &str, input: &ToolInput) -> Result<ToolOutput> {
        let spec = find(name).ok_or_else(|| AppError::invalid_input(format!("unknown tool '{}'", name)))?;
        if input.images.len() != spec.images {
            return Err(AppError::invalid_input(format!(
                "'{}' takes {} image(s), got {}",
                spec.name,
                spec.images,
                input.images.len()
            )));
        }
        for field in spec.fields {
            input.text(field)?;
        }

        let f = move |name: &'static str| input.text(name);
        let img = move |index: usize| &input.images[index];

        log::info!("running tool {}", spec.name);
        match spec.name {
            "paraphrase" => self.paraphrase(f("text")?, f("style")?).await.map(ToolOutput::Text),
            "summarize" => self.summarize(f("text")?, f("length")?).await.map(ToolOutput::Text),
            "fix-grammar" => ToolOutput::json(self.fix_grammar(f("text")?).await?),
            "translate" => self.translate(f("text")?, f("language")?).await.map(ToolOutput::Text),
            "essay-outline" => ToolOutput::json(self.essay_outline(f("topic")?).await?),
            "poem" => self.write_poem(f("topic")?, f("style")?).await.map(ToolOutput::Text),
            "short-story" => ToolOutput::json(self.short_story(f("premise")?, f("genre")?).await?),
            "email" => ToolOutput::json(self.write_email(f("purpose")?, f("recipient")?, f("tone")?).await?),
            "cover-letter" => self
                .cover_letter(f("job_title")?, f("company")?, f("experience")?)
                .await
                .map(ToolOutput::Text),
            "resume-bullets" => ToolOutput::json(self.resume_bullets(f("role")?, f("achievements")?).await?),
            "song-lyrics" => ToolOutput::json(self.song_lyrics(f("theme")?, f("genre")?).await?),

            "ad-copy" => ToolOutput::json(self.ad_copy(f("product_info")?, f("tone")?).await?),
            "headline-grader" => ToolOutput::json(self.grade_headline(f("headline")?).await?),
            "product-description" => self
                .product_description(f("product_name")?, f("features")?)
                .await
                .map(ToolOutput::Text),
            "slogans" => ToolOutput::json(self.slogans(f("brand")?, f("description")?).await?),
            "business-names" => ToolOutput::json(self.business_names(f("industry")?, f("keywords")?).await?),
            "hashtags" => ToolOutput::json(self.hashtags(f("topic")?).await?),
            "seo-meta" => ToolOutput::json(self.seo_meta(f("page_topic")?, f("keywords")?).await?),
            "social-post" => ToolOutput::json(self.social_post(f("topic")?, f("platform")?).await?),
            "blog-ideas" => ToolOutput::json(self.blog_ideas(f("niche")?).await?),
            "tweet-thread" => ToolOutput::json(self.tweet_thread(f("topic")?).await?),

            "equation-balancer" => self.balance_equation(f("equation")?).await.map(ToolOutput::Text),
            "math-solver" => ToolOutput::json(self.solve_math(f("problem")?).await?),
            "quiz" => ToolOutput::json(self.quiz(f("topic")?, input.count("count")?).await?),
            "flashcards" => ToolOutput::json(self.flashcards(f("topic")?, input.count("count")?).await?),
            "define-word" => ToolOutput::json(self.define_word(f("word")?).await?),
            "explain-simply" => self.explain_simply(f("concept")?).await.map(ToolOutput::Text),
            "history" => ToolOutput::json(self.historical_event(f("event")?).await?),

            "dream-interpreter" => ToolOutput::json(self.interpret_dream(f("dream")?).await?),
            "recipe" => ToolOutput::json(self.recipe(f("ingredients")?, f("diet")?).await?),
            "workout-plan" => ToolOutput::json(self.workout_plan(f("goal")?, input.count("days_per_week")?).await?),
            "travel-itinerary" => ToolOutput::json(self.travel_itinerary(f("destination")?, input.count("days")?).await?),
            "gift-ideas" => ToolOutput::json(
                self.gift_ideas(f("recipient")?, f("budget")?, f("interests")?)
                    .await?,
            ),
            "horoscope" => self.horoscope(f("sign")?).await.map(ToolOutput::Text),
            "movie-recommendations" => ToolOutput::json(self.movie_recommendations(f("preferences")?).await?),
            "joke" => self.tell_joke(f("topic")?).await.map(ToolOutput::Text),
            "pet-names" => ToolOutput::json(self.pet_names(f("animal")?, f("personality")?).await?),
            "pros-cons" => ToolOutput::json(self.weigh_decision(f("decision")?).await?),

            "explain-code" => self.explain_code(f("code")?, f("language")?).await.map(ToolOutput::Text),
            "regex" => ToolOutput::json(self.regex(f("description")?).await?),
            "sql-query" => self.sql_query(f("description")?, f("dialect")?).await.map(ToolOutput::Text),
            "commit-message" => self.commit_message(f("changes")?).await.map(ToolOutput::Text),
            "code-review" => ToolOutput::json(self.review_code(f("code")?).await?),
            "cron" => ToolOutput::json(self.cron_expression(f("schedule")?).await?),
            "color-palette" => ToolOutput::json(self.color_palette(f("theme")?).await?),

            "image" => self.generate_image(f("description")?, f("style")?).await.map(ToolOutput::Image),
            "logo" => self.generate_logo(f("brand")?, f("style")?).await.map(ToolOutput::Image),
            "edit-image" => self.edit_image(img(0), f("instruction")?).await.map(ToolOutput::Image),
            "remove-background" => self.remove_background(img(0)).await.map(ToolOutput::Image),
            "colorize" => self.colorize_photo(img(0)).await.map(ToolOutput::Image),
            "restyle" => self.restyle_image(img(0), f("style")?).await.map(ToolOutput::Image),
            "sketch-to-image" => self.sketch_to_image(img(0), f("description")?).await.map(ToolOutput::Image),
            "face-swap" => self.face_swap(img(0), img(1)).await.map(ToolOutput::Image),
            "virtual-try-on" => self.virtual_try_on(img(0), img(1)).await.map(ToolOutput::Image),

            other => Err(AppError::invalid_input(format!("tool '{}' has no runner", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_and_kebab_case() {
        let mut seen = HashSet::new();
        for tool in TOOLS {
            assert!(seen.insert(tool.name), "duplicate tool {}", tool.name);
            assert!(
                tool.name.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
                "bad name {}",
                tool.name
            );
        }
    }

    #[test]
    fn every_category_has_tools() {
        for category in [Writing, Marketing, Education, Lifestyle, Developer, Imaging] {
            assert!(by_category(category).count() > 0, "{:?} is empty", category);
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("cooking"), None);
    }

    #[test]
    fn image_counts_match_imaging_tools() {
        assert_eq!(find("face-swap").unwrap().images, 2);
        assert_eq!(find("colorize").unwrap().images, 1);
        assert!(TOOLS
            .iter()
            .filter(|tool| tool.images > 0)
            .all(|tool| tool.category == Imaging));
    }

    #[test]
    fn count_fields_must_be_positive_integers() {
        let input = ToolInput::new().field("count", "five");
        assert!(matches!(input.count("count"), Err(AppError::InvalidInput(_))));
        let input = ToolInput::new().field("count", "0");
        assert!(input.count("count").is_err());
        let input = ToolInput::new().field("count", " 7 ");
        assert_eq!(input.count("count").unwrap(), 7);
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let input = ToolInput::new().field("topic", "   ");
        assert!(matches!(input.text("topic"), Err(AppError::InvalidInput(_))));
    }
}
