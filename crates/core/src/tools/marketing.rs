//! Marketing copy tools.

use super::Toolbox;
use crate::error::{GENERIC_FAILURE, Result};
use crate::schema::{Schema, StructuredOutput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdCopy {
    pub headline: String,
    pub body: String,
}

impl StructuredOutput for AdCopy {
    fn schema() -> Schema {
        Schema::object()
            .property("headline", Schema::string())
            .property("body", Schema::string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineGrade {
    pub score: f64,
    pub analysis: String,
    pub suggestions: Vec<String>,
}

impl StructuredOutput for HeadlineGrade {
    fn schema() -> Schema {
        Schema::object()
            .property("score", Schema::number().describe("Overall quality from 0 to 100"))
            .property("analysis", Schema::string())
            .property("suggestions", Schema::strings())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessName {
    pub name: String,
    pub rationale: String,
}

impl StructuredOutput for BusinessName {
    fn schema() -> Schema {
        Schema::object()
            .property("name", Schema::string())
            .property("rationale", Schema::string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
}

impl StructuredOutput for SeoMeta {
    fn schema() -> Schema {
        Schema::object()
            .property("title", Schema::string().describe("At most 60 characters"))
            .property("description", Schema::string().describe("At most 160 characters"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub content: String,
    pub hashtags: Vec<String>,
}

impl StructuredOutput for SocialPost {
    fn schema() -> Schema {
        Schema::object()
            .property("content", Schema::string())
            .property("hashtags", Schema::strings())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogIdea {
    pub title: String,
    pub summary: String,
}

impl StructuredOutput for BlogIdea {
    fn schema() -> Schema {
        Schema::object()
            .property("title", Schema::string())
            .property("summary", Schema::string())
    }
}

impl Toolbox {
    pub async fn ad_copy(&self, product_info: &str, tone: &str) -> Result<AdCopy> {
        let prompt = format!(
            "Write compelling ad copy for the following product. Tone: {tone}.\n\n\
             Product: {product_info}\n\n\
             Provide a short attention-grabbing headline and a body of two or three sentences."
        );
        self.dispatcher()
            .generate_json(prompt, "Failed to generate ad copy. Please try again.")
            .await
    }

    pub async fn grade_headline(&self, headline: &str) -> Result<HeadlineGrade> {
        let prompt = format!(
            "Analyze the following headline for clarity, emotional impact, and click-worthiness. \
             Give it a score from 0 to 100, a brief analysis, and three concrete suggestions for \
             improvement.\n\nHeadline: \"{headline}\""
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn product_description(&self, product_name: &str, features: &str) -> Result<String> {
        let prompt = format!(
            "Write an engaging e-commerce product description for \"{product_name}\". \
             Key features: {features}. Use short paragraphs and focus on benefits."
        );
        self.dispatcher().generate_text(prompt, GENERIC_FAILURE).await
    }

    pub async fn slogans(&self, brand: &str, description: &str) -> Result<Vec<String>> {
        let prompt = format!(
            "Generate 8 catchy, memorable slogans for the brand \"{brand}\". \
             About the brand: {description}"
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn business_names(&self, industry: &str, keywords: &str) -> Result<Vec<BusinessName>> {
        let prompt = format!(
            "Suggest 10 unique, brandable business names for a company in the {industry} industry. \
             Keywords to draw from: {keywords}. Explain the idea behind each name in one sentence."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn hashtags(&self, topic: &str) -> Result<Vec<String>> {
        let prompt = format!(
            "Generate 15 relevant, popular hashtags for a social media post about {topic}. \
             Include the leading # on each."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn seo_meta(&self, page_topic: &str, keywords: &str) -> Result<SeoMeta> {
        let prompt = format!(
            "Write an SEO title tag and meta description for a web page about {page_topic}. \
             Target keywords: {keywords}. The title must be at most 60 characters and the \
             description at most 160 characters."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn social_post(&self, topic: &str, platform: &str) -> Result<SocialPost> {
        let prompt = format!(
            "Write an engaging {platform} post about {topic}, following the conventions and length \
             limits of {platform}. Suggest up to 5 hashtags separately."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn blog_ideas(&self, niche: &str) -> Result<Vec<BlogIdea>> {
        let prompt = format!(
            "Suggest 8 blog post ideas for a blog in the {niche} niche. For each, give a catchy \
             title and a one-sentence summary."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn tweet_thread(&self, topic: &str) -> Result<Vec<String>> {
        let prompt = format!(
            "Write a Twitter/X thread of 5 to 8 tweets about {topic}. Each tweet must be under 280 \
             characters. The first tweet should hook the reader."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }
}
