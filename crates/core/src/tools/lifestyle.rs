//! Everyday helpers: food, fitness, travel, entertainment.

use super::Toolbox;
use crate::error::{GENERIC_FAILURE, Result};
use crate::schema::{Schema, StructuredOutput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DreamInterpretation {
    pub summary: String,
    pub symbols: Vec<DreamSymbol>,
    pub mood: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DreamSymbol {
    pub symbol: String,
    pub meaning: String,
}

impl StructuredOutput for DreamInterpretation {
    fn schema() -> Schema {
        Schema::object()
            .property("summary", Schema::string())
            .property(
                "symbols",
                Schema::array(
                    Schema::object()
                        .property("symbol", Schema::string())
                        .property("meaning", Schema::string()),
                ),
            )
            .property(
                "mood",
                Schema::string().one_of(["positive", "negative", "neutral", "mixed"]),
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub prep_minutes: f64,
}

impl StructuredOutput for Recipe {
    fn schema() -> Schema {
        Schema::object()
            .property("name", Schema::string())
            .property("ingredients", Schema::strings().describe("Each with its quantity"))
            .property("steps", Schema::strings())
            .property("prep_minutes", Schema::number())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub days: Vec<WorkoutDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDay {
    pub day: String,
    pub focus: String,
    pub exercises: Vec<String>,
}

impl StructuredOutput for WorkoutPlan {
    fn schema() -> Schema {
        Schema::object().property(
            "days",
            Schema::array(
                Schema::object()
                    .property("day", Schema::string())
                    .property("focus", Schema::string())
                    .property("exercises", Schema::strings().describe("Exercise with sets and reps")),
            ),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub destination: String,
    pub days: Vec<ItineraryDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: u32,
    pub activities: Vec<String>,
}

impl StructuredOutput for Itinerary {
    fn schema() -> Schema {
        Schema::object()
            .property("destination", Schema::string())
            .property(
                "days",
                Schema::array(
                    Schema::object()
                        .property("day", Schema::integer())
                        .property("activities", Schema::strings()),
                ),
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftIdea {
    pub name: String,
    pub reason: String,
    pub price_range: String,
}

impl StructuredOutput for GiftIdea {
    fn schema() -> Schema {
        Schema::object()
            .property("name", Schema::string())
            .property("reason", Schema::string())
            .property("price_range", Schema::string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub year: u32,
    pub reason: String,
}

impl StructuredOutput for Recommendation {
    fn schema() -> Schema {
        Schema::object()
            .property("title", Schema::string())
            .property("year", Schema::integer())
            .property("reason", Schema::string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProsCons {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub verdict: String,
}

impl StructuredOutput for ProsCons {
    fn schema() -> Schema {
        Schema::object()
            .property("pros", Schema::strings())
            .property("cons", Schema::strings())
            .property("verdict", Schema::string())
    }
}

impl Toolbox {
    pub async fn interpret_dream(&self, dream: &str) -> Result<DreamInterpretation> {
        let prompt = format!(
            "Interpret the following dream. Give an overall summary, the key symbols with their \
             possible meanings, and the overall mood of the dream.\n\nDream: {dream}"
        );
        self.dispatcher()
            .generate_json(prompt, "Failed to interpret dream. Please try again.")
            .await
    }

    pub async fn recipe(&self, ingredients: &str, diet: &str) -> Result<Recipe> {
        let prompt = format!(
            "Create a recipe using mainly these ingredients: {ingredients}. Dietary preference: \
             {diet}. Give the dish a name, list ingredients with quantities, the steps, and the \
             preparation time in minutes."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn workout_plan(&self, goal: &str, days_per_week: u32) -> Result<WorkoutPlan> {
        let prompt = format!(
            "Create a weekly workout plan with {days_per_week} training days for someone whose goal \
             is: {goal}. For each day give its focus and a list of exercises with sets and reps."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn travel_itinerary(&self, destination: &str, days: u32) -> Result<Itinerary> {
        let prompt = format!(
            "Plan a {days}-day travel itinerary for {destination}. For each day list 3 to 5 \
             activities in order."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn gift_ideas(&self, recipient: &str, budget: &str, interests: &str) -> Result<Vec<GiftIdea>> {
        let prompt = format!(
            "Suggest 6 thoughtful gift ideas for {recipient} with a budget of {budget}. \
             Their interests: {interests}. Say why each fits and give an approximate price range."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn horoscope(&self, sign: &str) -> Result<String> {
        let prompt = format!(
            "Write a fun, upbeat daily horoscope for {sign}. Cover love, work and wellbeing in one \
             short paragraph."
        );
        self.dispatcher().generate_text(prompt, GENERIC_FAILURE).await
    }

    pub async fn movie_recommendations(&self, preferences: &str) -> Result<Vec<Recommendation>> {
        let prompt = format!(
            "Recommend 5 movies for someone with these preferences: {preferences}. \
             Give the title, release year and a one-sentence reason for each."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn tell_joke(&self, topic: &str) -> Result<String> {
        let prompt = format!("Tell me a short, clean, funny joke about {topic}.");
        self.dispatcher().generate_text(prompt, GENERIC_FAILURE).await
    }

    pub async fn pet_names(&self, animal: &str, personality: &str) -> Result<Vec<String>> {
        let prompt = format!(
            "Suggest 10 creative names for a {animal} with a {personality} personality."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }

    pub async fn weigh_decision(&self, decision: &str) -> Result<ProsCons> {
        let prompt = format!(
            "I am trying to decide: {decision}. List the main pros and cons and give a balanced \
             one-paragraph verdict."
        );
        self.dispatcher().generate_json(prompt, GENERIC_FAILURE).await
    }
}
