use ai_toolbox_core::backend::{GenerationReply, ReplyPart};
use ai_toolbox_core::catalog::{self, TOOLS};
use ai_toolbox_core::error::GENERIC_FAILURE;
use ai_toolbox_core::tools::marketing::AdCopy;
use ai_toolbox_core::{AppError, Config, InlineImage, MockBackend, ToolInput, ToolOutput, Toolbox};
use serde_json::json;
use std::sync::Arc;

fn toolbox(mock: &Arc<MockBackend>) -> Toolbox {
    Toolbox::with_backend(Config::default().with_api_key("test-key"), mock.clone())
}

#[tokio::test]
async fn ad_copy_returns_the_exact_object() {
    let mock = Arc::new(MockBackend::replying_text(
        r#"{"headline":"Stay Warm","body":"Never drink cold coffee again."}"#,
    ));
    let ad = toolbox(&mock).ad_copy("a smart mug", "Persuasive").await.unwrap();

    assert_eq!(
        ad,
        AdCopy {
            headline: "Stay Warm".into(),
            body: "Never drink cold coffee again.".into(),
        }
    );
    let prompt = mock.last_request().unwrap().prompt;
    assert!(prompt.contains("a smart mug"));
    assert!(prompt.contains("Persuasive"));
}

#[tokio::test]
async fn equation_balancer_returns_string_untouched() {
    let mock = Arc::new(MockBackend::replying_text("2H2 + O2 -> 2H2O"));
    let balanced = toolbox(&mock).balance_equation("H2 + O2 -> H2O").await.unwrap();
    assert_eq!(balanced, "2H2 + O2 -> 2H2O");
    assert!(mock.last_request().unwrap().prompt.contains("H2 + O2 -> H2O"));
}

#[tokio::test]
async fn json_tool_with_invalid_reply_leaves_caller_state_unset() {
    let mock = Arc::new(MockBackend::replying_text("not json"));
    let mut state: Option<AdCopy> = None;

    match toolbox(&mock).ad_copy("a smart mug", "Persuasive").await {
        Ok(ad) => state = Some(ad),
        Err(err) => {
            assert!(matches!(err, AppError::Parse { .. }));
            assert_eq!(err.user_message(), "Failed to generate ad copy. Please try again.");
        }
    }
    assert!(state.is_none());
}

#[tokio::test]
async fn face_swap_without_image_part_fails() {
    let mock = Arc::new(MockBackend::replying_text("Sorry, I can't do that."));
    let source = InlineImage::new("image/png", "c291cmNl");
    let target = InlineImage::new("image/jpeg", "dGFyZ2V0");

    let err = toolbox(&mock).face_swap(&source, &target).await.unwrap_err();

    assert!(matches!(err, AppError::EmptyResult { .. }));
    assert_eq!(err.to_string(), "Failed to swap faces. Please try again.");
    assert_eq!(mock.last_request().unwrap().images, vec![source, target]);
}

#[tokio::test]
async fn unset_credential_fails_every_kind_of_tool_without_network() {
    let mock = Arc::new(MockBackend::replying_text("unused"));
    let toolbox = Toolbox::with_backend(Config::default(), mock.clone());
    let photo = InlineImage::new("image/png", "cGhvdG8=");

    assert!(toolbox.ad_copy("mug", "Fun").await.unwrap_err().is_configuration());
    assert!(toolbox.balance_equation("H2 + O2 -> H2O").await.unwrap_err().is_configuration());
    assert!(toolbox.colorize_photo(&photo).await.unwrap_err().is_configuration());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn headline_grader_shape() {
    let mock = Arc::new(MockBackend::replying_text(
        r#"{"score":72,"analysis":"Clear but flat.","suggestions":["Add a number","Use a power word","Shorten"]}"#,
    ));
    let grade = toolbox(&mock).grade_headline("How to cook rice").await.unwrap();
    assert_eq!(grade.score, 72.0);
    assert_eq!(grade.suggestions.len(), 3);
}

#[tokio::test]
async fn essay_outline_is_a_two_level_tree() {
    let mock = Arc::new(MockBackend::replying_text(
        json!({
            "title": "Rust in Practice",
            "sections": [
                { "heading": "Ownership", "points": ["Moves", "Borrows"] },
                { "heading": "Errors", "points": ["Result", "The ? operator"] }
            ]
        })
        .to_string(),
    ));
    let outline = toolbox(&mock).essay_outline("Rust").await.unwrap();
    assert_eq!(outline.sections.len(), 2);
    assert_eq!(outline.sections[1].points[1], "The ? operator");
}

#[tokio::test]
async fn dream_mood_outside_enum_is_rejected() {
    let mock = Arc::new(MockBackend::replying_text(
        r#"{"summary":"You fear change.","symbols":[],"mood":"spooky"}"#,
    ));
    let err = toolbox(&mock).interpret_dream("falling teeth").await.unwrap_err();
    assert!(matches!(err, AppError::Parse { .. }));
    assert_eq!(err.to_string(), "Failed to interpret dream. Please try again.");
}

#[tokio::test]
async fn code_review_parses_severity() {
    use ai_toolbox_core::tools::developer::Severity;

    let mock = Arc::new(MockBackend::replying_text(
        r#"{"score":6.5,"summary":"Works, but unwraps.","issues":[{"severity":"high","description":"unwrap on user input"}]}"#,
    ));
    let review = toolbox(&mock).review_code("fn main() {}").await.unwrap();
    assert_eq!(review.issues[0].severity, Severity::High);
}

#[tokio::test]
async fn optional_synonyms_default_to_empty() {
    let mock = Arc::new(MockBackend::replying_text(
        r#"{"word":"terse","part_of_speech":"adjective","definition":"Brief.","examples":["A terse reply."]}"#,
    ));
    let definition = toolbox(&mock).define_word("terse").await.unwrap();
    assert!(definition.synonyms.is_empty());
}

#[tokio::test]
async fn repeated_calls_are_not_deduplicated() {
    let mock = Arc::new(MockBackend::sequence(vec![
        GenerationReply::text(r#"["Sip smarter","Warmth that lasts"]"#),
        GenerationReply::text(r#"["Coffee, upgraded"]"#),
    ]));
    let toolbox = toolbox(&mock);

    let (first, second) = futures::future::join(
        toolbox.slogans("Mugly", "smart mugs"),
        toolbox.slogans("Mugly", "smart mugs"),
    )
    .await;

    // Values may differ between calls; only the shape is guaranteed.
    assert!(!first.unwrap().is_empty());
    assert!(!second.unwrap().is_empty());
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn catalog_runs_text_json_and_image_tools() {
    let image = InlineImage::new("image/png", "b3V0");
    let mock = Arc::new(MockBackend::sequence(vec![
        GenerationReply::text("Why did the crab never share? Because it's shellfish."),
        GenerationReply::text(r#"{"headline":"Stay Warm","body":"Never drink cold coffee again."}"#),
        GenerationReply {
            parts: vec![ReplyPart::Image(image.clone())],
        },
    ]));
    let toolbox = toolbox(&mock);

    let joke = toolbox
        .run_tool("joke", &ToolInput::new().field("topic", "seafood"))
        .await
        .unwrap();
    assert!(matches!(joke, ToolOutput::Text(ref t) if t.contains("shellfish")));

    let ad = toolbox
        .run_tool(
            "ad-copy",
            &ToolInput::new().field("product_info", "a smart mug").field("tone", "Persuasive"),
        )
        .await
        .unwrap();
    assert_eq!(
        ad,
        ToolOutput::Json(json!({"headline":"Stay Warm","body":"Never drink cold coffee again."}))
    );

    let colorized = toolbox
        .run_tool("colorize", &ToolInput::new().image(InlineImage::new("image/jpeg", "aW4=")))
        .await
        .unwrap();
    assert_eq!(colorized, ToolOutput::Image(image));
}

#[tokio::test]
async fn catalog_rejects_bad_input_before_dispatch() {
    let mock = Arc::new(MockBackend::replying_text("unused"));
    let toolbox = toolbox(&mock);

    let unknown = toolbox.run_tool("time-machine", &ToolInput::new()).await;
    assert!(matches!(unknown, Err(AppError::InvalidInput(_))));

    let missing = toolbox.run_tool("ad-copy", &ToolInput::new().field("tone", "Fun")).await;
    assert!(matches!(missing, Err(AppError::InvalidInput(_))));

    let one_image = toolbox
        .run_tool("face-swap", &ToolInput::new().image(InlineImage::new("image/png", "YQ==")))
        .await;
    assert!(matches!(one_image, Err(AppError::InvalidInput(_))));

    let bad_count = toolbox
        .run_tool("quiz", &ToolInput::new().field("topic", "Rust").field("count", "lots"))
        .await;
    assert!(matches!(bad_count, Err(AppError::InvalidInput(_))));

    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn every_catalog_entry_has_a_runner() {
    // A failing backend exercises routing without caring about reply shapes.
    let mock = Arc::new(MockBackend::failing(
        ai_toolbox_core::backend::BackendError::Request("offline".into()),
    ));
    let toolbox = toolbox(&mock);

    for spec in TOOLS {
        let mut input = ToolInput::new();
        for field in spec.fields {
            input = input.field(*field, "3");
        }
        for _ in 0..spec.images {
            input = input.image(InlineImage::new("image/png", "YQ=="));
        }
        let err = toolbox.run_tool(spec.name, &input).await.unwrap_err();
        assert!(
            matches!(err, AppError::Transport { .. }),
            "{} did not reach the backend: {err:?}",
            spec.name
        );
    }
    assert_eq!(mock.call_count(), TOOLS.len());
    assert!(catalog::find("ad-copy").is_some());
}

#[tokio::test]
async fn generic_failure_wording_for_plain_tools() {
    let mock = Arc::new(MockBackend::replying(GenerationReply::default()));
    let err = toolbox(&mock).tell_joke("cats").await.unwrap_err();
    assert_eq!(err.to_string(), GENERIC_FAILURE);
}
