//! AI Toolbox Core Library
//!
//! A collection of small, single-purpose tools that turn a handful of user
//! inputs into a prompt, send it to Google's Gemini models, and return a
//! typed result.
//!
//! # Overview
//!
//! Every tool is a thin wrapper over one of three dispatch helpers:
//!
//! - **Text**: prompt in, reply text out ([`Dispatcher::generate_text`])
//! - **Structured JSON**: prompt plus [`Schema`] in, validated value out
//!   ([`Dispatcher::generate_json`])
//! - **Image**: prompt plus zero to two images in, first returned image out
//!   ([`Dispatcher::generate_image`])
//!
//! # Quick Start
//!
//! ```ignore
//! use ai_toolbox_core::Toolbox;
//!
//! // Reads GEMINI_API_KEY (and optional overrides) from the environment
//! let toolbox = Toolbox::from_env()?;
//!
//! let ad = toolbox.ad_copy("a smart mug", "Persuasive").await?;
//! println!("{}\n\n{}", ad.headline, ad.body);
//! ```
//!
//! Tests and embedders can inject any [`GenerativeBackend`], such as
//! [`MockBackend`], through [`Toolbox::with_backend`].
//!
//! # Module Structure
//!
//! - [`backend`]: The remote-service seam, Gemini implementation and mock
//! - [`catalog`]: Name-based lookup and invocation of every tool
//! - [`config`]: Configuration loading from the environment
//! - [`dispatch`]: The text / JSON / image dispatch helpers
//! - [`error`]: Error types and result aliases
//! - [`media`]: Inline (base64) images
//! - [`schema`]: Response schemas and validation
//! - [`tools`]: The domain tools

pub mod backend;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod media;
pub mod schema;
pub mod tools;

// Re-export primary types for convenience
pub use backend::{GeminiBackend, GenerativeBackend, MockBackend};
pub use catalog::{ToolInput, ToolOutput, ToolSpec};
pub use config::Config;
pub use dispatch::Dispatcher;
pub use error::{AppError, Result};
pub use media::InlineImage;
pub use schema::{Schema, StructuredOutput};
pub use tools::Toolbox;

/// Loads a `.env` file into the process environment, if one exists.
///
/// Call this once at application startup, before reading configuration.
pub fn init() {
    let _ = dotenvy::dotenv();
}
