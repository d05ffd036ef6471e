use ai_toolbox_core::{
    catalog::{self, Category, TOOLS},
    config::Config,
    init,
    media::{ImageProcessor, InlineImage},
    ToolInput, ToolOutput, Toolbox,
};
use anyhow::{anyhow, bail, Context, Result};
use arboard::Clipboard;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use termimad::crossterm::style::Color;
use termimad::MadSkin;

/// Longest side, in pixels, of images uploaded as tool input.
const MAX_INPUT_SIDE: u32 = 2048;

#[derive(Parser, Debug)]
#[command(author, version, about = "Small Gemini-powered tools from the command line", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available tools
    List {
        /// Only show tools in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Run a tool
    Run {
        /// Tool name, as shown by `list`
        tool: String,

        /// Input field, repeatable (e.g. -f tone=Persuasive)
        #[arg(short = 'f', long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Input image file, repeatable, in the order the tool expects
        #[arg(short, long = "image")]
        images: Vec<PathBuf>,

        /// Where to save an image result (default: <tool>.<ext>)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Override the model defined in .env (text or image, as the tool needs)
        #[arg(short, long)]
        model: Option<String>,

        /// Copy the result to clipboard automatically
        #[arg(short, long, default_value_t = false)]
        copy: bool,
    },
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup
    init();
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::List { category } => list_tools(category.as_deref()),
        Command::Run {
            tool,
            fields,
            images,
            out,
            model,
            copy,
        } => run_tool(&tool, fields, &images, out, model, copy).await,
    }
}

fn list_tools(category: Option<&str>) -> Result<()> {
    let filter = match category {
        Some(name) => Some(Category::parse(name).ok_or_else(|| anyhow!("Unknown category '{}'", name))?),
        None => None,
    };

    for spec in TOOLS.iter().filter(|spec| filter.is_none_or(|c| spec.category == c)) {
        let mut inputs: Vec<String> = spec.fields.iter().map(|f| format!("-f {}=...", f)).collect();
        inputs.extend((0..spec.images).map(|i| format!("-i <image{}>", i + 1)));
        println!("{:<22} [{}] {}", spec.name, spec.category.as_str(), spec.summary);
        if !inputs.is_empty() {
            println!("{:<22} {}", "", inputs.join(" "));
        }
    }
    Ok(())
}

async fn run_tool(
    name: &str,
    fields: Vec<(String, String)>,
    image_paths: &[PathBuf],
    out: Option<PathBuf>,
    model: Option<String>,
    copy: bool,
) -> Result<()> {
    let spec = catalog::find(name)
        .ok_or_else(|| anyhow!("Unknown tool '{}'. Run `ai-toolbox list` to see available tools", name))?;

    // Load config and override model if specified via CLI
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(m) = model {
        if spec.category == Category::Imaging {
            config.image_model = m;
        } else {
            config.text_model = m;
        }
    }

    let mut input = ToolInput::new();
    for (key, value) in fields {
        input = input.field(key, value);
    }
    for path in image_paths {
        let image = InlineImage::from_path(path)
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let image = ImageProcessor::fit_within(&image, MAX_INPUT_SIDE)
            .with_context(|| format!("Failed to prepare image {}", path.display()))?;
        input = input.image(image);
    }

    let model_name = if spec.category == Category::Imaging {
        config.image_model.clone()
    } else {
        config.text_model.clone()
    };
    let toolbox = Toolbox::with_config(config).context("Failed to initialise Gemini client")?;

    // Send to API
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.green} {msg}")?,
    );
    spinner.set_message(format!("Running {} with {}...", spec.name, model_name));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = toolbox.run_tool(spec.name, &input).await;

    spinner.finish_and_clear();

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            log::debug!("{} failed: {:?}", spec.name, e);
            bail!("{}", e.user_message());
        }
    };

    let copyable = match output {
        ToolOutput::Text(text) => {
            print_markdown(&text);
            Some(text)
        }
        ToolOutput::Json(value) => {
            let pretty = serde_json::to_string_pretty(&value)?;
            println!("{}", pretty);
            Some(pretty)
        }
        ToolOutput::Image(image) => {
            let path = out.unwrap_or_else(|| PathBuf::from(format!("{}.{}", spec.name, image.extension())));
            image
                .save(&path)
                .with_context(|| format!("Failed to save image to {}", path.display()))?;
            println!("Saved image to {}", path.display());
            None
        }
    };

    // Copy to clipboard if requested
    if copy {
        match copyable {
            Some(text) => copy_to_clipboard(text),
            None => eprintln!("Warning: image results are saved to disk, not copied"),
        }
    }

    Ok(())
}

fn copy_to_clipboard(text: String) {
    match Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                eprintln!("Warning: Failed to copy to clipboard: {}", e);
            } else {
                println!("(Copied to clipboard)");
            }
        }
        Err(e) => eprintln!("Warning: Could not access clipboard: {}", e),
    }
}

/// Helper to print markdown
fn print_markdown(text: &str) {
    let mut skin = MadSkin::default();
    skin.bold.set_fg(Color::Yellow);
    skin.italic.set_fg(Color::Magenta);
    skin.code_block.set_bg(Color::Rgb { r: 40, g: 40, b: 40 });

    skin.print_text(text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parsing() {
        assert_eq!(
            parse_field("tone=Persuasive").unwrap(),
            ("tone".to_string(), "Persuasive".to_string())
        );
        assert_eq!(
            parse_field("equation=H2 + O2 -> H2O").unwrap().1,
            "H2 + O2 -> H2O"
        );
        assert_eq!(parse_field("text=a=b").unwrap().1, "a=b");
        assert!(parse_field("no-equals").is_err());
        assert!(parse_field("=value").is_err());
    }

    #[test]
    fn cli_parses_run_command() {
        let args = Args::try_parse_from([
            "ai-toolbox", "run", "face-swap", "-i", "a.png", "-i", "b.jpg", "-o", "out.png",
        ])
        .unwrap();
        match args.command {
            Command::Run { tool, images, out, .. } => {
                assert_eq!(tool, "face-swap");
                assert_eq!(images.len(), 2);
                assert_eq!(out, Some(PathBuf::from("out.png")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
