//! Command line front end: scale a recipe read from a file or standard input.
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use recipe_scaler::config::Config;
use recipe_scaler::scale::parse_count;
use recipe_scaler::{Error, ScaleRatio, convert, render_template_with_config};

/// Shown when a serving count is unusable.
const INVALID_COUNTS: &str = "Invalid count(s) specified: only nonzero integers permitted.";

/// Scale the quantities in a recipe to a new number of servings
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Recipe file to read; reads standard input when omitted
    recipe: Option<PathBuf>,

    /// Number of servings the recipe was written for
    #[arg(short, long, default_value = "2", allow_hyphen_values = true)]
    original: String,

    /// Number of servings to scale the recipe to
    #[arg(short = 'n', long, default_value = "4", allow_hyphen_values = true)]
    servings: String,

    /// Render the scaled recipe through a Jinja2-style template file
    #[arg(short, long)]
    template: Option<PathBuf>,
}

fn main() -> ExitCode {
    // warn level by default; use RUST_LOG=debug to see skipped quantities
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init()
        .ok();

    let args = Args::parse();

    match run(&args, std::io::stdin().lock()) {
        Ok(output) => {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.downcast_ref::<Error>() {
                Some(Error::InvalidScaleInput(reason)) => {
                    log::debug!("rejected counts: {reason}");
                    eprintln!("{INVALID_COUNTS}");
                }
                Some(error) => eprintln!("{}", error.format_with_source()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Scale the recipe named in `args`, or read from `input` when no file is given.
fn run(args: &Args, mut input: impl Read) -> Result<String> {
    // Counts are checked before any input is read
    let original = parse_count(&args.original)?;
    let servings = parse_count(&args.servings)?;
    ScaleRatio::new(original, servings)?;

    let recipe = match &args.recipe {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read recipe {}", path.display()))?,
        None => {
            let mut recipe = String::new();
            input
                .read_to_string(&mut recipe)
                .context("failed to read recipe from standard input")?;
            recipe
        }
    };

    match &args.template {
        Some(path) => {
            let template = fs::read_to_string(path)
                .with_context(|| format!("failed to read template {}", path.display()))?;
            let config = Config::builder()
                .original_servings(original)
                .servings(servings)
                .build();
            Ok(render_template_with_config(&recipe, &template, &config)?)
        }
        None => Ok(convert(&recipe, original, servings)?),
    }
}
