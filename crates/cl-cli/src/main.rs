//! CleanLink CLI
//!
//! Command-line access to URL cleaning and text extraction.

mod input;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use cl_core::{clean, dedupe};
use cl_extract::{extract_urls, import_for_copy};

#[derive(Parser)]
#[command(name = "cl-cli")]
#[command(about = "CleanLink URL cleaning and extraction tools")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strip query strings and fragments from URLs
    Clean {
        /// URLs to clean (reads one per line from stdin if omitted)
        urls: Vec<String>,

        /// Drop repeated results, keeping first-seen order
        #[arg(short, long)]
        dedupe: bool,
    },

    /// Extract URLs from free-form text
    Extract {
        /// Input text file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Leave query strings and fragments in place
        #[arg(long)]
        no_clean: bool,

        /// Print a JSON array instead of one URL per line
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let result = match cli.command {
        Commands::Clean { urls, dedupe } => cmd_clean(urls, dedupe),
        Commands::Extract {
            input,
            no_clean,
            json,
        } => cmd_extract(input.as_deref(), !no_clean, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_clean(urls: Vec<String>, should_dedupe: bool) -> Result<(), String> {
    let urls = if urls.is_empty() {
        input::read_lines(None)?
    } else {
        urls
    };
    if urls.is_empty() {
        return Err("No URLs provided".to_string());
    }

    let cleaned: Vec<String> = urls.iter().map(|url| clean(url)).collect();
    let cleaned = if should_dedupe { dedupe(cleaned) } else { cleaned };

    println!("{}", cleaned.join("\n"));
    Ok(())
}

fn cmd_extract(input: Option<&str>, should_clean: bool, json: bool) -> Result<(), String> {
    let text = input::read_text(input)?;

    let urls = if should_clean {
        import_for_copy(&text)
    } else {
        extract_urls(&text)
    };

    if urls.is_empty() {
        return Err("No URLs found".to_string());
    }

    if json {
        let out = serde_json::to_string_pretty(&urls)
            .map_err(|e| format!("Failed to serialize output: {}", e))?;
        println!("{out}");
    } else {
        println!("{}", urls.join("\n"));
    }
    Ok(())
}
