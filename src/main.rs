use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mdhtml")]
#[command(about = "Convert Markdown to HTML and build static sites")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single Markdown file to HTML
    Convert {
        /// Input Markdown file
        input: PathBuf,

        /// Output HTML file (defaults to input name with .html extension, `-` for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Site config file
        #[arg(short, long, default_value = "site.toml")]
        config: PathBuf,
    },

    /// Copy static files and render every content page through the template
    Build {
        /// Site config file
        #[arg(short, long, default_value = "site.toml")]
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Convert {
            input,
            output,
            config,
        } => {
            let config = mdhtml::Config::load(&config)?;
            convert(&input, output, &config)
        }
        Commands::Build { config } => {
            let config = mdhtml::Config::load(&config)?;
            mdhtml::site::build_site(&config).context("Site build failed")
        }
    }
}

fn convert(input: &Path, output: Option<PathBuf>, config: &mdhtml::Config) -> Result<()> {
    let markdown = fs::read_to_string(input)
        .with_context(|| format!("Error reading {}", input.display()))?;

    let html = mdhtml::markdown_to_html_with_config(&markdown, config)
        .with_context(|| format!("Error converting {}", input.display()))?;

    let output = output.unwrap_or_else(|| input.with_extension("html"));

    if output.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", html).context("Error writing to stdout")?;
        return Ok(());
    }

    fs::write(&output, html).with_context(|| format!("Error writing {}", output.display()))?;

    log::info!("Created {}", output.display());
    Ok(())
}
