#![forbid(unsafe_code)]

mod config;
mod constants;
mod convert;
mod error;
mod margins;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use config::{Profile, ProfileStore};

#[derive(Parser)]
#[command(name = "pdfreflow", version, about = "Set PDF margins as reusable profiles and reflow for e-readers")]
struct Cli {
    /// Use an alternate config file instead of the per-user one
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// List saved profiles
    Profiles,
    /// Show a profile's margins and flags (defaults to the selected one)
    Show { index: Option<usize> },
    /// Create a new profile with default margins
    New { name: String },
    /// Rename the profile at the given index
    Rename { index: usize, name: String },
    /// Delete the profile at the given index
    Delete { index: usize },
    /// Select the active profile
    Select { index: usize },
    /// Update margins and flags on the profile at the given index
    SetMargins {
        index: usize,
        /// Left margin as a fraction of page width, from the left edge
        #[arg(long)]
        left: Option<f64>,
        /// Right margin as a fraction of page width, from the left edge
        #[arg(long)]
        right: Option<f64>,
        /// Top margin as a fraction of page height, from the top edge
        #[arg(long)]
        top: Option<f64>,
        /// Bottom margin as a fraction of page height, from the top edge
        #[arg(long)]
        bottom: Option<f64>,
        /// Exclude page 1 from conversion (cover pages)
        #[arg(long)]
        skip_first_page: Option<bool>,
        /// Use the wide (3-4 column) layout downstream
        #[arg(long)]
        many_cols: Option<bool>,
        /// Preserve color in the output
        #[arg(long)]
        color: Option<bool>,
    },
    /// Set or clear the converter binary override
    SetConverter { path: Option<PathBuf> },
    /// Print the config file location
    ConfigPath,
    /// Run the external converter on a PDF
    Convert {
        input: PathBuf,
        /// Total page count of the input (normally supplied by the preview renderer)
        #[arg(long)]
        pages: usize,
        /// Profile index to use; defaults to the selected profile
        #[arg(long)]
        profile: Option<usize>,
        /// Output file; defaults to `<input stem>_output.pdf` next to the input
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn print_profile(index: usize, profile: &Profile, selected: bool) {
    let marker = if selected { "*" } else { " " };
    println!("{marker} [{index}] {}", profile.name);
    println!(
        "      margins l={:.2} r={:.2} t={:.2} b={:.2}",
        profile.leftmargin, profile.rightmargin, profile.topmargin, profile.bottommargin
    );
    println!(
        "      skip_first_page={} many_cols={} color={}",
        profile.skip_first_page, profile.many_cols, profile.color
    );
}

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let mut store = match cli.config {
        Some(path) => ProfileStore::open_at(path),
        None => ProfileStore::open(),
    };

    match cli.command {
        CliCommand::Profiles => {
            for (index, profile) in store.profiles().iter().enumerate() {
                let marker = if index == store.selected_index() { "*" } else { " " };
                println!("{marker} [{index}] {}", profile.name);
            }
        }
        CliCommand::Show { index } => {
            let index = index.unwrap_or(store.selected_index());
            let profile = store
                .profiles()
                .get(index)
                .ok_or(error::ConfigError::ProfileIndexOutOfRange(index))?;
            print_profile(index, profile, index == store.selected_index());
        }
        CliCommand::New { name } => {
            store.add_profile(Profile::new(name))?;
            println!("created profile [{}]", store.profiles().len() - 1);
        }
        CliCommand::Rename { index, name } => {
            store.rename_profile(index, name)?;
        }
        CliCommand::Delete { index } => {
            store.delete_profile(index)?;
        }
        CliCommand::Select { index } => {
            store.select_profile(index)?;
        }
        CliCommand::SetMargins {
            index,
            left,
            right,
            top,
            bottom,
            skip_first_page,
            many_cols,
            color,
        } => {
            store.update_profile(index, |profile| {
                if let Some(left) = left {
                    profile.leftmargin = left;
                }
                if let Some(right) = right {
                    profile.rightmargin = right;
                }
                if let Some(top) = top {
                    profile.topmargin = top;
                }
                if let Some(bottom) = bottom {
                    profile.bottommargin = bottom;
                }
                if let Some(skip) = skip_first_page {
                    profile.skip_first_page = skip;
                }
                if let Some(many) = many_cols {
                    profile.many_cols = many;
                }
                if let Some(color) = color {
                    profile.color = color;
                }
            })?;
        }
        CliCommand::SetConverter { path } => {
            store.set_converter_path(path)?;
        }
        CliCommand::ConfigPath => {
            println!("{}", store.path().display());
        }
        CliCommand::Convert {
            input,
            pages,
            profile,
            output,
        } => {
            let index = profile.unwrap_or(store.selected_index());
            let profile = store
                .profiles()
                .get(index)
                .cloned()
                .ok_or(error::ConfigError::ProfileIndexOutOfRange(index))?;

            // Remember where PDFs are opened from, like the file picker would
            if let Some(parent) = input.parent().filter(|p| !p.as_os_str().is_empty()) {
                store.set_last_dir(parent.to_path_buf())?;
            }

            let output = convert::run(store.config(), &profile, pages, &input, output)?;
            info!(profile = %profile.name, "converted with profile");
            println!("{}", output.display());
        }
    }

    Ok(())
}
