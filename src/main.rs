// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use fill_light::app::AppModel;
use fill_light::i18n;
use std::path::PathBuf;
use uuid::Uuid;

mod cli;

#[derive(Parser)]
#[command(name = "fill-light")]
#[command(about = "Screen fill light with color presets and selfie capture")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras and which way they face
    List,

    /// Take a selfie with the front camera
    Photo {
        /// Output directory (default: ~/Pictures/fill-light)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage saved color presets
    Presets {
        #[command(subcommand)]
        command: PresetCommands,
    },
}

#[derive(Subcommand)]
enum PresetCommands {
    /// Show saved presets in order
    List,

    /// Save a new preset
    Add {
        #[arg(long, value_parser = cli::unit_interval)]
        red: f64,
        #[arg(long, value_parser = cli::unit_interval)]
        green: f64,
        #[arg(long, value_parser = cli::unit_interval)]
        blue: f64,
        #[arg(long, default_value = "1.0", value_parser = cli::unit_interval)]
        alpha: f64,
        #[arg(long, default_value = "1.0", value_parser = cli::unit_interval)]
        brightness: f64,
    },

    /// Remove a preset by id (from 'presets list')
    Remove { id: Uuid },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=fill_light=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => cli::list_cameras(),
        Some(Commands::Photo { output }) => cli::take_photo(output),
        Some(Commands::Presets { command }) => match command {
            PresetCommands::List => cli::list_presets(),
            PresetCommands::Add {
                red,
                green,
                blue,
                alpha,
                brightness,
            } => cli::add_preset(red, green, blue, alpha, brightness),
            PresetCommands::Remove { id } => cli::remove_preset(id),
        },
        None => run_gui(),
    }
}

fn run_gui() -> Result<(), Box<dyn std::error::Error>> {
    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    // Settings for configuring the application window and iced runtime.
    let settings = cosmic::app::Settings::default().size_limits(
        cosmic::iced::Limits::NONE
            .min_width(360.0)
            .min_height(480.0),
    );

    // Starts the application's event loop with `()` as the application's flags.
    cosmic::app::run::<AppModel>(settings, ())?;

    Ok(())
}
