//! Centermass CLI: command-line interface for center-of-mass documents.
//!
//! Usage:
//!   centermass new <NAME>                     Create an empty .mass document
//!   centermass info <PATH>                    Show sections, weights, and influences
//!   centermass validate <PATH> [--scene]      Check a document (against a scene)
//!   centermass section <ACTION> <PATH> ...    Add, rename, remove, or reweight sections
//!   centermass influence <ACTION> <PATH> ...  Connect or disconnect transforms
//!   centermass weights <PATH>                 Show normalized section weights
//!   centermass settings <PATH> [OPTIONS]      Show or change node settings
//!   centermass evaluate <PATH> --scene <FILE> Compute the center of mass

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "centermass",
    about = "Center-of-mass rigs: edit, validate, and evaluate",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new, empty mass document
    New {
        /// Node name
        name: String,

        /// Output directory (defaults to the configured documents directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sphere size for the new node
        #[arg(long)]
        sphere_size: Option<f64>,
    },

    /// Show document information
    Info {
        /// Path to the .mass document
        path: PathBuf,
    },

    /// Validate a mass document
    Validate {
        /// Path to the .mass document
        path: PathBuf,

        /// Scene to resolve influences against
        #[arg(long)]
        scene: Option<PathBuf>,
    },

    /// Edit sections
    Section {
        #[command(subcommand)]
        action: SectionAction,
    },

    /// Edit section influences
    Influence {
        #[command(subcommand)]
        action: InfluenceAction,
    },

    /// Show normalized section weights
    Weights {
        /// Path to the .mass document
        path: PathBuf,
    },

    /// Show or change node settings
    Settings {
        /// Path to the .mass document
        path: PathBuf,

        /// Compute the center of mass at all
        #[arg(long)]
        calculate: Option<bool>,

        /// Draw a sphere at the center of mass
        #[arg(long)]
        draw_sphere: Option<bool>,

        /// Draw the vertical guide line
        #[arg(long)]
        draw_vertical_line: Option<bool>,

        /// Draw section-to-center debug lines
        #[arg(long)]
        draw_debugging_lines: Option<bool>,

        /// Sphere radius
        #[arg(long)]
        sphere_size: Option<f64>,
    },

    /// Compute the center of mass against a scene
    Evaluate {
        /// Path to the .mass document
        path: PathBuf,

        /// Scene file with transform matrices
        #[arg(long)]
        scene: PathBuf,

        /// Override the scene's up axis (y|z)
        #[arg(long)]
        up_axis: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SectionAction {
    /// Add a section
    Add {
        path: PathBuf,
        name: String,

        /// Section weight (defaults to a body-part guess from the name)
        #[arg(long, allow_negative_numbers = true)]
        weight: Option<f64>,

        /// Scene the influences live in (required with --influence)
        #[arg(long, requires = "influences")]
        scene: Option<PathBuf>,

        /// Transform to connect as an influence (repeatable)
        #[arg(short, long = "influence", requires = "scene")]
        influences: Vec<String>,
    },

    /// Rename a section
    Rename {
        path: PathBuf,
        name: String,
        new_name: String,
    },

    /// Remove a section and disconnect its influences
    Remove { path: PathBuf, name: String },

    /// Set a section's weight
    Weight {
        path: PathBuf,
        name: String,
        #[arg(allow_negative_numbers = true)]
        weight: f64,
    },

    /// Include or exclude a section from the calculation
    Consider {
        path: PathBuf,
        name: String,
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
}

#[derive(Subcommand)]
enum InfluenceAction {
    /// Connect transforms to a section
    Add {
        path: PathBuf,
        section: String,

        /// Scene the transforms live in
        #[arg(long)]
        scene: PathBuf,

        #[arg(required = true)]
        transforms: Vec<String>,
    },

    /// Disconnect transforms from a section
    Remove {
        path: PathBuf,
        section: String,

        #[arg(required = true)]
        transforms: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = centermass_common::config::AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    centermass_common::logging::init_logging(&logging);

    match cli.command {
        Commands::New {
            name,
            output,
            sphere_size,
        } => commands::new::run(&config, name, output, sphere_size),
        Commands::Info { path } => commands::info::run(path),
        Commands::Validate { path, scene } => commands::validate::run(path, scene),
        Commands::Section { action } => match action {
            SectionAction::Add {
                path,
                name,
                weight,
                scene,
                influences,
            } => commands::section::add(&config, path, name, weight, scene, influences),
            SectionAction::Rename {
                path,
                name,
                new_name,
            } => commands::section::rename(path, name, new_name),
            SectionAction::Remove { path, name } => commands::section::remove(path, name),
            SectionAction::Weight { path, name, weight } => {
                commands::section::weight(path, name, weight)
            }
            SectionAction::Consider {
                path,
                name,
                enabled,
            } => commands::section::consider(path, name, enabled),
        },
        Commands::Influence { action } => match action {
            InfluenceAction::Add {
                path,
                section,
                scene,
                transforms,
            } => commands::influence::add(path, section, scene, transforms),
            InfluenceAction::Remove {
                path,
                section,
                transforms,
            } => commands::influence::remove(path, section, transforms),
        },
        Commands::Weights { path } => commands::weights::run(path),
        Commands::Settings {
            path,
            calculate,
            draw_sphere,
            draw_vertical_line,
            draw_debugging_lines,
            sphere_size,
        } => commands::settings::run(
            path,
            commands::settings::SettingsChange {
                calculate,
                draw_sphere,
                draw_vertical_line,
                draw_debugging_lines,
                sphere_size,
            },
        ),
        Commands::Evaluate {
            path,
            scene,
            up_axis,
            json,
        } => commands::evaluate::run(path, scene, up_axis, json),
    }
}
