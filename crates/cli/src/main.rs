use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xrh_core::paths::mimic::LAYOUTS;
use xrh_core::{load_settings_with_layout, locate_project_root, DatasetLayout};

#[derive(Parser)]
#[command(name = "xrh")]
#[command(about = "Resolve MIMIC-IV dataset settings for an XRH project")]
struct Cli {
    /// Project root (skips discovery of `.git` / `config/`)
    #[arg(long, global = true, env = "XRH_ROOT")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved project root
    Root,
    /// Print the settings built from a profile
    Show {
        /// Profile name under config/ (without .yaml)
        #[arg(long, short)]
        profile: Option<String>,
        /// Dataset layout, overriding the profile's `layout` key
        #[arg(long)]
        layout: Option<String>,
        /// Emit JSON instead of `field = path` lines
        #[arg(long)]
        json: bool,
    },
    /// List the known dataset layouts
    Layouts,
}

/// Entry point for the `xrh` command.
///
/// # Environment Variables
/// - `XRH_ROOT`: project root override (same as `--root`)
/// - `RUST_LOG`: tracing filter (default directive: `xrh=info`)
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("xrh=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Root) => {
            let root = locate_project_root(cli.root)?;
            println!("{}", root.display());
        }
        Some(Commands::Show {
            profile,
            layout,
            json,
        }) => {
            let root = locate_project_root(cli.root)?;
            let layout = layout
                .as_deref()
                .map(DatasetLayout::from_name)
                .transpose()?;
            let settings = load_settings_with_layout(&root, profile.as_deref(), layout)
                .with_context(|| format!("loading settings under {}", root.display()))?;

            tracing::info!(
                "++ Resolved {} dataset files using layout {}",
                settings.files().len(),
                settings.layout()
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                println!("db_path = {}", settings.db_path().display());
                for file in settings.files() {
                    println!("{} = {}", file.field(), file.path().display());
                }
            }
        }
        Some(Commands::Layouts) => {
            for layout in LAYOUTS {
                println!("{} ({} files)", layout, layout.tables().len());
            }
        }
        None => {
            println!("Use 'xrh --help' for commands");
        }
    }

    Ok(())
}
