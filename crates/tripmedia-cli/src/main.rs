//! tripmedia — command-line client for trip media uploads and display
//! preferences.
//!
//! Set TRIPMEDIA_UPLOAD_URL, TRIPMEDIA_UPLOAD_SUCCESS_URL, and
//! TRIPMEDIA_CSRF_TOKEN for the upload commands.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use tripmedia_cli::{file_from_path, init_tracing, prefs_path};
use tripmedia_client::{HandshakeClient, UploadPipeline};
use tripmedia_core::{HandshakeConfig, Theme, TripId, UploadRestrictions};
use tripmedia_theme::{EnvColorSchemeProbe, FilePreferenceStore, NoopThemeSink, ThemeController};

#[derive(Parser)]
#[command(name = "tripmedia", about = "Trip media upload and theme CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload files to a trip via the signed-URL handshake
    Upload {
        /// Trip the uploads belong to
        #[arg(long)]
        trip: String,
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Drop the photo-gallery restrictions (any type, any size)
        #[arg(long)]
        unrestricted: bool,
    },
    /// Display theme preference
    Theme {
        /// Preference file (default: TRIPMEDIA_PREFS or ~/.tripmedia/prefs.json)
        #[arg(long)]
        prefs: Option<PathBuf>,
        #[command(subcommand)]
        sub: ThemeCommands,
    },
}

#[derive(Subcommand)]
enum ThemeCommands {
    /// Print the effective theme
    Get,
    /// Apply a theme for this invocation without persisting it
    Set {
        /// "light" or "dark"
        theme: String,
    },
    /// Flip the preferred theme and persist the choice
    Toggle,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            trip,
            files,
            unrestricted,
        } => upload(trip, files, unrestricted).await,
        Commands::Theme { prefs, sub } => theme(prefs, sub),
    }
}

async fn upload(trip: String, paths: Vec<PathBuf>, unrestricted: bool) -> anyhow::Result<()> {
    let config = HandshakeConfig::from_env().context(
        "Set TRIPMEDIA_UPLOAD_URL, TRIPMEDIA_UPLOAD_SUCCESS_URL, and TRIPMEDIA_CSRF_TOKEN",
    )?;
    let client = HandshakeClient::new(config, TripId::new(trip))?;
    let pipeline = UploadPipeline::for_client(client);

    let restrictions = if unrestricted {
        UploadRestrictions::default()
    } else {
        UploadRestrictions::photo_gallery()
    };

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        files.push(file_from_path(path)?);
    }
    restrictions.check_files(&files)?;

    let mut batch = Vec::with_capacity(files.len());
    for (file, path) in files.into_iter().zip(&paths) {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        batch.push((file, data));
    }

    let total = batch.len();
    let results = pipeline.upload_all(batch).await;

    let mut failed = 0;
    for (file, result) in results {
        match result {
            Ok(()) => println!(
                "{}",
                serde_json::json!({
                    "file": file.name,
                    "key": file.meta.key,
                    "status": "uploaded",
                })
            ),
            Err(err) => {
                failed += 1;
                tracing::error!(file = %file.name, error = %err, "Upload failed");
                println!(
                    "{}",
                    serde_json::json!({
                        "file": file.name,
                        "status": "failed",
                        "error": err.to_string(),
                    })
                );
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} uploads failed", failed, total);
    }
    Ok(())
}

fn theme(prefs: Option<PathBuf>, command: ThemeCommands) -> anyhow::Result<()> {
    let store = FilePreferenceStore::new(prefs_path(prefs));
    let controller = ThemeController::new(
        Arc::new(store),
        Arc::new(EnvColorSchemeProbe::default()),
        Arc::new(NoopThemeSink),
    );

    match command {
        ThemeCommands::Get => println!("{}", controller.init()?),
        ThemeCommands::Set { theme } => {
            let theme: Theme = theme.parse()?;
            controller.set_theme(theme);
            println!("{}", theme);
        }
        ThemeCommands::Toggle => println!("{}", controller.toggle()?),
    }
    Ok(())
}
