//! CLI Adapter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::api;
use crate::domain::configuration::load_or_default;
use crate::domain::{AppError, ConfigurationOverrides};

#[derive(Parser)]
#[command(name = "simplelocalize")]
#[command(version)]
#[command(about = "Extract, upload and download translations with SimpleLocalize", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./simplelocalize.yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(flatten)]
    connection: ConnectionArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConnectionArgs {
    /// Project API key
    #[arg(long = "apiKey", global = true)]
    api_key: Option<String>,
    /// Server root, e.g. https://api.simplelocalize.io
    #[arg(long = "baseUrl", global = true)]
    base_url: Option<String>,
    /// Project profile
    #[arg(long, global = true)]
    profile: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find translation keys in source files and send them to SimpleLocalize
    Extract {
        /// Directory scanned for source files
        #[arg(long = "searchDir")]
        search_dir: Option<String>,
        /// Framework whose translation calls are recognized
        #[arg(long = "projectType")]
        project_type: Option<String>,
    },
    /// Upload local translation files
    Upload {
        /// File path, path with {lang}, or directory for MULTI_FILE
        #[arg(long = "uploadPath")]
        upload_path: Option<String>,
        #[arg(long = "uploadFormat")]
        upload_format: Option<String>,
        /// Comma-separated upload options
        #[arg(long = "uploadOptions")]
        upload_options: Option<String>,
        #[arg(long = "languageKey")]
        language_key: Option<String>,
    },
    /// Download translations into local files
    Download {
        /// File path, optionally with {lang} and {ns}
        #[arg(long = "downloadPath")]
        download_path: Option<String>,
        #[arg(long = "downloadFormat")]
        download_format: Option<String>,
        /// Comma-separated download options
        #[arg(long = "downloadOptions")]
        download_options: Option<String>,
        #[arg(long = "languageKey")]
        language_key: Option<String>,
    },
    /// Check the quality gate; exits with the status reported by the server
    Status,
}

impl Commands {
    fn overrides(&self, connection: ConnectionArgs) -> ConfigurationOverrides {
        let mut overrides = ConfigurationOverrides {
            api_key: connection.api_key,
            base_url: connection.base_url,
            profile: connection.profile,
            ..Default::default()
        };
        match self {
            Commands::Extract { search_dir, project_type } => {
                overrides.search_dir = search_dir.clone();
                overrides.project_type = project_type.clone();
            }
            Commands::Upload { upload_path, upload_format, upload_options, language_key } => {
                overrides.upload_path = upload_path.clone();
                overrides.upload_format = upload_format.clone();
                overrides.upload_options = upload_options.clone();
                overrides.language_key = language_key.clone();
            }
            Commands::Download { download_path, download_format, download_options, language_key } => {
                overrides.download_path = download_path.clone();
                overrides.download_format = download_format.clone();
                overrides.download_options = download_options.clone();
                overrides.language_key = language_key.clone();
            }
            Commands::Status => {}
        }
        overrides
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn execute(cli: Cli) -> Result<i32, AppError> {
    let overrides = cli.command.overrides(cli.connection);
    let configuration = load_or_default(cli.config.as_deref())?.with_overrides(overrides);

    match cli.command {
        Commands::Extract { .. } => {
            let outcome = api::extract(configuration)?;
            if outcome.batches_failed > 0 {
                println!(
                    "⚠️  Sent {} of {} key batch(es)",
                    outcome.batches_sent,
                    outcome.batches_sent + outcome.batches_failed
                );
            } else {
                println!(
                    "✅ Extracted {} key(s) from {} file(s)",
                    outcome.keys_found, outcome.files_processed
                );
            }
            Ok(0)
        }
        Commands::Upload { .. } => {
            let outcome = api::upload(configuration)?;
            println!("✅ Uploaded {} file(s)", outcome.uploaded.len());
            Ok(0)
        }
        Commands::Download { .. } => {
            let outcome = api::download(configuration)?;
            println!("✅ Downloaded {} file(s)", outcome.written.len());
            Ok(0)
        }
        Commands::Status => {
            let gate = api::status(configuration)?;
            println!("{}: {}", gate.gate_result, gate.message);
            Ok(gate.status)
        }
    }
}
