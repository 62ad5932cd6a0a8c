mod config;
mod manifest;
mod project;
mod reconcile;
mod templates;
mod upload;
mod utils;

use anyhow::Context;
use clap::{Parser, Subcommand};
use project::{create_project, update_project, CreateOptions, UpdateOptions};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use upload::{read_storage_config, upload_dir, HttpObjectStore};

/// Packsmith - project scaffolding and maintenance for house-style packages
#[derive(Parser, Debug)]
#[command(name = "packsmith", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new house-style package
    Create {
        /// Package name (scoped automatically unless it starts with '@')
        name: String,

        /// Parent directory for the new project
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Skip the examples directory
        #[arg(long)]
        no_examples: bool,

        /// Skip the vitest test setup
        #[arg(long)]
        no_vitest: bool,
    },

    /// Refresh the generated configuration of an existing project
    Update {
        /// Project directory
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        #[arg(long)]
        eslint: bool,
        #[arg(long)]
        gitignore: bool,
        #[arg(long)]
        cursorrules: bool,
        #[arg(long)]
        publish: bool,
        #[arg(long)]
        pages: bool,
        #[arg(long)]
        pull_request: bool,
        #[arg(long)]
        typedoc: bool,
        #[arg(long)]
        test: bool,
        #[arg(long)]
        deps: bool,
        #[arg(long)]
        husky: bool,
        #[arg(long)]
        license: bool,
        #[arg(long)]
        vscode: bool,
        #[arg(long)]
        tsconfig: bool,

        /// Update everything (the default when no group flag is given)
        #[arg(long)]
        all: bool,
    },

    /// Upload a directory tree to the object-storage backend
    Upload {
        /// Project directory (supplies defaults from packsmith.json)
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Local directory to upload (default: the configured local dir)
        #[arg(long)]
        local: Option<PathBuf>,

        /// Remote prefix (default: the configured dir, else the package name)
        #[arg(long)]
        remote: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Create {
            name,
            directory,
            no_examples,
            no_vitest,
        } => {
            let options = CreateOptions {
                directory,
                examples: !no_examples,
                vitest: !no_vitest,
            };
            let project_dir = create_project(&name, &options)
                .await
                .with_context(|| format!("failed to create project {name}"))?;
            info!("project created at {}", project_dir.display());
        }
        Command::Update {
            directory,
            eslint,
            gitignore,
            cursorrules,
            publish,
            pages,
            pull_request,
            typedoc,
            test,
            deps,
            husky,
            license,
            vscode,
            tsconfig,
            all,
        } => {
            let options = UpdateOptions {
                directory,
                eslint,
                gitignore,
                cursorrules,
                publish,
                pages,
                pull_request,
                typedoc,
                test,
                deps,
                husky,
                license,
                vscode,
                tsconfig,
                all,
            };
            let summary = update_project(&options)
                .await
                .context("failed to update project")?;
            if summary.report.failures > 0 {
                info!(
                    "update finished with {} artifact failure(s)",
                    summary.report.failures
                );
            } else {
                info!("update complete");
            }
        }
        Command::Upload {
            directory,
            local,
            remote,
        } => {
            // Unreadable credentials abort before any task runs
            let storage = read_storage_config()
                .await
                .context("failed to read storage config")?;

            let oss = config::read_config_or_default(&directory).await.oss;

            let local_dir = local.unwrap_or_else(|| directory.join(&oss.local_dir));
            let remote_root = match remote {
                Some(remote) => remote,
                None if !oss.oss_dir.is_empty() => oss.oss_dir.clone(),
                None => manifest::require_manifest(&directory)
                    .await?
                    .name()
                    .map(str::to_string)
                    .ok_or_else(|| anyhow::anyhow!("package.json has no name field"))?,
            };

            let store = HttpObjectStore::new(&storage);
            upload_dir(
                &store,
                &local_dir,
                &remote_root,
                &storage.access_base_url(),
            )
            .await
            .context("upload failed")?;
        }
    }

    Ok(())
}
