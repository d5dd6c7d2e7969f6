//! TDE CLI - Main entry point

use clap::Parser;
use std::process;
use tde_cli::commands::register::RegisterArgs;
use tde_cli::commands::{self, Context};
use tde_cli::{Cli, Commands, Config, ConfigCommand};
use tde_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use tracing::error;

#[tokio::main]
async fn main() {
    // Pick up TDE_* settings from a local .env file, if any
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    let Some(command) = cli.command else {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    };

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("tde-cli")
        .build();

    // Environment variables take precedence when they parse
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let _ = init_logging(&log_config);

    let result = match load_config(cli.server_url, cli.no_color) {
        Ok(config) => execute_command(command, config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Effective configuration: file and environment, then flags
fn load_config(server_url: Option<String>, no_color: bool) -> tde_cli::Result<Config> {
    let mut config = Config::load()?;

    if let Some(url) = server_url {
        config.set_server_url(url);
    }
    if no_color {
        config.color = false;
    }

    config.validated()
}

/// Execute the CLI command
async fn execute_command(command: Commands, config: Config) -> tde_cli::Result<()> {
    if let Commands::Config { command } = &command {
        let theme = tde_cli::render::Theme::new(config.color);
        return match command {
            ConfigCommand::Get { key } => commands::config::get(&config, key),
            ConfigCommand::Show => commands::config::show(&config, &theme),
        };
    }

    let ctx = Context::from_config(config)?;

    match command {
        Commands::Datasets {
            project,
            page,
            page_size,
            format,
        } => commands::datasets::run(&ctx, project, page, page_size, format).await,

        Commands::Register {
            project,
            title,
            abstract_text,
            site,
            location,
            raw,
            processed,
            summary,
            readme,
            no_interactive,
        } => {
            commands::register::run(
                &ctx,
                RegisterArgs {
                    project,
                    title,
                    abstract_text,
                    site,
                    location,
                    raw,
                    processed,
                    summary,
                    readme,
                    no_interactive,
                },
            )
            .await
        },

        Commands::Files {
            dataset_id,
            file_type,
            format,
        } => commands::files::run(&ctx, dataset_id, &file_type, format).await,

        Commands::Show { dataset_id, format } => {
            commands::show::run(&ctx, dataset_id, format).await
        },

        Commands::Project { project_id, format } => {
            commands::project::run(&ctx, project_id, format).await
        },

        Commands::Snippet {
            dataset_id,
            lang,
            copy,
        } => commands::snippet::run(&ctx, dataset_id, lang, copy).await,

        Commands::Upload { dataset_id, file } => {
            commands::upload::run(&ctx, dataset_id, &file).await
        },

        Commands::Config { .. } => Ok(()),
    }
}
