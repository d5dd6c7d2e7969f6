//! Build automation tasks for TDE
//!
//! Currently generates the CLI reference from the clap definitions.

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for TDE", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in Markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<tde_cli::Cli>();

    let content = format!(
        r#"# TDE CLI Reference

This documentation is auto-generated from the CLI source code. Last updated: {}.

## Overview

`tde` is a terminal client for the TUFT Data Environment data registry. It
lists and registers datasets, shows per-file metadata and project summaries,
uploads metadata-summary files, and prints Python or R snippets that list a
dataset's raw files.

## Quick Start

```bash
# Point the CLI at your backend
export TDE_API_BASE_URL=https://tde.example.org/api

# Datasets of project 2, newest ids last
tde datasets --project 2

# Register a dataset (prompts for anything missing)
tde register --project 2 --title "Lung WGS" --site "WEHI Milton" \
  --location /project/genomics/lung/ --raw "a_R1.fastq, a_R2.fastq"

# Raw files of dataset 7 and their total size
tde files 7 --type Raw

# Copy an R snippet listing the raw files
tde snippet 7 --lang r --copy
```

## Commands

{}

## Environment Variables

- `TDE_API_BASE_URL` - Backend API base URL (default: `http://localhost:8000`)
- `TDE_API_TIMEOUT_SECS` - Request timeout in seconds (default: `30`)
- `TDE_PAGE_SIZE` - Rows per page in dataset listings (default: `10`)
- `TDE_CONFIG_FILE` - Config file location (default: `<config dir>/tde/config.toml`)
- `NO_COLOR` - Disable coloured output
- `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_DIR`, `LOG_FILTER` - Logging

## Configuration File

```toml
server_url = "https://tde.example.org/api"
timeout_secs = 30
page_size = 25
color = true
```

---

*To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("✅ Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
