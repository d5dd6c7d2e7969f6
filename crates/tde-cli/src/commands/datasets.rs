//! `tde datasets` command implementation
//!
//! Lists datasets with their display ids, one page at a time.

use crate::commands::Context;
use crate::error::{CliError, Result};
use crate::progress::with_spinner;
use crate::render::datasets_table;
use crate::view::DatasetListViewModel;
use crate::OutputFormat;
use serde_json::json;

/// Fetch and render one page of the listing
pub async fn listing(
    ctx: &Context,
    project: Option<i64>,
    page: usize,
    page_size: Option<usize>,
    format: OutputFormat,
) -> Result<String> {
    if page == 0 {
        return Err(CliError::validation("Pages are numbered from 1"));
    }

    let mut view = DatasetListViewModel::new(project, ctx.config.page_size);
    if let Some(size) = page_size {
        view.set_page_size(size)?;
    }

    with_spinner("Loading datasets...", view.refresh(ctx.backend())).await?;
    view.set_page(page - 1)?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "title": view.title(),
            "page": view.page() + 1,
            "page_size": view.page_size(),
            "total": view.total_count(),
            "datasets": view.page_rows(),
        }))?),
        OutputFormat::Table => {
            let theme = &ctx.theme;
            let mut out = String::new();
            out.push_str(&theme.heading(&view.title()));
            out.push('\n');
            out.push_str(&datasets_table(&view.page_rows(), theme).to_string());
            out.push('\n');
            out.push_str(&theme.dim(&format!(
                "{}  (page {}/{})",
                view.range_label(),
                view.page() + 1,
                view.page_count().max(1)
            )));
            Ok(out)
        },
    }
}

/// List datasets
pub async fn run(
    ctx: &Context,
    project: Option<i64>,
    page: usize,
    page_size: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    println!("{}", listing(ctx, project, page, page_size, format).await?);
    Ok(())
}
