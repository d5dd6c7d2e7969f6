//! `tde project` command implementation

use crate::commands::Context;
use crate::error::Result;
use crate::progress::with_spinner;
use crate::render::project_table;
use crate::view::ProjectSummaryView;
use crate::OutputFormat;

pub async fn summary(ctx: &Context, project_id: i64, format: OutputFormat) -> Result<String> {
    let summary = with_spinner(
        "Loading project summary...",
        ctx.backend().project_summary(project_id),
    )
    .await?;
    let view = ProjectSummaryView::from(&summary);

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&view)?),
        OutputFormat::Table => Ok(format!(
            "{}\n{}",
            ctx.theme.heading(&view.title),
            project_table(&view, &ctx.theme)
        )),
    }
}

/// Summarise a project
pub async fn run(ctx: &Context, project_id: i64, format: OutputFormat) -> Result<()> {
    println!("{}", summary(ctx, project_id, format).await?);
    Ok(())
}
