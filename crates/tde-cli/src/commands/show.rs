//! `tde show` command implementation
//!
//! One dataset with its abstract and registered file patterns.

use crate::commands::Context;
use crate::error::Result;
use crate::progress::with_spinner;
use crate::render::detail_table;
use crate::view::{DatasetDetail, DatasetListViewModel};
use crate::OutputFormat;
use tracing::warn;

/// Fetch a dataset, ranked within its project when the listing is reachable
pub async fn load(ctx: &Context, dataset_id: i64) -> Result<DatasetDetail> {
    let response = with_spinner(
        "Loading dataset...",
        ctx.backend().dataset_with_metadata(dataset_id),
    )
    .await?;
    let detail = DatasetDetail::from_response(response);

    let mut listing =
        DatasetListViewModel::new(Some(detail.dataset.project_id), ctx.config.page_size);
    if let Err(e) = listing.refresh(ctx.backend()).await {
        warn!(error = %e, dataset_id, "Could not rank dataset; using its fallback id");
        return Ok(detail);
    }

    Ok(match listing.display_id_of(dataset_id) {
        Some(display_id) => detail.with_display_id(display_id),
        None => detail,
    })
}

pub async fn describe(ctx: &Context, dataset_id: i64, format: OutputFormat) -> Result<String> {
    let detail = load(ctx, dataset_id).await?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&detail)?),
        OutputFormat::Table => Ok(format!(
            "{}\n{}",
            ctx.theme.heading(detail.name()),
            detail_table(&detail, &ctx.theme)
        )),
    }
}

/// Show a dataset
pub async fn run(ctx: &Context, dataset_id: i64, format: OutputFormat) -> Result<()> {
    println!("{}", describe(ctx, dataset_id, format).await?);
    Ok(())
}
