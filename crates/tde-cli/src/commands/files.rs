//! `tde files` command implementation
//!
//! Shows per-file metadata of one dataset, filtered by file type.

use crate::commands::Context;
use crate::error::Result;
use crate::progress::with_spinner;
use crate::render::files_table;
use crate::view::FilesViewModel;
use crate::OutputFormat;
use serde_json::json;

pub async fn listing(
    ctx: &Context,
    dataset_id: i64,
    file_type: &str,
    format: OutputFormat,
) -> Result<String> {
    let mut view = FilesViewModel::new(dataset_id);
    view.set_file_type(file_type);

    with_spinner("Loading file metadata...", view.refresh(ctx.backend())).await?;

    let visible = view.visible();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "dataset_id": dataset_id,
            "file_type": view.file_type(),
            "summary": view.aggregate(),
            "files": visible,
        }))?),
        OutputFormat::Table => Ok(format!(
            "{}\n{}",
            ctx.theme.heading(&view.summary_line()),
            files_table(&visible, &ctx.theme)
        )),
    }
}

/// Show a dataset's files
pub async fn run(ctx: &Context, dataset_id: i64, file_type: &str, format: OutputFormat) -> Result<()> {
    println!("{}", listing(ctx, dataset_id, file_type, format).await?);
    Ok(())
}
