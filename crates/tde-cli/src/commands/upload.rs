//! `tde upload` command implementation

use crate::api::MetadataUpload;
use crate::commands::Context;
use crate::error::{CliError, Result};
use crate::progress::with_spinner;
use crate::view::upload::summary_lines;
use crate::view::{UploadController, UploadOutcome};
use std::path::Path;

/// Upload a metadata-summary file and report what the backend registered
pub async fn run(ctx: &Context, dataset_id: i64, file: &Path) -> Result<()> {
    let upload = MetadataUpload::from_path(dataset_id, file).await?;
    let controller = UploadController::new();

    let outcome = with_spinner(
        "Uploading metadata summary...",
        controller.upload(ctx.backend(), upload),
    )
    .await?;

    println!("{}", ctx.theme.heading(outcome.title()));
    match outcome {
        UploadOutcome::Success { summary } => {
            for line in summary_lines(&summary) {
                println!("  {line}");
            }
            Ok(())
        },
        UploadOutcome::Error { message } => Err(CliError::network(None, message)),
        UploadOutcome::Idle => Ok(()),
    }
}
