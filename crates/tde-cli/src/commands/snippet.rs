//! `tde snippet` command implementation
//!
//! Prints, or copies to the clipboard, code that lists a dataset's raw files.

use crate::commands::show;
use crate::commands::Context;
use crate::error::{CliError, Result};
use crate::view::{Notification, SnippetLanguage};

pub async fn generate(ctx: &Context, dataset_id: i64, lang: SnippetLanguage) -> Result<String> {
    let detail = show::load(ctx, dataset_id).await?;
    Ok(detail.snippet(lang))
}

/// Print or copy a snippet
pub async fn run(ctx: &Context, dataset_id: i64, lang: SnippetLanguage, copy: bool) -> Result<()> {
    let code = generate(ctx, dataset_id, lang).await?;

    if copy {
        copy_to_clipboard(&code)?;
        println!(
            "{}",
            ctx.theme.notification(&Notification::success(lang.copied_message()))
        );
    } else {
        print!("{code}");
    }

    Ok(())
}

/// Copy text to system clipboard
fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;

    let mut clipboard = Clipboard::new().map_err(|e| CliError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| CliError::Clipboard(e.to_string()))?;

    Ok(())
}
