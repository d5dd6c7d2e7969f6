//! `tde register` command implementation
//!
//! Registers a dataset, then re-reads the listing so the new row's display
//! id is the one every other view will show.

use crate::commands::Context;
use crate::error::Result;
use crate::progress::with_spinner;
use crate::view::{DatasetListViewModel, DatasetRegistrationController, RegistrationForm};
use std::io::{self, IsTerminal};
use tokio::sync::Mutex;

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct RegisterArgs {
    pub project: Option<i64>,
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub site: Option<String>,
    pub location: Option<String>,
    pub raw: Option<String>,
    pub processed: Option<String>,
    pub summary: Option<String>,
    pub readme: Option<String>,
    pub no_interactive: bool,
}

impl RegisterArgs {
    fn into_form(self) -> RegistrationForm {
        RegistrationForm {
            title: self.title.unwrap_or_default(),
            abstract_text: self.abstract_text.unwrap_or_default(),
            site: self.site.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            raw: self.raw.unwrap_or_default(),
            processed: self.processed.unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            readme: self.readme.unwrap_or_default(),
        }
    }
}

/// Ask for any blank required field
fn prompt_missing(form: &mut RegistrationForm) -> Result<()> {
    use inquire::{required, Text};

    let fields = [
        ("Title", &mut form.title),
        ("Abstract", &mut form.abstract_text),
        ("Site", &mut form.site),
    ];

    for (label, value) in fields {
        if value.trim().is_empty() {
            *value = Text::new(&format!("{label}:"))
                .with_validator(required!(format!("{label} is required")))
                .prompt()?;
        }
    }

    Ok(())
}

/// Register a dataset
pub async fn run(ctx: &Context, args: RegisterArgs) -> Result<()> {
    let interactive = !args.no_interactive && io::stdin().is_terminal();
    let controller = DatasetRegistrationController::new(args.project);
    let listing = Mutex::new(DatasetListViewModel::new(
        Some(controller.project_id()),
        ctx.config.page_size,
    ));

    let mut form = args.into_form();
    if interactive {
        prompt_missing(&mut form)?;
    }
    controller.edit(|current| *current = form);

    let registered = match with_spinner(
        "Registering dataset...",
        controller.submit(ctx.backend(), &listing),
    )
    .await
    {
        Ok(registered) => registered,
        Err(e) => {
            eprintln!(
                "{}",
                ctx.theme
                    .notification(&DatasetRegistrationController::failure_notification(&e))
            );
            return Err(e);
        },
    };

    println!("{}", ctx.theme.notification(&registered.notification));

    let listing = listing.lock().await;
    let display_id = listing
        .display_id_of(registered.dataset.id)
        .map(str::to_string)
        .unwrap_or_else(|| crate::view::detail::fallback_display_id(&registered.dataset));
    println!("  {:<12} {}", "Display ID:", display_id);
    println!("  {:<12} {}", "Dataset ID:", registered.dataset.id);
    println!("  {:<12} {}", "Project:", registered.dataset.project_id);

    Ok(())
}
