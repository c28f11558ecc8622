//! Booth command handlers.

use tabled::Tabled;

use fairlink_core::{Booth, BoothPatch, Fair, NewBooth};

use crate::cli::{BoothsArgs, BoothsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Presenter};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BoothRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Industry")]
    industry: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Employees")]
    employees: String,
}

impl From<&Booth> for BoothRow {
    fn from(b: &Booth) -> Self {
        Self {
            id: b.id.to_string(),
            name: b.name.clone(),
            industry: b.industry.clone(),
            location: b.location.clone(),
            employees: b.employee_count.clone(),
        }
    }
}

fn detail(b: &Booth) -> String {
    output::detail_lines(&[
        ("ID", b.id.to_string()),
        ("Name", b.name.clone()),
        ("Description", output::or_dash(b.description.as_deref())),
        ("Industry", b.industry.clone()),
        ("Location", b.location.clone()),
        ("Employees", b.employee_count.clone()),
        ("Owner", b.owner_id.clone()),
        ("Logo", output::or_dash(Some(b.logo.as_str()))),
        ("Created", util::format_date(b.created_at)),
    ])
}

fn print_booth(booth: &Booth, out: Presenter) -> Result<(), CliError> {
    let rendered = output::render_single(out.format, booth, detail, |b| b.id.to_string())?;
    output::print_output(&rendered, out.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    fair: &Fair,
    args: BoothsArgs,
    global: &GlobalOpts,
    out: Presenter,
) -> Result<(), CliError> {
    match args.command {
        BoothsCommand::List => {
            let booths = fair.booths().list().await?;
            let rendered = output::render_list(
                out.format,
                booths.as_slice(),
                |b| BoothRow::from(b),
                |b| b.id.to_string(),
            )?;
            output::print_output(&rendered, out.quiet);
            Ok(())
        }

        BoothsCommand::Show { id } => {
            let booth = fair.booths().get(&util::entity_id(&id)).await?;
            print_booth(&booth, out)
        }

        BoothsCommand::Create {
            name,
            owner,
            description,
            logo,
            cover_image,
            location,
            industry,
            employee_count,
        } => {
            let owner_id = match owner {
                Some(owner) => owner,
                None => util::require_user(global, "booths create")?.to_owned(),
            };
            let booth = fair
                .mutations()
                .create_booth(NewBooth {
                    name,
                    description,
                    logo,
                    cover_image,
                    location,
                    industry,
                    employee_count,
                    owner_id,
                })
                .await?;
            print_booth(&booth, out)
        }

        BoothsCommand::Update {
            id,
            name,
            description,
            logo,
            cover_image,
            location,
            industry,
            employee_count,
        } => {
            let patch = BoothPatch {
                name,
                description,
                logo,
                cover_image,
                location,
                industry,
                employee_count,
            };
            let booth = fair
                .mutations()
                .update_booth(&util::entity_id(&id), patch)
                .await?;
            print_booth(&booth, out)
        }
    }
}
