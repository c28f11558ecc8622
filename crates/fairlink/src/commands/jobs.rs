//! Job position command handlers.

use tabled::Tabled;

use fairlink_core::{Fair, JobListing, JobPosition, NewJobPosition};

use crate::cli::{JobsArgs, JobsCommand};
use crate::error::CliError;
use crate::output::{self, Presenter};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Type")]
    employment_type: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&JobListing> for JobRow {
    fn from(l: &JobListing) -> Self {
        Self {
            id: l.job.id.to_string(),
            title: l.job.title.clone(),
            company: output::or_dash(l.booth_name.as_deref()),
            employment_type: l.job.employment_type.clone(),
            location: l.job.location.clone(),
        }
    }
}

fn detail(l: &JobListing) -> String {
    output::detail_lines(&[
        ("ID", l.job.id.to_string()),
        ("Title", l.job.title.clone()),
        ("Company", output::or_dash(l.booth_name.as_deref())),
        ("Booth", l.job.booth_id.to_string()),
        ("Type", l.job.employment_type.clone()),
        ("Location", l.job.location.clone()),
        ("Posted", util::format_date(l.job.created_at)),
        ("Description", l.job.description.clone()),
    ])
}

fn created_detail(j: &JobPosition) -> String {
    output::detail_lines(&[
        ("ID", j.id.to_string()),
        ("Title", j.title.clone()),
        ("Booth", j.booth_id.to_string()),
        ("Type", j.employment_type.clone()),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(fair: &Fair, args: JobsArgs, out: Presenter) -> Result<(), CliError> {
    match args.command {
        JobsCommand::List { booth } => {
            let all = fair.jobs().list().await?;
            let booth = booth.as_deref().map(util::entity_id);
            let jobs: Vec<JobListing> = all
                .iter()
                .filter(|l| booth.as_ref().is_none_or(|b| &l.job.booth_id == b))
                .cloned()
                .collect();
            let rendered = output::render_list(
                out.format,
                &jobs,
                |l| JobRow::from(l),
                |l| l.job.id.to_string(),
            )?;
            output::print_output(&rendered, out.quiet);
            Ok(())
        }

        JobsCommand::Show { id } => {
            let listing = fair.jobs().get(&util::entity_id(&id)).await?;
            let rendered =
                output::render_single(out.format, &listing, detail, |l| l.job.id.to_string())?;
            output::print_output(&rendered, out.quiet);
            Ok(())
        }

        JobsCommand::Create {
            booth,
            title,
            description,
            location,
            employment_type,
        } => {
            let job = fair
                .mutations()
                .create_job(NewJobPosition {
                    booth_id: booth,
                    title,
                    description,
                    location,
                    employment_type,
                })
                .await?;
            let rendered =
                output::render_single(out.format, &job, created_detail, |j| j.id.to_string())?;
            output::print_output(&rendered, out.quiet);
            Ok(())
        }
    }
}
