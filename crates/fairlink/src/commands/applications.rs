//! Application command handlers.

use std::str::FromStr;

use tabled::Tabled;

use fairlink_core::{
    Application, ApplicationListing, ApplicationStatus, Fair, JobApplicationRequest,
};

use crate::cli::{ApplicationsArgs, ApplicationsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Presenter};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ApplicationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Job")]
    job: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Applied")]
    applied: String,
}

impl ApplicationRow {
    fn new(l: &ApplicationListing, color: bool) -> Self {
        Self {
            id: l.application.id.to_string(),
            job: output::or_dash(l.job_title.as_deref()),
            company: output::or_dash(l.company_name.as_deref()),
            status: output::status_label(l.application.status, color),
            applied: util::format_date(l.application.created_at),
        }
    }
}

fn detail(l: &ApplicationListing) -> String {
    let a = &l.application;
    output::detail_lines(&[
        ("ID", a.id.to_string()),
        ("Job", output::or_dash(l.job_title.as_deref())),
        ("Company", output::or_dash(l.company_name.as_deref())),
        ("Status", a.status.to_string()),
        ("Applicant", a.user_id.clone()),
        ("Resume", output::or_dash(a.resume_url.as_deref())),
        ("Applied", util::format_date(a.created_at)),
        (
            "Cover letter",
            output::or_dash(a.cover_letter.as_deref()),
        ),
    ])
}

fn written_detail(a: &Application) -> String {
    output::detail_lines(&[
        ("ID", a.id.to_string()),
        ("Job position", a.job_position_id.to_string()),
        ("Status", a.status.to_string()),
        ("Resume", output::or_dash(a.resume_url.as_deref())),
    ])
}

fn print_written(application: &Application, out: Presenter) -> Result<(), CliError> {
    let rendered = output::render_single(out.format, application, written_detail, |a| {
        a.id.to_string()
    })?;
    output::print_output(&rendered, out.quiet);
    Ok(())
}

fn parse_status(raw: &str) -> Result<ApplicationStatus, CliError> {
    ApplicationStatus::from_str(raw.trim()).map_err(|_| CliError::Validation {
        field: "status".into(),
        reason: format!("expected pending, reviewing, accepted or rejected, got '{raw}'"),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    fair: &Fair,
    args: ApplicationsArgs,
    global: &GlobalOpts,
    out: Presenter,
) -> Result<(), CliError> {
    match args.command {
        ApplicationsCommand::List => {
            let apps = fair.applications().for_user(global.user.as_deref()).await?;
            let rendered = output::render_list(
                out.format,
                apps.as_slice(),
                |l| ApplicationRow::new(l, out.color),
                |l| l.application.id.to_string(),
            )?;
            output::print_output(&rendered, out.quiet);
            Ok(())
        }

        ApplicationsCommand::Show { id } => {
            let listing = fair.applications().get(&util::entity_id(&id)).await?;
            let rendered = output::render_single(out.format, &listing, detail, |l| {
                l.application.id.to_string()
            })?;
            output::print_output(&rendered, out.quiet);
            Ok(())
        }

        ApplicationsCommand::Apply {
            job,
            cover_letter,
            resume,
        } => {
            let user_id = util::require_user(global, "applications apply")?.to_owned();
            let resume = resume.as_deref().map(util::read_resume).transpose()?;
            let application = fair
                .mutations()
                .apply(JobApplicationRequest {
                    user_id,
                    job_position_id: job,
                    cover_letter,
                    resume,
                })
                .await?;
            print_written(&application, out)
        }

        ApplicationsCommand::SetStatus { id, status } => {
            let status = parse_status(&status)?;
            let application = fair
                .mutations()
                .set_application_status(&util::entity_id(&id), status)
                .await?;
            print_written(&application, out)
        }
    }
}
