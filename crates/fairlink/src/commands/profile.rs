//! Profile command handlers.

use fairlink_core::{Fair, Profile, ProfilePatch};

use crate::cli::{GlobalOpts, ProfileArgs, ProfileCommand};
use crate::error::CliError;
use crate::output::{self, Presenter};

use super::util;

fn detail(p: &Profile) -> String {
    output::detail_lines(&[
        ("User", p.user_id.clone()),
        ("Name", p.full_name()),
        ("Email", p.email.clone()),
        ("Role", p.role.to_string()),
        ("Job title", output::or_dash(p.job_title.as_deref())),
        ("Company", output::or_dash(p.company_name.as_deref())),
        ("Industry", output::or_dash(p.industry.as_deref())),
        ("Location", output::or_dash(p.location.as_deref())),
        ("Resume", output::or_dash(p.resume_url.as_deref())),
        ("Bio", output::or_dash(p.bio.as_deref())),
    ])
}

fn print_profile(profile: &Profile, out: Presenter) -> Result<(), CliError> {
    let rendered = output::render_single(out.format, profile, detail, |p| p.user_id.clone())?;
    output::print_output(&rendered, out.quiet);
    Ok(())
}

pub async fn handle(
    fair: &Fair,
    args: ProfileArgs,
    global: &GlobalOpts,
    out: Presenter,
) -> Result<(), CliError> {
    match args.command {
        ProfileCommand::Show => {
            let user_id = util::require_user(global, "profile show")?;
            let profile = fair
                .profiles()
                .for_user(Some(user_id))
                .await?
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "profile".into(),
                    identifier: user_id.into(),
                    list_command: "profile show --user <ID>".into(),
                })?;
            print_profile(&profile, out)
        }

        ProfileCommand::Update {
            first_name,
            last_name,
            job_title,
            industry,
            company_name,
            location,
            bio,
        } => {
            let user_id = util::require_user(global, "profile update")?;
            let patch = ProfilePatch {
                first_name,
                last_name,
                job_title,
                industry,
                company_name,
                location,
                bio,
            };
            let profile = fair.mutations().update_profile(user_id, patch).await?;
            print_profile(&profile, out)
        }

        ProfileCommand::UploadResume { file } => {
            let user_id = util::require_user(global, "profile upload-resume")?;
            let resume = util::read_resume(&file)?;
            let url = fair.mutations().upload_resume(user_id, resume).await?;
            output::print_output(&url, out.quiet);
            Ok(())
        }
    }
}
