//! Sign-in, sign-up and sign-out handlers.

use std::str::FromStr;

use fairlink_core::{Fair, Identity, Role, SignUp};

use crate::cli::{AuthArgs, AuthCommand};
use crate::error::CliError;
use crate::output::{self, Presenter};

use super::util;

fn print_identity(identity: &Identity, out: Presenter) -> Result<(), CliError> {
    let rendered = output::render_single(
        out.format,
        identity,
        |i| {
            output::detail_lines(&[
                ("User", i.id.clone()),
                ("Email", output::or_dash(i.email.as_deref())),
            ])
        },
        |i| i.id.clone(),
    )?;
    output::print_output(&rendered, out.quiet);
    Ok(())
}

pub async fn handle(fair: &Fair, args: AuthArgs, out: Presenter) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Login {
            email,
            password_env,
        } => {
            let password = util::read_password(&password_env)?;
            let session = fair.session().authenticate(&email, &password).await?;
            print_identity(&session.user, out)
        }

        AuthCommand::Signup {
            email,
            first_name,
            last_name,
            role,
            password_env,
        } => {
            let role = Role::from_str(role.trim()).map_err(|_| CliError::Validation {
                field: "role".into(),
                reason: format!("expected jobseeker or employer, got '{role}'"),
            })?;
            let password = util::read_password(&password_env)?;
            let identity = fair
                .session()
                .register(&SignUp {
                    email,
                    password,
                    first_name,
                    last_name,
                    role,
                })
                .await?;
            print_identity(&identity, out)
        }

        AuthCommand::Logout => {
            fair.session().end_session().await?;
            if !out.quiet {
                eprintln!("Signed out");
            }
            Ok(())
        }
    }
}
