//! Event command handlers.

use std::collections::HashSet;

use chrono::Utc;
use tabled::Tabled;

use fairlink_core::{EntityId, Event, EventRegistration, Fair};

use crate::cli::{EventsArgs, EventsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Presenter};

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Starts")]
    starts: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Registered")]
    registered: String,
}

#[derive(Tabled)]
struct RegistrationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Registered")]
    registered: String,
}

impl From<&EventRegistration> for RegistrationRow {
    fn from(r: &EventRegistration) -> Self {
        Self {
            id: r.id.to_string(),
            event: r.event_id.to_string(),
            user: r.user_id.clone(),
            registered: util::format_date(r.created_at),
        }
    }
}

fn detail(e: &Event) -> String {
    let when = if e.is_past(Utc::now()) { "past" } else { "upcoming" };
    output::detail_lines(&[
        ("ID", e.id.to_string()),
        ("Name", e.name.clone()),
        ("Starts", util::format_datetime(e.start_date)),
        ("Ends", util::format_datetime(e.end_date)),
        ("Location", output::or_dash(e.location.as_deref())),
        ("When", when.into()),
        ("Description", e.description.clone()),
    ])
}

/// Event ids `user` is registered for; empty when no user is acting.
async fn registered_ids(fair: &Fair, user: Option<&str>) -> Result<HashSet<EntityId>, CliError> {
    let Some(user) = user else {
        return Ok(HashSet::new());
    };
    let registrations = fair.events().registrations().await?;
    Ok(registrations
        .iter()
        .filter(|r| r.user_id == user)
        .map(|r| r.event_id.clone())
        .collect())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    fair: &Fair,
    args: EventsArgs,
    global: &GlobalOpts,
    out: Presenter,
) -> Result<(), CliError> {
    match args.command {
        EventsCommand::List => {
            let events = fair.events().list().await?;
            let mine = registered_ids(fair, global.user.as_deref()).await?;
            let rendered = output::render_list(
                out.format,
                events.as_slice(),
                |e| EventRow {
                    id: e.id.to_string(),
                    name: util::truncate(&e.name, 40),
                    starts: util::format_datetime(e.start_date),
                    location: output::or_dash(e.location.as_deref()),
                    registered: String::from(if mine.contains(&e.id) { "yes" } else { "" }),
                },
                |e| e.id.to_string(),
            )?;
            output::print_output(&rendered, out.quiet);
            Ok(())
        }

        EventsCommand::Show { id } => {
            let event = fair.events().get(&util::entity_id(&id)).await?;
            let rendered = output::render_single(out.format, &event, detail, |e| e.id.to_string())?;
            output::print_output(&rendered, out.quiet);
            Ok(())
        }

        EventsCommand::Register { id } => {
            let user_id = util::require_user(global, "events register")?;
            let event_id = util::entity_id(&id);
            if fair.events().is_registered(&event_id, user_id).await? {
                if !out.quiet {
                    eprintln!("Already registered for event {event_id}");
                }
                return Ok(());
            }
            let registration = fair
                .mutations()
                .register_for_event(&event_id, user_id)
                .await?;
            let rendered = output::render_single(
                out.format,
                &registration,
                |r| {
                    output::detail_lines(&[
                        ("ID", r.id.to_string()),
                        ("Event", r.event_id.to_string()),
                        ("User", r.user_id.clone()),
                    ])
                },
                |r| r.id.to_string(),
            )?;
            output::print_output(&rendered, out.quiet);
            Ok(())
        }

        EventsCommand::Registrations { mine } => {
            let all = fair.events().registrations().await?;
            let user = if mine {
                Some(util::require_user(global, "events registrations --mine")?)
            } else {
                None
            };
            let registrations: Vec<EventRegistration> = all
                .iter()
                .filter(|r| user.is_none_or(|u| r.user_id == u))
                .cloned()
                .collect();
            let rendered = output::render_list(
                out.format,
                &registrations,
                |r| RegistrationRow::from(r),
                |r| r.id.to_string(),
            )?;
            output::print_output(&rendered, out.quiet);
            Ok(())
        }
    }
}
