// ── Relational assembly ──
//
// The store answers a read with flat rows plus optional embedded sub-rows
// (`booths:booth_id(name)` and friends). These pure functions flatten the
// embedded lookups into the derived fields of the listing types. The same
// joins run over snapshot data, where the lookup is a search of the
// snapshot booth and job sets instead.
//
// A missing embedded row yields `None`; no placeholder text is invented.

use std::collections::HashMap;

use serde::Deserialize;

use crate::model::{
    Application, ApplicationListing, Booth, EntityId, JobListing, JobPosition,
};

/// Embedded `booths(name)` lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmbeddedBooth {
    #[serde(default)]
    pub name: Option<String>,
}

/// Embedded `job_positions(title, booth_id, booths(name))` lookup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EmbeddedJob {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub booth_id: Option<EntityId>,
    #[serde(default)]
    pub booths: Option<EmbeddedBooth>,
}

/// Raw job row as returned with the embedded booth.
#[derive(Debug, Deserialize)]
pub(crate) struct JobRow {
    #[serde(flatten)]
    pub job: JobPosition,
    #[serde(default)]
    pub booths: Option<EmbeddedBooth>,
}

/// Raw application row as returned with the embedded job (and its booth).
#[derive(Debug, Deserialize)]
pub(crate) struct ApplicationRow {
    #[serde(flatten)]
    pub application: Application,
    #[serde(default)]
    pub job_positions: Option<EmbeddedJob>,
}

// ── Joins ────────────────────────────────────────────────────────────

pub fn join_job(job: JobPosition, booth: Option<&EmbeddedBooth>) -> JobListing {
    JobListing {
        job,
        booth_name: booth.and_then(|b| b.name.clone()),
    }
}

pub fn join_application(
    application: Application,
    job: Option<&EmbeddedJob>,
) -> ApplicationListing {
    ApplicationListing {
        application,
        job_title: job.and_then(|j| j.title.clone()),
        company_name: job
            .and_then(|j| j.booths.as_ref())
            .and_then(|b| b.name.clone()),
    }
}

impl JobRow {
    pub(crate) fn into_listing(self) -> JobListing {
        join_job(self.job, self.booths.as_ref())
    }
}

impl ApplicationRow {
    pub(crate) fn into_listing(self) -> ApplicationListing {
        join_application(self.application, self.job_positions.as_ref())
    }
}

// ── Local assembly ───────────────────────────────────────────────────

/// Join job positions against an in-memory booth set.
pub fn assemble_jobs(jobs: &[JobPosition], booths: &[Booth]) -> Vec<JobListing> {
    let by_id = booth_index(booths);
    jobs.iter()
        .map(|job| {
            let booth = by_id.get(&job.booth_id).cloned();
            join_job(job.clone(), booth.as_ref())
        })
        .collect()
}

/// Join applications against in-memory job and booth sets.
pub fn assemble_applications(
    applications: &[Application],
    jobs: &[JobPosition],
    booths: &[Booth],
) -> Vec<ApplicationListing> {
    let booths = booth_index(booths);
    let jobs: HashMap<&EntityId, EmbeddedJob> = jobs
        .iter()
        .map(|job| {
            let embedded = EmbeddedJob {
                title: Some(job.title.clone()),
                booth_id: Some(job.booth_id.clone()),
                booths: booths.get(&job.booth_id).cloned(),
            };
            (&job.id, embedded)
        })
        .collect();

    applications
        .iter()
        .map(|app| join_application(app.clone(), jobs.get(&app.job_position_id)))
        .collect()
}

fn booth_index(booths: &[Booth]) -> HashMap<&EntityId, EmbeddedBooth> {
    booths
        .iter()
        .map(|b| {
            (
                &b.id,
                EmbeddedBooth {
                    name: Some(b.name.clone()),
                },
            )
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::snapshot;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn job_row(booth_id: &str, embedded: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "j1",
            "booth_id": booth_id,
            "title": "Engineer",
            "description": "Build things",
            "location": "Remote",
            "employment_type": "Full-time",
            "created_at": "2024-01-05T00:00:00+00:00",
            "updated_at": null,
            "booths": embedded
        })
    }

    #[test]
    fn embedded_booth_name_is_flattened() {
        let row: JobRow = serde_json::from_value(job_row("B1", json!({ "name": "Acme" }))).unwrap();
        let listing = row.into_listing();
        assert_eq!(listing.booth_name.as_deref(), Some("Acme"));
        assert_eq!(listing.job.booth_id, EntityId::from("B1"));
    }

    #[test]
    fn null_embedded_booth_leaves_name_unset() {
        let row: JobRow = serde_json::from_value(job_row("gone", json!(null))).unwrap();
        assert_eq!(row.into_listing().booth_name, None);
    }

    #[test]
    fn application_row_resolves_title_and_company() {
        let row: ApplicationRow = serde_json::from_value(json!({
            "id": "a1",
            "job_position_id": "j1",
            "user_id": "u1",
            "status": "reviewing",
            "resume_url": null,
            "cover_letter": "Hello",
            "created_at": null,
            "updated_at": null,
            "job_positions": {
                "title": "Engineer",
                "booth_id": "B1",
                "booths": { "name": "Acme" }
            }
        }))
        .unwrap();
        let listing = row.into_listing();
        assert_eq!(listing.job_title.as_deref(), Some("Engineer"));
        assert_eq!(listing.company_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn local_assembly_handles_dangling_booth() {
        let mut jobs = snapshot::job_positions();
        jobs[0].booth_id = EntityId::from("no-such-booth");
        let listings = assemble_jobs(&jobs, &snapshot::booths());
        assert_eq!(listings[0].booth_name, None);
        assert_eq!(listings[1].booth_name.as_deref(), Some("TechGlobal Solutions"));
    }

    #[test]
    fn local_assembly_resolves_applications_transitively() {
        let listings = assemble_applications(
            &snapshot::applications(),
            &snapshot::job_positions(),
            &snapshot::booths(),
        );
        let first = &listings[0];
        assert_eq!(first.job_title.as_deref(), Some("Senior Software Engineer"));
        assert_eq!(first.company_name.as_deref(), Some("TechGlobal Solutions"));
    }
}
