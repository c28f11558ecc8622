// ── Local snapshot ──
//
// Fixed catalog of representative rows for every resource type, served
// whenever the store is unconfigured, unreachable, failing, or empty.
// The sets are mutually consistent: every job references a snapshot
// booth, every application a snapshot job, every registration a snapshot
// event. Built once per process and cloned out on each call.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{
    Application, ApplicationListing, ApplicationStatus, Booth, EntityId, Event,
    EventRegistration, JobListing, JobPosition, Profile, Role,
};
use crate::relation;
use crate::resource::Resource;

/// Identity that owns every snapshot application and the jobseeker profile.
pub const DEMO_JOBSEEKER: &str = "demo-jobseeker";

static BOOTHS: LazyLock<Vec<Booth>> = LazyLock::new(build_booths);
static JOB_POSITIONS: LazyLock<Vec<JobPosition>> = LazyLock::new(build_job_positions);
static APPLICATIONS: LazyLock<Vec<Application>> = LazyLock::new(build_applications);
static PROFILES: LazyLock<Vec<Profile>> = LazyLock::new(build_profiles);
static EVENTS: LazyLock<Vec<Event>> = LazyLock::new(build_events);
static REGISTRATIONS: LazyLock<Vec<EventRegistration>> = LazyLock::new(build_registrations);

// ── Lookups ──────────────────────────────────────────────────────────

/// The full snapshot set for `T`.
pub fn snapshot_for<T: Resource>() -> Vec<T> {
    T::snapshot()
}

/// The snapshot row for `T` whose id is `id`.
pub fn snapshot_by_id<T: Resource>(id: &EntityId) -> Option<T> {
    T::snapshot().into_iter().find(|row| row.id() == id)
}

pub fn booths() -> Vec<Booth> {
    BOOTHS.clone()
}

pub fn job_positions() -> Vec<JobPosition> {
    JOB_POSITIONS.clone()
}

/// Job positions joined against the snapshot booths.
pub fn jobs() -> Vec<JobListing> {
    relation::assemble_jobs(&JOB_POSITIONS, &BOOTHS)
}

pub fn applications() -> Vec<Application> {
    APPLICATIONS.clone()
}

/// Applications joined against the snapshot jobs and booths.
pub fn application_listings() -> Vec<ApplicationListing> {
    relation::assemble_applications(&APPLICATIONS, &JOB_POSITIONS, &BOOTHS)
}

pub fn profiles() -> Vec<Profile> {
    PROFILES.clone()
}

pub fn events() -> Vec<Event> {
    EVENTS.clone()
}

pub fn event_registrations() -> Vec<EventRegistration> {
    REGISTRATIONS.clone()
}

// ── Fixtures ─────────────────────────────────────────────────────────

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn day(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Some(at(year, month, day, 0, 0))
}

fn logo(name: &str, background: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={name}&background={background}&color=fff&bold=true&font-size=0.5"
    )
}

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/photo-{photo}")
}

#[allow(clippy::too_many_arguments)]
fn booth(
    id: &str,
    name: &str,
    description: &str,
    logo: String,
    cover_image: String,
    location: &str,
    industry: &str,
    employee_count: &str,
) -> Booth {
    Booth {
        id: EntityId::from(id),
        name: name.into(),
        description: Some(description.into()),
        logo,
        cover_image,
        location: location.into(),
        industry: industry.into(),
        employee_count: employee_count.into(),
        owner_id: id.into(),
        created_at: day(2023, 11, 1),
        updated_at: day(2023, 11, 1),
    }
}

fn build_booths() -> Vec<Booth> {
    vec![
        booth(
            "1",
            "TechGlobal Solutions",
            "Leading provider of enterprise technology solutions for businesses of all sizes.",
            logo("TechGlobal", "0D8ABC"),
            unsplash("1497215842964-222b430dc094"),
            "San Francisco, CA",
            "Technology",
            "1000-5000",
        ),
        booth(
            "2",
            "Innovate Health",
            "Revolutionizing healthcare through innovative technology and patient-centered solutions.",
            logo("Innovate+Health", "1D976C"),
            unsplash("1532938911079-1b06ac7ceec7"),
            "Boston, MA",
            "Healthcare",
            "500-1000",
        ),
        booth(
            "3",
            "Green Energy Dynamics",
            "Sustainable energy solutions for a cleaner, greener future.",
            logo("Green+Energy", "2E8B57"),
            unsplash("1466611653911-95081537e5b7"),
            "Austin, TX",
            "Renewable Energy",
            "100-500",
        ),
        booth(
            "4",
            "Financial Futures",
            "Innovative financial technology solutions for modern banking and investment.",
            logo("Financial+Futures", "1B4F72"),
            unsplash("1460925895917-afdab827c52f"),
            "New York, NY",
            "Finance",
            "500-1000",
        ),
        booth(
            "5",
            "Creative Design Studio",
            "Award-winning creative agency specializing in branding, UX/UI design, and digital marketing.",
            logo("Creative+Design", "FF5722"),
            unsplash("1497215842964-222b430dc094"),
            "Los Angeles, CA",
            "Design",
            "50-100",
        ),
        booth(
            "6",
            "EduTech Innovators",
            "Transforming education through accessible and engaging digital learning solutions.",
            logo("EduTech", "3F51B5"),
            unsplash("1501504905252-473c47e087f8"),
            "Chicago, IL",
            "Education Technology",
            "100-500",
        ),
    ]
}

fn job(
    id: &str,
    booth_id: &str,
    title: &str,
    description: &str,
    location: &str,
    employment_type: &str,
    posted: Option<DateTime<Utc>>,
) -> JobPosition {
    JobPosition {
        id: EntityId::from(id),
        booth_id: EntityId::from(booth_id),
        title: title.into(),
        description: description.into(),
        location: location.into(),
        employment_type: employment_type.into(),
        created_at: posted,
        updated_at: posted,
    }
}

fn build_job_positions() -> Vec<JobPosition> {
    vec![
        job(
            "1",
            "1",
            "Senior Software Engineer",
            "Design, develop, and maintain software applications. Experience with modern web frameworks, RESTful APIs, and database systems is expected.",
            "San Francisco, CA (Remote)",
            "Full-time",
            day(2023, 12, 10),
        ),
        job(
            "2",
            "1",
            "UX/UI Designer",
            "Create intuitive and engaging user experiences for our enterprise products, from research through high-fidelity prototypes.",
            "San Francisco, CA",
            "Full-time",
            day(2023, 12, 15),
        ),
        job(
            "3",
            "2",
            "Healthcare Data Analyst",
            "Analyze clinical and operational data to improve patient outcomes and streamline care delivery.",
            "Boston, MA (Hybrid)",
            "Full-time",
            day(2023, 12, 20),
        ),
        job(
            "4",
            "3",
            "Renewable Energy Engineer",
            "Design and optimize solar and wind installations for commercial clients.",
            "Austin, TX",
            "Full-time",
            day(2023, 12, 25),
        ),
        job(
            "5",
            "4",
            "Financial Analyst Intern",
            "Support the investment team with market research, modeling, and reporting.",
            "New York, NY",
            "Internship",
            day(2023, 12, 30),
        ),
        job(
            "6",
            "5",
            "Graphic Designer",
            "Produce brand identities, campaign assets, and digital illustrations for agency clients.",
            "Los Angeles, CA (Remote)",
            "Contract",
            day(2024, 1, 5),
        ),
    ]
}

fn application(
    id: &str,
    job_position_id: &str,
    status: ApplicationStatus,
    cover_letter: &str,
    submitted: Option<DateTime<Utc>>,
) -> Application {
    Application {
        id: EntityId::from(id),
        job_position_id: EntityId::from(job_position_id),
        user_id: DEMO_JOBSEEKER.into(),
        status,
        resume_url: None,
        cover_letter: Some(cover_letter.into()),
        created_at: submitted,
        updated_at: submitted,
    }
}

fn build_applications() -> Vec<Application> {
    vec![
        application(
            "1",
            "1",
            ApplicationStatus::Pending,
            "I have eight years of backend experience and would love to join TechGlobal.",
            day(2024, 1, 10),
        ),
        application(
            "2",
            "3",
            ApplicationStatus::Reviewing,
            "My background in clinical analytics is a strong match for this role.",
            day(2024, 1, 12),
        ),
        application(
            "3",
            "4",
            ApplicationStatus::Accepted,
            "I led two utility-scale solar projects and am excited about your mission.",
            day(2024, 1, 15),
        ),
        application(
            "4",
            "5",
            ApplicationStatus::Rejected,
            "As a finance student I am eager to learn from your investment team.",
            day(2024, 1, 18),
        ),
        application(
            "5",
            "6",
            ApplicationStatus::Pending,
            "Please find my portfolio of brand work attached.",
            day(2024, 1, 20),
        ),
    ]
}

fn employer(id: &str, first: &str, last: &str, company: &str, industry: &str) -> Profile {
    Profile {
        id: EntityId::from(id),
        user_id: id.into(),
        first_name: first.into(),
        last_name: last.into(),
        email: format!("{}@{}.example.com", first.to_ascii_lowercase(), id),
        role: Role::Employer,
        job_title: Some("Talent Acquisition Lead".into()),
        industry: Some(industry.into()),
        company_name: Some(company.into()),
        location: None,
        bio: None,
        resume_url: None,
        created_at: day(2023, 11, 1),
        updated_at: day(2023, 11, 1),
    }
}

fn build_profiles() -> Vec<Profile> {
    vec![
        Profile {
            id: EntityId::from("6"),
            user_id: DEMO_JOBSEEKER.into(),
            first_name: "Jordan".into(),
            last_name: "Rivera".into(),
            email: "jordan.rivera@example.com".into(),
            role: Role::Jobseeker,
            job_title: Some("Software Engineer".into()),
            industry: Some("Technology".into()),
            company_name: None,
            location: Some("Seattle, WA".into()),
            bio: Some("Full-stack engineer looking for a product-focused team.".into()),
            resume_url: None,
            created_at: day(2024, 1, 2),
            updated_at: day(2024, 1, 2),
        },
        employer("1", "Priya", "Shah", "TechGlobal Solutions", "Technology"),
        employer("2", "Marcus", "Lee", "Innovate Health", "Healthcare"),
        employer("3", "Elena", "Garcia", "Green Energy Dynamics", "Renewable Energy"),
        employer("4", "Samuel", "Okafor", "Financial Futures", "Finance"),
        employer("5", "Hannah", "Kim", "Creative Design Studio", "Design"),
    ]
}

fn event(
    id: &str,
    name: &str,
    description: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    location: &str,
) -> Event {
    Event {
        id: EntityId::from(id),
        name: name.into(),
        description: description.into(),
        start_date: start,
        end_date: end,
        location: Some(location.into()),
        created_at: day(2023, 9, 1),
        updated_at: day(2023, 9, 1),
    }
}

fn build_events() -> Vec<Event> {
    vec![
        event(
            "1",
            "Virtual Career Fair 2024",
            "Connect with top employers from around the world. Explore job opportunities, attend workshops, and network with industry professionals.",
            at(2024, 7, 15, 10, 0),
            at(2024, 7, 16, 16, 0),
            "Virtual Event",
        ),
        event(
            "2",
            "Tech Networking Mixer",
            "A virtual networking event focused on connecting professionals in the tech industry. Meet peers, mentors, and potential collaborators.",
            at(2024, 6, 5, 18, 0),
            at(2024, 6, 5, 20, 0),
            "Zoom Webinar",
        ),
        event(
            "3",
            "Resume Workshop",
            "Get expert feedback on your resume from industry professionals and learn how to stand out to recruiters.",
            at(2024, 5, 20, 13, 0),
            at(2024, 5, 20, 15, 0),
            "Virtual Workshop",
        ),
        event(
            "4",
            "Healthcare Industry Panel",
            "Healthcare professionals discuss current trends and opportunities in the industry.",
            at(2024, 4, 10, 11, 0),
            at(2024, 4, 10, 13, 0),
            "Virtual Panel",
        ),
        event(
            "5",
            "Startup Funding Workshop",
            "Funding options for startups, from bootstrapping to venture capital, with an open Q&A.",
            at(2023, 12, 5, 15, 0),
            at(2023, 12, 5, 17, 0),
            "Virtual Workshop",
        ),
        event(
            "6",
            "Diversity in Tech Conference",
            "A day-long conference promoting diversity and inclusion in the tech industry, with keynotes and panel discussions.",
            at(2023, 10, 15, 9, 0),
            at(2023, 10, 15, 17, 0),
            "Virtual Conference",
        ),
    ]
}

fn registration(id: &str, event_id: &str, user_id: &str) -> EventRegistration {
    EventRegistration {
        id: EntityId::from(id),
        event_id: EntityId::from(event_id),
        user_id: user_id.into(),
        created_at: day(2024, 1, 3),
    }
}

fn build_registrations() -> Vec<EventRegistration> {
    vec![
        registration("1", "1", DEMO_JOBSEEKER),
        registration("2", "2", DEMO_JOBSEEKER),
        registration("3", "3", DEMO_JOBSEEKER),
        registration("4", "1", "1"),
        registration("5", "4", "2"),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_set_has_five_or_six_rows() {
        for len in [
            booths().len(),
            job_positions().len(),
            applications().len(),
            profiles().len(),
            events().len(),
            event_registrations().len(),
        ] {
            assert!((5..=6).contains(&len), "unexpected snapshot size {len}");
        }
    }

    #[test]
    fn repeated_calls_return_identical_data() {
        assert_eq!(booths(), booths());
        assert_eq!(jobs(), jobs());
        assert_eq!(events(), events());
    }

    #[test]
    fn foreign_keys_resolve_within_the_snapshot() {
        let booth_ids: HashSet<_> = booths().into_iter().map(|b| b.id).collect();
        let job_ids: HashSet<_> = job_positions().into_iter().map(|j| j.id).collect();
        let event_ids: HashSet<_> = events().into_iter().map(|e| e.id).collect();

        assert!(job_positions().iter().all(|j| booth_ids.contains(&j.booth_id)));
        assert!(applications().iter().all(|a| job_ids.contains(&a.job_position_id)));
        assert!(
            event_registrations()
                .iter()
                .all(|r| event_ids.contains(&r.event_id))
        );
    }

    #[test]
    fn assembled_jobs_carry_booth_names() {
        assert!(jobs().iter().all(|j| j.booth_name.is_some()));
        assert!(
            application_listings()
                .iter()
                .all(|a| a.job_title.is_some() && a.company_name.is_some())
        );
    }

    #[test]
    fn lookup_by_id_is_restricted_to_matching_rows() {
        let booth: Booth = snapshot_by_id(&EntityId::from("3")).unwrap();
        assert_eq!(booth.name, "Green Energy Dynamics");
        assert!(snapshot_by_id::<Booth>(&EntityId::from("99")).is_none());
    }

    #[test]
    fn timestamps_are_fixed() {
        let first = &events()[0];
        assert_eq!(first.start_date.to_rfc3339(), "2024-07-15T10:00:00+00:00");
    }
}
