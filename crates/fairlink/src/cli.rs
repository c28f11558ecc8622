//! Clap derive structures for the `fairlink` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fairlink -- browse and manage a virtual career fair
#[derive(Debug, Parser)]
#[command(
    name = "fairlink",
    version,
    about = "Browse booths, jobs, applications and events of a virtual career fair",
    long_about = "Command-line client for a virtual career fair.\n\n\
        Talks to the configured remote store when FAIRLINK_STORE_URL and\n\
        FAIRLINK_STORE_KEY are set; otherwise serves a built-in sample\n\
        catalog and refuses writes.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Remote store URL (overrides config file)
    #[arg(long, env = "FAIRLINK_STORE_URL", global = true)]
    pub store_url: Option<String>,

    /// Remote store access key (overrides config file)
    #[arg(long, env = "FAIRLINK_STORE_KEY", global = true, hide_env_values = true)]
    pub store_key: Option<String>,

    /// Path to the config file
    #[arg(long, env = "FAIRLINK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Act as this user id (applications, profile, registrations)
    #[arg(long, short = 'u', env = "FAIRLINK_USER", global = true)]
    pub user: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "FAIRLINK_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show whether the remote store or the sample catalog is in use
    Mode,

    /// Browse and manage employer booths
    #[command(alias = "b")]
    Booths(BoothsArgs),

    /// Browse and post job positions
    #[command(alias = "j")]
    Jobs(JobsArgs),

    /// Track and review job applications
    #[command(alias = "apps")]
    Applications(ApplicationsArgs),

    /// View and edit an attendee profile
    Profile(ProfileArgs),

    /// Browse fair events and register
    #[command(alias = "ev")]
    Events(EventsArgs),

    /// Sign in, sign up, sign out
    Auth(AuthArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Booths ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BoothsArgs {
    #[command(subcommand)]
    pub command: BoothsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BoothsCommand {
    /// List all booths
    #[command(alias = "ls")]
    List,

    /// Show one booth
    #[command(alias = "get")]
    Show {
        /// Booth id
        id: String,
    },

    /// Create a booth
    Create {
        #[arg(long)]
        name: String,
        /// Owning employer account id [default: --user]
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "")]
        logo: String,
        #[arg(long, default_value = "")]
        cover_image: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        industry: String,
        /// Head-count bucket, e.g. "100-500"
        #[arg(long, default_value = "")]
        employee_count: String,
    },

    /// Update fields of a booth
    Update {
        /// Booth id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        logo: Option<String>,
        #[arg(long)]
        cover_image: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        employee_count: Option<String>,
    },
}

// ── Jobs ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct JobsArgs {
    #[command(subcommand)]
    pub command: JobsCommand,
}

#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    /// List job positions with their booth names
    #[command(alias = "ls")]
    List {
        /// Only positions at this booth
        #[arg(long)]
        booth: Option<String>,
    },

    /// Show one job position
    #[command(alias = "get")]
    Show {
        /// Job position id
        id: String,
    },

    /// Post a job position at a booth
    Create {
        #[arg(long)]
        booth: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        location: String,
        /// "Full-time", "Internship", "Contract", ...
        #[arg(long, default_value = "Full-time")]
        employment_type: String,
    },
}

// ── Applications ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApplicationsArgs {
    #[command(subcommand)]
    pub command: ApplicationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApplicationsCommand {
    /// List the acting user's applications
    #[command(alias = "ls")]
    List,

    /// Show one application
    #[command(alias = "get")]
    Show {
        /// Application id
        id: String,
    },

    /// Apply for a job position as the acting user
    Apply {
        /// Job position id
        #[arg(long)]
        job: String,
        #[arg(long)]
        cover_letter: Option<String>,
        /// Resume file to upload with the application
        #[arg(long)]
        resume: Option<PathBuf>,
    },

    /// Set the review status of an application
    SetStatus {
        /// Application id
        id: String,
        /// pending, reviewing, accepted or rejected
        status: String,
    },
}

// ── Profile ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the acting user's profile
    #[command(alias = "get")]
    Show,

    /// Update profile fields
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        job_title: Option<String>,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        company_name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },

    /// Upload a resume and attach it to the profile
    UploadResume {
        /// Path to the resume file
        file: PathBuf,
    },
}

// ── Events ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EventsArgs {
    #[command(subcommand)]
    pub command: EventsCommand,
}

#[derive(Debug, Subcommand)]
pub enum EventsCommand {
    /// List events, soonest first
    #[command(alias = "ls")]
    List,

    /// Show one event
    #[command(alias = "get")]
    Show {
        /// Event id
        id: String,
    },

    /// Register the acting user for an event
    Register {
        /// Event id
        id: String,
    },

    /// List event registrations
    Registrations {
        /// Only registrations of the acting user
        #[arg(long)]
        mine: bool,
    },
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Read the password from this variable instead of prompting
        #[arg(long, default_value = "FAIRLINK_PASSWORD")]
        password_env: String,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// jobseeker or employer
        #[arg(long, default_value = "jobseeker")]
        role: String,
        /// Read the password from this variable instead of prompting
        #[arg(long, default_value = "FAIRLINK_PASSWORD")]
        password_env: String,
    },

    /// Sign out
    Logout,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the effective configuration (access key masked)
    Show,

    /// Save store connection settings to the config file
    SetStore {
        #[arg(long)]
        url: String,
        #[arg(long)]
        key: String,
        #[arg(long)]
        bucket: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
