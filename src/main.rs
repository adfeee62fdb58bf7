mod ai;
mod models;
mod store;
mod tracker;
mod tui;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use ai::AiClient;
use models::Status;
use store::{JobStore, Settings};
use tracker::Tracker;

#[derive(Parser)]
#[command(name = "careeros")]
#[command(about = "Personal career workspace - track applications, analyze skill gaps, draft resumes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a job application
    Add {
        /// Job title
        role: String,

        /// Employer name
        company: String,

        /// Location (defaults to Remote)
        #[arg(short, long)]
        location: Option<String>,

        /// Salary or pay range
        #[arg(long)]
        salary: Option<String>,

        /// Status (applied, interview, offer, rejected)
        #[arg(short, long, default_value = "applied")]
        status: String,
    },

    /// List tracked applications, newest first
    List {
        /// Filter by status (applied, interview, offer, rejected)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Delete an application by id (a unique prefix is enough)
    Delete {
        /// Application id
        id: String,
    },

    /// Update an application's status
    Status {
        /// Application id (a unique prefix is enough)
        id: String,

        /// New status (applied, interview, offer, rejected)
        status: String,
    },

    /// Extract role/company/location from a job description
    Extract {
        /// Job description text
        text: String,
    },

    /// Run a skill gap analysis against a job description
    Analyze {
        /// Job description text
        text: Option<String>,

        /// Read the job description from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Generate or rework LaTeX resume source
    Optimize {
        /// Instruction or job description for the AI
        description: String,

        /// Existing .tex file to rework
        #[arg(long)]
        tex: Option<PathBuf>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current settings and data file locations
    Show,

    /// Set a value (keys: api-key, name, target-role, backend-url)
    Set {
        key: String,
        value: String,
    },

    /// Remove all stored settings
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // No subcommand: open the dashboard
        let tracker = Tracker::new(JobStore::open()?);
        let settings = Settings::open()?;
        return tui::run(tracker, settings);
    };

    match command {
        Commands::Add {
            role,
            company,
            location,
            salary,
            status,
        } => {
            let status: Status = status.parse()?;
            let mut tracker = open_tracker()?;
            tracker.open_form();
            tracker.draft.role = role;
            tracker.draft.company = company;
            tracker.draft.location = location.unwrap_or_default();
            tracker.draft.salary = salary.unwrap_or_default();
            tracker.draft.status = status;

            match tracker.submit()? {
                Some(id) => {
                    let job = &tracker.jobs()[0];
                    println!("Added {} at {} ({})", job.role, job.company, short_id(&id));
                }
                None => {
                    return Err(anyhow!(
                        tracker
                            .take_notice()
                            .unwrap_or_else(|| "Role and company are required".to_string())
                    ));
                }
            }
        }

        Commands::List { status } => {
            let status = status.map(|s| s.parse::<Status>()).transpose()?;
            let tracker = open_tracker()?;
            let jobs: Vec<_> = tracker
                .jobs()
                .iter()
                .filter(|j| status.is_none_or(|s| j.status == s))
                .collect();

            if jobs.is_empty() {
                println!("No applications found.");
            } else {
                println!(
                    "{:<10} {:<11} {:<28} {:<20} {:<14} {}",
                    "ID", "STATUS", "ROLE", "COMPANY", "LOCATION", "DATE"
                );
                println!("{}", "-".repeat(94));
                for job in jobs {
                    println!(
                        "{:<10} {:<11} {:<28} {:<20} {:<14} {}",
                        short_id(&job.id),
                        job.status.to_string(),
                        truncate(&job.role, 26),
                        truncate(&job.company, 18),
                        truncate(&job.location, 12),
                        job.date_applied
                    );
                }
            }
        }

        Commands::Delete { id } => {
            let mut tracker = open_tracker()?;
            let id = resolve_id(&tracker, &id)?;
            if tracker.delete(id)? {
                println!("Deleted {}", short_id(&id));
            } else {
                println!("No application with id {}", short_id(&id));
            }
        }

        Commands::Status { id, status } => {
            let status: Status = status.parse()?;
            let mut tracker = open_tracker()?;
            let id = resolve_id(&tracker, &id)?;
            if tracker.set_status(id, status)? {
                println!("Marked {} as {}", short_id(&id), status);
            } else {
                println!("No application with id {}", short_id(&id));
            }
        }

        Commands::Extract { text } => {
            if text.trim().is_empty() {
                return Err(anyhow!("Job description text is empty"));
            }
            let settings = Settings::open()?;
            let client = AiClient::over_http(settings.backend_url())?;
            let result = client.extract(&text, settings.api_key())?;

            println!("role:     {}", result.role.as_deref().unwrap_or("(not found)"));
            println!("company:  {}", result.company.as_deref().unwrap_or("(not found)"));
            println!("location: {}", result.location.as_deref().unwrap_or("Remote"));
        }

        Commands::Analyze { text, file } => {
            let description = match (text, file) {
                (Some(text), None) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                _ => return Err(anyhow!("Provide a job description or --file, not both")),
            };
            if description.trim().is_empty() {
                return Err(anyhow!("Job description text is empty"));
            }

            let settings = Settings::open()?;
            let client = AiClient::over_http(settings.backend_url())?;
            let analysis = client.analyze_gap(&description, settings.api_key())?;
            println!("{}", textwrap::fill(&analysis, 80));
        }

        Commands::Optimize {
            description,
            tex,
            output,
        } => {
            let current_latex = match tex {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => String::new(),
            };

            let settings = Settings::open()?;
            let client = AiClient::over_http(settings.backend_url())?;
            let latex = client.optimize_resume(&description, &current_latex, settings.api_key())?;

            if let Some(out_path) = output {
                std::fs::write(&out_path, &latex)
                    .with_context(|| format!("Failed to write {}", out_path.display()))?;
                println!("Wrote {}", out_path.display());
            } else {
                println!("{}", latex);
            }
        }

        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                let settings = Settings::open()?;
                let jobs = JobStore::open()?;
                let api_key = settings.api_key();
                let masked = if api_key.is_empty() {
                    "(not set)".to_string()
                } else {
                    "*".repeat(api_key.chars().count())
                };
                println!("api-key:     {}", masked);
                println!("name:        {}", or_unset(settings.user_name()));
                println!("target-role: {}", or_unset(settings.target_role()));
                println!("backend-url: {}", settings.backend_url());
                println!();
                println!("settings file:     {}", settings.path().display());
                println!("applications file: {}", jobs.path().display());
            }
            ConfigCommands::Set { key, value } => {
                let mut settings = Settings::open()?;
                let key = settings_key(&key)?;
                settings.set(key, &value)?;
                println!("Set {}", key);
            }
            ConfigCommands::Clear => {
                let mut settings = Settings::open()?;
                settings.clear()?;
                println!("Settings cleared.");
            }
        },
    }

    Ok(())
}

fn open_tracker() -> Result<Tracker> {
    let mut tracker = Tracker::new(JobStore::open()?);
    if let Some(warning) = tracker.take_notice() {
        eprintln!("warning: {}", warning);
    }
    Ok(tracker)
}

/// Accepts a full uuid or a unique prefix of one.
fn resolve_id(tracker: &Tracker, input: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(input) {
        return Ok(id);
    }
    let matches: Vec<Uuid> = tracker
        .jobs()
        .iter()
        .map(|j| j.id)
        .filter(|id| id.to_string().starts_with(input))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(anyhow!("No application id starts with '{}'", input)),
        _ => Err(anyhow!("Id prefix '{}' is ambiguous", input)),
    }
}

fn settings_key(key: &str) -> Result<&'static str> {
    match key {
        "api-key" | "gemini_api_key" => Ok(store::KEY_API_KEY),
        "name" | "user_name" => Ok(store::KEY_USER_NAME),
        "target-role" | "target_role" => Ok(store::KEY_TARGET_ROLE),
        "backend-url" | "backend_url" => Ok(store::KEY_BACKEND_URL),
        _ => Err(anyhow!(
            "Unknown key '{}'. Available: api-key, name, target-role, backend-url",
            key
        )),
    }
}

fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() { "(not set)" } else { value }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
