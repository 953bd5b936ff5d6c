//! Transload CLI - translator workload and deadline feasibility.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use transload_core::{
    lenient::parse_time, Assignment, Project, ProjectId, ProjectStatus, Time, Translator,
    TranslatorId,
};
use transload_storage::{JsonStorage, Storage};
use transload_workload::{
    count_working_days, StorageWorkloadTracker, Workload, WorkloadConfig, WorkloadEstimator,
    WorkloadSnapshot, WorkloadTracker,
};

#[derive(Parser)]
#[command(name = "transload")]
#[command(about = "Translator workload and deadline feasibility", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Storage path for Transload data
    #[arg(short, long, default_value = ".transload")]
    storage: std::path::PathBuf,

    /// Config file (defaults to config.json in the storage directory)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the translator roster
    Translator {
        #[command(subcommand)]
        command: TranslatorCommands,
    },
    /// Manage projects and assignments
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Show workload and feasibility per translator
    Workload {
        /// Only count work due on or before this date
        #[arg(long)]
        until: Option<String>,
        /// Evaluate as of this instant instead of the current time
        #[arg(long)]
        now: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Preview a translator's workload if assigned to a project
    Preview {
        /// Project ID
        project: String,
        /// Translator ID
        translator: String,
        /// Evaluate as of this instant instead of the current time
        #[arg(long)]
        now: Option<String>,
    },
    /// Count working days between two dates
    Calendar {
        /// Start date or instant
        start: String,
        /// End date or instant
        end: String,
    },
}

#[derive(Subcommand)]
enum TranslatorCommands {
    /// Add a translator to the roster
    Add {
        /// Display name
        name: String,
        /// Short name
        #[arg(long)]
        short_name: Option<String>,
        /// Avatar reference
        #[arg(long)]
        avatar_url: Option<String>,
        /// Words per hour
        #[arg(long, default_value = "500")]
        words_per_hour: u32,
        /// Lines per hour
        #[arg(long, default_value = "50")]
        lines_per_hour: u32,
    },
    /// List the roster
    List,
    /// Update a translator's rates
    Rates {
        /// Translator ID
        id: String,
        /// Words per hour
        words_per_hour: u32,
        /// Lines per hour
        lines_per_hour: u32,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// Add a project
    Add {
        /// Project name
        name: String,
        /// System tag
        #[arg(long, default_value = "")]
        system: String,
        /// Word count
        #[arg(long)]
        words: Option<i64>,
        /// Line count
        #[arg(long)]
        lines: Option<i64>,
        /// Initial deadline
        #[arg(long)]
        initial: Option<String>,
        /// Interim deadline
        #[arg(long)]
        interim: Option<String>,
        /// Final deadline
        #[arg(long = "final")]
        final_deadline: Option<String>,
    },
    /// Assign a translator to a project
    Assign {
        /// Project ID
        project: String,
        /// Translator ID
        translator: String,
    },
    /// Remove a translator from a project
    Unassign {
        /// Project ID
        project: String,
        /// Translator ID
        translator: String,
    },
    /// Change a project's status
    Status {
        /// Project ID
        project: String,
        /// active, complete or cancelled
        status: String,
    },
    /// List projects
    List {
        /// Include complete projects
        #[arg(long)]
        all: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(|| cli.storage.join("config.json"));
    let config = WorkloadConfig::load(&config_path)
        .await
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    debug!("Using config {:?}", config);

    let mut storage = JsonStorage::new(&cli.storage)
        .await
        .with_context(|| format!("Failed to open storage at {}", cli.storage.display()))?;

    match cli.command {
        Commands::Translator { command } => match command {
            TranslatorCommands::Add { name, short_name, avatar_url, words_per_hour, lines_per_hour } => {
                anyhow::ensure!(
                    words_per_hour > 0 && lines_per_hour > 0,
                    "Rates must be positive"
                );
                let mut translator = Translator::new(name);
                translator.short_name = short_name;
                translator.avatar_url = avatar_url;
                translator.words_per_hour = Some(words_per_hour as i64);
                translator.lines_per_hour = Some(lines_per_hour as i64);
                storage.save_translator(&translator).await?;
                println!("Added translator: {} - {}", translator.id, translator.name);
            }
            TranslatorCommands::List => {
                let translators = storage.list_translators().await?;
                println!("Translators ({})", translators.len());
                for t in translators {
                    let rates = t.rates(config.default_rates());
                    println!(
                        "  {} | {} | {} words/h | {} lines/h",
                        t.id,
                        display_name(&t),
                        rates.words_per_hour,
                        rates.lines_per_hour,
                    );
                }
            }
            TranslatorCommands::Rates { id, words_per_hour, lines_per_hour } => {
                let id: TranslatorId = id.parse().map_err(|_| anyhow::anyhow!("Invalid translator ID"))?;
                let translator = storage.set_translator_rates(id, words_per_hour, lines_per_hour).await?;
                info!("Updated rates for {}", translator.id);
                println!(
                    "{}: {} words/h, {} lines/h",
                    translator.name, words_per_hour, lines_per_hour
                );
            }
        },

        Commands::Project { command } => match command {
            ProjectCommands::Add { name, system, words, lines, initial, interim, final_deadline } => {
                let mut project = Project::new(name, system);
                project.words = words;
                project.lines = lines;
                project.initial_deadline = initial.as_deref().map(parse_instant).transpose()?;
                project.interim_deadline = interim.as_deref().map(parse_instant).transpose()?;
                project.final_deadline = final_deadline.as_deref().map(parse_instant).transpose()?;
                storage.save_project(&project).await?;
                println!("Added project: {} - {}", project.id, project.name);
            }
            ProjectCommands::Assign { project, translator } => {
                let mut project = load_project(&storage, &project).await?;
                let translator = load_translator(&storage, &translator).await?;
                if project.is_assigned(translator.id) {
                    println!("{} is already assigned to {}", translator.name, project.name);
                    return Ok(());
                }
                project.assignments.push(Assignment::new(translator.to_ref()));
                storage.save_project(&project).await?;
                println!("Assigned {} to {}", translator.name, project.name);
            }
            ProjectCommands::Unassign { project, translator } => {
                let mut project = load_project(&storage, &project).await?;
                let translator = load_translator(&storage, &translator).await?;
                let now = chrono::Utc::now();
                let mut removed = 0;
                for assignment in project.assignments.iter_mut() {
                    if assignment.translator.id == translator.id && assignment.deleted_at.is_none() {
                        assignment.deleted_at = Some(now);
                        removed += 1;
                    }
                }
                if removed == 0 {
                    println!("{} is not assigned to {}", translator.name, project.name);
                    return Ok(());
                }
                storage.save_project(&project).await?;
                println!("Removed {} from {}", translator.name, project.name);
            }
            ProjectCommands::Status { project, status } => {
                let mut project = load_project(&storage, &project).await?;
                project.status = parse_status(&status)
                    .ok_or_else(|| anyhow::anyhow!("Unknown status: {}", status))?;
                storage.save_project(&project).await?;
                println!("{} is now {}", project.name, format_status(project.status));
            }
            ProjectCommands::List { all } => {
                let projects = if all {
                    storage.list_projects().await?
                } else {
                    storage.list_active_projects().await?
                };
                let now = chrono::Utc::now();

                println!("Projects ({})", projects.len());
                for p in projects {
                    println!(
                        "  {} | {} | {} | {} words | {} lines | due {} | {} assigned - {}",
                        p.id,
                        format_status(p.status),
                        p.system,
                        format_count(p.words),
                        format_count(p.lines),
                        format_deadline(p.closest_deadline(now)),
                        p.live_assignments().count(),
                        p.name,
                    );
                }
            }
        },

        Commands::Workload { until, now, json } => {
            let now = resolve_now(now.as_deref())?;
            let until = until.as_deref().map(parse_instant).transpose()?;
            let tracker = StorageWorkloadTracker::new(storage)
                .with_estimator(WorkloadEstimator::new().with_config(config.clone()));
            let snapshot = tracker.snapshot(now).await?;

            if json {
                let output = match until {
                    Some(target) => filtered_json(&snapshot, target, now, &config),
                    None => serde_json::to_value(&snapshot)?,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(());
            }

            println!("Workload as of {}", now.format("%Y-%m-%d %H:%M"));
            for w in snapshot.sorted() {
                print_workload(w, until, now, &config);
            }
            let s = &snapshot.summary;
            println!();
            println!(
                "{} translators, {} busy, {} infeasible, {} over capacity next week, {:.1} h total",
                s.translators, s.busy, s.infeasible, s.next_week_infeasible, s.total_estimated_hours
            );
        }

        Commands::Preview { project, translator, now } => {
            let now = resolve_now(now.as_deref())?;
            let project_id: ProjectId = project.parse().map_err(|_| anyhow::anyhow!("Invalid project ID"))?;
            let translator_id: TranslatorId =
                translator.parse().map_err(|_| anyhow::anyhow!("Invalid translator ID"))?;
            let tracker = StorageWorkloadTracker::new(storage)
                .with_estimator(WorkloadEstimator::new().with_config(config.clone()));

            let Some(preview) = tracker.preview_assignment(project_id, translator_id, now).await? else {
                println!("Project or translator not found");
                return Ok(());
            };

            if preview.already_assigned {
                println!("Already assigned; current workload:");
            } else {
                println!("Workload after assignment:");
            }
            print_workload(&preview.candidate, None, now, &config);
            if !preview.co_assignees.is_empty() {
                println!("Co-assignees:");
                for w in &preview.co_assignees {
                    print_workload(w, None, now, &config);
                }
            }
        }

        Commands::Calendar { start, end } => {
            let offset = config.offset();
            let start = parse_instant(&start)?.with_timezone(&offset);
            let end = parse_instant(&end)?.with_timezone(&offset);
            let days = count_working_days(&start, &end);
            println!(
                "{} working days ({} h)",
                days,
                days as u64 * config.hours_per_day as u64
            );
        }
    }

    Ok(())
}

async fn load_project(storage: &JsonStorage, id: &str) -> Result<Project> {
    let id: ProjectId = id.parse().map_err(|_| anyhow::anyhow!("Invalid project ID"))?;
    storage
        .load_project(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Project not found: {}", id))
}

async fn load_translator(storage: &JsonStorage, id: &str) -> Result<Translator> {
    let id: TranslatorId = id.parse().map_err(|_| anyhow::anyhow!("Invalid translator ID"))?;
    storage
        .load_translator(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Translator not found: {}", id))
}

fn print_workload(w: &Workload, until: Option<Time>, now: Time, config: &WorkloadConfig) {
    let view = w.until(until, now, config);
    println!(
        "  {} | {} projects | {} words | {} lines | {:.1} h | due {} | {} | next week {:.1} h {}",
        w.translator_name,
        view.project_count,
        view.total_words,
        view.total_lines,
        view.estimated_hours,
        format_deadline(view.earliest_deadline),
        format_feasible(view.is_feasible),
        w.next_week_estimated_hours,
        format_feasible(w.next_week_is_feasible),
    );
}

/// Target-date views for every translator, ordered by name.
fn filtered_json(
    snapshot: &WorkloadSnapshot,
    target: Time,
    now: Time,
    config: &WorkloadConfig,
) -> serde_json::Value {
    let workloads: Vec<serde_json::Value> = snapshot
        .sorted()
        .into_iter()
        .map(|w| {
            serde_json::json!({
                "translator_id": w.translator_id,
                "translator_name": w.translator_name,
                "view": w.until(Some(target), now, config),
                "next_week_estimated_hours": w.next_week_estimated_hours,
                "next_week_is_feasible": w.next_week_is_feasible,
            })
        })
        .collect();

    serde_json::json!({
        "timestamp": snapshot.timestamp,
        "until": target,
        "workloads": workloads,
    })
}

fn resolve_now(now: Option<&str>) -> Result<Time> {
    match now {
        Some(s) => parse_instant(s),
        None => Ok(chrono::Utc::now()),
    }
}

fn parse_instant(s: &str) -> Result<Time> {
    parse_time(s).ok_or_else(|| anyhow::anyhow!("Invalid date: {}", s))
}

fn display_name(t: &Translator) -> String {
    match &t.short_name {
        Some(short) => format!("{} ({})", t.name, short),
        None => t.name.clone(),
    }
}

fn parse_status(s: &str) -> Option<ProjectStatus> {
    match s.to_lowercase().as_str() {
        "active" => Some(ProjectStatus::Active),
        "complete" => Some(ProjectStatus::Complete),
        "cancelled" => Some(ProjectStatus::Cancelled),
        _ => None,
    }
}

fn format_status(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Active => "ACTIVE",
        ProjectStatus::Complete => "COMPLETE",
        ProjectStatus::Cancelled => "CANCELLED",
    }
}

fn format_count(count: Option<i64>) -> String {
    count.map(|c| c.to_string()).unwrap_or_else(|| "?".to_string())
}

fn format_deadline(deadline: Option<Time>) -> String {
    deadline
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_feasible(feasible: bool) -> &'static str {
    if feasible { "OK" } else { "AT RISK" }
}
