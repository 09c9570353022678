//! Run with: cargo run -- --help

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use studykeeper::config::{self, database::DatabaseConfig};
use studykeeper::modules::course::model::DEFAULT_COURSE_ID;
use studykeeper::modules::inspect;
use studykeeper::modules::migration::controller as migration;
use studykeeper::modules::reset::controller as reset;
use studykeeper::modules::reset::schema::{UserResetReport, WipeTarget};
use studykeeper::AppState;

/// Reset and migrate study-planner documents in MongoDB
#[derive(Parser, Debug)]
#[command(name = "studykeeper")]
#[command(about = "Reset and migrate study-planner documents in MongoDB", long_about = None)]
struct Cli {
    /// MongoDB connection string
    #[arg(long, env = "MONGODB_URI", hide_env_values = true)]
    uri: String,

    /// Database to operate on
    #[arg(long, env = "MONGODB_DATABASE", default_value = "test")]
    database: String,

    /// Report what would change without writing anything
    #[arg(long, global = true)]
    dry_run: bool,

    /// Print the operation report as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Confirm {
    /// Confirm deleting every document in the collection
    #[arg(long)]
    yes: bool,
}

#[derive(Args, Debug)]
struct CourseArgs {
    #[arg(long, default_value = DEFAULT_COURSE_ID)]
    course_id: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Delete a user's tasks, task notes and subject status
    ResetUser { user_id: String },
    /// Delete every user
    ResetUsers(Confirm),
    /// Delete every task
    ResetTasks(Confirm),
    /// Delete every task note
    ResetTaskNotes(Confirm),
    /// Delete every subject-status record
    ResetSubjectStatus(Confirm),
    /// Delete users, tasks, task notes and subject status
    ResetAll(Confirm),
    /// Add registration and expiration dates to user course enrolments
    MigrateUserCourses,
    /// Copy a course's embedded subjects into the subjects collection
    MigrateSubjects(CourseArgs),
    /// Reshape a course's subjects with active flags and task types
    MigrateCourses(CourseArgs),
    /// Reset a course's subject-status records to the customization shape
    MigrateSubjectStatus(CourseArgs),
    /// Run every migration in order
    MigrateAll(CourseArgs),
    /// List collections with document counts
    Collections,
}

fn emit<T: Serialize>(report: &T, json: bool, done: &str) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("✓ {}", done);
    }
    Ok(())
}

/// A missing user is a no-op, never a success.
fn ensure_found(report: &UserResetReport) -> anyhow::Result<()> {
    if !report.found {
        bail!("user {} not found, nothing reset", report.user_id);
    }
    Ok(())
}

fn confirm(state: &AppState, flags: &Confirm, what: &'static str) -> anyhow::Result<()> {
    reset::require_confirmation(state, flags.yes, what)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    config::logging::init(cli.verbose);

    let db_config = DatabaseConfig::new(cli.uri.clone(), Some(cli.database.clone()))?;
    let db = config::database::connect(&db_config)
        .await
        .context("Failed to connect to MongoDB")?;
    let state = AppState::new(db, cli.dry_run);

    if state.dry_run {
        tracing::info!("Dry run, no documents will be written");
    }

    match &cli.command {
        Command::ResetUser { user_id } => {
            let report = reset::reset_user_by_id(&state, user_id).await?;
            ensure_found(&report)?;
            emit(&report, cli.json, "User reset")?;
        }
        Command::ResetUsers(c) => {
            confirm(&state, c, WipeTarget::Users.collection())?;
            emit(&reset::reset_users(&state).await?, cli.json, "Users deleted")?;
        }
        Command::ResetTasks(c) => {
            confirm(&state, c, WipeTarget::Tasks.collection())?;
            emit(&reset::reset_tasks(&state).await?, cli.json, "Tasks deleted")?;
        }
        Command::ResetTaskNotes(c) => {
            confirm(&state, c, WipeTarget::TaskNotes.collection())?;
            emit(&reset::reset_task_notes(&state).await?, cli.json, "Task notes deleted")?;
        }
        Command::ResetSubjectStatus(c) => {
            confirm(&state, c, WipeTarget::SubjectStatus.collection())?;
            emit(
                &reset::reset_user_subject_status(&state).await?,
                cli.json,
                "Subject status deleted",
            )?;
        }
        Command::ResetAll(c) => {
            confirm(&state, c, "all user data")?;
            emit(&reset::reset_all(&state).await?, cli.json, "All user data deleted")?;
        }
        Command::MigrateUserCourses => {
            let report = migration::migrate_user_course_dates(&state).await?;
            emit(&report, cli.json, "User courses migrated")?;
        }
        Command::MigrateSubjects(args) => {
            let report = migration::migrate_subjects(&state, &args.course_id).await?;
            emit(&report, cli.json, "Subjects migrated")?;
        }
        Command::MigrateCourses(args) => {
            let report =
                migration::migrate_course_active_and_relevance(&state, &args.course_id).await?;
            emit(&report, cli.json, "Course migrated")?;
        }
        Command::MigrateSubjectStatus(args) => {
            let report =
                migration::migrate_user_subject_status_customizations(&state, &args.course_id)
                    .await?;
            emit(&report, cli.json, "Subject status migrated")?;
        }
        Command::MigrateAll(args) => {
            let report = migration::migrate_all(&state, &args.course_id).await?;
            emit(&report, cli.json, "All migrations complete")?;
        }
        Command::Collections => {
            let collections = inspect::controller::list_collections(&state).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&collections)?);
            } else {
                for c in collections {
                    println!("  - {} ({} documents)", c.name, c.documents);
                }
            }
        }
    }

    Ok(())
}
