use clap::{Parser, Subcommand};
use importer::{ImportReport, ImporterError, ResultImporter, check_csv_file};
use std::path::PathBuf;
use storage::Database;
use storage::dto::ranking::{EventRankings, RankingBoard};
use storage::services::standings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pacehub-import")]
#[command(about = "PaceHub race results importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:pacehub.db")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a `<cpf>,<HH:MM:SS>` CSV for a concluded event, replacing its results
    Results {
        file: PathBuf,

        #[arg(long)]
        event_id: i64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a CSV file without touching the database
    Validate { file: PathBuf },
    /// Show the podium boards of an event
    Rankings {
        #[arg(long)]
        event_id: i64,
    },
    /// Make an event's results visible in athlete histories
    Publish {
        #[arg(long)]
        event_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "pacehub_import={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Results {
            file,
            event_id,
            json,
        } => {
            let db = connect(&cli.database_url).await?;
            handle_results_import(&db, file, event_id, json).await?;
        }
        Commands::Validate { file } => {
            let rows = check_csv_file(&file)
                .map_err(|e| format!("{}: {}", file.display(), e))?;
            tracing::info!("✓ {} is a valid results file with {} rows", file.display(), rows);
        }
        Commands::Rankings { event_id } => {
            let db = connect(&cli.database_url).await?;
            let rankings = standings::event_rankings(db.pool(), event_id).await?;
            print_rankings(&rankings);
        }
        Commands::Publish { event_id } => {
            let db = connect(&cli.database_url).await?;
            standings::publish_results(db.pool(), event_id, true).await?;
            tracing::info!("✓ Results of event {} are now published", event_id);
        }
    }

    Ok(())
}

async fn connect(database_url: &str) -> Result<Database, Box<dyn std::error::Error>> {
    tracing::info!("Connecting to database...");
    let db = Database::new(database_url).await?;
    db.run_migrations().await?;
    Ok(db)
}

async fn handle_results_import(
    db: &Database,
    file: PathBuf,
    event_id: i64,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Importing {} into event {}", file.display(), event_id);

    let report = match ResultImporter::from_database(db).import_file(&file, event_id).await {
        Ok(report) => report,
        Err(ImporterError::NoValidResults(errors)) => {
            let rejected = ImportReport {
                event_id,
                persisted: 0,
                replaced: 0,
                errors,
            };
            print_report(&rejected, json)?;
            return Err("no valid results found in the file; nothing was stored".into());
        }
        Err(e) => return Err(e.into()),
    };

    print_report(&report, json)?;
    Ok(())
}

fn print_report(report: &ImportReport, json: bool) -> Result<(), serde_json::Error> {
    let summary = report.summary();

    if json {
        let output = serde_json::json!({
            "event_id": report.event_id,
            "persisted": report.persisted,
            "replaced": report.replaced,
            "summary": summary,
            "errors": report.errors,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    tracing::info!(
        "Imported {} results ({} previous removed), {} rows rejected, {:.1}% success",
        summary.imported,
        report.replaced,
        summary.total_errors,
        summary.success_rate
    );

    for (kind, errors) in report.errors_by_kind() {
        tracing::warn!("{} ({}):", kind, errors.len());
        for error in errors {
            tracing::warn!("  line {}: {} [{}]", error.line, error.message, error.row.join(","));
        }
    }

    Ok(())
}

fn print_rankings(rankings: &EventRankings) {
    let stats = &rankings.statistics;
    tracing::info!(
        "Event {}: {} results, by gender {:?}, by category {:?}",
        rankings.event_id,
        stats.total_results,
        stats.by_gender,
        stats.by_category
    );

    for board in rankings.overall.iter().chain(&rankings.categories) {
        print_board(board);
    }
}

fn print_board(board: &RankingBoard) {
    let track = if board.pcd { " PCD" } else { "" };
    match board.category {
        Some(category) => tracing::info!("{} / {}{}", category, board.gender, track),
        None => tracing::info!("Overall / {}{}", board.gender, track),
    }

    for entry in &board.entries {
        tracing::info!(
            "  {:>3}. {:<32} {}  {}",
            entry.position,
            entry.athlete_name,
            entry.finish_time,
            entry.category
        );
    }
}
