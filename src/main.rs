use attendance_buddy::{
    config,
    core::{floor::Floor, report, student},
    errors::Result,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use sea_orm::DatabaseConnection;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "attendance-buddy")]
#[command(version)]
#[command(about = "Duty attendance rosters and reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show which floor a class is on
    Floor {
        /// Grade number (7, 8 or 9)
        grade: i32,
        /// Section letter (A-G)
        section: String,
    },
    /// List the active students on a floor
    Roster {
        /// Floor number (2, 3 or 4)
        floor: i32,
    },
    /// Print the attendance report of a duty session
    Report {
        /// Duty session id
        session_id: i64,
    },
    /// Summarize every duty session held on a date (YYYY-MM-DD)
    Daily {
        /// School day to summarize
        date: NaiveDate,
    },
}

/// Connects to the database and makes sure every table exists.
async fn connect() -> Result<DatabaseConnection> {
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;
    Ok(db)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    let cli = Cli::parse();

    // 3. Load the floor layout
    let layout = config::floors::load_floor_layout()
        .inspect_err(|e| error!("Failed to load floor layout: {}", e))?;

    // 4. Run the command
    match cli.command {
        Command::Floor { grade, section } => {
            let floor = layout.resolve(grade, &section)?;
            println!("{grade}{} is on floor {floor}", section.trim().to_uppercase());
        }
        Command::Roster { floor } => {
            let floor = Floor::try_from(floor)?;
            let db = connect().await?;
            let roster = student::get_students_on_floor(&db, &layout, floor).await?;
            println!("Floor {floor}: {} students", roster.len());
            for student in roster {
                println!(
                    "  {}{} {} ({})",
                    student.grade, student.section, student.full_name, student.student_number
                );
            }
        }
        Command::Report { session_id } => {
            let db = connect().await?;
            let report = report::generate_session_report(&db, &layout, session_id)
                .await
                .inspect_err(|e| error!("Failed to generate report: {}", e))?;
            print!("{}", report.render());
        }
        Command::Daily { date } => {
            let db = connect().await?;
            let overview = report::daily_overview(&db, date).await?;
            if overview.is_empty() {
                println!("No duty sessions on {date}");
            }
            for row in overview {
                let s = row.summary;
                println!(
                    "Floor {} - {} (session {}): total {}, present {}, sick {}, permission {}, absent {}, late {}",
                    row.floor,
                    row.teacher_name,
                    row.session.id,
                    s.total,
                    s.present,
                    s.sick,
                    s.permission,
                    s.absent,
                    s.late
                );
            }
        }
    }

    Ok(())
}
