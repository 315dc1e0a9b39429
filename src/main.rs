use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use interest_tracker::models::NewInterest;
use interest_tracker::{db, effort, tags};

#[derive(Parser)]
#[command(name = "interest-tracker")]
#[command(about = "Track your hacking sessions with this simple cli app")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new hacking interest
    Log {
        /// What you've been hacking at
        log: String,

        /// How long you've been at it (HH:MM)
        #[arg(short, long)]
        effort: String,

        /// Comma separated tags to group your interests
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// Visualize existing interests
    Visualize {
        /// Emit the interests as JSON instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
    /// List all known tags
    Tags,
}

/// Initialize tracing to stderr so stdout stays clean for command output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "interest_tracker=warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut db = db::Database::open_default()?;
    db.migrate()?;

    match cli.command {
        Commands::Log { log, effort, tags } => {
            let effort = effort::parse_effort(&effort)
                .context("EFFORT (-e, --effort) should be in HH:MM format")?;
            let tags = tags::parse_tag_list(tags.as_deref());

            let interest = db.record_interest(NewInterest { log, effort, tags })?;
            tracing::debug!("Recorded interest {}", interest.id);
        }
        Commands::Visualize { json } => {
            let interests = db.list_interests()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&interests)?);
            } else {
                for interest in interests {
                    println!(
                        "{}\t{}\t{}",
                        effort::format_effort(interest.effort),
                        interest.log,
                        interest.tags.join(",")
                    );
                }
            }
        }
        Commands::Tags => {
            for tag in db.all_tags()? {
                println!("{}", tag.name);
            }
        }
    }

    Ok(())
}
