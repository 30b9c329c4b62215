use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "gradina", version, about = "Grădina cu Vorbe Bune CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plant stage and progress for an XP total
    Stage {
        /// Total XP (negative values count as 0)
        #[arg(allow_negative_numbers = true)]
        xp: i64,
    },
    /// Streak continuation policy
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Search the message library
    Search(commands::search::SearchArgs),
    /// Profile, XP awards and history
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Message library administration
    Message {
        #[command(subcommand)]
        action: commands::message::MessageAction,
    },
    /// Favorite messages
    Favorite {
        #[command(subcommand)]
        action: commands::favorite::FavoriteAction,
    },
    /// Children and students messages are sent to
    Beneficiary {
        #[command(subcommand)]
        action: commands::beneficiary::BeneficiaryAction,
    },
    /// Admin dashboard counters
    Stats {
        /// How many of the most used messages to list
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GRADINA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Stage { xp } => commands::stage::run(xp),
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Search(args) => commands::search::run(args),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Message { action } => commands::message::run(action),
        Commands::Favorite { action } => commands::favorite::run(action),
        Commands::Beneficiary { action } => commands::beneficiary::run(action),
        Commands::Stats { top } => commands::stats::run(top),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "gradina", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
