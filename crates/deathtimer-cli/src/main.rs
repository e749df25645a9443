use clap::{CommandFactory, Parser, Subcommand};
use deathtimer_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "DEATHTIMER_LOG";

#[derive(Parser)]
#[command(name = "deathtimer", version, about = "Death Timer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Onboarding quiz and life expectancy estimate
    Quiz {
        #[command(subcommand)]
        action: commands::quiz::QuizAction,
    },
    /// Countdown control
    Countdown {
        #[command(subcommand)]
        action: commands::countdown::CountdownAction,
    },
    /// Lifespan progress report
    Stats(commands::stats::StatsArgs),
    /// Home-screen widget content
    Widget(commands::widget::WidgetArgs),
    /// Stored profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = Config::load_or_default().log.level;
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Quiz { action } => commands::quiz::run(action),
        Commands::Countdown { action } => commands::countdown::run(action),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::Widget(args) => commands::widget::run(args),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
