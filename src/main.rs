mod clock;
mod config;
mod console;
mod data;
mod error;
mod notify;
mod render;
mod report;
mod session;
mod stats;
#[cfg(test)]
mod testing;

use clap::{Parser, Subcommand};
use clock::{Clock, SystemClock};
use config::FileConfigStore;
use data::JsonDataStore;
use error::AppResult;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "brk", about = "A terminal break timer with snooze and daily reports", version)]
struct Cli {
    /// Break length in minutes, or `stats` to show today's breaks
    #[arg(allow_negative_numbers = true)]
    input: Option<String>,

    /// Directory holding config.toml and break_data.json
    #[arg(long, global = true, env = "BREAK_TRACKER_DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the email settings and optionally send a test report
    TestEmail {
        /// Actually send a report for 123 minutes
        #[arg(long)]
        send: bool,
    },
}

#[derive(Debug, PartialEq)]
enum Invocation {
    Stats { show_usage: bool },
    Break(u32),
    NonPositive,
    Unknown(String),
}

fn parse_invocation(input: Option<&str>) -> Invocation {
    let Some(input) = input else {
        return Invocation::Stats { show_usage: true };
    };
    match input.trim().parse::<i64>() {
        Ok(n) if n <= 0 => Invocation::NonPositive,
        Ok(n) => u32::try_from(n).map_or_else(|_| Invocation::Unknown(input.to_string()), Invocation::Break),
        Err(_) if matches!(input, "stats" | "status" | "s") => Invocation::Stats { show_usage: false },
        Err(_) => Invocation::Unknown(input.to_string()),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("BREAK_TRACKER_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let dir = cli.dir.unwrap_or_else(config::default_dir);
    let config_store = FileConfigStore::new(dir.join("config.toml"));
    let data_store = JsonDataStore::new(dir.join("break_data.json"));
    let clock = SystemClock;

    if !config::ensure_config(&config_store)? {
        println!(
            "\n⚠️  Please configure email settings in {}",
            dir.join("config.toml").display()
        );
        println!("   Set enabled = true under [email] and add your credentials for daily reports\n");
    }
    let config = config::load_config(&config_store)?;

    if let Some(Commands::TestEmail { send }) = cli.command {
        return report::email_self_test(&config, &report::SmtpMailer, &clock, send);
    }

    report::check_and_send_yesterday_report(&data_store, &config, &report::SmtpMailer, &clock)?;

    match parse_invocation(cli.input.as_deref()) {
        Invocation::Stats { show_usage } => {
            let record = data::load_break_data(&data_store, clock.today())?;
            stats::show_today_stats(&record);
            if show_usage {
                println!("\n💡 Usage: brk [minutes]");
                println!("   Example: brk 7");
            }
        }
        Invocation::Break(minutes) => {
            let mut console = console::TerminalConsole::new(console::CancelSignal::install());
            session::run_break(
                &data_store,
                &config,
                &mut console,
                &notify::DesktopNotifier,
                &clock,
                minutes,
            )
            .await?;
        }
        Invocation::NonPositive => {
            println!("❌ Please specify a positive number of minutes");
        }
        Invocation::Unknown(input) => {
            println!("❌ Invalid input: {input}");
            println!("💡 Usage: brk [minutes|stats]");
        }
    }
    Ok(())
}
