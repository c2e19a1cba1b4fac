use crate::clock::Clock;
use crate::config::Config;
use crate::console::{Console, Reply, Tick};
use crate::data::{self, BreakEvent, DailyRecord, DataStore};
use crate::error::AppResult;
use crate::notify::Notifier;
use crate::stats::format_time;
use chrono::{Duration, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Countdown,
    Prompt,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Running { minutes: u32 },
    Prompting { minutes: u32 },
    Snoozed { minutes: u32 },
    Ended,
    Interrupted(Phase),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    BackToWork,
    Snooze(u32),
}

/// Interprets the answer to the snooze prompt.
pub fn parse_reply(reply: &str, default_snooze_minutes: u32) -> Decision {
    let reply = reply.trim().to_lowercase();
    if reply.is_empty() {
        return Decision::BackToWork;
    }
    if reply == "s" {
        return Decision::Snooze(default_snooze_minutes);
    }
    match reply.parse::<i64>() {
        Ok(n) if n > 0 => u32::try_from(n).map_or(Decision::BackToWork, Decision::Snooze),
        _ => Decision::BackToWork,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub start: NaiveDateTime,
    pub minutes: u64,
    pub snoozes: u32,
    pub interrupted: Option<Phase>,
}

impl SessionOutcome {
    pub fn event(&self) -> BreakEvent {
        BreakEvent {
            start: self.start,
            minutes: self.minutes,
            snoozes: self.snoozes,
        }
    }
}

/// Runs the countdown/prompt/snooze loop until the break ends or is interrupted.
///
/// A break that ends normally counts the minutes that were asked for, snoozes
/// included. A break cut short during a countdown counts the whole minutes that
/// actually elapsed since it started.
pub async fn run_session(
    console: &mut impl Console,
    notifier: &impl Notifier,
    clock: &impl Clock,
    minutes: u32,
    default_snooze_minutes: u32,
) -> SessionOutcome {
    let start = clock.now();
    let mut snoozes = 0u32;
    let mut total_minutes = u64::from(minutes);
    let mut state = State::Running { minutes };

    println!("\n🚀 Starting {minutes} minute break");
    println!(
        "⏰ Will notify at {}",
        (start + Duration::minutes(i64::from(minutes))).format("%H:%M:%S")
    );
    println!("\n💡 Press Ctrl+C to end break early\n");

    loop {
        tracing::debug!(?state, snoozes, total_minutes, "break state");
        state = match state {
            State::Running { minutes } => match countdown(console, minutes).await {
                Tick::Elapsed => State::Prompting { minutes },
                Tick::Cancelled => State::Interrupted(Phase::Countdown),
            },
            State::Prompting { minutes } => {
                if snoozes == 0 {
                    notifier.notify(
                        "Break's over! 🎯",
                        &format!("Your {minutes} minute break is done. Back to work!"),
                    );
                    println!("\n✅ Break complete! ({minutes} minutes)");
                } else {
                    notifier.notify(
                        &format!("Snooze #{snoozes} over! ⏰"),
                        &format!("Total break time: {total_minutes} minutes"),
                    );
                    println!("\n⏰ Snooze #{snoozes} complete!");
                    println!("📊 Total break time: {}", format_time(total_minutes));
                }

                println!("\n🔄 Options:");
                println!("  [Enter] = Back to work");
                println!("  [number] = Snooze for X minutes");
                println!("  [s/S] = Snooze for {default_snooze_minutes} minutes (default)");

                match console.read_reply("👉 ").await {
                    Reply::Line(line) => match parse_reply(&line, default_snooze_minutes) {
                        Decision::BackToWork => State::Ended,
                        Decision::Snooze(minutes) => State::Snoozed { minutes },
                    },
                    Reply::Closed => State::Ended,
                    Reply::Cancelled => State::Interrupted(Phase::Prompt),
                }
            }
            State::Snoozed { minutes } => {
                snoozes += 1;
                total_minutes += u64::from(minutes);
                println!("\n😴 Snoozing for {minutes} more minutes...");
                println!("📈 Snooze count: {snoozes}");
                State::Running { minutes }
            }
            State::Ended => {
                return SessionOutcome {
                    start,
                    minutes: total_minutes,
                    snoozes,
                    interrupted: None,
                };
            }
            State::Interrupted(Phase::Prompt) => {
                println!("\n\n⚠️  Snooze cancelled");
                return SessionOutcome {
                    start,
                    minutes: total_minutes,
                    snoozes,
                    interrupted: Some(Phase::Prompt),
                };
            }
            State::Interrupted(Phase::Countdown) => {
                let elapsed = (clock.now() - start).num_seconds().max(0) as u64 / 60;
                println!("\n\n⚠️  Break ended early after {elapsed} minutes");
                return SessionOutcome {
                    start,
                    minutes: elapsed,
                    snoozes,
                    interrupted: Some(Phase::Countdown),
                };
            }
        };
    }
}

async fn countdown(console: &mut impl Console, minutes: u32) -> Tick {
    let total_secs = u64::from(minutes) * 60;
    let mut remaining = total_secs;
    while remaining > 0 {
        if console.tick(remaining, total_secs).await == Tick::Cancelled {
            console.clear_countdown();
            return Tick::Cancelled;
        }
        remaining -= 1;
    }
    console.clear_countdown();
    Tick::Elapsed
}

/// Runs one break and appends its outcome to today's record.
pub async fn run_break(
    store: &impl DataStore,
    config: &Config,
    console: &mut impl Console,
    notifier: &impl Notifier,
    clock: &impl Clock,
    minutes: u32,
) -> AppResult<DailyRecord> {
    let mut record = data::load_break_data(store, clock.today())?;

    let outcome = run_session(
        console,
        notifier,
        clock,
        minutes,
        config.default_snooze_minutes,
    )
    .await;

    record.record(outcome.event());
    data::save_break_data(store, &record)?;
    tracing::info!(
        minutes = outcome.minutes,
        snoozes = outcome.snoozes,
        interrupted = ?outcome.interrupted,
        "break recorded"
    );

    println!("\n📊 Today's break summary:");
    println!("   • This break: {}", format_time(outcome.minutes));
    println!("   • Total today: {}", format_time(record.total_minutes));
    println!("   • Break count: {}", record.breaks.len());
    if outcome.snoozes > 0 {
        println!("   • Snoozes this break: {}", outcome.snoozes);
    }

    Ok(record)
}
