use crate::data::DailyRecord;
use std::fmt::Write;

/// `45m` below an hour, `1h 30m` from there on.
pub fn format_time(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let h = minutes / 60;
    let m = minutes % 60;
    format!("{h}h {m}m")
}

pub fn today_stats(record: &DailyRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n📊 Today's Statistics ({})", record.date);
    let _ = writeln!(out, "   • Total break time: {}", format_time(record.total_minutes));
    let _ = writeln!(out, "   • Number of breaks: {}", record.breaks.len());

    if !record.breaks.is_empty() {
        let _ = writeln!(out, "\n📝 Break history:");
        for (i, b) in record.breaks.iter().enumerate() {
            let snooze_info = if b.snoozes > 0 {
                format!(" ({} snoozes)", b.snoozes)
            } else {
                String::new()
            };
            let _ = writeln!(
                out,
                "   {}. {} - {}m{snooze_info}",
                i + 1,
                b.start.format("%H:%M"),
                b.minutes
            );
        }
    }
    out
}

pub fn show_today_stats(record: &DailyRecord) {
    print!("{}", today_stats(record));
}
