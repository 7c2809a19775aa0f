//! Shareable text rendering of free blocks.
//!
//! Produces the clipboard-ready message listing a day's free time. The
//! clipboard write itself stays with the caller.

use chrono::NaiveDate;
use std::fmt::Write as _;

use crate::timeline::FreeBlock;

/// Format a minute-of-day value as `HH:MM`.
pub fn format_minutes(minutes: i64) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Format a duration in minutes as `2h 05m` or `45m`.
pub fn format_duration(minutes: i64) -> String {
    if minutes >= 60 {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

/// Render free blocks as a human-readable, shareable message.
///
/// Each block becomes one `HH:MM – HH:MM` line with its duration; an
/// empty list renders an explicit "no free time" message.
pub fn format_free_blocks_as_text(blocks: &[FreeBlock], date: NaiveDate) -> String {
    if blocks.is_empty() {
        return format!("No free time on {date}.");
    }

    let total: i64 = blocks.iter().map(FreeBlock::duration_minutes).sum();
    let mut out = format!("Free time on {date}:\n");
    for block in blocks {
        let _ = writeln!(
            out,
            "  {} – {} ({})",
            format_minutes(block.start),
            format_minutes(block.end),
            format_duration(block.duration_minutes())
        );
    }
    let _ = write!(out, "Total: {} free", format_duration(total));
    out
}
