//! Free-block detection between task blocks.
//!
//! Sweeps a cursor across the sorted, midnight-corrected busy intervals
//! of one day and emits every uncovered stretch inside the planning
//! window.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::plan::{TaskBlock, TimeOfDay};

/// The usable planning window of a day, `[start, end)` in minutes
/// since midnight. Defaults to 05:00-23:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: i64,
    pub end: i64,
}

impl DayWindow {
    /// Build a window, rejecting empty or inverted bounds.
    pub fn new(start: i64, end: i64) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::EmptyWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse a window from two `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start: TimeOfDay = start.parse()?;
        let end: TimeOfDay = end.parse()?;
        Self::new(start.minutes(), end.minutes())
    }

    /// Total window width in minutes.
    pub fn span(&self) -> i64 {
        self.end - self.start
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        // 05:00-23:00
        Self {
            start: 300,
            end: 1380,
        }
    }
}

/// A derived interval with no task block overlapping it, clipped to the
/// day window. Ephemeral: recomputed from the block list on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeBlock {
    pub start: i64,
    pub end: i64,
}

impl FreeBlock {
    pub fn duration_minutes(&self) -> i64 {
        self.end - self.start
    }
}

/// Convert blocks to `[start, end)` minute intervals, corrected for
/// midnight crossing, sorted ascending by start (stable on ties).
fn busy_intervals(blocks: &[TaskBlock]) -> Result<Vec<(i64, i64)>, ValidationError> {
    let mut intervals = Vec::with_capacity(blocks.len());
    for block in blocks {
        let start = block.start_minutes()?;
        let mut end = block.end_minutes()?;
        if end < start {
            end += TimeOfDay::MINUTES_PER_DAY;
        }
        intervals.push((start, end));
    }
    intervals.sort_by_key(|(start, _)| *start);
    Ok(intervals)
}

/// Compute the ordered free blocks of a day.
///
/// Invariants on the output: ascending by start, non-overlapping, and
/// every block strictly wider than zero. Overlapping or contained tasks
/// are merged so busy time is only subtracted once; task portions
/// outside the window are clamped and produce no free time.
///
/// # Errors
/// Fails on a malformed `HH:MM` time or an empty window.
pub fn compute_free_blocks(
    window: DayWindow,
    blocks: &[TaskBlock],
) -> Result<Vec<FreeBlock>, ValidationError> {
    let window = DayWindow::new(window.start, window.end)?;
    let intervals = busy_intervals(blocks)?;

    let mut free = Vec::new();
    let mut cursor = window.start;

    for (start, end) in intervals {
        // Clamp to the window so the cursor never leaves its bounds
        let start = start.clamp(window.start, window.end);
        let end = end.clamp(window.start, window.end);

        // Zero-width intervals (start == end blocks, or blocks clamped
        // away entirely) consume nothing and must not split a gap
        if end <= start {
            continue;
        }

        if start > cursor {
            free.push(FreeBlock {
                start: cursor,
                end: start,
            });
        }
        cursor = cursor.max(end);
    }

    if cursor < window.end {
        free.push(FreeBlock {
            start: cursor,
            end: window.end,
        });
    }

    Ok(free)
}

/// Minutes of the window covered by at least one task block, i.e. the
/// deduplicated busy view (overlaps counted once).
pub fn covered_minutes(window: DayWindow, blocks: &[TaskBlock]) -> Result<i64, ValidationError> {
    let free: i64 = compute_free_blocks(window, blocks)?
        .iter()
        .map(FreeBlock::duration_minutes)
        .sum();
    Ok(window.span() - free)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(start: &str, end: &str) -> TaskBlock {
        TaskBlock::new("", start, end)
    }

    fn window() -> DayWindow {
        DayWindow::default()
    }

    #[test]
    fn empty_task_list_yields_full_window() {
        let free = compute_free_blocks(window(), &[]).unwrap();
        assert_eq!(free, vec![FreeBlock { start: 300, end: 1380 }]);
    }

    #[test]
    fn single_full_coverage_task_yields_nothing() {
        let free = compute_free_blocks(window(), &[block("05:00", "23:00")]).unwrap();
        assert!(free.is_empty());
    }

    #[test]
    fn gaps_around_three_disjoint_tasks() {
        let blocks = vec![
            block("07:00", "08:00"),
            block("12:00", "13:30"),
            block("20:00", "21:00"),
        ];
        let free = compute_free_blocks(window(), &blocks).unwrap();
        assert_eq!(
            free,
            vec![
                FreeBlock { start: 300, end: 420 },   // 05:00-07:00
                FreeBlock { start: 480, end: 720 },   // 08:00-12:00
                FreeBlock { start: 810, end: 1200 },  // 13:30-20:00
                FreeBlock { start: 1260, end: 1380 }, // 21:00-23:00
            ]
        );
        let free_minutes: i64 = free.iter().map(FreeBlock::duration_minutes).sum();
        assert_eq!(free_minutes, 1080 - 60 - 90 - 60);
    }

    #[test]
    fn overlapping_tasks_merge_into_one_busy_span() {
        let blocks = vec![block("09:00", "11:00"), block("10:00", "12:00")];
        let free = compute_free_blocks(window(), &blocks).unwrap();
        // No free block inside 09:00-12:00
        assert_eq!(
            free,
            vec![
                FreeBlock { start: 300, end: 540 },
                FreeBlock { start: 720, end: 1380 },
            ]
        );
        assert_eq!(covered_minutes(window(), &blocks).unwrap(), 180);
    }

    #[test]
    fn contained_task_does_not_move_cursor_backwards() {
        let blocks = vec![block("09:00", "12:00"), block("10:00", "11:00")];
        let free = compute_free_blocks(window(), &blocks).unwrap();
        assert_eq!(
            free,
            vec![
                FreeBlock { start: 300, end: 540 },
                FreeBlock { start: 720, end: 1380 },
            ]
        );
    }

    #[test]
    fn zero_duration_task_splits_nothing() {
        let free = compute_free_blocks(window(), &[block("09:00", "09:00")]).unwrap();
        assert_eq!(free, vec![FreeBlock { start: 300, end: 1380 }]);
    }

    #[test]
    fn zero_duration_task_between_real_tasks_adds_no_split() {
        let blocks = vec![
            block("07:00", "08:00"),
            block("10:00", "10:00"),
            block("12:00", "13:00"),
        ];
        let free = compute_free_blocks(window(), &blocks).unwrap();
        // The 08:00-12:00 gap stays whole despite the marker at 10:00
        assert_eq!(
            free,
            vec![
                FreeBlock { start: 300, end: 420 },
                FreeBlock { start: 480, end: 720 },
                FreeBlock { start: 780, end: 1380 },
            ]
        );
        assert_eq!(covered_minutes(window(), &blocks).unwrap(), 120);
    }

    #[test]
    fn tasks_outside_window_are_clamped() {
        // Before the window, straddling its start, and past its end
        let blocks = vec![
            block("03:00", "04:00"),
            block("04:30", "06:00"),
            block("22:00", "23:30"),
        ];
        let free = compute_free_blocks(window(), &blocks).unwrap();
        assert_eq!(
            free,
            vec![FreeBlock { start: 360, end: 1320 }] // 06:00-22:00
        );
    }

    #[test]
    fn midnight_crossing_task_consumes_to_window_end() {
        // 22:00 -> 01:00 extends past the day; clamped at 23:00
        let free = compute_free_blocks(window(), &[block("22:00", "01:00")]).unwrap();
        assert_eq!(free, vec![FreeBlock { start: 300, end: 1320 }]);
    }

    #[test]
    fn adjacent_tasks_leave_no_sliver() {
        let blocks = vec![block("09:00", "10:00"), block("10:00", "11:00")];
        let free = compute_free_blocks(window(), &blocks).unwrap();
        assert_eq!(
            free,
            vec![
                FreeBlock { start: 300, end: 540 },
                FreeBlock { start: 660, end: 1380 },
            ]
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        let err = DayWindow::new(1380, 300).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyWindow { .. }));
        let window = DayWindow { start: 600, end: 600 };
        assert!(compute_free_blocks(window, &[]).is_err());
    }

    #[test]
    fn malformed_time_is_rejected() {
        let err = compute_free_blocks(window(), &[block("9am", "10:00")]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimeFormat { .. }));
    }

    #[test]
    fn window_parse_from_strings() {
        let w = DayWindow::parse("06:30", "22:00").unwrap();
        assert_eq!((w.start, w.end), (390, 1320));
        assert_eq!(w.span(), 930);
        assert!(DayWindow::parse("22:00", "06:30").is_err());
    }
}
