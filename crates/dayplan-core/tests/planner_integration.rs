//! Integration tests for the full planning workflow.
//!
//! Exercises the path the CLI takes: persist blocks and categories,
//! fetch the day's snapshot, derive free blocks and the summary, and
//! render the shareable export.

use chrono::NaiveDate;
use dayplan_core::{
    compute_day_summary, compute_free_blocks, format_free_blocks_as_text, CategoryEntry,
    DayWindow, PlanDb, Suggestion, TaskBlock,
};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

#[test]
fn full_day_workflow() {
    let db = PlanDb::open_memory().unwrap();

    db.upsert_category(&CategoryEntry {
        id: "health".to_string(),
        title: "Health".to_string(),
        icon: Some("💪".to_string()),
    })
    .unwrap();
    db.upsert_category(&CategoryEntry {
        id: "work".to_string(),
        title: "Work".to_string(),
        icon: None,
    })
    .unwrap();

    let morning = TaskBlock::new("Morning run", "07:00", "08:00").with_category("health");
    let lunch = TaskBlock::new("Team lunch", "12:00", "13:30");
    let review = TaskBlock::new("Code review", "20:00", "21:00").with_category("work");
    for block in [&morning, &lunch, &review] {
        db.insert_block(day(), block).unwrap();
    }
    db.set_completed(&morning.id, true).unwrap();

    let blocks = db.list_blocks(day()).unwrap();
    let categories = db.list_categories().unwrap();
    let window = DayWindow::default();

    // Gap derivation: window 05:00-23:00 around three disjoint tasks
    let free = compute_free_blocks(window, &blocks).unwrap();
    let starts: Vec<(i64, i64)> = free.iter().map(|f| (f.start, f.end)).collect();
    assert_eq!(starts, [(300, 420), (480, 720), (810, 1200), (1260, 1380)]);

    // Summary over the same snapshot
    let summary = compute_day_summary(window, &blocks, &categories).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.completion_rate, 33);
    assert_eq!(summary.busy_minutes, 210);
    assert_eq!(summary.free_minutes, 870);
    assert_eq!(summary.longest.as_ref().unwrap().label, "Team lunch");
    assert_eq!(summary.by_category.len(), 2);
    assert_eq!(summary.by_category[0].category_ref, "health");
    assert_eq!(summary.by_category[1].category_ref, "work");
    // Plenty of free time and every category touched today
    assert_eq!(summary.suggestion, Suggestion::RestReflect);

    // Shareable export
    let text = format_free_blocks_as_text(&free, day());
    assert!(text.starts_with("Free time on 2025-03-14:"));
    assert!(text.contains("05:00 – 07:00"));
    assert!(text.contains("13:30 – 20:00"));
    assert!(text.ends_with("Total: 14h 30m free"));
}

#[test]
fn untouched_category_drives_suggestion() {
    let db = PlanDb::open_memory().unwrap();
    for (id, title) in [("health", "Health"), ("work", "Work")] {
        db.upsert_category(&CategoryEntry {
            id: id.to_string(),
            title: title.to_string(),
            icon: None,
        })
        .unwrap();
    }
    db.insert_block(day(), &TaskBlock::new("Standup", "09:00", "09:30").with_category("work"))
        .unwrap();

    let summary = compute_day_summary(
        DayWindow::default(),
        &db.list_blocks(day()).unwrap(),
        &db.list_categories().unwrap(),
    )
    .unwrap();

    assert_eq!(
        summary.suggestion,
        Suggestion::AllocateCategory {
            category_ref: "health".to_string(),
            title: "Health".to_string(),
            minutes: 30,
        }
    );
}

#[test]
fn packed_day_suggests_focus() {
    let db = PlanDb::open_memory().unwrap();
    db.insert_block(day(), &TaskBlock::new("Everything", "05:00", "22:45"))
        .unwrap();

    let blocks = db.list_blocks(day()).unwrap();
    let summary = compute_day_summary(DayWindow::default(), &blocks, &[]).unwrap();
    assert_eq!(summary.free_minutes, 15);
    assert_eq!(summary.suggestion, Suggestion::FocusCurrent);

    let free = compute_free_blocks(DayWindow::default(), &blocks).unwrap();
    assert_eq!(free.len(), 1);
    assert_eq!(free[0].duration_minutes(), 15);
}

#[test]
fn fully_booked_day_exports_no_free_time() {
    let blocks = vec![TaskBlock::new("Offsite", "05:00", "23:00")];
    let free = compute_free_blocks(DayWindow::default(), &blocks).unwrap();
    assert!(free.is_empty());
    assert_eq!(
        format_free_blocks_as_text(&free, day()),
        "No free time on 2025-03-14."
    );
}
