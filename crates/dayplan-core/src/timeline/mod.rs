//! Free-time derivation over a day's task blocks.
//!
//! This module provides:
//! - The bounded planning window for a day ([`DayWindow`])
//! - Gap detection between task blocks ([`compute_free_blocks`])
//! - The deduplicated busy view used by the statistics ([`covered_minutes`])

mod gap;

pub use gap::{compute_free_blocks, covered_minutes, DayWindow, FreeBlock};
