use chrono::{DateTime, Utc};
use serde::Serialize;

use super::model::TrackingEntry;

// ============================================================================
// Tracking Timeline Presenter
// ============================================================================
//
// Pure projection of tracking history into the customer-facing timeline.
// The stage vocabulary is the storefront's shipping vocabulary and does not
// line up one-to-one with the order status set; a current status that
// matches no stage ranks 0 and nothing shows as completed. That fallback is
// silent on purpose.
//
// ============================================================================

/// Fixed, ordered stage labels; rank is index + 1.
pub const STAGES: [&str; 5] = ["confirmed", "processing", "shipped", "in-transit", "delivered"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageState {
    Completed,
    Current,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineStage {
    pub label: &'static str,
    pub state: StageState,
    /// Timestamp of the most recent tracking entry matching this stage.
    pub timestamp: Option<DateTime<Utc>>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub stages: Vec<TimelineStage>,
    pub progress_percent: u32,
}

fn rank_of(status: &str) -> usize {
    STAGES.iter().position(|s| *s == status).map(|i| i + 1).unwrap_or(0)
}

/// Project the current status and tracking history into stage annotations.
/// Entries whose status matches no stage stay out of the timeline but remain
/// in raw history elsewhere.
pub fn project(current_status: &str, entries: &[TrackingEntry]) -> Timeline {
    let current_rank = rank_of(current_status);

    let stages = STAGES
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let rank = index + 1;
            let state = if rank < current_rank {
                StageState::Completed
            } else if rank == current_rank {
                StageState::Current
            } else {
                StageState::Pending
            };

            // Append-only history: the last matching entry is the latest.
            let latest = entries.iter().rev().find(|e| e.status == *label);

            TimelineStage {
                label,
                state,
                timestamp: latest.map(|e| e.timestamp),
                location: latest.and_then(|e| e.location.clone()),
            }
        })
        .collect();

    let progress_percent = ((current_rank as f64 / STAGES.len() as f64) * 100.0).round() as u32;

    Timeline {
        stages,
        progress_percent,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn entry(status: &str, location: Option<&str>) -> TrackingEntry {
        let mut e = TrackingEntry::new(Uuid::new_v4(), status, "desc", None);
        e.location = location.map(str::to_string);
        e
    }

    #[test]
    fn test_states_split_around_current_rank() {
        let timeline = project("shipped", &[]);

        assert_eq!(timeline.stages[0].state, StageState::Completed); // confirmed
        assert_eq!(timeline.stages[1].state, StageState::Completed); // processing
        assert_eq!(timeline.stages[2].state, StageState::Current); // shipped
        assert_eq!(timeline.stages[3].state, StageState::Pending); // in-transit
        assert_eq!(timeline.stages[4].state, StageState::Pending); // delivered
        assert_eq!(timeline.progress_percent, 60);
    }

    #[test]
    fn test_delivered_is_full_progress() {
        let timeline = project("delivered", &[]);
        assert_eq!(timeline.progress_percent, 100);
        assert!(timeline.stages[..4].iter().all(|s| s.state == StageState::Completed));
        assert_eq!(timeline.stages[4].state, StageState::Current);
    }

    #[test]
    fn test_unknown_status_ranks_zero() {
        // Silent fallback: statuses outside the stage vocabulary complete
        // nothing. `out_for_delivery` is one of them.
        for status in ["out_for_delivery", "cancelled", "???", ""] {
            let timeline = project(status, &[]);
            assert!(timeline.stages.iter().all(|s| s.state == StageState::Pending));
            assert_eq!(timeline.progress_percent, 0);
        }
    }

    #[test]
    fn test_stages_enriched_with_latest_matching_entry() {
        let older = entry("confirmed", Some("Portland hub"));
        let newer = entry("confirmed", Some("Downtown florist"));
        let unrelated = entry("refund-requested", None);
        let entries = vec![older.clone(), newer.clone(), unrelated];

        let timeline = project("processing", &entries);
        let confirmed = &timeline.stages[0];

        assert_eq!(confirmed.timestamp, Some(newer.timestamp));
        assert_eq!(confirmed.location.as_deref(), Some("Downtown florist"));
        // Entries with no matching stage are simply not shown.
        assert!(timeline.stages.iter().all(|s| s.label != "refund-requested"));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let entries = vec![
            entry("confirmed", None),
            entry("processing", Some("Workshop")),
        ];
        let first = project("processing", &entries);
        let second = project("processing", &entries);
        assert_eq!(first, second);
    }

    #[test]
    fn test_progress_is_rank_over_stage_count() {
        assert_eq!(project("confirmed", &[]).progress_percent, 20);
        assert_eq!(project("processing", &[]).progress_percent, 40);
        assert_eq!(project("in-transit", &[]).progress_percent, 80);
    }
}
