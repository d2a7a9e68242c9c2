//! Attendance aggregation for a duty session.
//!
//! Counts only what was recorded: a student with no entry is neither present nor absent, and
//! lateness is counted from the `is_late` flag whatever the status says. Input is the stored
//! `attendance_entry` rows; nothing here touches the database.

use crate::entities::{AttendanceStatus, attendance_entry};
use serde::{Deserialize, Serialize};

/// Per-status and lateness counts for one duty session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Number of recorded entries
    pub total: usize,
    /// Entries with status present
    pub present: usize,
    /// Entries with status sick
    pub sick: usize,
    /// Entries with status permission
    pub permission: usize,
    /// Entries with status absent
    pub absent: usize,
    /// Entries flagged late
    pub late: usize,
}

impl AttendanceSummary {
    /// Count for one status.
    #[must_use]
    pub const fn count(&self, status: AttendanceStatus) -> usize {
        match status {
            AttendanceStatus::Present => self.present,
            AttendanceStatus::Sick => self.sick,
            AttendanceStatus::Permission => self.permission,
            AttendanceStatus::Absent => self.absent,
        }
    }

    /// The six counts with their report labels, in report order.
    #[must_use]
    pub const fn labelled(&self) -> [(&'static str, usize); 6] {
        [
            ("Total", self.total),
            ("Present", self.present),
            ("Sick", self.sick),
            ("Permission", self.permission),
            ("Absent", self.absent),
            ("Late", self.late),
        ]
    }

    fn record(&mut self, status: AttendanceStatus, is_late: bool) {
        self.total += 1;
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Sick => self.sick += 1,
            AttendanceStatus::Permission => self.permission += 1,
            AttendanceStatus::Absent => self.absent += 1,
        }
        if is_late {
            self.late += 1;
        }
    }
}

/// Summarizes a session's attendance entries.
#[must_use]
pub fn summarize(entries: &[attendance_entry::Model]) -> AttendanceSummary {
    entries
        .iter()
        .fold(AttendanceSummary::default(), |mut summary, entry| {
            summary.record(entry.status, entry.is_late);
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(id: i64, status: AttendanceStatus, is_late: bool) -> attendance_entry::Model {
        attendance_entry::Model {
            id,
            duty_session_id: 1,
            student_id: id,
            status,
            is_late,
            notes: None,
            recorded_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(
            summarize(&[]),
            AttendanceSummary {
                total: 0,
                present: 0,
                sick: 0,
                permission: 0,
                absent: 0,
                late: 0,
            }
        );
    }

    #[test]
    fn test_summarize_present_late_and_absent() {
        let entries = [
            entry(1, AttendanceStatus::Present, true),
            entry(2, AttendanceStatus::Absent, false),
        ];
        assert_eq!(
            summarize(&entries),
            AttendanceSummary {
                total: 2,
                present: 1,
                sick: 0,
                permission: 0,
                absent: 1,
                late: 1,
            }
        );
    }

    #[test]
    fn test_late_counted_regardless_of_status() {
        let entries = [
            entry(1, AttendanceStatus::Sick, true),
            entry(2, AttendanceStatus::Permission, true),
        ];
        let summary = summarize(&entries);
        assert_eq!(summary.late, 2);
        assert_eq!(summary.present, 0);
    }

    #[test]
    fn test_labelled_order() {
        let labels: Vec<&str> = AttendanceSummary::default()
            .labelled()
            .iter()
            .map(|(label, _)| *label)
            .collect();
        assert_eq!(
            labels,
            ["Total", "Present", "Sick", "Permission", "Absent", "Late"]
        );
    }

    fn any_status() -> impl Strategy<Value = AttendanceStatus> {
        prop_oneof![
            Just(AttendanceStatus::Present),
            Just(AttendanceStatus::Sick),
            Just(AttendanceStatus::Permission),
            Just(AttendanceStatus::Absent),
        ]
    }

    proptest! {
        #[test]
        fn prop_statuses_add_up_to_total(
            records in prop::collection::vec((any_status(), any::<bool>()), 0..64)
        ) {
            let entries: Vec<_> = records
                .iter()
                .zip(1..)
                .map(|((status, late), id)| entry(id, *status, *late))
                .collect();
            let summary = summarize(&entries);

            prop_assert_eq!(summary.total, entries.len());
            prop_assert_eq!(
                summary.present + summary.sick + summary.permission + summary.absent,
                summary.total
            );
            prop_assert_eq!(summary.late, records.iter().filter(|(_, late)| *late).count());
            prop_assert_eq!(
                summary.count(AttendanceStatus::Sick),
                records.iter().filter(|(s, _)| *s == AttendanceStatus::Sick).count()
            );
        }

        #[test]
        fn prop_summarize_is_idempotent(
            records in prop::collection::vec((any_status(), any::<bool>()), 0..32)
        ) {
            let entries: Vec<_> = records
                .iter()
                .zip(1..)
                .map(|((status, late), id)| entry(id, *status, *late))
                .collect();
            prop_assert_eq!(summarize(&entries), summarize(&entries));
        }
    }
}
