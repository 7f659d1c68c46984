//! Spreadsheet-style attendance view of one group: one row per class date.

use cetis_core::dates::{day_month_year, month_year_es};
use cetis_models::attendance::{
    AttendanceCounts, AttendanceKind, AttendanceRecord, AttendanceSheet, AttendanceSheetQuery,
    AttendanceSheetRow,
};
use cetis_models::ids::GroupId;
use chrono::NaiveDate;

/// Newest date first; recording order (attendance id) within a date.
pub fn sort_records(records: &mut [AttendanceRecord]) {
    records.sort_by(|a, b| b.class_date.cmp(&a.class_date).then(a.id.cmp(&b.id)));
}

/// Keeps records whose class date lies within the inclusive window.
pub fn filter_by_range(
    records: Vec<AttendanceRecord>,
    query: &AttendanceSheetQuery,
) -> Vec<AttendanceRecord> {
    records
        .into_iter()
        .filter(|r| query.from.is_none_or(|from| r.class_date >= from))
        .filter(|r| query.to.is_none_or(|to| r.class_date <= to))
        .collect()
}

/// Groups `records` by class date.
///
/// A row's time is the first recorded time met for its date while walking
/// the records in order; later times for the same date are ignored.
pub fn build_rows(records: &[AttendanceRecord]) -> Vec<AttendanceSheetRow> {
    let mut rows: Vec<AttendanceSheetRow> = Vec::new();

    for record in records {
        let row = match rows.iter().position(|r| r.date == record.class_date) {
            Some(pos) => &mut rows[pos],
            None => {
                rows.push(AttendanceSheetRow {
                    date: record.class_date,
                    formatted_date: day_month_year(record.class_date),
                    time: None,
                    present: 0,
                    late: 0,
                    absent: 0,
                });
                let last = rows.len() - 1;
                &mut rows[last]
            }
        };

        if row.time.is_none() {
            row.time = record.recorded_time.map(|t| t.format("%H:%M").to_string());
        }

        match record.kind {
            AttendanceKind::Present => row.present += 1,
            AttendanceKind::Late => row.late += 1,
            AttendanceKind::Absent => row.absent += 1,
        }
    }

    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

pub fn build_attendance_sheet(
    group_id: GroupId,
    subject_name: &str,
    mut records: Vec<AttendanceRecord>,
    today: NaiveDate,
) -> AttendanceSheet {
    sort_records(&mut records);

    AttendanceSheet {
        group_id,
        subject_name: subject_name.to_string(),
        title: format!("{} - {}", subject_name, month_year_es(today)),
        rows: build_rows(&records),
        totals: AttendanceCounts::tally(records.iter().map(|r| r.kind)),
        records,
    }
}
