//! Per-group attendance statistics for one student.
//!
//! Everything here works on rows already fetched from the database, so the
//! functions are pure and tested without a pool.

use std::collections::HashMap;

use cetis_models::attendance::{
    AttendanceCounts, AttendanceRecord, EnrolledGroup, GroupAttendanceStats, GroupOption,
};
use cetis_models::ids::GroupId;
use cetis_models::users::join_name_parts;

pub const DEFAULT_SUBJECT_NAME: &str = "Materia";
pub const DEFAULT_SUBJECT_CODE: &str = "N/A";
pub const DEFAULT_GROUP_CODE: &str = "Sin código";
pub const DEFAULT_CLASSROOM: &str = "N/A";
pub const DEFAULT_TEACHER_NAME: &str = "Docente";

/// Keeps one enrollment per group: the one with the latest `enrolled_at`,
/// ties going to the higher enrollment id.
///
/// Groups keep the position of their first appearance in `enrollments`.
pub fn latest_enrollment_per_group(enrollments: &[EnrolledGroup]) -> Vec<&EnrolledGroup> {
    let mut positions: HashMap<GroupId, usize> = HashMap::new();
    let mut latest: Vec<&EnrolledGroup> = Vec::new();

    for enrollment in enrollments {
        match positions.get(&enrollment.group_id) {
            Some(&pos) => {
                let current = latest[pos];
                if (enrollment.enrolled_at, enrollment.enrollment_id)
                    > (current.enrolled_at, current.enrollment_id)
                {
                    latest[pos] = enrollment;
                }
            }
            None => {
                positions.insert(enrollment.group_id, latest.len());
                latest.push(enrollment);
            }
        }
    }

    latest
}

pub fn subject_name(enrollment: &EnrolledGroup) -> String {
    non_blank(enrollment.subject_name.as_deref()).unwrap_or(DEFAULT_SUBJECT_NAME).to_string()
}

fn group_code(enrollment: &EnrolledGroup) -> String {
    non_blank(enrollment.group_code.as_deref()).unwrap_or(DEFAULT_GROUP_CODE).to_string()
}

fn teacher_name(enrollment: &EnrolledGroup) -> String {
    let name = join_name_parts(&[
        enrollment.teacher_first_name.as_deref(),
        enrollment.teacher_paternal_surname.as_deref(),
        enrollment.teacher_maternal_surname.as_deref(),
    ]);
    if name.is_empty() {
        DEFAULT_TEACHER_NAME.to_string()
    } else {
        name
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// One stats entry per enrolled group, counting every record of that group.
pub fn build_group_stats(
    enrollments: &[EnrolledGroup],
    records: &[AttendanceRecord],
) -> Vec<GroupAttendanceStats> {
    let mut counts: HashMap<GroupId, AttendanceCounts> = HashMap::new();
    for record in records {
        counts.entry(record.group_id).or_default().record(record.kind);
    }

    latest_enrollment_per_group(enrollments)
        .into_iter()
        .map(|enrollment| {
            let c = counts.get(&enrollment.group_id).copied().unwrap_or_default();
            GroupAttendanceStats {
                group_id: enrollment.group_id,
                subject_id: enrollment.subject_id,
                subject_name: subject_name(enrollment),
                subject_code: non_blank(enrollment.subject_code.as_deref())
                    .unwrap_or(DEFAULT_SUBJECT_CODE)
                    .to_string(),
                group_code: group_code(enrollment),
                semester: enrollment.semester.filter(|s| *s > 0).unwrap_or(1),
                classroom: non_blank(enrollment.classroom.as_deref())
                    .unwrap_or(DEFAULT_CLASSROOM)
                    .to_string(),
                teacher_name: teacher_name(enrollment),
                total_classes: c.total,
                present: c.present,
                late: c.late,
                absent: c.absent,
                attendance_percentage: c.percentage,
                picker_value: enrollment.group_id.to_string(),
            }
        })
        .collect()
}

/// Entries for the group picker, in the same order as [`build_group_stats`].
pub fn group_options(enrollments: &[EnrolledGroup]) -> Vec<GroupOption> {
    latest_enrollment_per_group(enrollments)
        .into_iter()
        .map(|enrollment| GroupOption {
            label: format!(
                "{} - Grupo {}",
                subject_name(enrollment),
                group_code(enrollment)
            ),
            value: enrollment.group_id.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cetis_models::attendance::AttendanceKind;
    use cetis_models::ids::{AttendanceId, EnrollmentId, SubjectId};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, day, 8, 0, 0).unwrap()
    }

    fn enrolled(enrollment_id: i32, group_id: i32, enrolled_at: DateTime<Utc>) -> EnrolledGroup {
        EnrolledGroup {
            enrollment_id: EnrollmentId(enrollment_id),
            group_id: GroupId(group_id),
            enrolled_at,
            group_code: Some(format!("5A{}", group_id)),
            semester: Some(5),
            classroom: Some("Lab 2".to_string()),
            subject_id: SubjectId(group_id * 10),
            subject_name: Some(format!("Materia {}", group_id)),
            subject_code: Some(format!("M{}", group_id)),
            teacher_first_name: Some("Laura".to_string()),
            teacher_paternal_surname: Some("Méndez".to_string()),
            teacher_maternal_surname: None,
        }
    }

    fn record(id: i32, group_id: i32, kind: AttendanceKind) -> AttendanceRecord {
        AttendanceRecord {
            id: AttendanceId(id),
            enrollment_id: EnrollmentId(1),
            group_id: GroupId(group_id),
            class_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            recorded_time: None,
            kind,
            notes: None,
        }
    }

    #[test]
    fn test_latest_enrollment_wins_and_keeps_first_position() {
        let enrollments = vec![
            enrolled(1, 7, at(1)),
            enrolled(2, 9, at(2)),
            enrolled(3, 7, at(10)),
            enrolled(4, 7, at(5)),
        ];

        let latest = latest_enrollment_per_group(&enrollments);
        let ids: Vec<_> = latest.iter().map(|e| (e.group_id.0, e.enrollment_id.0)).collect();
        assert_eq!(ids, vec![(7, 3), (9, 2)]);
    }

    #[test]
    fn test_latest_enrollment_tie_goes_to_higher_id() {
        let enrollments = vec![enrolled(8, 7, at(3)), enrolled(5, 7, at(3))];
        let latest = latest_enrollment_per_group(&enrollments);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].enrollment_id, EnrollmentId(8));
    }

    #[test]
    fn test_group_stats_counts_records_per_group() {
        use AttendanceKind::*;
        let enrollments = vec![enrolled(1, 7, at(1)), enrolled(2, 9, at(1))];
        let records = vec![
            record(1, 7, Present),
            record(2, 7, Late),
            record(3, 7, Absent),
            record(4, 9, Present),
            record(5, 42, Absent),
        ];

        let stats = build_group_stats(&enrollments, &records);
        assert_eq!(stats.len(), 2);

        let first = &stats[0];
        assert_eq!(first.group_id, GroupId(7));
        assert_eq!(first.total_classes, 3);
        assert_eq!((first.present, first.late, first.absent), (1, 1, 1));
        assert_eq!(first.attendance_percentage, 67);
        assert_eq!(first.teacher_name, "Laura Méndez");
        assert_eq!(first.picker_value, "7");

        let second = &stats[1];
        assert_eq!(second.total_classes, 1);
        assert_eq!(second.attendance_percentage, 100);
    }

    #[test]
    fn test_group_without_records_is_zero() {
        let stats = build_group_stats(&[enrolled(1, 7, at(1))], &[]);
        assert_eq!(stats[0].total_classes, 0);
        assert_eq!(stats[0].attendance_percentage, 0);
    }

    #[test]
    fn test_missing_details_use_defaults() {
        let mut bare = enrolled(1, 7, at(1));
        bare.group_code = None;
        bare.semester = Some(0);
        bare.classroom = Some("  ".to_string());
        bare.subject_name = None;
        bare.subject_code = None;
        bare.teacher_first_name = None;
        bare.teacher_paternal_surname = Some("".to_string());

        let stats = build_group_stats(&[bare], &[]);
        let s = &stats[0];
        assert_eq!(s.subject_name, "Materia");
        assert_eq!(s.subject_code, "N/A");
        assert_eq!(s.group_code, "Sin código");
        assert_eq!(s.semester, 1);
        assert_eq!(s.classroom, "N/A");
        assert_eq!(s.teacher_name, "Docente");
    }

    #[test]
    fn test_group_options_labels() {
        let mut unnamed = enrolled(2, 9, at(1));
        unnamed.subject_name = None;
        let enrollments = vec![enrolled(1, 7, at(1)), unnamed, enrolled(3, 7, at(2))];

        let options = group_options(&enrollments);
        assert_eq!(
            options,
            vec![
                GroupOption {
                    label: "Materia 7 - Grupo 5A7".to_string(),
                    value: "7".to_string(),
                },
                GroupOption {
                    label: "Materia - Grupo 5A9".to_string(),
                    value: "9".to_string(),
                },
            ]
        );
    }
}
