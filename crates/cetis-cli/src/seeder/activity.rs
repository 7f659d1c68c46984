//! Enrollments, attendance and reports for seeded students.

use cetis_models::attendance::AttendanceKind;
use cetis_models::ids::{EnrollmentId, GroupId, SpecialtyId, StudentId, TeacherId};
use cetis_models::reports::{ReportKind, ReportSeverity};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use rand::Rng;
use rand::seq::SliceRandom;
use sqlx::PgPool;
use std::time::Instant;

const BATCH_SIZE: usize = 1000;

pub struct SeededEnrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub group_id: GroupId,
    pub teacher_id: Option<TeacherId>,
}

struct AttendanceSeed {
    enrollment_id: EnrollmentId,
    teacher_id: Option<TeacherId>,
    class_date: NaiveDate,
    recorded_time: Option<NaiveTime>,
    kind: AttendanceKind,
}

struct ReportSeed {
    student_id: StudentId,
    group_id: GroupId,
    teacher_id: TeacherId,
    kind: ReportKind,
    severity: ReportSeverity,
    title: &'static str,
    description: &'static str,
    incident_date: NaiveDate,
}

const REPORT_TEMPLATES: [(ReportKind, &str, &str); 3] = [
    (
        ReportKind::MissingHomework,
        "Tarea no entregada",
        "El estudiante no entregó la tarea asignada para esta semana.",
    ),
    (
        ReportKind::Conduct,
        "Conducta en clase",
        "El estudiante interrumpió la clase en repetidas ocasiones.",
    ),
    (
        ReportKind::Other,
        "Material incompleto",
        "El estudiante se presentó sin el material requerido para la práctica.",
    ),
];

/// Weekdays of the `weeks * 7` days ending on `until`, oldest first.
pub fn class_dates(until: NaiveDate, weeks: usize) -> Vec<NaiveDate> {
    let days = (weeks * 7) as i64;
    (0..days)
        .rev()
        .map(|offset| until - Duration::days(offset))
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

/// Maps a roll in `0..100` to a kind: 80% present, 10% late, 10% absent.
pub fn pick_kind(roll: u32) -> AttendanceKind {
    match roll {
        0..80 => AttendanceKind::Present,
        80..90 => AttendanceKind::Late,
        _ => AttendanceKind::Absent,
    }
}

/// Builds `($1, $2, ...), (...)` for `rows` rows of `cols` parameters.
fn placeholders(rows: usize, cols: usize) -> String {
    (0..rows)
        .map(|row| {
            let params: Vec<String> = (1..=cols).map(|c| format!("${}", row * cols + c)).collect();
            format!("({})", params.join(", "))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Enrolls every student in each group of their specialty.
pub async fn seed_enrollments(
    db: &PgPool,
    students: &[(StudentId, SpecialtyId)],
    groups: &[(GroupId, SpecialtyId, Option<TeacherId>)],
) -> Result<Vec<SeededEnrollment>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    let pairs: Vec<(StudentId, GroupId, Option<TeacherId>)> = students
        .iter()
        .flat_map(|&(student_id, specialty_id)| {
            groups
                .iter()
                .filter(move |(_, group_specialty, _)| *group_specialty == specialty_id)
                .map(move |&(group_id, _, teacher_id)| (student_id, group_id, teacher_id))
        })
        .collect();
    println!("📝 Seeding {} enrollments...", pairs.len());

    let mut tx = db.begin().await?;
    let mut enrollments = Vec::with_capacity(pairs.len());
    for chunk in pairs.chunks(BATCH_SIZE) {
        let query = format!(
            "INSERT INTO enrollments (student_id, group_id) VALUES {} RETURNING id",
            placeholders(chunk.len(), 2)
        );
        let mut q = sqlx::query_scalar::<_, EnrollmentId>(&query);
        for (student_id, group_id, _) in chunk {
            q = q.bind(*student_id).bind(*group_id);
        }
        let ids = q.fetch_all(&mut *tx).await?;
        enrollments.extend(ids.into_iter().zip(chunk).map(
            |(id, &(student_id, group_id, teacher_id))| SeededEnrollment {
                id,
                student_id,
                group_id,
                teacher_id,
            },
        ));
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} enrollments in {:?}",
        enrollments.len(),
        start_time.elapsed()
    );
    Ok(enrollments)
}

fn generate_attendance(enrollments: &[SeededEnrollment], dates: &[NaiveDate]) -> Vec<AttendanceSeed> {
    let mut rng = rand::thread_rng();
    let mut rows = Vec::with_capacity(enrollments.len() * dates.len());

    for enrollment in enrollments {
        for &class_date in dates {
            let kind = pick_kind(rng.gen_range(0..100));
            let recorded_time = match kind {
                AttendanceKind::Absent => None,
                _ => NaiveTime::from_hms_opt(7, rng.gen_range(0..30), 0),
            };
            rows.push(AttendanceSeed {
                enrollment_id: enrollment.id,
                teacher_id: enrollment.teacher_id,
                class_date,
                recorded_time,
                kind,
            });
        }
    }

    rows
}

pub async fn seed_attendance(
    db: &PgPool,
    enrollments: &[SeededEnrollment],
    until: NaiveDate,
    weeks: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let rows = generate_attendance(enrollments, &class_dates(until, weeks));
    println!("✅ Seeding {} attendance records...", rows.len());

    let mut tx = db.begin().await?;
    for chunk in rows.chunks(BATCH_SIZE) {
        let query = format!(
            "INSERT INTO attendances (enrollment_id, teacher_id, class_date, recorded_time, kind) VALUES {}",
            placeholders(chunk.len(), 5)
        );
        let mut q = sqlx::query(&query);
        for row in chunk {
            q = q
                .bind(row.enrollment_id)
                .bind(row.teacher_id)
                .bind(row.class_date)
                .bind(row.recorded_time)
                .bind(row.kind);
        }
        q.execute(&mut *tx).await?;
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} attendance records in {:?}",
        rows.len(),
        start_time.elapsed()
    );
    Ok(rows.len())
}

fn generate_reports(
    enrollments: &[SeededEnrollment],
    per_student: usize,
    until: NaiveDate,
    days_back: i64,
) -> Vec<ReportSeed> {
    let mut rng = rand::thread_rng();
    let mut by_student: Vec<(StudentId, Vec<&SeededEnrollment>)> = Vec::new();
    for enrollment in enrollments.iter().filter(|e| e.teacher_id.is_some()) {
        match by_student.iter_mut().find(|(id, _)| *id == enrollment.student_id) {
            Some((_, list)) => list.push(enrollment),
            None => by_student.push((enrollment.student_id, vec![enrollment])),
        }
    }

    let mut reports = Vec::with_capacity(by_student.len() * per_student);
    for (student_id, student_enrollments) in &by_student {
        for _ in 0..per_student {
            let Some(enrollment) = student_enrollments.choose(&mut rng) else {
                continue;
            };
            let Some(teacher_id) = enrollment.teacher_id else {
                continue;
            };
            let (kind, title, description) = REPORT_TEMPLATES[rng.gen_range(0..REPORT_TEMPLATES.len())];
            let severity = match rng.gen_range(0..3) {
                0 => ReportSeverity::High,
                1 => ReportSeverity::Medium,
                _ => ReportSeverity::Low,
            };
            reports.push(ReportSeed {
                student_id: *student_id,
                group_id: enrollment.group_id,
                teacher_id,
                kind,
                severity,
                title,
                description,
                incident_date: until - Duration::days(rng.gen_range(0..days_back.max(1))),
            });
        }
    }

    reports
}

pub async fn seed_reports(
    db: &PgPool,
    enrollments: &[SeededEnrollment],
    per_student: usize,
    until: NaiveDate,
    days_back: i64,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let reports = generate_reports(enrollments, per_student, until, days_back);
    println!("📋 Seeding {} reports...", reports.len());

    let mut tx = db.begin().await?;
    for chunk in reports.chunks(BATCH_SIZE) {
        let query = format!(
            "INSERT INTO reports (student_id, group_id, teacher_id, kind, title, description, incident_date, severity) VALUES {}",
            placeholders(chunk.len(), 8)
        );
        let mut q = sqlx::query(&query);
        for report in chunk {
            q = q
                .bind(report.student_id)
                .bind(report.group_id)
                .bind(report.teacher_id)
                .bind(report.kind)
                .bind(report.title)
                .bind(report.description)
                .bind(report.incident_date)
                .bind(report.severity);
        }
        q.execute(&mut *tx).await?;
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} reports in {:?}",
        reports.len(),
        start_time.elapsed()
    );
    Ok(reports.len())
}
