//! Demo data for local development.
//!
//! Every seeded user shares the `seed.cetis.local` email domain and every
//! seeded catalogue row carries the `SEED-` code prefix, so [`clear_all`]
//! removes exactly what [`seed_all`] inserted.

mod activity;
mod catalog;
mod models;
mod users;

use chrono::{Duration, Local};
use sqlx::PgPool;
use std::time::Instant;

pub use activity::{class_dates, pick_kind};
pub use models::{SEED_CODE_PREFIX, SEED_EMAIL_DOMAIN, SEED_PASSWORD, SeedConfig};

/// Seeds specialties, subjects, an active period, groups, teachers, students,
/// enrollments, attendance and reports.
pub async fn seed_all(
    db: &PgPool,
    config: SeedConfig,
    qr_prefix: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("\n🌱 Starting database seeding...");
    println!(
        "   {} specialties, {} groups, {} teachers, {} students\n",
        config.specialties,
        config.total_groups(),
        config.teachers,
        config.total_students()
    );

    let today = Local::now().date_naive();
    let period_start = today - Duration::weeks(config.weeks_of_attendance as i64 + 1);
    let period_end = today + Duration::weeks(12);

    let specialty_ids = catalog::seed_specialties(db, config.specialties).await?;
    let subjects =
        catalog::seed_subjects(db, &specialty_ids, config.subjects_per_specialty).await?;
    let period_id = catalog::seed_active_period(db, period_start, period_end).await?;
    let teacher_ids = users::seed_teachers(db, config.teachers, &specialty_ids).await?;
    let groups = catalog::seed_groups(db, &subjects, &teacher_ids, period_id).await?;
    let students = users::seed_students(
        db,
        &specialty_ids,
        config.students_per_specialty,
        qr_prefix,
        period_start,
    )
    .await?;
    let enrollments = activity::seed_enrollments(db, &students, &groups).await?;
    activity::seed_attendance(db, &enrollments, today, config.weeks_of_attendance).await?;
    activity::seed_reports(
        db,
        &enrollments,
        config.reports_per_student,
        today,
        (config.weeks_of_attendance * 7) as i64,
    )
    .await?;

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    println!(
        "   Every seeded account uses the password '{}'",
        SEED_PASSWORD
    );
    Ok(())
}

/// Removes seeded users first, then the seeded catalogue.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("\n🧹 Clearing seeded data...");

    users::clear_users(db).await?;
    catalog::clear_catalog(db).await?;

    println!("\n✅ Seeded data cleared in {:?}", start_time.elapsed());
    Ok(())
}
