//! Specialties, subjects, the active period and class groups.

use cetis_models::ids::{GroupId, PeriodId, SpecialtyId, SubjectId, TeacherId};
use chrono::NaiveDate;
use sqlx::PgPool;
use std::time::Instant;

use super::models::{SEED_CODE_PREFIX, SpecialtySeed, SubjectSeed};

const SPECIALTY_NAMES: [&str; 6] = [
    "Programación",
    "Contabilidad",
    "Electricidad",
    "Mecánica Industrial",
    "Administración de Recursos Humanos",
    "Soporte y Mantenimiento de Equipo de Cómputo",
];

const SUBJECT_NAMES: [&str; 8] = [
    "Inglés",
    "Matemáticas",
    "Química",
    "Física",
    "Lectura, Expresión Oral y Escrita",
    "Ética",
    "Tecnologías de la Información",
    "Módulo Profesional",
];

pub fn generate_specialties(count: usize) -> Vec<SpecialtySeed> {
    (0..count)
        .map(|idx| {
            let base = SPECIALTY_NAMES[idx % SPECIALTY_NAMES.len()];
            let round = idx / SPECIALTY_NAMES.len();
            SpecialtySeed {
                name: if round == 0 {
                    base.to_string()
                } else {
                    format!("{} {}", base, round + 1)
                },
                code: format!("{}-ESP-{:02}", SEED_CODE_PREFIX, idx + 1),
            }
        })
        .collect()
}

/// Subjects of one specialty; semesters cycle 1 to 6.
pub fn generate_subjects(specialty_idx: usize, count: usize) -> Vec<SubjectSeed> {
    (0..count)
        .map(|idx| SubjectSeed {
            name: SUBJECT_NAMES[idx % SUBJECT_NAMES.len()].to_string(),
            code: format!(
                "{}-{:02}-{:02}",
                SEED_CODE_PREFIX,
                specialty_idx + 1,
                idx + 1
            ),
            semester: (idx % 6) as i32 + 1,
        })
        .collect()
}

pub async fn seed_specialties(
    db: &PgPool,
    count: usize,
) -> Result<Vec<SpecialtyId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🏫 Seeding {} specialties...", count);

    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(count);
    for specialty in generate_specialties(count) {
        let id = sqlx::query_scalar::<_, SpecialtyId>(
            "INSERT INTO specialties (name, code) VALUES ($1, $2) RETURNING id",
        )
        .bind(&specialty.name)
        .bind(&specialty.code)
        .fetch_one(&mut *tx)
        .await?;
        ids.push(id);
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} specialties in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}

/// Returns each subject with the specialty it belongs to.
pub async fn seed_subjects(
    db: &PgPool,
    specialty_ids: &[SpecialtyId],
    per_specialty: usize,
) -> Result<Vec<(SubjectId, SpecialtyId)>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "📘 Seeding {} subjects ({} per specialty)...",
        specialty_ids.len() * per_specialty,
        per_specialty
    );

    let mut tx = db.begin().await?;
    let mut subjects = Vec::with_capacity(specialty_ids.len() * per_specialty);
    for (specialty_idx, &specialty_id) in specialty_ids.iter().enumerate() {
        for subject in generate_subjects(specialty_idx, per_specialty) {
            let id = sqlx::query_scalar::<_, SubjectId>(
                "INSERT INTO subjects (specialty_id, name, code, semester, weekly_hours)
                 VALUES ($1, $2, $3, $4, 5) RETURNING id",
            )
            .bind(specialty_id)
            .bind(&subject.name)
            .bind(&subject.code)
            .bind(subject.semester)
            .fetch_one(&mut *tx)
            .await?;
            subjects.push((id, specialty_id));
        }
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} subjects in {:?}",
        subjects.len(),
        start_time.elapsed()
    );
    Ok(subjects)
}

/// Inserts an active period covering `start..end`, deactivating any other.
pub async fn seed_active_period(
    db: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PeriodId, Box<dyn std::error::Error>> {
    println!("📅 Seeding active period {} - {}...", start, end);

    let mut tx = db.begin().await?;
    sqlx::query("UPDATE periods SET active = FALSE WHERE active")
        .execute(&mut *tx)
        .await?;
    let id = sqlx::query_scalar::<_, PeriodId>(
        "INSERT INTO periods (code, name, start_date, end_date, active)
         VALUES ($1, $2, $3, $4, TRUE) RETURNING id",
    )
    .bind(format!("{}-{}", SEED_CODE_PREFIX, start.format("%Y%m")))
    .bind(format!("Periodo de prueba {}", start.format("%Y")))
    .bind(start)
    .bind(end)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(id)
}

/// One group per subject, taught by teachers in round-robin order.
/// Returns each group with its specialty.
pub async fn seed_groups(
    db: &PgPool,
    subjects: &[(SubjectId, SpecialtyId)],
    teacher_ids: &[TeacherId],
    period_id: PeriodId,
) -> Result<Vec<(GroupId, SpecialtyId, Option<TeacherId>)>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} groups...", subjects.len());

    let mut tx = db.begin().await?;
    let mut groups = Vec::with_capacity(subjects.len());
    for (idx, &(subject_id, specialty_id)) in subjects.iter().enumerate() {
        let teacher_id = teacher_ids.get(idx % teacher_ids.len().max(1)).copied();
        let id = sqlx::query_scalar::<_, GroupId>(
            "INSERT INTO class_groups (subject_id, teacher_id, period_id, specialty_id, code, classroom)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(subject_id)
        .bind(teacher_id)
        .bind(period_id)
        .bind(specialty_id)
        .bind(format!("{}{}", idx % 6 + 1, (b'A' + (idx % 3) as u8) as char))
        .bind(format!("Aula {}", idx + 1))
        .fetch_one(&mut *tx)
        .await?;
        groups.push((id, specialty_id, teacher_id));
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} groups in {:?}",
        groups.len(),
        start_time.elapsed()
    );
    Ok(groups)
}

/// Deletes seeded periods (cascading groups, enrollments and attendance),
/// subjects and specialties.
pub async fn clear_catalog(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded catalogue...");

    let pattern = format!("{}-%", SEED_CODE_PREFIX);
    let mut tx = db.begin().await?;
    let mut deleted = 0;
    for table in ["periods", "subjects", "specialties"] {
        deleted += sqlx::query(&format!("DELETE FROM {table} WHERE code LIKE $1"))
            .bind(&pattern)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }
    tx.commit().await?;

    println!(
        "   ✓ Deleted {} catalogue rows in {:?}",
        deleted,
        start_time.elapsed()
    );
    Ok(deleted)
}
