//! Teacher and student accounts.

use cetis_auth::UserType;
use cetis_models::ids::{SpecialtyId, StudentId, TeacherId, UserId};
use cetis_models::students::format_qr_code;
use chrono::{Datelike, NaiveDate};
use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::{SEED_EMAIL_DOMAIN, SEED_PASSWORD, UserSeed};

/// bcrypt cost for seeded accounts; far below the login default to keep
/// seeding fast.
const SEED_BCRYPT_COST: u32 = 6;

/// First control number handed out to seeded students.
const FIRST_CONTROL_NUMBER: i64 = 22_050_000_000_000;

/// Generates `count` users of one type, hashing every password in parallel.
pub fn generate_users(
    count: usize,
    user_type: UserType,
    email_tag: &str,
) -> Result<Vec<UserSeed>, bcrypt::BcryptError> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let paternal_surname: String = LastName().fake();
            let maternal_surname: String = LastName().fake();

            Ok(UserSeed {
                email: format!(
                    "{}.{}+{}{}@{}",
                    first_name.to_lowercase(),
                    paternal_surname.to_lowercase(),
                    email_tag,
                    idx,
                    SEED_EMAIL_DOMAIN
                ),
                first_name,
                paternal_surname,
                maternal_surname: Some(maternal_surname),
                password_hash: bcrypt::hash(SEED_PASSWORD, SEED_BCRYPT_COST)?,
                user_type,
            })
        })
        .collect()
}

pub fn control_number(idx: usize) -> i64 {
    FIRST_CONTROL_NUMBER + idx as i64
}

async fn insert_users(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    // 6 params per user
    const BATCH_SIZE: usize = 1000;
    let mut all_ids = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        let mut query = String::from(
            "INSERT INTO users (first_name, paternal_surname, maternal_surname, email, password, user_type) VALUES ",
        );
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            let p = i * 6;
            query.push_str(&format!(
                "(${}, ${}, ${}, ${}, ${}, ${})",
                p + 1,
                p + 2,
                p + 3,
                p + 4,
                p + 5,
                p + 6
            ));
        }
        query.push_str(" RETURNING id");

        let mut q = sqlx::query_scalar::<_, UserId>(&query);
        for user in chunk {
            q = q
                .bind(&user.first_name)
                .bind(&user.paternal_surname)
                .bind(&user.maternal_surname)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(user.user_type);
        }
        all_ids.extend(q.fetch_all(&mut **tx).await?);
    }

    Ok(all_ids)
}

/// Seeds teachers, spreading them over `specialty_ids` round-robin.
pub async fn seed_teachers(
    db: &PgPool,
    count: usize,
    specialty_ids: &[SpecialtyId],
) -> Result<Vec<TeacherId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👩‍🏫 Seeding {} teachers...", count);

    let users = generate_users(count, UserType::Teacher, "docente")?;
    let mut tx = db.begin().await?;
    let user_ids = insert_users(&mut tx, &users).await?;

    let mut teacher_ids = Vec::with_capacity(user_ids.len());
    for (idx, user_id) in user_ids.into_iter().enumerate() {
        let specialty_id = specialty_ids.get(idx % specialty_ids.len().max(1)).copied();
        let id = sqlx::query_scalar::<_, TeacherId>(
            "INSERT INTO teachers (user_id, specialty_id, employee_number)
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user_id)
        .bind(specialty_id)
        .bind(format!("SEED-D-{:04}", idx + 1))
        .fetch_one(&mut *tx)
        .await?;
        teacher_ids.push(id);
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} teachers in {:?}",
        teacher_ids.len(),
        start_time.elapsed()
    );

    Ok(teacher_ids)
}

/// Seeds `per_specialty` students in each specialty, all enrolled on
/// `enrolled_on`. Returns each student with their specialty.
pub async fn seed_students(
    db: &PgPool,
    specialty_ids: &[SpecialtyId],
    per_specialty: usize,
    qr_prefix: &str,
    enrolled_on: NaiveDate,
) -> Result<Vec<(StudentId, SpecialtyId)>, Box<dyn std::error::Error>> {
    if specialty_ids.is_empty() || per_specialty == 0 {
        return Ok(Vec::new());
    }

    let start_time = Instant::now();
    let total = specialty_ids.len() * per_specialty;
    println!(
        "🎓 Seeding {} students ({} per specialty)...",
        total, per_specialty
    );

    let users = generate_users(total, UserType::Student, "estudiante")?;
    let mut tx = db.begin().await?;
    let user_ids = insert_users(&mut tx, &users).await?;

    let mut students = Vec::with_capacity(total);
    for (idx, user_id) in user_ids.into_iter().enumerate() {
        let specialty_id = specialty_ids[idx / per_specialty];
        let control = control_number(idx);
        let id = sqlx::query_scalar::<_, StudentId>(
            "INSERT INTO students (user_id, specialty_id, control_number, semester, qr_code, enrolled_on)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(user_id)
        .bind(specialty_id)
        .bind(control)
        .bind(((idx % 6) + 1) as i32)
        .bind(format_qr_code(
            qr_prefix,
            control,
            enrolled_on.year(),
            rand::random(),
        ))
        .bind(enrolled_on)
        .fetch_one(&mut *tx)
        .await?;
        students.push((id, specialty_id));
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} students in {:?}",
        students.len(),
        start_time.elapsed()
    );

    Ok(students)
}

/// Deletes seeded users; students, teachers and everything hanging off them
/// cascade.
pub async fn clear_users(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} users in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_users_are_unique_and_hashed() {
        let users = generate_users(5, UserType::Student, "estudiante").unwrap();
        assert_eq!(users.len(), 5);

        let mut emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), 5);

        for user in &users {
            assert!(user.email.ends_with("@seed.cetis.local"));
            assert!(bcrypt::verify(SEED_PASSWORD, &user.password_hash).unwrap());
            assert_eq!(user.user_type, UserType::Student);
        }
    }

    #[test]
    fn test_control_numbers_are_sequential() {
        assert_eq!(control_number(0), 22_050_000_000_000);
        assert_eq!(control_number(41), 22_050_000_000_041);
    }
}
