use anyhow::anyhow;
use cetis_auth::UserType;
use cetis_config::InstitutionConfig;
use cetis_core::{AppError, PaginationMeta};
use cetis_models::ids::StudentId;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use crate::metrics::track_student_created;
use crate::modules::periods::service::PeriodService;
use crate::modules::students::credential::{build_credential, generate_qr_code, profile_from_row};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentCredential, StudentFilterParams,
    StudentProfile, StudentProfileRow,
};
use crate::modules::teachers::service::ensure_user_type;

const PROFILE_SELECT: &str = r#"
    SELECT s.id AS student_id, s.user_id, s.control_number,
           u.first_name, u.paternal_surname, u.maternal_surname,
           sp.name AS specialty_name, sp.code AS specialty_code,
           s.semester, u.email, COALESCE(s.phone, u.phone) AS phone,
           s.qr_code, s.enrolled_on, s.curp
    FROM students s
    JOIN users u ON u.id = s.user_id
    LEFT JOIN specialties sp ON sp.id = s.specialty_id"#;

pub struct StudentService;

impl StudentService {
    /// `qr_prefix` starts the generated QR code when the body has none.
    #[instrument(skip(db))]
    pub async fn create_student(
        db: &PgPool,
        dto: CreateStudentDto,
        qr_prefix: &str,
    ) -> Result<Student, AppError> {
        ensure_user_type(db, dto.user_id, UserType::Student).await?;

        let enrolled_on = dto.enrolled_on.unwrap_or_else(|| Utc::now().date_naive());
        let qr_code = dto
            .qr_code
            .clone()
            .unwrap_or_else(|| generate_qr_code(qr_prefix, dto.control_number, enrolled_on));

        let student = sqlx::query_as::<_, Student>(
            r#"INSERT INTO students
                   (user_id, specialty_id, control_number, curp, phone, address, semester, qr_code, enrolled_on)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING id, user_id, specialty_id, control_number, curp, phone, address,
                         semester, qr_code, enrolled_on, created_at"#,
        )
        .bind(dto.user_id)
        .bind(dto.specialty_id)
        .bind(dto.control_number)
        .bind(&dto.curp)
        .bind(&dto.phone)
        .bind(&dto.address)
        .bind(dto.semester.unwrap_or(1))
        .bind(&qr_code)
        .bind(enrolled_on)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_insert(e, "Student"))?;

        track_student_created();
        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_students(
        db: &PgPool,
        filters: StudentFilterParams,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(db)
            .await?;

        let rows = sqlx::query_as::<_, StudentProfileRow>(&format!(
            "{PROFILE_SELECT}
             ORDER BY u.paternal_surname, u.maternal_surname, u.first_name, s.id
             LIMIT $1 OFFSET $2"
        ))
        .bind(filters.pagination.limit())
        .bind(filters.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedStudentsResponse {
            data: rows.iter().map(profile_from_row).collect(),
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    async fn find_profile_row(
        db: &PgPool,
        id: StudentId,
    ) -> Result<StudentProfileRow, AppError> {
        sqlx::query_as::<_, StudentProfileRow>(&format!("{PROFILE_SELECT} WHERE s.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: StudentId) -> Result<StudentProfile, AppError> {
        let row = Self::find_profile_row(db, id).await?;
        Ok(profile_from_row(&row))
    }

    #[instrument(skip(db))]
    pub async fn get_credential(
        db: &PgPool,
        id: StudentId,
        institution: &InstitutionConfig,
    ) -> Result<StudentCredential, AppError> {
        let row = Self::find_profile_row(db, id).await?;
        let period = PeriodService::find_active_period(db).await?;
        Ok(build_credential(&row, period.as_ref(), institution))
    }

    /// 404 unless a student with `id` exists.
    #[instrument(skip(db))]
    pub async fn ensure_student_exists(db: &PgPool, id: StudentId) -> Result<(), AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;
    use cetis_models::ids::UserId;

    async fn insert_user(pool: &PgPool, email: &str, user_type: &str) -> UserId {
        sqlx::query_scalar::<_, UserId>(
            r#"INSERT INTO users (first_name, paternal_surname, email, password, user_type)
               VALUES ('Ana', 'López', $1, 'x', $2::user_type) RETURNING id"#,
        )
        .bind(email)
        .bind(user_type)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn dto(user_id: UserId) -> CreateStudentDto {
        CreateStudentDto {
            user_id,
            specialty_id: None,
            control_number: 22050123,
            curp: None,
            phone: None,
            address: None,
            semester: Some(3),
            qr_code: None,
            enrolled_on: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_generates_qr_code(pool: PgPool) {
        let user_id = insert_user(&pool, "ana@cetis27.edu.mx", "estudiante").await;
        let student = StudentService::create_student(&pool, dto(user_id), "CETIS27")
            .await
            .unwrap();
        assert!(student.qr_code.starts_with("CETIS27-22050123-"));
        assert!(student.enrolled_on.is_some());

        let profile = StudentService::get_student(&pool, student.id).await.unwrap();
        assert_eq!(profile.full_name, "Ana López");
        assert_eq!(profile.specialty, "Sin especialidad");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_rejects_non_student_user(pool: PgPool) {
        let user_id = insert_user(&pool, "docente@cetis27.edu.mx", "docente").await;
        let err = StudentService::create_student(&pool, dto(user_id), "CETIS27")
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_credential_without_active_period(pool: PgPool) {
        let user_id = insert_user(&pool, "ana@cetis27.edu.mx", "estudiante").await;
        let student = StudentService::create_student(&pool, dto(user_id), "CETIS27")
            .await
            .unwrap();

        let credential =
            StudentService::get_credential(&pool, student.id, &InstitutionConfig::default())
                .await
                .unwrap();
        assert_eq!(credential.qr_payload, "22050123");
        assert!(credential.issued_on.is_none());

        let missing = StudentService::ensure_student_exists(&pool, StudentId(9999))
            .await
            .unwrap_err();
        assert_eq!(missing.status.as_u16(), 404);
    }
}
