#![cfg(feature = "db-tests")]

mod common;

use axum::Router;
use axum::http::StatusCode;
use cetis::cetis_auth::UserType;
use cetis::cetis_models::ids::{EnrollmentId, GroupId, StudentId, TeacherId};
use cetis::router::init_router;
use cetis::state::AppState;
use common::{
    body_json, create_group, create_period, create_student, create_teacher, enroll, request,
    test_state, token,
};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

struct Fixture {
    state: AppState,
    student_id: StudentId,
    teacher_id: TeacherId,
    group_id: GroupId,
    enrollment_id: EnrollmentId,
}

async fn fixture(pool: PgPool) -> Fixture {
    let (_, student_id) = create_student(&pool, None, 22050123456789).await;
    let teacher_id = create_teacher(&pool, "D-0001").await;
    let period_id = create_period(&pool, "2025-1", true).await;
    let (_, group_id) = create_group(&pool, "ING-3", period_id, Some(teacher_id)).await;
    let enrollment_id = enroll(&pool, student_id, group_id).await;

    Fixture {
        state: test_state(pool),
        student_id,
        teacher_id,
        group_id,
        enrollment_id,
    }
}

async fn record(app: &Router, token: &str, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(request("POST", "/api/asistencias", Some(token), Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_records_as_themselves(pool: PgPool) {
    let f = fixture(pool).await;
    let teacher = token(&f.state, UserType::Teacher, None, Some(f.teacher_id.0));
    let app = init_router(f.state);

    let body = record(
        &app,
        &teacher,
        json!({
            "enrollmentId": f.enrollment_id.0,
            "classDate": "2025-03-10",
            "recordedTime": "07:05:00",
            "kind": "Asistencia",
            "teacherId": 9999
        }),
    )
    .await;

    assert_eq!(body["teacherId"], f.teacher_id.0);
    assert_eq!(body["kind"], "Asistencia");
    assert_eq!(body["classDate"], "2025-03-10");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_enrollment_is_bad_request(pool: PgPool) {
    let f = fixture(pool).await;
    let admin = token(&f.state, UserType::Admin, None, None);
    let app = init_router(f.state);

    let response = app
        .oneshot(request(
            "POST",
            "/api/asistencias",
            Some(&admin),
            Some(json!({ "enrollmentId": 999, "classDate": "2025-03-10", "kind": "Falta" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_stats_sheet_and_listing(pool: PgPool) {
    let f = fixture(pool).await;
    let teacher = token(&f.state, UserType::Teacher, None, Some(f.teacher_id.0));
    let student = token(&f.state, UserType::Student, Some(f.student_id.0), None);
    let app = init_router(f.state);

    for (date, time, kind) in [
        ("2025-03-10", "07:05:00", "Asistencia"),
        ("2025-03-11", "07:20:00", "Retardo"),
        ("2025-03-12", "07:00:00", "Falta"),
    ] {
        record(
            &app,
            &teacher,
            json!({
                "enrollmentId": f.enrollment_id.0,
                "classDate": date,
                "recordedTime": time,
                "kind": kind
            }),
        )
        .await;
    }

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/estudiantes/{}/asistencias/estadisticas", f.student_id),
            Some(&student),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await;
    assert_eq!(stats.as_array().unwrap().len(), 1);
    assert_eq!(stats[0]["groupId"], f.group_id.0);
    assert_eq!(stats[0]["totalClasses"], 3);
    assert_eq!(stats[0]["attendancePercentage"], 67);
    assert_eq!(stats[0]["subjectName"], "Inglés");
    assert_eq!(stats[0]["teacherName"], "Ana López Ruiz");

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/estudiantes/{}/asistencias/grupos", f.student_id),
            Some(&student),
            None,
        ))
        .await
        .unwrap();
    let options = body_json(response).await;
    assert_eq!(options[0]["label"], "Inglés - Grupo 3A");
    assert_eq!(options[0]["value"], f.group_id.to_string());

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!(
                "/api/estudiantes/{}/grupos/{}/asistencias?from=2025-03-11",
                f.student_id, f.group_id
            ),
            Some(&student),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let sheet = body_json(response).await;
    let dates: Vec<_> = sheet["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["formattedDate"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, vec!["12/03/2025", "11/03/2025"]);
    assert_eq!(sheet["totals"]["total"], 2);
    assert_eq!(sheet["rows"][1]["time"], "07:20");

    let response = app
        .oneshot(request("GET", "/api/asistencias", Some(&student), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listing = body_json(response).await;
    assert_eq!(listing["meta"]["total"], 3);
    assert_eq!(listing["data"][0]["classDate"], "2025-03-12");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sheet_for_group_not_enrolled_is_not_found(pool: PgPool) {
    let f = fixture(pool.clone()).await;
    let other_period = create_period(&pool, "2024-2", false).await;
    let (_, other_group) = create_group(&pool, "MAT-1", other_period, None).await;

    let admin = token(&f.state, UserType::Admin, None, None);
    let app = init_router(f.state);

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/estudiantes/{}/grupos/{}/asistencias", f.student_id, other_group),
            Some(&admin),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Student is not enrolled in this group"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_without_enrollments_has_empty_stats(pool: PgPool) {
    let (_, student_id) = create_student(&pool, None, 22050000000009).await;
    let state = test_state(pool);
    let student = token(&state, UserType::Student, Some(student_id.0), None);
    let app = init_router(state);

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/estudiantes/{}/asistencias/estadisticas", student_id),
            Some(&student),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}
