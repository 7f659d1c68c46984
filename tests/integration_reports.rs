#![cfg(feature = "db-tests")]

mod common;

use axum::http::StatusCode;
use cetis::cetis_auth::UserType;
use cetis::router::init_router;
use common::{
    body_json, create_group, create_period, create_student, create_teacher, request, test_state,
    token,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_report_lifecycle(pool: PgPool) {
    let (_, student_id) = create_student(&pool, None, 22050123456789).await;
    let teacher_id = create_teacher(&pool, "D-0001").await;
    let period_id = create_period(&pool, "2025-1", true).await;
    let (_, group_id) = create_group(&pool, "ING-3", period_id, Some(teacher_id)).await;

    let state = test_state(pool);
    let teacher = token(&state, UserType::Teacher, None, Some(teacher_id.0));
    let student = token(&state, UserType::Student, Some(student_id.0), None);
    let app = init_router(state);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/reportes",
            Some(&teacher),
            Some(json!({
                "studentId": student_id.0,
                "groupId": group_id.0,
                "kind": "conducta",
                "title": "Conducta en clase",
                "description": "Interrumpió la clase",
                "incidentDate": "2025-03-10",
                "severity": "MEDIA"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let report = body_json(response).await;
    assert_eq!(report["status"], "Pendiente");
    assert_eq!(report["teacherId"], teacher_id.0);
    let report_id = report["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/estudiantes/{}/reportes", student_id),
            Some(&student),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let reports = body_json(response).await;
    assert_eq!(reports[0]["studentName"], "Ana López Ruiz");
    assert_eq!(reports[0]["subjectName"], "Inglés");
    assert_eq!(reports[0]["groupCode"], "3A");

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/reportes/{}/revision", report_id),
            Some(&teacher),
            Some(json!({ "status": "RESUELTO", "actionsTaken": "Plática con tutor" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let reviewed = body_json(response).await;
    assert_eq!(reviewed["status"], "resuelto");
    assert_eq!(reviewed["actionsTaken"], "Plática con tutor");
    assert!(!reviewed["reviewedAt"].is_null());

    let response = app
        .oneshot(request("GET", "/api/reportes?estado=resuelto", Some(&teacher), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["meta"]["total"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_report_without_group_shows_placeholders(pool: PgPool) {
    let (_, student_id) = create_student(&pool, None, 22050123456789).await;
    let teacher_id = create_teacher(&pool, "D-0001").await;

    let state = test_state(pool);
    let admin = token(&state, UserType::Admin, None, None);
    let app = init_router(state);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/reportes",
            Some(&admin),
            Some(json!({
                "studentId": student_id.0,
                "teacherId": teacher_id.0,
                "kind": "otra",
                "title": "Uniforme",
                "description": "Sin uniforme",
                "incidentDate": "2025-03-10",
                "severity": "BAJA"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/reportes?estudianteId={}", student_id),
            Some(&admin),
            None,
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["subjectName"], "N/A");
    assert_eq!(body["data"][0]["groupCode"], "N/A");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_review_missing_report_is_not_found(pool: PgPool) {
    let state = test_state(pool);
    let admin = token(&state, UserType::Admin, None, None);
    let app = init_router(state);

    let response = app
        .oneshot(request(
            "PUT",
            "/api/reportes/999/revision",
            Some(&admin),
            Some(json!({ "status": "revisado" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
