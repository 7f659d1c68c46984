#![cfg(feature = "db-tests")]

mod common;

use axum::http::StatusCode;
use cetis::cetis_auth::UserType;
use cetis::router::init_router;
use common::{
    body_json, create_period, create_specialty, create_student, create_user, request, test_state,
    token, unique_email,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_creates_student_with_generated_qr(pool: PgPool) {
    let specialty_id = create_specialty(&pool, "PROG").await;
    let user_id = create_user(&pool, &unique_email(), UserType::Student).await;

    let state = test_state(pool);
    let admin = token(&state, UserType::Admin, None, None);
    let app = init_router(state);

    let response = app
        .oneshot(request(
            "POST",
            "/api/estudiantes",
            Some(&admin),
            Some(json!({
                "userId": user_id.0,
                "specialtyId": specialty_id.0,
                "controlNumber": 22050123456789i64,
                "enrolledOn": "2024-08-15"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["controlNumber"], "22050123456789");
    assert_eq!(body["semester"], 1);
    let qr = body["qrCode"].as_str().unwrap();
    assert!(qr.starts_with("CETIS27-22050123456789-2024-"), "{}", qr);
    assert_eq!(qr.len(), "CETIS27-22050123456789-2024-".len() + 8);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_record_requires_student_user(pool: PgPool) {
    let user_id = create_user(&pool, &unique_email(), UserType::Teacher).await;

    let state = test_state(pool);
    let admin = token(&state, UserType::Admin, None, None);
    let app = init_router(state);

    let response = app
        .oneshot(request(
            "POST",
            "/api/estudiantes",
            Some(&admin),
            Some(json!({ "userId": user_id.0, "controlNumber": 22050000000001i64 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_reads_own_profile(pool: PgPool) {
    let specialty_id = create_specialty(&pool, "PROG").await;
    let (_, student_id) = create_student(&pool, Some(specialty_id), 22050123456789).await;

    let state = test_state(pool);
    let student = token(&state, UserType::Student, Some(student_id.0), None);
    let app = init_router(state);

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/estudiantes/{}", student_id),
            Some(&student),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["fullName"], "Ana López Ruiz");
    assert_eq!(body["specialty"], "Programación");
    assert_eq!(body["controlNumber"], "22050123456789");
    assert_eq!(body["enrolledOn"], "2024-08-15");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_credential_uses_active_period(pool: PgPool) {
    let (_, student_id) = create_student(&pool, None, 22050123456789).await;
    create_period(&pool, "2025-1", true).await;

    let state = test_state(pool);
    let student = token(&state, UserType::Student, Some(student_id.0), None);
    let app = init_router(state);

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/estudiantes/{}/credencial", student_id),
            Some(&student),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["qrPayload"], "22050123456789");
    assert_eq!(body["specialty"], "Sin especialidad");
    assert_eq!(body["issuedOn"], "Febrero 2025");
    assert_eq!(body["validUntil"], "Julio 2025");
    assert_eq!(body["institution"], "CETIS 27");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_credential_without_active_period(pool: PgPool) {
    let (_, student_id) = create_student(&pool, None, 22050123456789).await;
    create_period(&pool, "2024-2", false).await;

    let state = test_state(pool);
    let teacher = token(&state, UserType::Teacher, None, Some(1));
    let app = init_router(state);

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/estudiantes/{}/credencial", student_id),
            Some(&teacher),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["issuedOn"].is_null());
    assert!(body["validUntil"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_student_is_not_found(pool: PgPool) {
    let state = test_state(pool);
    let admin = token(&state, UserType::Admin, None, None);
    let app = init_router(state);

    for uri in [
        "/api/estudiantes/999",
        "/api/estudiantes/999/credencial",
        "/api/estudiantes/999/asistencias/estadisticas",
        "/api/estudiantes/999/reportes",
    ] {
        let response = app
            .clone()
            .oneshot(request("GET", uri, Some(&admin), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_staff_lists_students(pool: PgPool) {
    create_student(&pool, None, 22050000000001).await;
    create_student(&pool, None, 22050000000002).await;

    let state = test_state(pool);
    let teacher = token(&state, UserType::Teacher, None, Some(1));
    let app = init_router(state);

    let response = app
        .oneshot(request("GET", "/api/estudiantes", Some(&teacher), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 2);
}
