mod common;

use actix_web::test;
use serde_json::json;

use common::{PASSWORD, bearer, register, send, test_storage};

#[actix_web::test]
async fn test_register_duplicate_username_rejected() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (status, body) = register(&app, "yusuf", "student").await;
    assert_eq!(status, 201);
    assert_eq!(body["data"]["role"], "student");
    assert_eq!(body["data"]["approved"], true);
    assert!(body["data"].get("password_hash").is_none());

    let (status, body) = register(&app, "yusuf", "student").await;
    assert_eq!(status, 400);
    assert!(body["message"].as_str().unwrap().contains("already exists"));
}

#[actix_web::test]
async fn test_register_rejects_admin_role_and_bad_input() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (status, _) = register(&app, "sneaky", "admin").await;
    assert_eq!(status, 400);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "username": "ab", "password": PASSWORD }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 400);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "username": "maryam", "password": "123" }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 400);

    // 非法 JSON 也返回统一的 400 响应
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], 1000);
}

#[actix_web::test]
async fn test_teacher_registers_unapproved() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (status, body) = register(&app, "ustadh_ali", "teacher").await;
    assert_eq!(status, 201);
    assert_eq!(body["data"]["approved"], false);
}

#[actix_web::test]
async fn test_login_success_and_failure() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "username": "aisha",
            "password": PASSWORD,
            "email": "aisha@example.com",
        }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 201);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "aisha", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "refresh_token")
        .expect("refresh cookie");
    assert!(cookie.http_only().unwrap_or(false));
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["token_type"], "bearer");
    assert!(body["data"]["access_token"].as_str().is_some());
    assert_eq!(body["data"]["user"]["username"], "aisha");

    // 邮箱同样可以登录
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "aisha@example.com", "password": PASSWORD }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 200);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "aisha", "password": "wrong-pass" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 401);
    assert_eq!(body["message"], "Username or password is incorrect");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "nobody", "password": PASSWORD }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 401);
}

#[actix_web::test]
async fn test_me_requires_token_and_updates_profile() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 401);

    let (_, token) = common::register_and_login(&app, "bilal", "student").await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["user"]["username"], "bilal");

    let req = test::TestRequest::put()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .set_json(json!({ "level": "intermediate", "email": "bilal@example.com" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["data"]["user"]["profile"]["level"], "intermediate");
    assert_eq!(body["data"]["user"]["email"], "bilal@example.com");

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/verify-token")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["is_valid"], true);
}

#[actix_web::test]
async fn test_non_admin_cannot_list_users() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, token) = common::register_and_login(&app, "hamza", "student").await;
    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(bearer(&token))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 403);

    let admin = common::admin_token(&app).await;
    let req = test::TestRequest::get()
        .uri("/api/v1/users?role=student")
        .insert_header(bearer(&admin))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["pagination"]["total"], 1);
}

#[actix_web::test]
async fn test_refresh_and_logout_cookies() {
    use actix_web::cookie::{Cookie, time::Duration};

    let storage = test_storage().await;
    let app = init_app!(storage);

    let (status, _) = register(&app, "hamza", "student").await;
    assert_eq!(status, 201);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "hamza", "password": PASSWORD, "remember_me": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let refresh = resp
        .response()
        .cookies()
        .find(|c| c.name() == "refresh_token")
        .map(|c| c.value().to_string())
        .expect("refresh cookie");
    let body: serde_json::Value = test::read_body_json(resp).await;
    let access = body["data"]["access_token"].as_str().unwrap().to_string();

    // 有效的 refresh cookie 换取新的 access token
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", refresh.clone()))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["data"]["token_type"], "bearer");
    let renewed = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&renewed))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["user"]["username"], "hamza");

    // 没有 cookie
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 401);

    // 无效 cookie 与 access token 都被拒绝，并清除 cookie
    for bad in ["not-a-jwt".to_string(), access] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(Cookie::new("refresh_token", bad))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 401);
        let cleared = resp
            .response()
            .cookies()
            .find(|c| c.name() == "refresh_token")
            .expect("cleared cookie");
        assert!(cleared.value().is_empty());
        assert_eq!(cleared.max_age(), Some(Duration::ZERO));
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .cookie(Cookie::new("refresh_token", refresh))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == "refresh_token")
        .expect("cleared cookie");
    assert!(cleared.value().is_empty());
    assert_eq!(cleared.max_age(), Some(Duration::ZERO));
}

#[actix_web::test]
async fn test_approve_teacher_is_idempotent_and_teacher_only() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let admin = common::admin_token(&app).await;
    let (teacher_id, _) = common::register_and_login(&app, "ustadh_musa", "teacher").await;
    let (student_id, _) = common::register_and_login(&app, "yusuf", "student").await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/users/{teacher_id}/approve"))
            .insert_header(bearer(&admin))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, 200, "{body}");
        assert_eq!(body["data"]["user"]["approved"], true);
        assert_eq!(body["data"]["user"]["role"], "teacher");
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{teacher_id}"))
        .insert_header(bearer(&admin))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["user"]["approved"], true);

    // 学生和不存在的用户都不是教师
    for id in [student_id, teacher_id + 1000] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/users/{id}/approve"))
            .insert_header(bearer(&admin))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, 404, "user {id}");
        assert_eq!(body["message"], "Teacher not found");
    }
}
