#![allow(dead_code)]

use std::sync::{Arc, Once};

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use serde_json::{Value, json};

use quran_academy::runtime::lifetime::startup::seed_admin;
use quran_academy::storage::{SeaOrmStorage, Storage};

pub const ADMIN_PASSWORD: &str = "admin-test-pass";
pub const PASSWORD: &str = "secret-pass";

static INIT: Once = Once::new();

/// 在首次读取全局配置前设置测试用环境变量
fn init_env() {
    INIT.call_once(|| {
        // SAFETY: 仅在任何测试线程读取环境变量之前执行一次
        unsafe {
            std::env::set_var("APP_ENV", "test");
            std::env::set_var("RATE_LIMIT_ENABLED", "false");
            std::env::set_var("ADMIN_PASSWORD", ADMIN_PASSWORD);
            std::env::set_var("ACADEMY_ARGON2__MEMORY_COST", "1024");
            std::env::set_var("ACADEMY_ARGON2__TIME_COST", "1");
        }
    });
}

/// 每个测试独立的内存数据库，已运行迁移并创建管理员
pub async fn test_storage() -> Arc<dyn Storage> {
    init_env();
    let storage: Arc<dyn Storage> = Arc::new(
        SeaOrmStorage::connect(":memory:", 1, 5)
            .await
            .expect("in-memory storage"),
    );
    seed_admin(&storage).await;
    storage
}

/// 用给定存储构建完整的应用
#[macro_export]
macro_rules! init_app {
    ($storage:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(
                    actix_web::web::JsonConfig::default()
                        .error_handler(quran_academy::utils::json_error_handler),
                )
                .app_data(
                    actix_web::web::QueryConfig::default()
                        .error_handler(quran_academy::utils::query_error_handler),
                )
                .app_data(actix_web::web::Data::new($storage.clone()))
                .app_data(actix_web::web::Data::new(
                    quran_academy::models::AppStartTime {
                        start_datetime: chrono::Utc::now(),
                    },
                ))
                .configure(quran_academy::routes::configure_api_routes),
        )
        .await
    };
}

/// 发送请求，返回状态码与响应体 JSON
pub async fn send<S, B>(app: &S, req: Request) -> (u16, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

pub async fn register<S, B>(app: &S, username: &str, role: &str) -> (u16, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "username": username,
            "password": PASSWORD,
            "role": role,
            "full_name": format!("{username} tester"),
        }))
        .to_request();
    send(app, req).await
}

pub async fn login<S, B>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, 200, "login failed for {username}: {body}");
    body["data"]["access_token"]
        .as_str()
        .expect("access token")
        .to_string()
}

/// 注册并登录，返回 (用户 ID, 访问令牌)
pub async fn register_and_login<S, B>(app: &S, username: &str, role: &str) -> (i64, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = register(app, username, role).await;
    assert_eq!(status, 201, "register failed for {username}: {body}");
    let id = body["data"]["id"].as_i64().expect("user id");
    let token = login(app, username, PASSWORD).await;
    (id, token)
}

pub async fn admin_token<S, B>(app: &S) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    login(app, "admin", ADMIN_PASSWORD).await
}

/// 注册教师并由管理员审核，返回 (教师 ID, 访问令牌)
pub async fn approved_teacher<S, B>(app: &S, username: &str) -> (i64, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (id, token) = register_and_login(app, username, "teacher").await;
    let admin = admin_token(app).await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/users/{id}/approve"))
        .insert_header(bearer(&admin))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, 200, "approve failed: {body}");
    (id, token)
}

/// 创建课程，返回课程 ID
pub async fn create_course<S, B>(app: &S, token: &str, title: &str, price: i64) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/courses")
        .insert_header(bearer(token))
        .set_json(json!({
            "title": title,
            "description": "Tajweed basics",
            "level": "beginner",
            "price": price,
            "schedule": "Mon/Wed 18:00",
        }))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, 201, "create course failed: {body}");
    body["data"]["id"].as_i64().expect("course id")
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {token}"),
    )
}
