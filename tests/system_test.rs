mod common;

use actix_web::test;

use common::{send, test_storage};

#[actix_web::test]
async fn test_health_is_public() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let req = test::TestRequest::get()
        .uri("/api/v1/system/health")
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["data"]["uptime_seconds"].as_i64().unwrap() >= 0);
}

#[actix_web::test]
async fn test_protected_route_rejects_bad_token() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let req = test::TestRequest::get()
        .uri("/api/v1/wallet")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 401);
    assert_eq!(body["code"], 1001);
}
