mod common;

use actix_web::test;
use serde_json::json;

use common::{approved_teacher, bearer, create_course, register_and_login, send, test_storage};

#[actix_web::test]
async fn test_deposit_updates_balance_and_ledger() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, token) = register_and_login(&app, "ibrahim", "student").await;

    let req = test::TestRequest::get()
        .uri("/api/v1/wallet")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["balance"], 0);

    let req = test::TestRequest::post()
        .uri("/api/v1/wallet/deposit")
        .insert_header(bearer(&token))
        .set_json(json!({ "amount": 2500 }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["balance"], 2500);
    assert_eq!(body["data"]["transaction"]["kind"], "deposit");
    assert_eq!(body["data"]["transaction"]["amount"], 2500);
    assert_eq!(body["data"]["transaction"]["balance_after"], 2500);

    let req = test::TestRequest::post()
        .uri("/api/v1/wallet/deposit")
        .insert_header(bearer(&token))
        .set_json(json!({ "amount": 500 }))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["data"]["balance"], 3000);

    let req = test::TestRequest::get()
        .uri("/api/v1/wallet/transactions")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["amount"], 500);
    assert_eq!(body["data"]["pagination"]["total"], 2);
}

#[actix_web::test]
async fn test_deposit_rejects_invalid_amounts() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, token) = register_and_login(&app, "ismail", "student").await;
    for amount in [0, -100, 10_000_001] {
        let req = test::TestRequest::post()
            .uri("/api/v1/wallet/deposit")
            .insert_header(bearer(&token))
            .set_json(json!({ "amount": amount }))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, 400, "amount {amount}");
        assert_eq!(body["code"], 6000);
    }
}

#[actix_web::test]
async fn test_paid_enrollment_debits_wallet() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, teacher) = approved_teacher(&app, "ustadh_yahya").await;
    let course_id = create_course(&app, &teacher, "Tafsir", 1500).await;
    let (_, student) = register_and_login(&app, "sumayyah", "student").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/wallet/deposit")
        .insert_header(bearer(&student))
        .set_json(json!({ "amount": 2000 }))
        .to_request();
    send(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/enroll"))
        .insert_header(bearer(&student))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 201);

    let req = test::TestRequest::get()
        .uri("/api/v1/wallet/transactions")
        .insert_header(bearer(&student))
        .to_request();
    let (_, body) = send(&app, req).await;
    let latest = &body["data"]["items"][0];
    assert_eq!(latest["kind"], "purchase");
    assert_eq!(latest["amount"], -1500);
    assert_eq!(latest["balance_after"], 500);
    assert_eq!(latest["course_id"], course_id);
}

#[actix_web::test]
async fn test_insufficient_balance_leaves_state_unchanged() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, teacher) = approved_teacher(&app, "ustadh_nuh").await;
    let course_id = create_course(&app, &teacher, "Advanced Tajweed", 5000).await;
    let (student_id, student) = register_and_login(&app, "safiyyah", "student").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/wallet/deposit")
        .insert_header(bearer(&student))
        .set_json(json!({ "amount": 1000 }))
        .to_request();
    send(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/enroll"))
        .insert_header(bearer(&student))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 402);
    assert_eq!(body["message"], "Insufficient wallet balance");

    assert_eq!(storage.get_wallet_balance(student_id).await.unwrap(), Some(1000));
    assert!(
        storage
            .get_enrollment(student_id, course_id)
            .await
            .unwrap()
            .is_none()
    );
    let ledger = storage
        .list_wallet_transactions_with_pagination(student_id, None, None)
        .await
        .unwrap();
    assert_eq!(ledger.items.len(), 1);
}

#[actix_web::test]
async fn test_enrollment_charges_current_course_price() {
    use quran_academy::errors::AcademyError;
    use quran_academy::models::courses::requests::UpdateCourseRequest;

    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, teacher) = approved_teacher(&app, "ustadh_harun").await;
    let course_id = create_course(&app, &teacher, "Seerah", 1500).await;
    let (student_id, student) = register_and_login(&app, "khadijah", "student").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/wallet/deposit")
        .insert_header(bearer(&student))
        .set_json(json!({ "amount": 2000 }))
        .to_request();
    send(&app, req).await;

    // 课程加载后价格被修改，扣款以事务内读到的价格为准
    let update = UpdateCourseRequest {
        price: Some(800),
        ..Default::default()
    };
    storage.update_course(course_id, update).await.unwrap();

    let enrollment = storage.enroll_student(student_id, course_id).await.unwrap();
    assert_eq!(enrollment.course_id, course_id);
    assert_eq!(storage.get_wallet_balance(student_id).await.unwrap(), Some(1200));

    let ledger = storage
        .list_wallet_transactions_with_pagination(student_id, None, None)
        .await
        .unwrap();
    assert_eq!(ledger.items[0].amount, -800);
    assert_eq!(ledger.items[0].balance_after, 1200);

    let missing = storage.enroll_student(student_id, course_id + 100).await;
    assert!(matches!(missing, Err(AcademyError::NotFound(_))));
}
