mod common;

use actix_web::test;
use serde_json::json;

use common::{
    approved_teacher, bearer, create_course, register_and_login, send, test_storage,
};

#[actix_web::test]
async fn test_unapproved_teacher_cannot_create_course() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, token) = register_and_login(&app, "pending_teacher", "teacher").await;
    let req = test::TestRequest::post()
        .uri("/api/v1/courses")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Tajweed 101", "price": 0 }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 403);
    assert_eq!(body["code"], 2010);
}

#[actix_web::test]
async fn test_student_cannot_create_course() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, token) = register_and_login(&app, "student_one", "student").await;
    let req = test::TestRequest::post()
        .uri("/api/v1/courses")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Tajweed 101", "price": 0 }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 403);
}

#[actix_web::test]
async fn test_course_crud_by_owner() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (teacher_id, token) = approved_teacher(&app, "ustadha_fatima").await;
    let course_id = create_course(&app, &token, "Hifz Circle", 0).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/courses/{course_id}"))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["teacher_id"], teacher_id);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/courses/{course_id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Hifz Circle (Evening)", "capacity": 10 }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "Hifz Circle (Evening)");
    assert_eq!(body["data"]["capacity"], 10);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/courses?teacher_id={teacher_id}&search=Hifz"))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["pagination"]["total"], 1);

    // 其他教师不能修改
    let (_, other) = approved_teacher(&app, "ustadh_omar").await;
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/courses/{course_id}"))
        .insert_header(bearer(&other))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 403);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/courses/{course_id}"))
        .insert_header(bearer(&token))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 200);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/courses/{course_id}"))
        .insert_header(bearer(&token))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 404);
}

#[actix_web::test]
async fn test_invalid_course_input_and_path() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, token) = approved_teacher(&app, "ustadh_zaid").await;
    let req = test::TestRequest::post()
        .uri("/api/v1/courses")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Arabic", "price": -5 }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 400);

    let req = test::TestRequest::get()
        .uri("/api/v1/courses/abc")
        .insert_header(bearer(&token))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 400);
}

#[actix_web::test]
async fn test_enroll_twice_conflicts_and_lists_course() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, teacher) = approved_teacher(&app, "ustadh_idris").await;
    let course_id = create_course(&app, &teacher, "Seerah", 0).await;
    let (student_id, student) = register_and_login(&app, "khadija", "student").await;

    let enroll = || {
        test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}/enroll"))
            .insert_header(bearer(&student))
            .to_request()
    };

    let (status, body) = send(&app, enroll()).await;
    assert_eq!(status, 201);
    assert_eq!(body["data"]["student_id"], student_id);
    assert_eq!(body["data"]["progress"], 0.0);

    let (status, body) = send(&app, enroll()).await;
    assert_eq!(status, 409);
    assert_eq!(body["message"], "Already enrolled");

    let req = test::TestRequest::get()
        .uri("/api/v1/enrollments/me")
        .insert_header(bearer(&student))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["course"]["id"], course_id);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/courses/{course_id}/students"))
        .insert_header(bearer(&teacher))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["items"][0]["student"]["username"], "khadija");
}

#[actix_web::test]
async fn test_enroll_missing_course_and_full_course() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, student) = register_and_login(&app, "umar", "student").await;
    let req = test::TestRequest::post()
        .uri("/api/v1/courses/999/enroll")
        .insert_header(bearer(&student))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 404);

    let (_, teacher) = approved_teacher(&app, "ustadh_salman").await;
    let req = test::TestRequest::post()
        .uri("/api/v1/courses")
        .insert_header(bearer(&teacher))
        .set_json(json!({ "title": "Private Recitation", "price": 0, "capacity": 1 }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 201);
    let course_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/enroll"))
        .insert_header(bearer(&student))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 201);

    let (_, late) = register_and_login(&app, "late_student", "student").await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/enroll"))
        .insert_header(bearer(&late))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 409);
    assert_eq!(body["code"], 4003);
}

#[actix_web::test]
async fn test_lesson_completion_updates_progress() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, teacher) = approved_teacher(&app, "ustadh_hasan").await;
    let course_id = create_course(&app, &teacher, "Juz Amma", 0).await;

    let mut lesson_ids = Vec::new();
    for title in ["An-Naba", "An-Naziat"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}/lessons"))
            .insert_header(bearer(&teacher))
            .set_json(json!({ "title": title, "content": "Read and memorize" }))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, 201, "{body}");
        lesson_ids.push(body["data"]["id"].as_i64().unwrap());
    }

    let (_, student) = register_and_login(&app, "zainab", "student").await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/enroll"))
        .insert_header(bearer(&student))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 201);

    let complete = |lesson_id: i64| {
        test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}/lessons/{lesson_id}/complete"))
            .insert_header(bearer(&student))
            .to_request()
    };

    let (status, body) = send(&app, complete(lesson_ids[0])).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["progress"], 50.0);

    // 重复完成不改变进度
    let (status, body) = send(&app, complete(lesson_ids[0])).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["progress"], 50.0);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/courses/{course_id}/lessons"))
        .insert_header(bearer(&student))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items[0]["position"], 1);
    assert_eq!(items[0]["completed"], true);
    assert_eq!(items[1]["position"], 2);
    assert_eq!(items[1]["completed"], false);

    let req = test::TestRequest::get()
        .uri("/api/v1/enrollments/me")
        .insert_header(bearer(&student))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["data"]["items"][0]["progress"], 50.0);

    // 删除未完成的课时后，进度按剩余课时重算
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/courses/{course_id}/lessons/{}", lesson_ids[1]))
        .insert_header(bearer(&teacher))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 200);

    let req = test::TestRequest::get()
        .uri("/api/v1/enrollments/me")
        .insert_header(bearer(&student))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["data"]["items"][0]["progress"], 100.0);
}

#[actix_web::test]
async fn test_complete_lesson_requires_enrollment() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, teacher) = approved_teacher(&app, "ustadh_musa").await;
    let course_id = create_course(&app, &teacher, "Fiqh", 0).await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/lessons"))
        .insert_header(bearer(&teacher))
        .set_json(json!({ "title": "Wudu" }))
        .to_request();
    let (_, body) = send(&app, req).await;
    let lesson_id = body["data"]["id"].as_i64().unwrap();

    let (_, outsider) = register_and_login(&app, "outsider", "student").await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/lessons/{lesson_id}/complete"))
        .insert_header(bearer(&outsider))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 403);
    assert_eq!(body["code"], 4002);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/lessons/9999/complete"))
        .insert_header(bearer(&outsider))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 404);
}

#[actix_web::test]
async fn test_delete_course_cascades_but_keeps_ledger() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, teacher) = approved_teacher(&app, "ustadh_idris").await;
    let course_id = create_course(&app, &teacher, "Hifz Juz Amma", 500).await;
    let (student_id, student) = register_and_login(&app, "zaynab", "student").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/wallet/deposit")
        .insert_header(bearer(&student))
        .set_json(json!({ "amount": 1000 }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 200);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/enroll"))
        .insert_header(bearer(&student))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 201);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/lessons"))
        .insert_header(bearer(&teacher))
        .set_json(json!({ "title": "Surah An-Naba", "content": "Verses 1-16" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 201, "{body}");
    let lesson_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/v1/courses/{course_id}/lessons/{lesson_id}/complete"
        ))
        .insert_header(bearer(&student))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["data"]["progress"], 100.0);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/exams"))
        .insert_header(bearer(&teacher))
        .set_json(json!({
            "title": "Juz Amma Check",
            "questions": [{ "prompt": "Surahs in Juz Amma?", "options": ["37", "30"], "answer": 0 }]
        }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 201, "{body}");
    let exam_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/exams/{exam_id}/submit"))
        .insert_header(bearer(&student))
        .set_json(json!({ "answers": [0] }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 201);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/exams/{exam_id}/results"))
        .insert_header(bearer(&teacher))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["items"][0]["student_id"], student_id);
    assert_eq!(body["data"]["items"][0]["score"], 1);

    // 其他教师看不到成绩
    let (_, other) = approved_teacher(&app, "ustadh_ilyas").await;
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/exams/{exam_id}/results"))
        .insert_header(bearer(&other))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 403);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/courses/{course_id}"))
        .insert_header(bearer(&teacher))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200, "{body}");

    // 课程下的课时、选课、考试和成绩全部删除
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/exams/{exam_id}"))
        .insert_header(bearer(&teacher))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 404);

    let req = test::TestRequest::get()
        .uri("/api/v1/enrollments/me")
        .insert_header(bearer(&student))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert!(body["data"]["items"].as_array().unwrap().is_empty());

    assert!(storage.get_enrollment(student_id, course_id).await.unwrap().is_none());
    assert!(storage.list_lessons(course_id, Some(student_id)).await.unwrap().is_empty());
    assert!(storage.get_exam_by_id(exam_id).await.unwrap().is_none());
    assert!(storage.list_exam_results(exam_id).await.unwrap().is_empty());

    // 钱包流水与余额保留
    assert_eq!(storage.get_wallet_balance(student_id).await.unwrap(), Some(500));
    let req = test::TestRequest::get()
        .uri("/api/v1/wallet/transactions")
        .insert_header(bearer(&student))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["kind"], "purchase");
    assert_eq!(items[0]["amount"], -500);
    assert_eq!(items[0]["course_id"], course_id);
}
