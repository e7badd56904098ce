mod common;

use actix_web::test;
use serde_json::{Value, json};

use common::{approved_teacher, bearer, create_course, register_and_login, send, test_storage};

fn quiz() -> Value {
    json!({
        "title": "Tajweed Quiz",
        "duration_minutes": 15,
        "questions": [
            { "prompt": "Letters of qalqalah?", "options": ["5", "3", "7"], "answer": 0 },
            { "prompt": "Ghunnah length?", "options": ["1 count", "2 counts"], "answer": 1 },
            { "prompt": "Idgham letters?", "options": ["yarmalun", "hamza"], "answer": 0 },
            { "prompt": "Madd tabee'i?", "options": ["2 counts", "6 counts"], "answer": 0 },
        ]
    })
}

#[actix_web::test]
async fn test_exam_scored_server_side() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, teacher) = approved_teacher(&app, "ustadh_anas").await;
    let course_id = create_course(&app, &teacher, "Tajweed", 0).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/exams"))
        .insert_header(bearer(&teacher))
        .set_json(quiz())
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 201, "{body}");
    let exam_id = body["data"]["id"].as_i64().unwrap();

    let (_, student) = register_and_login(&app, "ruqayyah", "student").await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/enroll"))
        .insert_header(bearer(&student))
        .to_request();
    send(&app, req).await;

    // 学生看不到标准答案
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/exams/{exam_id}"))
        .insert_header(bearer(&student))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert!(body["data"]["questions"][0].get("answer").is_none());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/exams/{exam_id}"))
        .insert_header(bearer(&teacher))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["data"]["questions"][1]["answer"], 1);

    // 两题正确，一题错误，一题未作答；客户端附带的字段一律忽略
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/exams/{exam_id}/submit"))
        .insert_header(bearer(&student))
        .set_json(json!({ "answers": [0, 1, 1], "score": 4, "is_correct": true }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 201, "{body}");
    assert_eq!(body["data"]["score"], 2);
    assert_eq!(body["data"]["total"], 4);
    assert_eq!(body["data"]["percentage"], 50.0);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/exams/{exam_id}/submit"))
        .insert_header(bearer(&student))
        .set_json(json!({ "answers": [0, 1, 0, 0] }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 409);
    assert_eq!(body["code"], 7003);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/exams/{exam_id}/results/me"))
        .insert_header(bearer(&student))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["score"], 2);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/exams/{exam_id}/results"))
        .insert_header(bearer(&teacher))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/courses/{course_id}/exams"))
        .insert_header(bearer(&student))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["items"][0]["question_count"], 4);
}

#[actix_web::test]
async fn test_exam_validation_and_access() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let (_, teacher) = approved_teacher(&app, "ustadh_khalid").await;
    let course_id = create_course(&app, &teacher, "Arabic Grammar", 0).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/exams"))
        .insert_header(bearer(&teacher))
        .set_json(json!({
            "title": "Broken",
            "questions": [{ "prompt": "Q", "options": ["a", "b"], "answer": 5 }]
        }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], 7001);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{course_id}/exams"))
        .insert_header(bearer(&teacher))
        .set_json(quiz())
        .to_request();
    let (_, body) = send(&app, req).await;
    let exam_id = body["data"]["id"].as_i64().unwrap();

    let (_, student) = register_and_login(&app, "not_enrolled", "student").await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/exams/{exam_id}/submit"))
        .insert_header(bearer(&student))
        .set_json(json!({ "answers": [0] }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 403);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/exams/{exam_id}/results/me"))
        .insert_header(bearer(&student))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 404);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/exams/{exam_id}/results"))
        .insert_header(bearer(&student))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 403);
}
