use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamService;
use crate::models::exams::requests::CreateExamRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_managed_course;
use crate::services::{current_user, error_response};

pub async fn create_exam(
    service: &ExamService,
    course_id: i64,
    exam_data: CreateExamRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let course = match load_managed_course(&storage, course_id, &user).await {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    if let Err(msg) = exam_data.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ExamInvalid, msg)));
    }

    // 考试归属课程的授课教师，管理员代建时也一样
    match storage.create_exam(course.id, course.teacher_id, exam_data).await {
        Ok(exam) => {
            info!(
                "Exam {} with {} questions created for course {}",
                exam.id,
                exam.questions.len(),
                course.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(exam.detail(true), "Exam created")))
        }
        Err(e) => Ok(error_response(e, ErrorCode::ExamCreationFailed)),
    }
}
