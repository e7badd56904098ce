use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, load_exam};
use crate::models::exams::responses::ExamResultListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_managed_course;
use crate::services::{current_user, error_response};

pub async fn list_results(
    service: &ExamService,
    exam_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let exam = match load_exam(&storage, exam_id).await {
        Ok(exam) => exam,
        Err(response) => return Ok(response),
    };

    if let Err(response) = load_managed_course(&storage, exam.course_id, &user).await {
        return Ok(response);
    }

    match storage.list_exam_results(exam_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ExamResultListResponse { items },
            "Exam results retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e, ErrorCode::InternalServerError)),
    }
}

pub async fn my_result(
    service: &ExamService,
    exam_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if let Err(response) = load_exam(&storage, exam_id).await {
        return Ok(response);
    }

    match storage.get_exam_result(exam_id, user.id).await {
        Ok(Some(result)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Exam result retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamResultNotFound,
            "Exam not submitted yet",
        ))),
        Err(e) => Ok(error_response(e, ErrorCode::InternalServerError)),
    }
}
