use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::exams::responses::ExamListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_course;
use crate::services::error_response;

pub async fn list_exams(
    service: &ExamService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = load_course(&storage, course_id).await {
        return Ok(response);
    }

    match storage.list_course_exams(course_id).await {
        Ok(exams) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ExamListResponse {
                items: exams.iter().map(|exam| exam.summary()).collect(),
            },
            "Exam list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e, ErrorCode::InternalServerError)),
    }
}
