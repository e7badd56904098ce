use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::enrollments::responses::MyCoursesResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, error_response};

pub async fn my_courses(
    service: &EnrollmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    match storage.list_student_courses(user.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MyCoursesResponse { items },
            "Enrolled courses retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e, ErrorCode::InternalServerError)),
    }
}
