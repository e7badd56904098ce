use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::enrollments::requests::RosterParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_managed_course;
use crate::services::{current_user, error_response};

pub async fn roster(
    service: &EnrollmentService,
    course_id: i64,
    query: RosterParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if let Err(response) = load_managed_course(&storage, course_id, &user).await {
        return Ok(response);
    }

    match storage
        .list_course_enrollments_with_pagination(
            course_id,
            Some(query.pagination.page),
            Some(query.pagination.size),
        )
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Course roster retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e, ErrorCode::InternalServerError)),
    }
}
