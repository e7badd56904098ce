use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::models::lessons::responses::LessonListResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_course;
use crate::services::{current_user, error_response};

pub async fn list_lessons(
    service: &LessonService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if let Err(response) = load_course(&storage, course_id).await {
        return Ok(response);
    }

    // 学生看到自己的完成状态
    let student_id = (user.role == UserRole::Student).then_some(user.id);

    match storage.list_lessons(course_id, student_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            LessonListResponse { items },
            "Lesson list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e, ErrorCode::InternalServerError)),
    }
}
