use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LessonService, lesson_not_found};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_managed_course;
use crate::services::{current_user, error_response};

pub async fn delete_lesson(
    service: &LessonService,
    course_id: i64,
    lesson_id: i64,
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

    match storage.delete_lesson(course_id, lesson_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Lesson deleted"))),
        Ok(false) => Ok(lesson_not_found()),
        Err(e) => Ok(error_response(e, ErrorCode::LessonDeleteFailed)),
    }
}
