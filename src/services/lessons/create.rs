use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LessonService, validate_position, validate_title};
use crate::models::lessons::requests::CreateLessonRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_managed_course;
use crate::services::{current_user, error_response};

pub async fn create_lesson(
    service: &LessonService,
    course_id: i64,
    lesson_data: CreateLessonRequest,
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

    if let Err(msg) = validate_title(&lesson_data.title)
        .and_then(|_| validate_position(lesson_data.position))
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::LessonInvalid, msg)));
    }

    match storage.create_lesson(course_id, lesson_data).await {
        Ok(lesson) => Ok(HttpResponse::Created().json(ApiResponse::success(lesson, "Lesson created"))),
        Err(e) => Ok(error_response(e, ErrorCode::LessonCreationFailed)),
    }
}
