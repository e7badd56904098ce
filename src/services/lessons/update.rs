use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LessonService, lesson_not_found, validate_position, validate_title};
use crate::models::lessons::requests::UpdateLessonRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_managed_course;
use crate::services::{current_user, error_response};

pub async fn update_lesson(
    service: &LessonService,
    course_id: i64,
    lesson_id: i64,
    update_data: UpdateLessonRequest,
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

    let validation = match update_data.title.as_deref() {
        Some(title) => validate_title(title),
        None => Ok(()),
    }
    .and_then(|_| validate_position(update_data.position));
    if let Err(msg) = validation {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::LessonInvalid, msg)));
    }

    match storage.update_lesson(course_id, lesson_id, update_data).await {
        Ok(Some(lesson)) => Ok(HttpResponse::Ok().json(ApiResponse::success(lesson, "Lesson updated"))),
        Ok(None) => Ok(lesson_not_found()),
        Err(e) => Ok(error_response(e, ErrorCode::LessonUpdateFailed)),
    }
}
