use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::{LessonService, lesson_not_found};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_course;
use crate::services::{current_user, error_response};

/// 标记课时完成（幂等），返回更新后的选课进度
pub async fn complete_lesson(
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

    if let Err(response) = load_course(&storage, course_id).await {
        return Ok(response);
    }

    match storage.get_lesson(course_id, lesson_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(lesson_not_found()),
        Err(e) => return Ok(error_response(e, ErrorCode::InternalServerError)),
    }

    match storage.get_enrollment(user.id, course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::NotEnrolled,
                "You are not enrolled in this course",
            )));
        }
        Err(e) => return Ok(error_response(e, ErrorCode::InternalServerError)),
    }

    match storage.complete_lesson(user.id, course_id, lesson_id).await {
        Ok(enrollment) => {
            debug!(
                "Student {} completed lesson {}, progress {:.1}%",
                user.id, lesson_id, enrollment.progress
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(enrollment, "Lesson completed")))
        }
        Err(e) => Ok(error_response(e, ErrorCode::InternalServerError)),
    }
}
