use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_course;
use crate::services::{current_user, error_response};

/// 选课
///
/// 重复选课、满员、余额不足都在存储层事务中判定，失败时不写入任何数据。
pub async fn enroll(
    service: &EnrollmentService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let course = match load_course(&storage, course_id).await {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    match storage.enroll_student(user.id, course.id).await {
        Ok(enrollment) => {
            info!("Student {} enrolled in course {}", user.id, course.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(enrollment, "Enrolled")))
        }
        Err(e) => Ok(error_response(e, ErrorCode::AlreadyEnrolled)),
    }
}
