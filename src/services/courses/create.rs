use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, error_response};

pub async fn create_course(
    service: &CourseService,
    course_data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if let Err(msg) = course_data.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::CourseInvalid, msg)));
    }

    // 确定授课教师：教师只能为自己开课，管理员必须指定一位教师
    let teacher_id = match user.role {
        UserRole::Teacher => {
            if !user.approved {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::TeacherNotApproved,
                    "Teacher account is awaiting admin approval",
                )));
            }
            user.id
        }
        UserRole::Admin => {
            let Some(teacher_id) = course_data.teacher_id else {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::CourseInvalid,
                    "teacher_id is required when an admin creates a course",
                )));
            };
            match storage.get_user_by_id(teacher_id).await {
                Ok(Some(teacher)) if teacher.role == UserRole::Teacher => teacher.id,
                Ok(_) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::UserNotFound,
                        "Teacher not found",
                    )));
                }
                Err(e) => return Ok(error_response(e, ErrorCode::CourseCreationFailed)),
            }
        }
        UserRole::Student => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Students cannot create courses",
            )));
        }
    };

    match storage.create_course(teacher_id, course_data).await {
        Ok(course) => {
            info!("Course {} created by user {}", course.id, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "Course created")))
        }
        Err(e) => Ok(error_response(e, ErrorCode::CourseCreationFailed)),
    }
}
