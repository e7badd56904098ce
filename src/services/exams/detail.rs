use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, load_exam};
use crate::models::ApiResponse;
use crate::services::courses::{can_manage, load_course};
use crate::services::current_user;

/// 考试详情，仅授课教师和管理员能看到标准答案
pub async fn get_exam(
    service: &ExamService,
    exam_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let exam = match load_exam(&storage, exam_id).await {
        Ok(exam) => exam,
        Err(response) => return Ok(response),
    };

    let course = match load_course(&storage, exam.course_id).await {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    let reveal_answers = can_manage(&course, &user);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        exam.detail(reveal_answers),
        "Exam retrieved successfully",
    )))
}
