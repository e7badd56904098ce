use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ExamService, load_exam};
use crate::models::exams::entities::score_answers;
use crate::models::exams::requests::SubmitExamRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, error_response};

/// 提交答卷，得分由服务端根据标准答案计算
pub async fn submit_exam(
    service: &ExamService,
    exam_id: i64,
    submission: SubmitExamRequest,
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

    match storage.get_enrollment(user.id, exam.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::NotEnrolled,
                "You are not enrolled in this course",
            )));
        }
        Err(e) => return Ok(error_response(e, ErrorCode::ExamSubmitFailed)),
    }

    match storage.get_exam_result(exam_id, user.id).await {
        Ok(Some(_)) => return Ok(already_submitted()),
        Ok(None) => {}
        Err(e) => return Ok(error_response(e, ErrorCode::ExamSubmitFailed)),
    }

    let score = score_answers(&exam.questions, &submission.answers);

    match storage
        .create_exam_result(exam_id, user.id, score, submission.answers)
        .await
    {
        Ok(result) => {
            info!(
                "Student {} scored {}/{} on exam {}",
                user.id, result.score, result.total, exam_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(result, "Exam submitted")))
        }
        // 并发提交由唯一索引兜底
        Err(e) if e.is_conflict() => Ok(already_submitted()),
        Err(e) => Ok(error_response(e, ErrorCode::ExamSubmitFailed)),
    }
}

fn already_submitted() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::ExamAlreadySubmitted,
        "Exam already submitted",
    ))
}
