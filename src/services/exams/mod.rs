pub mod create;
pub mod detail;
pub mod list;
pub mod results;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exams::entities::Exam;
use crate::models::exams::requests::{CreateExamRequest, SubmitExamRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建考试
    pub async fn create_exam(
        &self,
        course_id: i64,
        exam_data: CreateExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, course_id, exam_data, request).await
    }

    // 课程考试列表
    pub async fn list_exams(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_exams(self, course_id, request).await
    }

    // 考试详情
    pub async fn get_exam(&self, exam_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        detail::get_exam(self, exam_id, request).await
    }

    // 提交答卷
    pub async fn submit_exam(
        &self,
        exam_id: i64,
        submission: SubmitExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_exam(self, exam_id, submission, request).await
    }

    // 考试全部成绩
    pub async fn list_results(
        &self,
        exam_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        results::list_results(self, exam_id, request).await
    }

    // 我的成绩
    pub async fn my_result(&self, exam_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        results::my_result(self, exam_id, request).await
    }
}

async fn load_exam(storage: &Arc<dyn Storage>, exam_id: i64) -> Result<Exam, HttpResponse> {
    match storage.get_exam_by_id(exam_id).await {
        Ok(Some(exam)) => Ok(exam),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamNotFound,
            "Exam not found",
        ))),
        Err(e) => Err(error_response(e, ErrorCode::InternalServerError)),
    }
}
