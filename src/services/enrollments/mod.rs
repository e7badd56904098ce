pub mod enroll;
pub mod my_courses;
pub mod roster;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::enrollments::requests::RosterParams;
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
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

    // 学生选课
    pub async fn enroll(&self, course_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        enroll::enroll(self, course_id, request).await
    }

    // 我的课程
    pub async fn my_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        my_courses::my_courses(self, request).await
    }

    // 课程花名册
    pub async fn roster(
        &self,
        course_id: i64,
        query: RosterParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        roster::roster(self, course_id, query, request).await
    }
}
