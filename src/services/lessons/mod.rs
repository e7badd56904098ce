pub mod complete;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::lessons::requests::{CreateLessonRequest, UpdateLessonRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct LessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl LessonService {
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

    // 课时列表
    pub async fn list_lessons(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_lessons(self, course_id, request).await
    }

    // 创建课时
    pub async fn create_lesson(
        &self,
        course_id: i64,
        lesson_data: CreateLessonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_lesson(self, course_id, lesson_data, request).await
    }

    // 更新课时
    pub async fn update_lesson(
        &self,
        course_id: i64,
        lesson_id: i64,
        update_data: UpdateLessonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_lesson(self, course_id, lesson_id, update_data, request).await
    }

    // 删除课时
    pub async fn delete_lesson(
        &self,
        course_id: i64,
        lesson_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_lesson(self, course_id, lesson_id, request).await
    }

    // 完成课时
    pub async fn complete_lesson(
        &self,
        course_id: i64,
        lesson_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        complete::complete_lesson(self, course_id, lesson_id, request).await
    }
}

pub(crate) fn lesson_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::LessonNotFound,
        "Lesson not found",
    ))
}

fn validate_title(title: &str) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        return Err("Lesson title must not be empty");
    }
    if title.chars().count() > 200 {
        return Err("Lesson title must be at most 200 characters");
    }
    Ok(())
}

fn validate_position(position: Option<i32>) -> Result<(), &'static str> {
    if position.is_some_and(|p| p < 1) {
        return Err("Lesson position must be at least 1");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_validation() {
        assert!(validate_title("Surah Al-Fatiha").is_ok());
        assert!(validate_title("  ").is_err());
        assert!(validate_title(&"a".repeat(201)).is_err());
        assert!(validate_position(None).is_ok());
        assert!(validate_position(Some(1)).is_ok());
        assert!(validate_position(Some(0)).is_err());
    }
}
