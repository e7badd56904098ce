use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_lenient;
use serde::Deserialize;
use ts_rs::TS;

// 课程创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/course.ts")]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
    #[serde(default)]
    pub price: i64,
    pub schedule: Option<String>,
    pub capacity: Option<i32>,
    /// 仅管理员可指定授课教师
    pub teacher_id: Option<i64>,
}

// 课程更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/course.ts")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub price: Option<i64>,
    pub schedule: Option<String>,
    pub capacity: Option<i32>,
}

// 课程列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/course.ts")]
pub struct CourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub level: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_lenient")]
    pub teacher_id: Option<i64>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub level: Option<String>,
    pub teacher_id: Option<i64>,
}

impl CreateCourseRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Course title must not be empty");
        }
        validate_price_and_capacity(Some(self.price), self.capacity)
    }
}

impl UpdateCourseRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err("Course title must not be empty");
        }
        validate_price_and_capacity(self.price, self.capacity)
    }
}

fn validate_price_and_capacity(price: Option<i64>, capacity: Option<i32>) -> Result<(), &'static str> {
    if price.is_some_and(|p| p < 0) {
        return Err("Course price must not be negative");
    }
    if capacity.is_some_and(|c| c < 1) {
        return Err("Course capacity must be at least 1");
    }
    Ok(())
}
