use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课时
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/lesson.ts")]
pub struct Lesson {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub content: Option<String>,
    pub position: i32,
    /// 仅对学生返回
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
