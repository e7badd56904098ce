use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/lesson.ts")]
pub struct CreateLessonRequest {
    pub title: String,
    pub content: Option<String>,
    /// 缺省时排在最后
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/lesson.ts")]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub position: Option<i32>,
}
