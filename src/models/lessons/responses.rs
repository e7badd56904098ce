use super::entities::Lesson;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/lesson.ts")]
pub struct LessonListResponse {
    pub items: Vec<Lesson>,
}
