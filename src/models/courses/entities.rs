use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/course.ts")]
pub struct Course {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
    /// 价格，最小货币单位
    pub price: i64,
    pub schedule: Option<String>,
    /// 名额上限，None 表示不限
    pub capacity: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.teacher_id == user_id
    }

    pub fn is_free(&self) -> bool {
        self.price == 0
    }

    /// 给定当前选课人数，判断是否已满
    pub fn is_full(&self, enrolled: u64) -> bool {
        self.capacity
            .is_some_and(|capacity| enrolled >= capacity.max(0) as u64)
    }
}
