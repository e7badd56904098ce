use crate::models::courses::entities::Course;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 选课记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    /// 学习进度百分比（0-100）
    pub progress: f64,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学生视角的已选课程
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../clients/types/enrollment.ts")]
pub struct MyCourse {
    pub course: Course,
    pub progress: f64,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

/// 进度 = 已完成课时 / 总课时 × 100，无课时时为 0
pub fn compute_progress(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let completed = completed.min(total);
    (completed as f64 / total as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_progress() {
        assert_eq!(compute_progress(0, 0), 0.0);
        assert_eq!(compute_progress(1, 2), 50.0);
        assert_eq!(compute_progress(4, 4), 100.0);
        assert_eq!(compute_progress(5, 4), 100.0);
    }
}
