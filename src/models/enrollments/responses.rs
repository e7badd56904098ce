use super::entities::{Enrollment, MyCourse};
use crate::models::common::PaginationInfo;
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/enrollment.ts")]
pub struct MyCoursesResponse {
    pub items: Vec<MyCourse>,
}

// 花名册条目：选课记录 + 学生信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/enrollment.ts")]
pub struct RosterEntry {
    pub enrollment: Enrollment,
    pub student: User,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/enrollment.ts")]
pub struct RosterResponse {
    pub items: Vec<RosterEntry>,
    pub pagination: PaginationInfo,
}
