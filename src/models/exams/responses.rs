use super::entities::{ExamResult, ExamSummary};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/exam.ts")]
pub struct ExamListResponse {
    pub items: Vec<ExamSummary>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/exam.ts")]
pub struct ExamResultListResponse {
    pub items: Vec<ExamResult>,
}
