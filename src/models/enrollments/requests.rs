use serde::Deserialize;
use ts_rs::TS;

// 花名册查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/enrollment.ts")]
pub struct RosterParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: crate::models::common::PaginationQuery,
}
