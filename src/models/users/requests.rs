use super::entities::{UserProfile, UserRole};
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_lenient;
use serde::Deserialize;
use ts_rs::TS;

// 用户查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/user.ts")]
pub struct UserListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    #[serde(default, deserialize_with = "deserialize_optional_lenient")]
    pub approved: Option<bool>,
    pub search: Option<String>,
}

// 用户创建请求（存储层，password 已是哈希值）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub role: UserRole,
    pub approved: bool,
    pub profile: UserProfile,
}

// 用户更新请求（存储层）
#[derive(Debug, Default)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub approved: Option<bool>,
    pub full_name: Option<String>,
    pub level: Option<String>,
    pub specialty: Option<String>,
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub approved: Option<bool>,
    pub search: Option<String>,
}
