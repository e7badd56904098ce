pub mod auth;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod exams;
pub mod lessons;
pub mod system;
pub mod users;
pub mod wallet;

pub use common::{ApiResponse, ErrorCode, PaginationInfo, PaginationQuery};
pub use system::entities::AppStartTime;
