pub mod auth;

pub mod users;

pub mod courses;

pub mod enrollments;

pub mod lessons;

pub mod exams;

pub mod wallet;

pub mod system;

pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use enrollments::configure_enrollments_routes;
pub use exams::{configure_course_exams_routes, configure_exams_routes};
pub use lessons::configure_lessons_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
pub use wallet::configure_wallet_routes;

use actix_web::web;

/// 注册全部 API 路由
///
/// 课程下的嵌套 scope 必须先于 `/api/v1/courses` 注册，否则会被父 scope 截获。
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_lessons_routes)
        .configure(configure_course_exams_routes)
        .configure(configure_courses_routes)
        .configure(configure_enrollments_routes)
        .configure(configure_exams_routes)
        .configure(configure_wallet_routes)
        .configure(configure_system_routes);
}
