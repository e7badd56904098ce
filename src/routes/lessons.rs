use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::lessons::requests::{CreateLessonRequest, UpdateLessonRequest};
use crate::models::users::entities::UserRole;
use crate::services::LessonService;
use crate::utils::{SafeCourseId, SafeLessonId};

// 懒加载的全局 LessonService 实例
static LESSON_SERVICE: Lazy<LessonService> = Lazy::new(LessonService::new_lazy);

pub async fn list_lessons(req: HttpRequest, course_id: SafeCourseId) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.list_lessons(course_id.0, &req).await
}

pub async fn create_lesson(
    req: HttpRequest,
    course_id: SafeCourseId,
    lesson_data: web::Json<CreateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .create_lesson(course_id.0, lesson_data.into_inner(), &req)
        .await
}

pub async fn update_lesson(
    req: HttpRequest,
    course_id: SafeCourseId,
    lesson_id: SafeLessonId,
    update_data: web::Json<UpdateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .update_lesson(course_id.0, lesson_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_lesson(
    req: HttpRequest,
    course_id: SafeCourseId,
    lesson_id: SafeLessonId,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .delete_lesson(course_id.0, lesson_id.0, &req)
        .await
}

pub async fn complete_lesson(
    req: HttpRequest,
    course_id: SafeCourseId,
    lesson_id: SafeLessonId,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .complete_lesson(course_id.0, lesson_id.0, &req)
        .await
}

// 配置路由
pub fn configure_lessons_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/lessons")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_lessons))
                    .route(
                        web::post()
                            .to(create_lesson)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{lesson_id}")
                    .route(
                        web::put()
                            .to(update_lesson)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_lesson)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{lesson_id}/complete").route(
                    web::post()
                        .to(complete_lesson)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            ),
    );
}
