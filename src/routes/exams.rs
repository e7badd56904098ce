use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exams::requests::{CreateExamRequest, SubmitExamRequest};
use crate::models::users::entities::UserRole;
use crate::services::ExamService;
use crate::utils::{SafeCourseId, SafeExamId};

// 懒加载的全局 ExamService 实例
static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

pub async fn list_exams(req: HttpRequest, course_id: SafeCourseId) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(course_id.0, &req).await
}

pub async fn create_exam(
    req: HttpRequest,
    course_id: SafeCourseId,
    exam_data: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .create_exam(course_id.0, exam_data.into_inner(), &req)
        .await
}

pub async fn get_exam(req: HttpRequest, exam_id: SafeExamId) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_exam(exam_id.0, &req).await
}

pub async fn submit_exam(
    req: HttpRequest,
    exam_id: SafeExamId,
    submission: web::Json<SubmitExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .submit_exam(exam_id.0, submission.into_inner(), &req)
        .await
}

pub async fn list_results(req: HttpRequest, exam_id: SafeExamId) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_results(exam_id.0, &req).await
}

pub async fn my_result(req: HttpRequest, exam_id: SafeExamId) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.my_result(exam_id.0, &req).await
}

// 课程下的考试
pub fn configure_course_exams_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/exams")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_exams))
                    .route(
                        web::post()
                            .to(create_exam)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            ),
    );
}

// 考试详情、答题与成绩
pub fn configure_exams_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exams")
            .wrap(middlewares::RequireJWT)
            // 答案是否可见在业务层按课程归属判断
            .service(web::resource("/{exam_id}").route(web::get().to(get_exam)))
            .service(
                web::resource("/{exam_id}/submit").route(
                    web::post()
                        .to(submit_exam)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{exam_id}/results").route(
                    web::get()
                        .to(list_results)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{exam_id}/results/me").route(
                    web::get()
                        .to(my_result)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            ),
    );
}
