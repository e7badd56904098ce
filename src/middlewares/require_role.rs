/*!
 * 角色守卫中间件
 *
 * 挂在单个路由上，读取 RequireJWT 放入请求扩展的用户，角色不在允许列表中时返回 403。
 *
 * ```rust,ignore
 * web::scope("/api/v1/courses")
 *     .wrap(RequireJWT)
 *     .route(
 *         "",
 *         web::post()
 *             .to(create_course)
 *             .wrap(RequireRole::new_any(UserRole::teacher_roles())),
 *     )
 *     .route(
 *         "/{course_id}/enroll",
 *         web::post().to(enroll).wrap(RequireRole::new(&UserRole::Student)),
 *     )
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{info, warn};

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<[UserRole]>,
}

impl RequireRole {
    /// 只允许一个角色
    pub fn new(role: &UserRole) -> Self {
        Self {
            allowed: Rc::from(vec![role.clone()]),
        }
    }

    /// 允许列表中的任一角色
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed: roles.iter().map(|r| (*r).clone()).collect(),
        }
    }

    fn describe(allowed: &[UserRole]) -> String {
        allowed
            .iter()
            .map(UserRole::to_string)
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: Rc<[UserRole]>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let allowed = self.allowed.clone();

        Box::pin(async move {
            let caller = req
                .extensions()
                .get::<User>()
                .map(|user| (user.id, user.role.clone()));

            let Some((user_id, role)) = caller else {
                // 路由没有挂 RequireJWT
                warn!("RequireRole reached without an authenticated user");
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            if allowed.contains(&role) {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let required = RequireRole::describe(&allowed);
            info!(
                "Role check rejected user {} ({}) on {}, requires {}",
                user_id,
                role,
                req.path(),
                required
            );
            Ok(req.into_response(
                create_error_response(
                    StatusCode::FORBIDDEN,
                    ErrorCode::Forbidden,
                    &format!("Access denied, requires role: {required}"),
                )
                .map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_roles() {
        let guard = RequireRole::new_any(UserRole::teacher_roles());
        assert_eq!(RequireRole::describe(&guard.allowed), "teacher or admin");

        let guard = RequireRole::new(&UserRole::Student);
        assert_eq!(RequireRole::describe(&guard.allowed), "student");
    }
}
