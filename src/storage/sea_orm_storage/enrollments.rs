use super::{SeaOrmStorage, write_err};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::{courses, lesson_progress, lessons, users};
use crate::errors::{AcademyError, Result};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize,
    enrollments::{
        entities::{Enrollment, MyCourse, compute_progress},
        responses::{RosterEntry, RosterResponse},
    },
    wallet::entities::TransactionKind,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 学生选课
    ///
    /// 重复选课、满员、余额不足都会在写入任何数据前返回错误；
    /// 付费课程的扣款、流水和选课记录在同一事务中提交，价格和容量以事务内读取的课程为准。
    pub async fn enroll_student_impl(&self, student_id: i64, course_id: i64) -> Result<Enrollment> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        let course = courses::Entity::find_by_id(course_id)
            .one(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询课程失败: {e}")))?
            .ok_or_else(|| AcademyError::not_found(format!("Course {course_id} not found")))?
            .into_course();

        let existing = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course.id))
            .one(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询选课记录失败: {e}")))?;
        if existing.is_some() {
            return Err(AcademyError::conflict("Already enrolled"));
        }

        if course.capacity.is_some() {
            let enrolled = Enrollments::find()
                .filter(Column::CourseId.eq(course.id))
                .count(&txn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("统计选课人数失败: {e}")))?;
            if course.is_full(enrolled) {
                return Err(AcademyError::capacity_reached("Course is full"));
            }
        }

        let now = chrono::Utc::now().timestamp();

        if !course.is_free() {
            let student = users::Entity::find_by_id(student_id)
                .one(&txn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("查询用户失败: {e}")))?
                .ok_or_else(|| AcademyError::not_found(format!("User {student_id} not found")))?;

            if student.wallet_balance < course.price {
                return Err(AcademyError::insufficient_balance(
                    "Insufficient wallet balance",
                ));
            }

            // 条件扣款：余额在读取后被改动则不更新任何行
            let balance_after = student.wallet_balance - course.price;
            let debit = users::Entity::update_many()
                .col_expr(users::Column::WalletBalance, Expr::value(balance_after))
                .col_expr(users::Column::UpdatedAt, Expr::value(now))
                .filter(users::Column::Id.eq(student_id))
                .filter(users::Column::WalletBalance.eq(student.wallet_balance))
                .exec(&txn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("扣款失败: {e}")))?;
            if debit.rows_affected == 0 {
                return Err(AcademyError::balance_changed(
                    "Wallet balance changed during enrollment, please retry",
                ));
            }

            super::wallet::append_ledger(
                &txn,
                student_id,
                TransactionKind::Purchase,
                -course.price,
                balance_after,
                Some(course.id),
            )
            .await?;
        }

        let model = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course.id),
            progress: Set(0.0),
            enrolled_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let enrollment = model.insert(&txn).await.map_err(write_err("创建选课记录失败"))?;

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(enrollment.into_enrollment())
    }

    /// 获取选课记录
    pub async fn get_enrollment_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 列出学生已选课程及进度
    pub async fn list_student_courses_impl(&self, student_id: i64) -> Result<Vec<MyCourse>> {
        let rows = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(courses::Entity)
            .order_by_desc(Column::EnrolledAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询已选课程失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, course)| {
                course.map(|course| MyCourse {
                    course: course.into_course(),
                    progress: enrollment.progress,
                    enrolled_at: crate::entity::to_datetime(enrollment.enrolled_at),
                })
            })
            .collect())
    }

    /// 分页列出课程花名册
    pub async fn list_course_enrollments_with_pagination_impl(
        &self,
        course_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<RosterResponse> {
        let (page, size) = normalize(page, size);

        let paginator = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .find_also_related(users::Entity)
            .order_by_asc(Column::EnrolledAt)
            .order_by_asc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询选课总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询选课页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询花名册失败: {e}")))?;

        Ok(RosterResponse {
            items: rows
                .into_iter()
                .filter_map(|(enrollment, student)| {
                    student.map(|student| RosterEntry {
                        enrollment: enrollment.into_enrollment(),
                        student: student.into_user(),
                    })
                })
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}

/// 重算课程中选课记录的进度，指定学生时只重算该学生
pub(super) async fn recompute_progress<C: ConnectionTrait>(
    conn: &C,
    course_id: i64,
    student_id: Option<i64>,
) -> Result<()> {
    let lesson_ids: Vec<i64> = lessons::Entity::find()
        .select_only()
        .column(lessons::Column::Id)
        .filter(lessons::Column::CourseId.eq(course_id))
        .into_tuple()
        .all(conn)
        .await
        .map_err(|e| AcademyError::database_operation(format!("查询课时失败: {e}")))?;
    let total = lesson_ids.len() as u64;

    let mut select = Enrollments::find().filter(Column::CourseId.eq(course_id));
    if let Some(student_id) = student_id {
        select = select.filter(Column::StudentId.eq(student_id));
    }
    let enrollments = select
        .all(conn)
        .await
        .map_err(|e| AcademyError::database_operation(format!("查询选课记录失败: {e}")))?;

    let now = chrono::Utc::now().timestamp();

    for enrollment in enrollments {
        let completed = if lesson_ids.is_empty() {
            0
        } else {
            lesson_progress::Entity::find()
                .filter(lesson_progress::Column::StudentId.eq(enrollment.student_id))
                .filter(lesson_progress::Column::LessonId.is_in(lesson_ids.clone()))
                .count(conn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("统计完成课时失败: {e}")))?
        };

        let progress = compute_progress(completed, total);

        Enrollments::update_many()
            .col_expr(Column::Progress, Expr::value(progress))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(enrollment.id))
            .exec(conn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新学习进度失败: {e}")))?;
    }

    Ok(())
}
