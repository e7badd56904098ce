use super::enrollments::recompute_progress;
use super::{SeaOrmStorage, write_err};
use crate::entity::lessons::{ActiveModel, Column, Entity as Lessons};
use crate::entity::{enrollments, lesson_progress};
use crate::errors::{AcademyError, Result};
use crate::models::{
    enrollments::entities::Enrollment,
    lessons::{
        entities::Lesson,
        requests::{CreateLessonRequest, UpdateLessonRequest},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use std::collections::HashSet;

impl SeaOrmStorage {
    /// 按 position 排序列出课时
    pub async fn list_lessons_impl(
        &self,
        course_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<Lesson>> {
        let models = Lessons::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Position)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询课时列表失败: {e}")))?;

        let Some(student_id) = student_id else {
            return Ok(models.into_iter().map(|m| m.into_lesson(None)).collect());
        };

        let lesson_ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let completed: HashSet<i64> = if lesson_ids.is_empty() {
            HashSet::new()
        } else {
            lesson_progress::Entity::find()
                .select_only()
                .column(lesson_progress::Column::LessonId)
                .filter(lesson_progress::Column::StudentId.eq(student_id))
                .filter(lesson_progress::Column::LessonId.is_in(lesson_ids))
                .into_tuple::<i64>()
                .all(&self.db)
                .await
                .map_err(|e| AcademyError::database_operation(format!("查询学习记录失败: {e}")))?
                .into_iter()
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| {
                let done = completed.contains(&m.id);
                m.into_lesson(Some(done))
            })
            .collect())
    }

    /// 获取课程下的课时
    pub async fn get_lesson_impl(&self, course_id: i64, lesson_id: i64) -> Result<Option<Lesson>> {
        let result = Lessons::find_by_id(lesson_id)
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询课时失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson(None)))
    }

    /// 创建课时，缺省 position 为当前最大值 + 1
    pub async fn create_lesson_impl(
        &self,
        course_id: i64,
        req: CreateLessonRequest,
    ) -> Result<Lesson> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        let position = match req.position {
            Some(position) => position,
            None => {
                let max: Option<i32> = Lessons::find()
                    .select_only()
                    .column_as(Column::Position.max(), "max_position")
                    .filter(Column::CourseId.eq(course_id))
                    .into_tuple::<Option<i32>>()
                    .one(&txn)
                    .await
                    .map_err(|e| {
                        AcademyError::database_operation(format!("查询课时位置失败: {e}"))
                    })?
                    .flatten();
                max.map_or(1, |m| m + 1)
            }
        };

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            title: Set(req.title.trim().to_string()),
            content: Set(req.content),
            position: Set(position),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let lesson = model.insert(&txn).await.map_err(write_err("创建课时失败"))?;

        recompute_progress(&txn, course_id, None).await?;

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(lesson.into_lesson(None))
    }

    /// 更新课时
    pub async fn update_lesson_impl(
        &self,
        course_id: i64,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        if self.get_lesson_impl(course_id, lesson_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(lesson_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }

        if let Some(content) = update.content {
            model.content = Set(Some(content));
        }

        if let Some(position) = update.position {
            model.position = Set(position);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新课时失败: {e}")))?;

        self.get_lesson_impl(course_id, lesson_id).await
    }

    /// 删除课时并重算全部选课进度
    pub async fn delete_lesson_impl(&self, course_id: i64, lesson_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        lesson_progress::Entity::delete_many()
            .filter(lesson_progress::Column::LessonId.eq(lesson_id))
            .exec(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除学习记录失败: {e}")))?;

        let result = Lessons::delete_many()
            .filter(Column::Id.eq(lesson_id))
            .filter(Column::CourseId.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除课时失败: {e}")))?;

        if result.rows_affected == 0 {
            // 未删除任何行，事务随 drop 回滚
            return Ok(false);
        }

        recompute_progress(&txn, course_id, None).await?;

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(true)
    }

    /// 记录课时完成（幂等）并重算该学生的进度
    pub async fn complete_lesson_impl(
        &self,
        student_id: i64,
        course_id: i64,
        lesson_id: i64,
    ) -> Result<Enrollment> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        let already = lesson_progress::Entity::find()
            .filter(lesson_progress::Column::LessonId.eq(lesson_id))
            .filter(lesson_progress::Column::StudentId.eq(student_id))
            .one(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学习记录失败: {e}")))?;

        if already.is_none() {
            let record = lesson_progress::ActiveModel {
                lesson_id: Set(lesson_id),
                student_id: Set(student_id),
                completed_at: Set(chrono::Utc::now().timestamp()),
                ..Default::default()
            };
            record
                .insert(&txn)
                .await
                .map_err(write_err("记录课时完成失败"))?;
        }

        recompute_progress(&txn, course_id, Some(student_id)).await?;

        let enrollment = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::CourseId.eq(course_id))
            .one(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询选课记录失败: {e}")))?
            .ok_or_else(|| AcademyError::not_found("Enrollment not found"))?;

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(enrollment.into_enrollment())
    }
}
