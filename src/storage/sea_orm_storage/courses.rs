use super::{SeaOrmStorage, write_err};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::{enrollments, exam_results, exams, lesson_progress, lessons};
use crate::errors::{AcademyError, Result};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize,
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(
        &self,
        teacher_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            level: Set(req.level),
            price: Set(req.price),
            schedule: Set(req.schedule),
            capacity: Set(req.capacity),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(write_err("创建课程失败"))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let (page, size) = normalize(query.page, query.size);

        let mut select = Courses::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.like(pattern.clone()))
                    .add(Column::Description.like(pattern)),
            );
        }

        if let Some(ref level) = query.level {
            select = select.filter(Column::Level.eq(level.as_str()));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询课程页数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新课程
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let existing = self.get_course_by_id_impl(course_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(course_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(level) = update.level {
            model.level = Set(Some(level));
        }

        if let Some(price) = update.price {
            model.price = Set(price);
        }

        if let Some(schedule) = update.schedule {
            model.schedule = Set(Some(schedule));
        }

        if let Some(capacity) = update.capacity {
            model.capacity = Set(Some(capacity));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新课程失败: {e}")))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程，连同课时、学习记录、选课、考试和成绩
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        let lesson_ids: Vec<i64> = lessons::Entity::find()
            .select_only()
            .column(lessons::Column::Id)
            .filter(lessons::Column::CourseId.eq(course_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询课时失败: {e}")))?;

        let exam_ids: Vec<i64> = exams::Entity::find()
            .select_only()
            .column(exams::Column::Id)
            .filter(exams::Column::CourseId.eq(course_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询考试失败: {e}")))?;

        if !lesson_ids.is_empty() {
            lesson_progress::Entity::delete_many()
                .filter(lesson_progress::Column::LessonId.is_in(lesson_ids))
                .exec(&txn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("删除学习记录失败: {e}")))?;
        }

        if !exam_ids.is_empty() {
            exam_results::Entity::delete_many()
                .filter(exam_results::Column::ExamId.is_in(exam_ids))
                .exec(&txn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("删除考试成绩失败: {e}")))?;
        }

        lessons::Entity::delete_many()
            .filter(lessons::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除课时失败: {e}")))?;

        exams::Entity::delete_many()
            .filter(exams::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除考试失败: {e}")))?;

        enrollments::Entity::delete_many()
            .filter(enrollments::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除选课记录失败: {e}")))?;

        let result = Courses::delete_by_id(course_id)
            .exec(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除课程失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
