use super::{SeaOrmStorage, write_err};
use crate::entity::exam_results;
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::errors::{AcademyError, Result};
use crate::models::exams::{
    entities::{Exam, ExamResult, Score},
    requests::CreateExamRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建考试，题目整体序列化为 JSON
    pub async fn create_exam_impl(
        &self,
        course_id: i64,
        teacher_id: i64,
        req: CreateExamRequest,
    ) -> Result<Exam> {
        let questions = serde_json::to_string(&req.questions)?;

        let model = ActiveModel {
            course_id: Set(course_id),
            teacher_id: Set(teacher_id),
            title: Set(req.title.trim().to_string()),
            questions: Set(questions),
            duration_minutes: Set(req.duration_minutes),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let exam = model.insert(&self.db).await.map_err(write_err("创建考试失败"))?;

        exam.into_exam()
    }

    pub async fn get_exam_by_id_impl(&self, exam_id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(exam_id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询考试失败: {e}")))?;

        result.map(|m| m.into_exam()).transpose()
    }

    pub async fn list_course_exams_impl(&self, course_id: i64) -> Result<Vec<Exam>> {
        let models = Exams::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询考试列表失败: {e}")))?;

        models.into_iter().map(|m| m.into_exam()).collect()
    }

    /// 保存成绩，同一学生重复提交由唯一索引拒绝
    pub async fn create_exam_result_impl(
        &self,
        exam_id: i64,
        student_id: i64,
        score: Score,
        answers: Vec<usize>,
    ) -> Result<ExamResult> {
        let model = exam_results::ActiveModel {
            exam_id: Set(exam_id),
            student_id: Set(student_id),
            score: Set(score.score),
            total: Set(score.total),
            percentage: Set(score.percentage),
            answers: Set(serde_json::to_string(&answers)?),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(write_err("保存成绩失败"))?;

        Ok(result.into_exam_result())
    }

    pub async fn get_exam_result_impl(
        &self,
        exam_id: i64,
        student_id: i64,
    ) -> Result<Option<ExamResult>> {
        let result = exam_results::Entity::find()
            .filter(exam_results::Column::ExamId.eq(exam_id))
            .filter(exam_results::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_exam_result()))
    }

    pub async fn list_exam_results_impl(&self, exam_id: i64) -> Result<Vec<ExamResult>> {
        let models = exam_results::Entity::find()
            .filter(exam_results::Column::ExamId.eq(exam_id))
            .order_by_desc(exam_results::Column::Score)
            .order_by_asc(exam_results::Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_exam_result()).collect())
    }
}
