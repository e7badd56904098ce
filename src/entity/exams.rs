//! 考试实体
//!
//! 题目以 JSON 文本整体存储在 `questions` 列中。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub questions: String,
    pub duration_minutes: Option<i32>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::exam_results::Entity")]
    ExamResults,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::exam_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam(self) -> crate::errors::Result<crate::models::exams::entities::Exam> {
        use crate::models::exams::entities::{Exam, ExamQuestion};

        let questions: Vec<ExamQuestion> = serde_json::from_str(&self.questions)?;

        Ok(Exam {
            id: self.id,
            course_id: self.course_id,
            teacher_id: self.teacher_id,
            title: self.title,
            questions,
            duration_minutes: self.duration_minutes,
            created_at: super::to_datetime(self.created_at),
        })
    }
}
