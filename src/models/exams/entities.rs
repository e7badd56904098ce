use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 选择题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/exam.ts")]
pub struct ExamQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    /// 正确选项下标
    pub answer: usize,
}

// 考试实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/exam.ts")]
pub struct Exam {
    pub id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub questions: Vec<ExamQuestion>,
    pub duration_minutes: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 对外展示的题目，answer 仅对出题人和管理员可见
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../clients/types/exam.ts")]
pub struct ExamQuestionView {
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<usize>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../clients/types/exam.ts")]
pub struct ExamDetail {
    pub id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub duration_minutes: Option<i32>,
    pub questions: Vec<ExamQuestionView>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 考试列表条目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../clients/types/exam.ts")]
pub struct ExamSummary {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub question_count: usize,
    pub duration_minutes: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 考试成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/exam.ts")]
pub struct ExamResult {
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub score: i32,
    pub total: i32,
    pub percentage: f64,
    pub answers: Vec<usize>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

impl Exam {
    pub fn summary(&self) -> ExamSummary {
        ExamSummary {
            id: self.id,
            course_id: self.course_id,
            title: self.title.clone(),
            question_count: self.questions.len(),
            duration_minutes: self.duration_minutes,
            created_at: self.created_at,
        }
    }

    pub fn detail(self, reveal_answers: bool) -> ExamDetail {
        ExamDetail {
            id: self.id,
            course_id: self.course_id,
            teacher_id: self.teacher_id,
            title: self.title,
            duration_minutes: self.duration_minutes,
            questions: self
                .questions
                .into_iter()
                .map(|q| ExamQuestionView {
                    prompt: q.prompt,
                    options: q.options,
                    answer: reveal_answers.then_some(q.answer),
                })
                .collect(),
            created_at: self.created_at,
        }
    }
}

/// 得分结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub score: i32,
    pub total: i32,
    pub percentage: f64,
}

/// 逐题比对提交的选项下标与标准答案。
///
/// 缺失的答案按错误计，多余的答案忽略。
pub fn score_answers(questions: &[ExamQuestion], answers: &[usize]) -> Score {
    let total = questions.len();
    let correct = questions
        .iter()
        .zip(answers.iter())
        .filter(|(question, answer)| question.answer == **answer)
        .count();

    let percentage = if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    };

    Score {
        score: correct as i32,
        total: total as i32,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: usize) -> ExamQuestion {
        ExamQuestion {
            prompt: "Which surah?".into(),
            options: vec!["Al-Fatiha".into(), "Al-Baqarah".into(), "Al-Ikhlas".into()],
            answer,
        }
    }

    #[test]
    fn test_score_all_correct() {
        let questions = vec![question(0), question(2)];
        let score = score_answers(&questions, &[0, 2]);
        assert_eq!(score.score, 2);
        assert_eq!(score.total, 2);
        assert_eq!(score.percentage, 100.0);
    }

    #[test]
    fn test_missing_answers_count_as_wrong() {
        let questions = vec![question(1), question(1), question(0), question(2)];
        let score = score_answers(&questions, &[1]);
        assert_eq!(score.score, 1);
        assert_eq!(score.total, 4);
        assert_eq!(score.percentage, 25.0);
    }

    #[test]
    fn test_extra_answers_ignored() {
        let questions = vec![question(1)];
        let score = score_answers(&questions, &[1, 0, 0]);
        assert_eq!(score.score, 1);
        assert_eq!(score.total, 1);
    }

    #[test]
    fn test_detail_hides_answers() {
        let exam = Exam {
            id: 1,
            course_id: 1,
            teacher_id: 2,
            title: "Midterm".into(),
            questions: vec![question(1)],
            duration_minutes: Some(30),
            created_at: chrono::Utc::now(),
        };

        let hidden = serde_json::to_value(exam.clone().detail(false)).unwrap();
        assert!(hidden["questions"][0].get("answer").is_none());

        let shown = serde_json::to_value(exam.detail(true)).unwrap();
        assert_eq!(shown["questions"][0]["answer"], 1);
    }
}
