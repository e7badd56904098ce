use super::entities::ExamQuestion;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/exam.ts")]
pub struct CreateExamRequest {
    pub title: String,
    pub duration_minutes: Option<i32>,
    pub questions: Vec<ExamQuestion>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/exam.ts")]
pub struct SubmitExamRequest {
    #[serde(default)]
    pub answers: Vec<usize>,
}

impl CreateExamRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Exam title must not be empty".to_string());
        }
        if self.questions.is_empty() {
            return Err("Exam must contain at least one question".to_string());
        }
        if self.duration_minutes.is_some_and(|d| d < 1) {
            return Err("Exam duration must be at least 1 minute".to_string());
        }
        for (index, question) in self.questions.iter().enumerate() {
            let number = index + 1;
            if question.prompt.trim().is_empty() {
                return Err(format!("Question {number} has an empty prompt"));
            }
            if question.options.len() < 2 {
                return Err(format!("Question {number} must have at least 2 options"));
            }
            if question.answer >= question.options.len() {
                return Err(format!("Question {number} answer is not a valid option index"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateExamRequest {
        CreateExamRequest {
            title: "Final".into(),
            duration_minutes: Some(20),
            questions: vec![ExamQuestion {
                prompt: "How many ayat in Al-Fatiha?".into(),
                options: vec!["5".into(), "7".into()],
                answer: 1,
            }],
        }
    }

    #[test]
    fn test_valid_exam() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_exams() {
        let mut no_questions = valid();
        no_questions.questions.clear();
        assert!(no_questions.validate().is_err());

        let mut one_option = valid();
        one_option.questions[0].options.truncate(1);
        one_option.questions[0].answer = 0;
        assert!(one_option.validate().is_err());

        let mut bad_answer = valid();
        bad_answer.questions[0].answer = 2;
        let err = bad_answer.validate().unwrap_err();
        assert!(err.contains("Question 1"));
    }
}
