use std::sync::Arc;

use crate::models::{
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    enrollments::{
        entities::{Enrollment, MyCourse},
        responses::RosterResponse,
    },
    exams::{
        entities::{Exam, ExamResult, Score},
        requests::CreateExamRequest,
    },
    lessons::{
        entities::Lesson,
        requests::{CreateLessonRequest, UpdateLessonRequest},
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
    wallet::{entities::WalletTransaction, responses::TransactionListResponse},
};

use crate::errors::Result;

pub mod sea_orm_storage;

pub use sea_orm_storage::SeaOrmStorage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计某角色的用户数量
    async fn count_users_by_role(&self, role: &str) -> Result<u64>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程（连同课时、选课、考试）
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 选课方法
    // 学生选课（付费课程在同一事务中扣款记账）
    async fn enroll_student(&self, student_id: i64, course_id: i64) -> Result<Enrollment>;
    // 获取选课记录
    async fn get_enrollment(&self, student_id: i64, course_id: i64)
    -> Result<Option<Enrollment>>;
    // 列出学生已选课程
    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<MyCourse>>;
    // 列出课程的学生
    async fn list_course_enrollments_with_pagination(
        &self,
        course_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<RosterResponse>;

    /// 课时方法
    // 列出课时，指定学生时附带完成状态
    async fn list_lessons(&self, course_id: i64, student_id: Option<i64>) -> Result<Vec<Lesson>>;
    // 获取课时
    async fn get_lesson(&self, course_id: i64, lesson_id: i64) -> Result<Option<Lesson>>;
    // 创建课时
    async fn create_lesson(&self, course_id: i64, lesson: CreateLessonRequest) -> Result<Lesson>;
    // 更新课时
    async fn update_lesson(
        &self,
        course_id: i64,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>>;
    // 删除课时
    async fn delete_lesson(&self, course_id: i64, lesson_id: i64) -> Result<bool>;
    // 标记课时完成并重算进度
    async fn complete_lesson(
        &self,
        student_id: i64,
        course_id: i64,
        lesson_id: i64,
    ) -> Result<Enrollment>;

    /// 钱包方法
    // 获取余额
    async fn get_wallet_balance(&self, user_id: i64) -> Result<Option<i64>>;
    // 充值
    async fn deposit(&self, user_id: i64, amount: i64) -> Result<(i64, WalletTransaction)>;
    // 列出流水
    async fn list_wallet_transactions_with_pagination(
        &self,
        user_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<TransactionListResponse>;

    /// 考试方法
    // 创建考试
    async fn create_exam(
        &self,
        course_id: i64,
        teacher_id: i64,
        exam: CreateExamRequest,
    ) -> Result<Exam>;
    // 通过ID获取考试
    async fn get_exam_by_id(&self, exam_id: i64) -> Result<Option<Exam>>;
    // 列出课程考试
    async fn list_course_exams(&self, course_id: i64) -> Result<Vec<Exam>>;
    // 保存成绩
    async fn create_exam_result(
        &self,
        exam_id: i64,
        student_id: i64,
        score: Score,
        answers: Vec<usize>,
    ) -> Result<ExamResult>;
    // 获取学生成绩
    async fn get_exam_result(&self, exam_id: i64, student_id: i64) -> Result<Option<ExamResult>>;
    // 列出考试全部成绩
    async fn list_exam_results(&self, exam_id: i64) -> Result<Vec<ExamResult>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
