//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod enrollments;
mod exams;
mod lessons;
mod users;
mod wallet;

use crate::config::AppConfig;
use crate::errors::{AcademyError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接指定 URL 并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AcademyError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AcademyError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory");
        }

        // 内存库每个连接都是独立的数据库，必须固定为单连接且不回收
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(pool_size.max(1))
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(timeout))
            .connect_with(opt)
            .await
            .map_err(|e| AcademyError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AcademyError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AcademyError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 写操作的错误映射：唯一约束冲突保留为 Conflict，其余归为数据库操作错误
pub(crate) fn write_err(context: &'static str) -> impl Fn(DbErr) -> AcademyError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            AcademyError::conflict(format!("{context}: {msg}"))
        }
        _ => AcademyError::database_operation(format!("{context}: {e}")),
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users_by_role(&self, role: &str) -> Result<u64> {
        self.count_users_by_role_impl(role).await
    }

    // 课程模块
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(teacher_id, course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    // 选课模块
    async fn enroll_student(&self, student_id: i64, course_id: i64) -> Result<Enrollment> {
        self.enroll_student_impl(student_id, course_id).await
    }

    async fn get_enrollment(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(student_id, course_id).await
    }

    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<MyCourse>> {
        self.list_student_courses_impl(student_id).await
    }

    async fn list_course_enrollments_with_pagination(
        &self,
        course_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<RosterResponse> {
        self.list_course_enrollments_with_pagination_impl(course_id, page, size)
            .await
    }

    // 课时模块
    async fn list_lessons(&self, course_id: i64, student_id: Option<i64>) -> Result<Vec<Lesson>> {
        self.list_lessons_impl(course_id, student_id).await
    }

    async fn get_lesson(&self, course_id: i64, lesson_id: i64) -> Result<Option<Lesson>> {
        self.get_lesson_impl(course_id, lesson_id).await
    }

    async fn create_lesson(&self, course_id: i64, lesson: CreateLessonRequest) -> Result<Lesson> {
        self.create_lesson_impl(course_id, lesson).await
    }

    async fn update_lesson(
        &self,
        course_id: i64,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        self.update_lesson_impl(course_id, lesson_id, update).await
    }

    async fn delete_lesson(&self, course_id: i64, lesson_id: i64) -> Result<bool> {
        self.delete_lesson_impl(course_id, lesson_id).await
    }

    async fn complete_lesson(
        &self,
        student_id: i64,
        course_id: i64,
        lesson_id: i64,
    ) -> Result<Enrollment> {
        self.complete_lesson_impl(student_id, course_id, lesson_id)
            .await
    }

    // 钱包模块
    async fn get_wallet_balance(&self, user_id: i64) -> Result<Option<i64>> {
        self.get_wallet_balance_impl(user_id).await
    }

    async fn deposit(&self, user_id: i64, amount: i64) -> Result<(i64, WalletTransaction)> {
        self.deposit_impl(user_id, amount).await
    }

    async fn list_wallet_transactions_with_pagination(
        &self,
        user_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<TransactionListResponse> {
        self.list_wallet_transactions_with_pagination_impl(user_id, page, size)
            .await
    }

    // 考试模块
    async fn create_exam(
        &self,
        course_id: i64,
        teacher_id: i64,
        exam: CreateExamRequest,
    ) -> Result<Exam> {
        self.create_exam_impl(course_id, teacher_id, exam).await
    }

    async fn get_exam_by_id(&self, exam_id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(exam_id).await
    }

    async fn list_course_exams(&self, course_id: i64) -> Result<Vec<Exam>> {
        self.list_course_exams_impl(course_id).await
    }

    async fn create_exam_result(
        &self,
        exam_id: i64,
        student_id: i64,
        score: Score,
        answers: Vec<usize>,
    ) -> Result<ExamResult> {
        self.create_exam_result_impl(exam_id, student_id, score, answers)
            .await
    }

    async fn get_exam_result(&self, exam_id: i64, student_id: i64) -> Result<Option<ExamResult>> {
        self.get_exam_result_impl(exam_id, student_id).await
    }

    async fn list_exam_results(&self, exam_id: i64) -> Result<Vec<ExamResult>> {
        self.list_exam_results_impl(exam_id).await
    }
}
