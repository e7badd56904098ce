use serde::Serialize;

/// 业务错误码
///
/// 0 表示成功；1xxx 通用错误；2xxx 认证与用户；3xxx 课程；
/// 4xxx 选课；5xxx 课时；6xxx 钱包；7xxx 考试。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserNameInvalid = 2002,
    UserEmailInvalid = 2003,
    UserPasswordInvalid = 2004,
    UserNameAlreadyExists = 2005,
    UserEmailAlreadyExists = 2006,
    UserNotFound = 2007,
    UserUpdateFailed = 2008,
    UserRoleInvalid = 2009,
    TeacherNotApproved = 2010,

    CourseNotFound = 3000,
    CourseCreationFailed = 3001,
    CourseUpdateFailed = 3002,
    CourseDeleteFailed = 3003,
    CoursePermissionDenied = 3004,
    CourseInvalid = 3005,

    EnrollFailed = 4000,
    AlreadyEnrolled = 4001,
    NotEnrolled = 4002,
    CourseFull = 4003,

    LessonNotFound = 5000,
    LessonCreationFailed = 5001,
    LessonUpdateFailed = 5002,
    LessonDeleteFailed = 5003,
    LessonInvalid = 5004,

    WalletAmountInvalid = 6000,
    InsufficientBalance = 6001,
    DepositFailed = 6002,
    WalletBusy = 6003,

    ExamNotFound = 7000,
    ExamInvalid = 7001,
    ExamCreationFailed = 7002,
    ExamAlreadySubmitted = 7003,
    ExamSubmitFailed = 7004,
    ExamResultNotFound = 7005,
}
