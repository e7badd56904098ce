// 程序启动时间，注入 app_data 供健康检查计算运行时长
#[derive(Debug, Clone, Copy)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
