//! 配置管理
//!
//! 静态配置来源于 `config.toml`、`config.{APP_ENV}.toml` 与环境变量，
//! 启动时加载一次并存放在全局 `OnceLock` 中。

mod r#impl;
mod structs;

pub use structs::*;
