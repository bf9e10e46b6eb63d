//! 错误类型定义
//!
//! 这个模块定义了库中使用的所有错误类型，使用 thiserror 提供丰富的错误信息。
//!
//! 解析流水线本身不会抛出错误：格式异常的日志段被跳过、无法定位的替换区间被
//! 丢弃（见各阶段模块）。错误类型只覆盖构造期（配置校验与前缀模式编译）和
//! CLI 的 IO / 序列化边界。

/// MyBatis 日志解析器的结果类型
pub type Result<T> = std::result::Result<T, MybatisLogError>;

/// MyBatis 日志解析错误类型
#[derive(Debug, thiserror::Error)]
pub enum MybatisLogError {
    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// 正则表达式错误（前缀模式编译失败）
    #[error("正则表达式错误: {0}")]
    Regex(#[from] regex::Error),

    /// JSON 序列化错误
    #[error("JSON序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl MybatisLogError {
    /// 创建一个配置错误
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        #[cfg(feature = "logging")]
        {
            crate::logging::ensure_logger_initialized();
            tracing::error!("配置错误: {}", message);
        }
        Self::Config(message)
    }

    /// 检查是否为 IO 错误
    pub fn is_io_error(&self) -> bool {
        matches!(self, MybatisLogError::Io(_))
    }

    /// 检查是否为正则错误
    pub fn is_regex_error(&self) -> bool {
        matches!(self, MybatisLogError::Regex(_))
    }

    /// 检查是否为配置错误
    pub fn is_config_error(&self) -> bool {
        matches!(self, MybatisLogError::Config(_))
    }
}
