//! 配置管理模块
//!
//! 提供解析器的前缀配置与构造期校验。
//!
//! MyBatis 在日志中用两种行前缀标记一条语句：`Preparing:` 后跟带 `?` 占位符的
//! SQL 模板，`Parameters:` 后跟逗号分隔的参数列表。前缀文本可配置（不同的
//! 日志框架可能带有不同的修饰），匹配时忽略大小写，前缀之前允许出现时间戳、
//! 线程名等任意内容。

use crate::error::{MybatisLogError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 解析器配置：两种日志行的前缀
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// SQL 模板行前缀（默认 "Preparing:"）
    pub preparing_prefix: String,
    /// 参数行前缀（默认 "Parameters:"）
    pub parameters_prefix: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            preparing_prefix: "Preparing:".to_string(),
            parameters_prefix: "Parameters:".to_string(),
        }
    }
}

impl ParserConfig {
    /// 创建使用默认前缀的配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 验证配置的有效性
    ///
    /// 前缀不能为空或纯空白，否则每一行都会被当作模板行。
    pub fn validate(&self) -> Result<()> {
        if self.preparing_prefix.trim().is_empty() {
            return Err(MybatisLogError::config_error("Preparing 前缀不能为空"));
        }
        if self.parameters_prefix.trim().is_empty() {
            return Err(MybatisLogError::config_error(
                "Parameters 前缀不能为空",
            ));
        }
        Ok(())
    }

    /// 编译为行匹配模式
    ///
    /// 前缀文本按字面量转义后编译为忽略大小写的正则；这是解析器唯一的
    /// 构造期失败来源。
    pub fn compile(&self) -> Result<CompiledPatterns> {
        self.validate()?;

        let preparing = Regex::new(&format!(
            r"(?i){}\s*(.+)",
            regex::escape(self.preparing_prefix.trim())
        ))?;
        let parameters = Regex::new(&format!(
            r"(?i){}\s*(.+)",
            regex::escape(self.parameters_prefix.trim())
        ))?;

        Ok(CompiledPatterns { preparing, parameters })
    }
}

/// 编译后的行匹配模式
///
/// 捕获组 1 为前缀之后的有效内容（模板文本或参数列表文本）。
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    /// 模板行模式
    pub preparing: Regex,
    /// 参数行模式
    pub parameters: Regex,
}
