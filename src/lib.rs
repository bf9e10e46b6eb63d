//! # mybatis-log-parser
//!
//! MyBatis JDBC 日志解析库：从交错的 `Preparing:` / `Parameters:` 日志行中
//! 恢复 SQL 模板与类型化参数，还原占位符替换后的可执行 SQL，并给出每个
//! 替换值在结果文本中的精确区间（供界面高亮）。
//!
//! 整个库是确定性的纯文本变换：无 IO、无共享可变状态，同一输入必然得到
//! 同一输出。解析对任何输入都不抛错，格式异常按"跳过/回退/丢弃"优雅降级。
//!
//! ## 快速开始
//!
//! ```rust
//! use mybatis_log_parser::parse_mybatis_log;
//!
//! let log = "Preparing: select * from users where id = ? and status = ?\n\
//!            Parameters: 10(Integer), 'ACTIVE'(String)";
//!
//! let statements = parse_mybatis_log(log);
//! assert_eq!(statements.len(), 1);
//!
//! let stmt = &statements[0];
//! assert!(stmt.bound_sql.contains("id = 10"));
//! assert!(stmt.bound_sql.contains("status = 'ACTIVE'"));
//! for range in &stmt.substitution_ranges {
//!     assert_eq!(&stmt.bound_sql[range.start..range.end], range.rendered_text);
//! }
//! ```

// 核心模块 - 始终可用
pub mod config;
pub mod error;
pub mod parser;

// 日志模块 - 根据配置的功能启用
#[cfg(feature = "logging")]
pub mod logging;

// 重新导出核心类型和函数
pub use config::ParserConfig;
pub use error::{MybatisLogError, Result};
pub use parser::{
    Argument, MybatisLogParser, ParsedStatement, SqlValue, SubstitutionRange,
    parse_mybatis_log, rebind,
};
