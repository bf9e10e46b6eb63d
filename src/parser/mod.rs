//! MyBatis 日志解析流水线
//!
//! 五个纯函数阶段按固定顺序组成流水线：
//!
//! ```text
//! 原始日志文本 → 切分器 → 参数解析器 → 绑定器 → 格式化器 → 区间重映射器
//!                  ↓           ↓           ↓          ↓            ↓
//!             (模板,参数)对   类型化参数   绑定文本+区间  排版后文本   对齐后区间
//! ```
//!
//! 每个阶段只依赖自己的输入，无共享可变状态、无 IO：同一输入必然得到
//! 同一输出，多个调用点并发调用互不干扰。
//!
//! ## 使用示例
//!
//! ```rust
//! use mybatis_log_parser::parse_mybatis_log;
//!
//! let log = "Preparing: select * from users where id = ?\n\
//!            Parameters: 10(Integer)";
//! let statements = parse_mybatis_log(log);
//!
//! assert_eq!(statements.len(), 1);
//! assert!(statements[0].bound_sql.contains("id = 10"));
//! ```

pub mod argument;
pub mod binder;
pub mod formatter;
pub mod remapper;
pub mod segmenter;
pub mod types;

pub use types::{
    Argument, LogStatement, ParsedStatement, SqlValue, SubstitutionRange,
};

use crate::config::{CompiledPatterns, ParserConfig};
use crate::error::Result;
use lazy_static::lazy_static;

/// MyBatis 日志解析器
///
/// 持有按配置编译好的行匹配模式；构造是唯一可能失败的操作，解析本身
/// 对任何输入都不报错（见 [`Self::parse`]）。
#[derive(Debug, Clone)]
pub struct MybatisLogParser {
    patterns: CompiledPatterns,
}

impl MybatisLogParser {
    /// 按配置创建解析器
    ///
    /// 配置校验或前缀模式编译失败时返回错误。
    pub fn new(config: ParserConfig) -> Result<Self> {
        Ok(Self { patterns: config.compile()? })
    }

    /// 解析整段日志文本
    ///
    /// 返回按出现顺序排列的解析结果；空输入或没有任何前缀命中的输入
    /// 返回空列表。格式异常的语句被跳过，不产生错误。
    pub fn parse(&self, log_text: &str) -> Vec<ParsedStatement> {
        #[cfg(feature = "logging")]
        crate::logging::ensure_logger_initialized();

        segmenter::segment(log_text, &self.patterns)
            .iter()
            .map(parse_statement)
            .collect()
    }
}

lazy_static! {
    /// 默认前缀的解析器（默认配置必然可编译）
    static ref DEFAULT_PARSER: MybatisLogParser =
        MybatisLogParser::new(ParserConfig::default()).unwrap();
}

/// 使用默认前缀（`Preparing:` / `Parameters:`）解析日志文本
pub fn parse_mybatis_log(log_text: &str) -> Vec<ParsedStatement> {
    DEFAULT_PARSER.parse(log_text)
}

/// 重新绑定：参数值被编辑后重建可执行 SQL
///
/// 接受（可能已格式化的）模板文本与更新后的参数序列，重跑绑定、格式化
/// 与重映射三个阶段，产出一条**新的** [`ParsedStatement`]；不触碰切分器，
/// 也不重新解析原始日志。未被编辑的参数、序号与无关区间保持一致。
pub fn rebind(template_sql: &str, arguments: Vec<Argument>) -> ParsedStatement {
    let cleaned = formatter::normalize_whitespace(template_sql);
    assemble(&cleaned, arguments)
}

/// 解析单条（模板，参数）配对
fn parse_statement(statement: &LogStatement) -> ParsedStatement {
    let cleaned = formatter::normalize_whitespace(&statement.template);
    let arguments =
        argument::parse_arguments(&statement.raw_arguments, &cleaned);
    assemble(&cleaned, arguments)
}

/// 流水线后半段：绑定 → 格式化 → 重映射
fn assemble(
    cleaned_template: &str,
    arguments: Vec<Argument>,
) -> ParsedStatement {
    let (executable, ranges) = binder::bind(cleaned_template, &arguments);
    let bound_sql = formatter::format_sql(&executable);
    let substitution_ranges = remapper::remap_ranges(&bound_sql, &ranges);

    #[cfg(feature = "logging")]
    tracing::debug!(
        arguments = arguments.len(),
        ranges = substitution_ranges.len(),
        "语句装配完成"
    );

    ParsedStatement {
        template_sql: formatter::format_sql(cleaned_template),
        bound_sql,
        arguments,
        substitution_ranges,
    }
}
