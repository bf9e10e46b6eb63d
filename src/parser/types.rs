//! 解析结果的类型定义
//!
//! 流水线各阶段之间以及返回给调用方的数据结构都集中在这里。
//! 所有公开类型都是纯数据：`ParsedStatement` 构造后不可变，调用方修改某个
//! 参数值时通过 [`crate::parser::rebind`] 重新生成一条新记录。

use serde::{Deserialize, Serialize};

/// 类型化的参数值
///
/// 参数行中的每个字面量按声明类型（或推断类型）转换为对应的值；
/// 数值解析失败时回退为 `Text`，保留原始文本，绝不报错。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    /// 整数（Integer/Int 类型）
    Integer(i64),
    /// 长整数（Long 类型）
    Long(i128),
    /// 小数（BigDecimal/Decimal/Double/Float 类型）
    Decimal(f64),
    /// 布尔值
    Boolean(bool),
    /// 文本（String/Char/Date/Timestamp 及其它未知类型）
    Text(String),
}

impl SqlValue {
    /// 是否为 NULL
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// 值的朴素文本形式（不带引号，NULL 为 "null"）
    pub fn plain_text(&self) -> String {
        match self {
            SqlValue::Null => "null".to_string(),
            SqlValue::Integer(v) => v.to_string(),
            SqlValue::Long(v) => v.to_string(),
            SqlValue::Decimal(v) => v.to_string(),
            SqlValue::Boolean(v) => v.to_string(),
            SqlValue::Text(v) => v.clone(),
        }
    }
}

/// 一个解析出的参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// 序号（1 起始，与参数行中的出现位置一致）
    ///
    /// 序号是参数与第 N 个 `?` 占位符对齐的依据，值被调用方编辑后也不变。
    pub ordinal: usize,
    /// 占位符上下文片段（如 `user_id = ?`），用于界面展示
    pub context_snippet: String,
    /// 类型化的值
    pub value: SqlValue,
    /// 声明（或推断）的类型标签，如 "Integer"、"String"
    pub declared_type: String,
    /// 日志中的原始字面量文本
    pub raw_text: String,
}

impl Argument {
    /// 参数值的展示形式：NULL 为 `null`，文本加单引号，数值/布尔原样
    pub fn display_value(&self) -> String {
        match &self.value {
            SqlValue::Null => "null".to_string(),
            SqlValue::Text(v) => format!("'{v}'"),
            other => other.plain_text(),
        }
    }
}

/// 一次占位符替换在 SQL 文本中占据的区间
///
/// `start`/`end` 为字节偏移（`end` 不含），相对某一个确定的 SQL 字符串：
/// 绑定阶段相对未格式化文本，重映射之后相对格式化文本，两套区间绝不混用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRange {
    /// 起始偏移
    pub start: usize,
    /// 结束偏移（不含）
    pub end: usize,
    /// 替换写入的字面量文本
    pub rendered_text: String,
}

/// 切分阶段恢复出的一对（模板文本，原始参数文本）
///
/// 流水线内部的中间产物，在切分器与参数解析器之间传递后即被消费。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStatement {
    /// SQL 模板文本（含 `?` 占位符）
    pub template: String,
    /// 原始参数行文本（可能由多行拼接而成）
    pub raw_arguments: String,
}

/// 返回给调用方的解析结果单元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedStatement {
    /// 格式化后的模板 SQL（仍含 `?` 占位符）
    pub template_sql: String,
    /// 格式化后的可执行 SQL（占位符已替换为字面量）
    pub bound_sql: String,
    /// 参数列表，按序号升序且无缺口
    pub arguments: Vec<Argument>,
    /// 替换区间列表，偏移相对 `bound_sql`，按 `start` 升序且互不重叠
    ///
    /// 数量至多与参数数相同：格式化后无法安全定位的值不产生区间。
    pub substitution_ranges: Vec<SubstitutionRange>,
}
