//! 参数解析器 - 流水线第二阶段
//!
//! 把一行原始参数文本拆分为有序的 [`Argument`] 序列。
//!
//! ## 词法
//!
//! 参数以逗号分隔，括号内的逗号不拆分；单个词法单元形如 `value` 或
//! `value(DeclaredType)`。缺少声明类型时按字面量形态推断。
//!
//! ## 类型转换
//!
//! 按类型标签做忽略大小写的子串匹配，依优先级取首个命中：
//! `null` 字面量恒为 NULL；integer/int → 整数；long → 长整数；
//! bigdecimal/decimal/double/float → 小数；boolean/bool → 布尔；
//! date/timestamp → 保留文本不做数值解释；其余类型 → 文本。
//! 数值解析失败一律回退为原始文本，绝不报错。

use crate::parser::types::{Argument, SqlValue};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// 词法单元：`value` 或 `value(Type)`，括号内不含逗号拆分点
    static ref TOKEN_RE: Regex =
        Regex::new(r"[^,()]+(?:\([^)]+\))?").unwrap();
    /// 带声明类型的词法单元：`value(Type)`
    static ref TYPED_TOKEN_RE: Regex =
        Regex::new(r"^(.+?)\(([^)]+)\)$").unwrap();
    /// 整数字面量
    static ref INTEGER_RE: Regex = Regex::new(r"^-?\d+$").unwrap();
    /// 小数字面量（单个小数点）
    static ref DECIMAL_RE: Regex = Regex::new(r"^-?\d+\.\d+$").unwrap();
    /// 窗口末尾的 `identifier = ?` 片段
    static ref SNIPPET_RE: Regex = Regex::new(r"(\w+\s*=\s*\?)$").unwrap();
}

/// 解析一行原始参数文本
///
/// `template` 是已去除多余空白的模板文本，仅用于定位 `?` 占位符以生成
/// 上下文片段。返回的参数按序号升序且从 1 起无缺口。
pub fn parse_arguments(raw_line: &str, template: &str) -> Vec<Argument> {
    // 占位符位置（字节偏移），与参数按出现顺序对齐
    let placeholder_positions: Vec<usize> =
        template.match_indices('?').map(|(pos, _)| pos).collect();

    let mut arguments = Vec::new();
    for token in TOKEN_RE.find_iter(raw_line) {
        let token = token.as_str().trim();
        if token.is_empty() {
            continue;
        }

        let (raw_text, declared_type) = split_token(token);
        let value = coerce_value(&raw_text, &declared_type);
        let ordinal = arguments.len() + 1;

        #[cfg(feature = "logging")]
        tracing::trace!(ordinal, raw = %raw_text, declared = %declared_type, "解析参数");

        arguments.push(Argument {
            ordinal,
            context_snippet: context_snippet(
                template,
                ordinal - 1,
                &placeholder_positions,
            ),
            value,
            declared_type,
            raw_text,
        });
    }

    arguments
}

/// 拆分词法单元为（原始字面量，类型标签）
///
/// 无声明类型时按字面量形态推断类型标签。
fn split_token(token: &str) -> (String, String) {
    if let Some(caps) = TYPED_TOKEN_RE.captures(token) {
        (caps[1].trim().to_string(), caps[2].trim().to_string())
    } else {
        (token.to_string(), infer_type(token).to_string())
    }
}

/// 按字面量形态推断类型标签
fn infer_type(raw: &str) -> &'static str {
    if raw == "null" || raw == "NULL" {
        "null"
    } else if INTEGER_RE.is_match(raw) {
        "Integer"
    } else if DECIMAL_RE.is_match(raw) {
        "BigDecimal"
    } else if raw == "true" || raw == "false" {
        "Boolean"
    } else {
        "String"
    }
}

/// 按类型标签把字面量转换为类型化的值
///
/// 子串匹配忽略大小写，按优先级取首个命中；数值解析失败回退为原始文本。
fn coerce_value(raw: &str, type_tag: &str) -> SqlValue {
    if raw == "null" || raw == "NULL" {
        return SqlValue::Null;
    }

    let tag = type_tag.to_lowercase();

    if tag.contains("integer") || tag.contains("int") {
        raw.parse::<i64>()
            .map(SqlValue::Integer)
            .unwrap_or_else(|_| SqlValue::Text(raw.to_string()))
    } else if tag.contains("long") {
        raw.parse::<i128>()
            .map(SqlValue::Long)
            .unwrap_or_else(|_| SqlValue::Text(raw.to_string()))
    } else if tag.contains("bigdecimal")
        || tag.contains("decimal")
        || tag.contains("double")
        || tag.contains("float")
    {
        raw.parse::<f64>()
            .map(SqlValue::Decimal)
            .unwrap_or_else(|_| SqlValue::Text(raw.to_string()))
    } else if tag.contains("boolean") || tag.contains("bool") {
        SqlValue::Boolean(raw.eq_ignore_ascii_case("true"))
    } else if tag.contains("date") || tag.contains("timestamp") {
        // 日期时间保留字面量文本，不做数值解释
        SqlValue::Text(unquote(raw).to_string())
    } else {
        SqlValue::Text(unquote(raw).to_string())
    }
}

/// 去除字面量外层的一对单引号（日志里字符串参数偶尔带引号记录）
fn unquote(raw: &str) -> &str {
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

/// 生成第 `index` 个占位符的上下文片段
///
/// 取占位符之前至多 30 个字符（含占位符本身）作为窗口：窗口若以
/// `identifier = ?` 结尾则精确返回该片段，否则返回去除首尾空白的窗口；
/// 参数多于占位符时返回 `"?"`。
fn context_snippet(
    template: &str,
    index: usize,
    placeholder_positions: &[usize],
) -> String {
    let Some(&pos) = placeholder_positions.get(index) else {
        return "?".to_string();
    };

    // 向前取至多 30 个字符（按字符数而非字节数）
    let prefix = &template[..pos];
    let skip = prefix.chars().count().saturating_sub(30);
    let window_start = prefix
        .char_indices()
        .nth(skip)
        .map(|(byte_pos, _)| byte_pos)
        .unwrap_or(0);
    let window = &template[window_start..pos + 1];

    if let Some(caps) = SNIPPET_RE.captures(window) {
        return caps[1].to_string();
    }

    let trimmed = window.trim();
    if trimmed.is_empty() { "?".to_string() } else { trimmed.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typed_tokens() {
        let args = parse_arguments(
            "10(Integer), 'ACTIVE'(String)",
            "select * from users where id = ? and status = ?",
        );
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].value, SqlValue::Integer(10));
        assert_eq!(args[0].declared_type, "Integer");
        assert_eq!(args[0].raw_text, "10");
        // 外层引号属于日志记录格式，不属于值本身
        assert_eq!(args[1].value, SqlValue::Text("ACTIVE".to_string()));
        assert_eq!(args[1].declared_type, "String");
        assert_eq!(args[1].raw_text, "'ACTIVE'");
    }

    #[test]
    fn test_parse_untyped_tokens_inferred() {
        let args = parse_arguments("42, 3.14, true, hello", "");
        assert_eq!(args[0].value, SqlValue::Integer(42));
        assert_eq!(args[0].declared_type, "Integer");
        assert_eq!(args[1].value, SqlValue::Decimal(3.14));
        assert_eq!(args[1].declared_type, "BigDecimal");
        assert_eq!(args[2].value, SqlValue::Boolean(true));
        assert_eq!(args[2].declared_type, "Boolean");
        assert_eq!(args[3].value, SqlValue::Text("hello".to_string()));
        assert_eq!(args[3].declared_type, "String");
    }

    #[test]
    fn test_null_literal_overrides_declared_type() {
        let args = parse_arguments("null(Integer), NULL", "");
        assert_eq!(args[0].value, SqlValue::Null);
        assert_eq!(args[1].value, SqlValue::Null);
        assert_eq!(args[1].declared_type, "null");
    }

    #[test]
    fn test_coercion_failure_falls_back_to_text() {
        let args = parse_arguments("abc(Integer), 1.2.3(BigDecimal)", "");
        assert_eq!(args[0].value, SqlValue::Text("abc".to_string()));
        assert_eq!(args[0].declared_type, "Integer");
        assert_eq!(args[1].value, SqlValue::Text("1.2.3".to_string()));
    }

    #[test]
    fn test_long_and_boolean_coercion() {
        let args =
            parse_arguments("9223372036854775808(Long), FALSE(Boolean)", "");
        assert_eq!(args[0].value, SqlValue::Long(9223372036854775808_i128));
        assert_eq!(args[1].value, SqlValue::Boolean(false));
    }

    #[test]
    fn test_timestamp_kept_as_text() {
        let args = parse_arguments("2024-03-01 10:00:00.0(Timestamp)", "");
        assert_eq!(args.len(), 1);
        assert_eq!(
            args[0].value,
            SqlValue::Text("2024-03-01 10:00:00.0".to_string())
        );
    }

    #[test]
    fn test_ordinals_contiguous_from_one() {
        let args = parse_arguments("1(Integer), 2(Integer), 3(Integer)", "");
        for (i, arg) in args.iter().enumerate() {
            assert_eq!(arg.ordinal, i + 1);
        }
    }

    #[test]
    fn test_context_snippet_equals_form() {
        let args = parse_arguments(
            "10(Integer)",
            "select * from users where user_id = ?",
        );
        assert_eq!(args[0].context_snippet, "user_id = ?");
    }

    #[test]
    fn test_context_snippet_fallback_window() {
        let args =
            parse_arguments("10(Integer)", "insert into t (a) values (?");
        // 窗口不以 `identifier = ?` 结尾时返回修剪后的窗口
        assert!(args[0].context_snippet.ends_with('?'));
        assert!(args[0].context_snippet.contains("values"));
    }

    #[test]
    fn test_context_snippet_more_arguments_than_placeholders() {
        let args =
            parse_arguments("1(Integer), 2(Integer)", "select ?");
        assert_eq!(args[1].context_snippet, "?");
    }
}
