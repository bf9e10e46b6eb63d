//! 占位符绑定器 - 流水线第三阶段
//!
//! 从左到右把模板中的 `?` 逐个替换为对应参数的字面量形式，并记录每次替换
//! 在结果字符串中占据的字节区间（相对**未格式化**的绑定文本）。
//!
//! 绑定是纯位置对齐：第 N 个参数对应第 N 个占位符，与名字无关。
//! 参数多于占位符时多余参数被静默跳过；占位符多于参数时剩余 `?` 原样保留。

use crate::parser::types::{Argument, SubstitutionRange};

/// 需要加引号的类型标签关键字
const QUOTED_TAGS: [&str; 4] = ["string", "char", "date", "timestamp"];

/// 按原样输出的类型标签关键字（数值与布尔）
const PLAIN_TAGS: [&str; 9] = [
    "integer",
    "int",
    "long",
    "bigdecimal",
    "decimal",
    "double",
    "float",
    "boolean",
    "bool",
];

/// 绑定参数到模板，返回（绑定文本，替换区间列表）
///
/// 搜索游标从上一次替换的末尾开始，不回扫已替换的文本，避免把已插入的
/// 值中的 `?` 误当作占位符。
pub fn bind(
    template: &str,
    arguments: &[Argument],
) -> (String, Vec<SubstitutionRange>) {
    let mut result = template.to_string();
    let mut ranges = Vec::new();
    let mut cursor = 0usize;

    for argument in arguments {
        let Some(found) = result[cursor..].find('?') else {
            // 参数多于占位符：静默跳过
            #[cfg(feature = "logging")]
            tracing::trace!(ordinal = argument.ordinal, "无对应占位符，跳过参数");
            continue;
        };
        let start = cursor + found;
        let rendered = render_value(argument);
        let end = start + rendered.len();

        result.replace_range(start..start + 1, &rendered);
        ranges.push(SubstitutionRange {
            start,
            end,
            rendered_text: rendered,
        });
        cursor = end;
    }

    (result, ranges)
}

/// 把参数值渲染为可直接写入 SQL 的字面量
///
/// NULL 渲染为裸的 `null`；字符串及日期时间类型加单引号并把内部单引号
/// 成对转义；数值与布尔类型原样输出；未知类型按字符串处理（安全缺省）。
pub fn render_value(argument: &Argument) -> String {
    if argument.value.is_null() {
        return "null".to_string();
    }

    let tag = argument.declared_type.to_lowercase();
    let plain = argument.value.plain_text();

    if QUOTED_TAGS.iter().any(|t| tag.contains(t)) {
        quote_literal(&plain)
    } else if PLAIN_TAGS.iter().any(|t| tag.contains(t)) {
        plain
    } else {
        quote_literal(&plain)
    }
}

/// 单引号包裹并把内部单引号翻倍
fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
