//! SQL 格式化器 - 流水线第四阶段
//!
//! 纯文本重写：先把空白归一化（连续空白折叠为单个空格），再在每个子句
//! 关键字前插入换行，最后给不以顶层关键字开头的行加 2 空格缩进。
//!
//! 复合关键字（INNER JOIN、ORDER BY 等）作为整体匹配，置于其组成词之前，
//! 避免被拆成两段。本阶段只影响排版，幂等：对已格式化文本再格式化得到
//! 逐字节相同的结果。

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// 连续空白
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    /// 子句关键字，复合关键字在前（正则交替取最先命中的分支）
    static ref CLAUSE_KEYWORD_RE: Regex = Regex::new(
        r"(?i)\b(INNER JOIN|LEFT JOIN|RIGHT JOIN|ORDER BY|GROUP BY|INSERT INTO|DELETE FROM|SELECT|FROM|WHERE|JOIN|ON|AND|OR|HAVING|UPDATE|SET|VALUES)\b"
    )
    .unwrap();
}

/// 行首不缩进的顶层关键字（ON/AND/OR 不在其中，需要缩进）
const TOP_LEVEL_KEYWORDS: [&str; 15] = [
    "SELECT",
    "FROM",
    "WHERE",
    "INNER JOIN",
    "LEFT JOIN",
    "RIGHT JOIN",
    "JOIN",
    "ORDER BY",
    "GROUP BY",
    "HAVING",
    "INSERT INTO",
    "UPDATE",
    "SET",
    "DELETE FROM",
    "VALUES",
];

/// 把连续空白折叠为单个空格并去除首尾空白
pub fn normalize_whitespace(sql: &str) -> String {
    WHITESPACE_RE.replace_all(sql.trim(), " ").to_string()
}

/// 格式化 SQL 文本
///
/// 已知限制：关键字匹配不感知引号，字符串字面量内部出现的子句关键字
/// （如 `'order by name'`）同样会被换行；这样的值在重映射阶段找不到
/// 精确出现，其替换区间按既定策略被丢弃，SQL 文本本身不受影响。
pub fn format_sql(sql: &str) -> String {
    let normalized = normalize_whitespace(sql);
    let broken = CLAUSE_KEYWORD_RE.replace_all(&normalized, "\n$1");

    broken
        .trim()
        .lines()
        .map(|line| {
            let line = line.trim_end();
            if starts_with_top_level_keyword(line) {
                line.to_string()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 判断行首是否为顶层关键字（忽略大小写，词边界）
fn starts_with_top_level_keyword(line: &str) -> bool {
    let bytes = line.as_bytes();
    TOP_LEVEL_KEYWORDS.iter().any(|keyword| {
        let len = keyword.len();
        if bytes.len() < len
            || !bytes[..len].eq_ignore_ascii_case(keyword.as_bytes())
        {
            return false;
        }
        // 词边界：关键字之后必须是行尾或非标识符字符
        bytes
            .get(len)
            .is_none_or(|&b| !b.is_ascii_alphanumeric() && b != b'_')
    })
}
