//! 替换区间重映射器 - 流水线第五阶段
//!
//! 绑定阶段记录的区间相对未格式化文本；格式化插入的换行与缩进让每个偏移
//! 都发生了与位置相关的漂移。本阶段在**格式化后**的文本中重新定位每个
//! 替换值，产出对格式化文本有效的新区间。
//!
//! 定位按显式的有序策略表执行（便于逐个策略单独测试）：
//!
//! 1. 窗口搜索：以格式化前的起始偏移为锚点，在 `[锚点-50, 锚点+200]`
//!    范围内找替换文本的精确出现，要求命中处位于值边界上
//! 2. 全文搜索：带引号的字面量按精确子串查找，其余按词边界正则查找
//!
//! 两个策略都失败时丢弃该区间，不报错：少一个高亮是可接受的退化，
//! SQL 文本与其它区间不受影响。幸存区间保持原有相对顺序。
//!
//! 每个区间的搜索都从上一个已接受区间的末尾开始：两个参数渲染出相同
//! 字面量（如两个 `7`）时各自命中不同的出现，输出区间保持按 `start`
//! 升序且互不重叠。

use crate::parser::types::SubstitutionRange;
use regex::Regex;

/// 锚点向前的搜索半径
const WINDOW_BEFORE: usize = 50;

/// 锚点向后的搜索半径
const WINDOW_AFTER: usize = 200;

/// 单个定位策略：在格式化文本中从 `from` 偏移起返回替换文本的起始偏移
type RelocateStrategy = fn(&str, &SubstitutionRange, usize) -> Option<usize>;

/// 按声明顺序尝试的策略表
const STRATEGIES: [RelocateStrategy; 2] = [window_search, full_text_search];

/// 把相对未格式化文本的区间重映射到格式化文本
pub fn remap_ranges(
    formatted: &str,
    ranges: &[SubstitutionRange],
) -> Vec<SubstitutionRange> {
    let mut cursor = 0usize;
    ranges
        .iter()
        .filter_map(|range| {
            let start = STRATEGIES
                .iter()
                .find_map(|strategy| strategy(formatted, range, cursor));

            #[cfg(feature = "logging")]
            if start.is_none() {
                tracing::debug!(
                    value = %range.rendered_text,
                    "格式化后无法定位替换值，丢弃该区间"
                );
            }

            start.map(|start| {
                let end = start + range.rendered_text.len();
                cursor = end;
                SubstitutionRange {
                    start,
                    end,
                    rendered_text: range.rendered_text.clone(),
                }
            })
        })
        .collect()
}

/// 策略一：锚点窗口内的精确搜索
///
/// 格式化只会插入少量换行与缩进，值的新位置离旧偏移不远；取首个通过
/// 边界校验的出现。窗口下界不早于 `from`，不回扫已占用的文本。
fn window_search(
    formatted: &str,
    range: &SubstitutionRange,
    from: usize,
) -> Option<usize> {
    let value = range.rendered_text.as_str();
    let anchor = range.start.min(formatted.len());

    let mut lo = anchor.saturating_sub(WINDOW_BEFORE).max(from);
    while !formatted.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (anchor + WINDOW_AFTER).min(formatted.len());
    while !formatted.is_char_boundary(hi) {
        hi += 1;
    }
    if lo >= hi {
        return None;
    }

    let window = &formatted[lo..hi];
    let mut offset = 0;
    while let Some(found) = window[offset..].find(value) {
        let start = lo + offset + found;
        if on_value_boundary(formatted, start, value) {
            return Some(start);
        }
        // 前进一个字符继续在窗口内找下一个出现
        let step = window[offset + found..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        offset += found + step;
    }

    None
}

/// 策略二：全文搜索兜底
///
/// 带引号的字面量自带定界符，按精确子串查找；数值、布尔与 `null`
/// 用词边界正则避免命中别的值的一部分。搜索从 `from` 偏移开始。
fn full_text_search(
    formatted: &str,
    range: &SubstitutionRange,
    from: usize,
) -> Option<usize> {
    let value = range.rendered_text.as_str();

    if is_quoted(value) {
        return formatted[from..].find(value).map(|found| from + found);
    }

    let pattern = format!(r"\b{}\b", regex::escape(value));
    let re = Regex::new(&pattern).ok()?;
    re.find_at(formatted, from).map(|m| m.start())
}

/// 校验命中处位于值边界上
///
/// 三种情况之一即通过：左右相邻字符都不是标识符字符；值本身是带引号的
/// 字符串（引号即定界符）；值是裸的 `null`。
fn on_value_boundary(formatted: &str, start: usize, value: &str) -> bool {
    let before_ok = formatted[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !is_word_char(c));
    let after_ok = formatted[start + value.len()..]
        .chars()
        .next()
        .is_none_or(|c| !is_word_char(c));

    (before_ok && after_ok) || is_quoted(value) || value == "null"
}

fn is_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'')
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: usize, text: &str) -> SubstitutionRange {
        SubstitutionRange {
            start,
            end: start + text.len(),
            rendered_text: text.to_string(),
        }
    }

    #[test]
    fn test_window_search_relocates_after_shift() {
        // 未格式化偏移 27，格式化插入换行后实际位于 31
        let formatted = "select *\nfrom users\nwhere id = 10";
        let found = window_search(formatted, &range(27, "10"), 0).unwrap();
        assert_eq!(found, formatted.len() - 2);
        assert_eq!(&formatted[found..found + 2], "10");
    }

    #[test]
    fn test_window_search_rejects_partial_match() {
        // "10" 出现在 "103" 内部时不在值边界上
        let formatted = "where a = 103 and b = 10";
        let found = window_search(formatted, &range(10, "10"), 0).unwrap();
        assert_eq!(found, formatted.len() - 2);
    }

    #[test]
    fn test_window_search_starts_at_from_offset() {
        // from 之前的出现被跳过
        let formatted = "where a = 7 and b = 7";
        let found = window_search(formatted, &range(10, "7"), 11).unwrap();
        assert_eq!(found, formatted.len() - 1);
    }

    #[test]
    fn test_full_text_search_quoted_exact() {
        let formatted = "where name = 'O''Brien'";
        let found =
            full_text_search(formatted, &range(0, "'O''Brien'"), 0).unwrap();
        assert_eq!(found, 13);
    }

    #[test]
    fn test_full_text_search_word_boundary() {
        let formatted = "where a = 1024 and b = 24";
        let found = full_text_search(formatted, &range(0, "24"), 0).unwrap();
        // 词边界匹配跳过 1024 内部的 24
        assert_eq!(found, formatted.len() - 2);
    }

    #[test]
    fn test_full_text_search_starts_at_from_offset() {
        let formatted = "where a = 24 and b = 24";
        let found = full_text_search(formatted, &range(0, "24"), 12).unwrap();
        assert_eq!(found, formatted.len() - 2);
    }

    #[test]
    fn test_remap_drops_unlocatable_range() {
        let formatted = "select 1";
        let remapped = remap_ranges(formatted, &[range(0, "'missing'")]);
        assert!(remapped.is_empty());
    }

    #[test]
    fn test_remap_preserves_order() {
        let formatted = "where a = 'x'\n  and b = 7";
        let ranges = [range(10, "'x'"), range(18, "7")];
        let remapped = remap_ranges(formatted, &ranges);
        assert_eq!(remapped.len(), 2);
        assert!(remapped[0].start < remapped[1].start);
        assert_eq!(&formatted[remapped[1].start..remapped[1].end], "7");
    }

    #[test]
    fn test_remap_duplicate_values_get_distinct_ranges() {
        // 两个参数渲染出相同字面量时各自命中不同的出现
        let formatted = "update t\nset a = 7, b = 7";
        let ranges = [range(17, "7"), range(24, "7")];
        let remapped = remap_ranges(formatted, &ranges);

        assert_eq!(remapped.len(), 2);
        assert!(remapped[0].end <= remapped[1].start);
        assert_eq!(&formatted[remapped[0].start..remapped[0].end], "7");
        assert_eq!(&formatted[remapped[1].start..remapped[1].end], "7");
    }

    #[test]
    fn test_null_literal_accepted_on_boundary() {
        let formatted = "set note = null";
        let remapped = remap_ranges(formatted, &[range(11, "null")]);
        assert_eq!(remapped.len(), 1);
        assert_eq!(remapped[0].start, 11);
    }
}
