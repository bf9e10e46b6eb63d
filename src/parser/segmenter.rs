//! 日志切分器 - 流水线第一阶段
//!
//! 逐行扫描原始日志文本，恢复出有序的（SQL 模板，原始参数文本）配对。
//!
//! ## 切分规则
//!
//! - 命中模板前缀的行：先提交已经凑齐的上一对（模板与参数都存在才提交），
//!   再以该行内容开启新模板
//! - 命中参数前缀的行：设置当前参数文本
//! - 其它非空行：当模板与参数都已开始时视为参数的候选续行，包含 `(` 或 `,`
//!   才拼接（以空格分隔），否则静默丢弃
//! - 输入结束时提交仍在途的配对
//!
//! 只有模板没有参数行的语句不产生任何输出；空输入或没有任何前缀命中的
//! 输入返回空列表，不是错误。
//!
//! 续行启发式是刻意的简化：带括号或逗号的行"看起来像更多的参数值"，
//! 堆栈信息之类的散文行则不满足该条件。

use crate::config::CompiledPatterns;
use crate::parser::types::LogStatement;

/// 将原始日志文本切分为有序的（模板，参数）配对
pub fn segment(log_text: &str, patterns: &CompiledPatterns) -> Vec<LogStatement> {
    let mut statements = Vec::new();
    let mut current_template: Option<String> = None;
    let mut current_arguments: Option<String> = None;

    for line in log_text.lines() {
        let line = line.trim();

        // 模板行：提交上一对并开启新模板
        if let Some(caps) = patterns.preparing.captures(line) {
            flush(&mut statements, &mut current_template, &mut current_arguments);
            current_template = Some(caps[1].trim().to_string());
            continue;
        }

        // 参数行：设置当前参数文本
        if let Some(caps) = patterns.parameters.captures(line) {
            current_arguments = Some(caps[1].trim().to_string());
            continue;
        }

        // 候选续行：模板与参数都已开始，且内容像参数列表
        if current_template.is_some() && !line.is_empty() {
            if let Some(args) = current_arguments.as_mut() {
                if line.contains('(') || line.contains(',') {
                    args.push(' ');
                    args.push_str(line);
                } else {
                    #[cfg(feature = "logging")]
                    tracing::trace!(content = line, "丢弃不像参数的续行");
                }
            }
        }
    }

    // 提交最后一对
    flush(&mut statements, &mut current_template, &mut current_arguments);

    #[cfg(feature = "logging")]
    tracing::debug!(count = statements.len(), "日志切分完成");

    statements
}

/// 提交在途的（模板，参数）配对；两者齐备才产出
fn flush(
    statements: &mut Vec<LogStatement>,
    template: &mut Option<String>,
    arguments: &mut Option<String>,
) {
    let pending_template = template.take();
    let pending_arguments = arguments.take();
    if let (Some(template), Some(raw_arguments)) =
        (pending_template, pending_arguments)
    {
        statements.push(LogStatement { template, raw_arguments });
    }
}
