//! # LRC 时间轴解析器

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// LRC 时间戳的正则模式，匹配 `[MM:SS.ff]` 或 `[MM:SS.fff]`。
///
/// 生成器会把同一个模式原样写进 AE 脚本内嵌的解析器里，
/// 保证两个解析器在构造上保持一致（而不是手工复制）。
pub(crate) const LRC_TIMESTAMP_PATTERN: &str = r"\[(\d{2}):(\d{2})\.(\d{2,3})\]";

static LRC_TIMESTAMP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LRC_TIMESTAMP_PATTERN).expect("未能编译 LRC_TIMESTAMP_REGEX"));

/// 一条带时间戳的歌词行。
///
/// 每次解析都会产生一个全新的序列；`id` 取自该行在源文本中的
/// 物理行号（从 0 开始），因此在同一输入的重新排序中保持稳定。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LrcLine {
    /// 源文本中的物理行号（从 0 开始）。
    pub id: usize,
    /// 该行的时间点（秒）。
    pub timestamp_secs: f64,
    /// 去掉时间戳与首尾空白后的歌词文本，保证非空。
    pub text: String,
    /// 匹配到的原始时间戳标签，例如 `[00:13.04]`，供 UI 展示。
    pub time_tag: String,
}

/// 解析 LRC 文本为按时间升序排列的歌词行序列。
///
/// 规则与内嵌在生成脚本中的解析器完全一致：
/// - 每个物理行只识别第一个 `[MM:SS.ff]` / `[MM:SS.fff]` 时间戳；
/// - 两位小数按百分之一秒处理（乘以 10 归一化为毫秒）；
/// - 去掉时间戳后文本为空的行、没有时间戳的行（包括 `[ti:...]`
///   之类的元数据标签）都会被丢弃；
/// - 排序是稳定的，时间相同的行保持输入顺序。
///
/// 此函数从不报错，空输入产生空序列。
#[must_use]
pub fn parse_lrc(content: &str) -> Vec<LrcLine> {
    let mut lines: Vec<LrcLine> = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let Some(caps) = LRC_TIMESTAMP_REGEX.captures(raw_line) else {
            if !raw_line.trim().is_empty() {
                debug!("[LrcParser] 丢弃无时间戳的行 {}: '{}'", index + 1, raw_line.trim());
            }
            continue;
        };

        let minutes: f64 = caps.get(1).map_or(0.0, |m| m.as_str().parse().unwrap_or(0.0));
        let seconds: f64 = caps.get(2).map_or(0.0, |m| m.as_str().parse().unwrap_or(0.0));
        let fraction_str = caps.get(3).map_or("0", |m| m.as_str());
        let mut milliseconds: f64 = fraction_str.parse().unwrap_or(0.0);
        if fraction_str.len() == 2 {
            milliseconds *= 10.0;
        }

        let timestamp_secs = minutes * 60.0 + seconds + milliseconds / 1000.0;

        let matched = caps.get(0).map_or(raw_line, |m| m.as_str());
        let text = raw_line.replacen(matched, "", 1).trim().to_string();
        if text.is_empty() {
            continue;
        }

        lines.push(LrcLine {
            id: index,
            timestamp_secs,
            text,
            time_tag: matched.to_string(),
        });
    }

    // 稳定排序，处理乱序的 LRC 文件；时间相同的行保持输入顺序
    lines.sort_by(|a, b| a.timestamp_secs.total_cmp(&b.timestamp_secs));
    lines
}
