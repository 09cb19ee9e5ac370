//! 歌词时间轴解析模块。
//!
//! 将带有 `[MM:SS.xx]` 时间戳的原始 LRC 文本转换为按时间排序的
//! [`LrcLine`] 序列。解析从不失败：无法识别的行会被静默丢弃。

pub mod lrc_parser;

pub use lrc_parser::{LrcLine, parse_lrc};
