#![warn(missing_docs)]

//! # Lyrical AE RS
//!
//! 一个把 LRC 歌词转换为 After Effects 歌词动画脚本的 Rust 库，
//! 并为浏览器式的实时预览提供确定性的状态计算。
//!
//! ## 主要功能
//!
//! - **时间轴解析**: 把带 `[MM:SS.xx]` 时间戳的 LRC 文本解析为按
//!   时间排序的歌词行序列。
//! - **脚本生成**: 由样式配置生成可直接在 AE 中运行的 `.jsx` 脚本
//!   （Apple Music 风格的粘滞滚动 + 逐字填充动画），输出逐字节确定。
//! - **实时预览**: 由播放时钟推导每行的位置、缩放、模糊与填充比例，
//!   供任意 UI 渲染层使用。
//!
//! ## 解析与生成
//!
//! ```rust
//! use lyrical_ae_rs::{generator::generate_ae_script, parser::parse_lrc, ScriptConfig};
//!
//! let lines = parse_lrc("[00:01.50]Hello\n[00:03.00]World");
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[0].text, "Hello");
//!
//! let script = generate_ae_script(&ScriptConfig::default());
//! assert!(script.contains("app.beginUndoGroup"));
//! ```
//!
//! ## 会话与预览
//!
//! ```rust
//! use lyrical_ae_rs::session::SessionState;
//!
//! let mut session = SessionState::new();
//! session.toggle_play();
//!
//! // 每帧以真实的时间增量推进，取得该帧的预览状态
//! let frame = session.tick(0.016);
//! assert_eq!(frame.active_index, 0);
//!
//! let (file_name, contents) = session.export_script();
//! assert_eq!(file_name, "LyricalAE_Script.jsx");
//! assert!(contents.starts_with('\u{FEFF}'));
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod parser;
pub mod preview;
pub mod session;
pub mod suggest;

pub use crate::{
    config::{Alignment, HexColor, ScriptConfig},
    error::{LyricalAeError, Result},
    parser::LrcLine,
};
