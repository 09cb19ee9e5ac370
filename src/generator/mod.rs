//! AE 脚本生成模块。
//!
//! 把一份 [`crate::config::ScriptConfig`] 渲染为可被 After Effects
//! 直接运行的 `.jsx` 脚本文本。生成是纯函数：无 I/O、无副作用，
//! 相同的配置得到逐字节相同的输出。

pub mod ae_script_generator;

pub use ae_script_generator::{SCRIPT_FILE_NAME, generate_ae_script, script_file_contents};
