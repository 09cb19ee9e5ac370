//! 样式建议模块。
//!
//! 该模块定义了与外部 AI 服务交互的核心抽象：根据一段歌词节选
//! 建议配色与字体。这是一个可选的外部协作者，核心功能不依赖它；
//! 任何失败都只会被记录并以一条通用提示呈现给用户，不会向外传播，
//! 也不会自动重试。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{config::HexColor, error::Result};

pub mod gemini;

pub use gemini::GeminiSuggester;

/// AI 返回的样式建议。两个字段都是可选的，允许服务只给出其中一项。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSuggestion {
    /// 建议的激活文字颜色。
    #[serde(default)]
    pub text_color: Option<HexColor>,
    /// 建议的字体名称。
    #[serde(default)]
    pub font_family: Option<String>,
}

/// 定义了样式建议服务需要实现的通用接口。
///
/// 实现应当是无状态的；测试中可以用桩实现替换真实服务。
#[async_trait]
pub trait StyleSuggester: Send + Sync {
    /// 返回服务的唯一名称，全小写的静态字符串，例如 `"gemini"`。
    fn name(&self) -> &'static str;

    /// 根据歌词节选生成一份样式建议。
    ///
    /// # 参数
    /// * `lyric_excerpt` - 歌词文本，过长时由实现自行截断。
    ///
    /// # 返回
    /// 一个 `Result`，成功时包含 [`StyleSuggestion`]。
    async fn suggest_style(&self, lyric_excerpt: &str) -> Result<StyleSuggestion>;
}
