//! 会话状态管理。
//!
//! 预览/代码页签、播放状态、当前歌词与配置等 UI 状态全部收拢在
//! [`SessionState`] 里，由单一控制器独占持有：每个用户动作都整体
//! 替换对应的字段，派生数据（解析结果、生成的脚本）随之整体重算。
//! 没有全局单例，也没有任何跨会话的持久化。

use strum_macros::{Display, EnumIter, EnumString};
use tracing::{info, warn};

use crate::{
    config::{DEFAULT_LRC, ScriptConfig},
    generator::{SCRIPT_FILE_NAME, generate_ae_script, script_file_contents},
    parser::{LrcLine, parse_lrc},
    preview::{PreviewFrame, PreviewState},
    suggest::{StyleSuggester, StyleSuggestion},
};

/// 工作区右侧的页签。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum WorkbenchTab {
    /// 动画效果预览。
    #[default]
    Preview,
    /// 生成的脚本代码。
    Code,
}

/// 一次编辑会话的全部状态。
///
/// `lines` 与 `script` 是纯派生数据：前者由 `lrc_text` 解析而来，
/// 后者由 `config` 生成而来，二者只在对应输入变化时整体重算，
/// 从不被单独修改。
#[derive(Debug)]
pub struct SessionState {
    lrc_text: String,
    config: ScriptConfig,
    tab: WorkbenchTab,
    lines: Vec<LrcLine>,
    script: String,
    preview: PreviewState,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// 用内置演示歌词与默认配置创建一个新会话。
    #[must_use]
    pub fn new() -> Self {
        Self::with_lyrics(DEFAULT_LRC.to_string(), ScriptConfig::default())
    }

    /// 用给定歌词与配置创建会话。
    #[must_use]
    pub fn with_lyrics(lrc_text: String, config: ScriptConfig) -> Self {
        let lines = parse_lrc(&lrc_text);
        let script = generate_ae_script(&config);
        Self {
            lrc_text,
            config,
            tab: WorkbenchTab::default(),
            lines,
            script,
            preview: PreviewState::new(),
        }
    }

    /// 当前的 LRC 源文本。
    #[must_use]
    pub fn lrc_text(&self) -> &str {
        &self.lrc_text
    }

    /// 当前配置。
    #[must_use]
    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    /// 当前页签。
    #[must_use]
    pub fn tab(&self) -> WorkbenchTab {
        self.tab
    }

    /// 解析出的歌词行（按时间升序）。
    #[must_use]
    pub fn lines(&self) -> &[LrcLine] {
        &self.lines
    }

    /// 生成的脚本文本（不含 BOM）。
    #[must_use]
    pub fn script(&self) -> &str {
        &self.script
    }

    /// 替换歌词文本并整体重算解析结果，同时重置预览。
    ///
    /// 空的或完全无法解析的文本会产生一个空的、无害的行序列，
    /// 预览相应地退化为空白，不报错。
    pub fn set_lrc_text(&mut self, lrc_text: String) {
        self.lines = parse_lrc(&lrc_text);
        self.lrc_text = lrc_text;
        self.preview.reset();
    }

    /// 替换整份配置并重新生成脚本。
    pub fn set_config(&mut self, config: ScriptConfig) {
        self.script = generate_ae_script(&config);
        self.config = config;
    }

    /// 切换页签。
    pub fn select_tab(&mut self, tab: WorkbenchTab) {
        self.tab = tab;
    }

    /// 切换播放/暂停。
    pub fn toggle_play(&mut self) {
        self.preview.toggle_play();
    }

    /// 快进/快退预览时钟。
    pub fn seek(&mut self, offset_secs: f64) {
        self.preview.seek(offset_secs);
    }

    /// 前进一帧，返回该帧的预览状态。
    pub fn tick(&mut self, delta_secs: f64) -> PreviewFrame {
        self.preview.tick(delta_secs, &self.lines, &self.config)
    }

    /// 导出脚本文件：返回建议文件名与带 BOM 的完整内容。
    #[must_use]
    pub fn export_script(&self) -> (&'static str, String) {
        (SCRIPT_FILE_NAME, script_file_contents(&self.config))
    }

    /// 把一份样式建议套用到配置上，缺省的字段保持原值。
    pub fn apply_suggestion(&mut self, suggestion: StyleSuggestion) {
        let mut config = self.config.clone();
        if let Some(color) = suggestion.text_color {
            config.text_color = color;
        }
        if let Some(font) = suggestion.font_family {
            config.font_family = font;
        }
        self.set_config(config);
    }

    /// 向外部服务请求一份样式建议。
    ///
    /// 失败只会记录日志并返回 `None`（调用方据此显示一条通用提示），
    /// 不会传播错误，也不会自动重试。
    pub async fn request_style_suggestion(
        &self,
        suggester: &dyn StyleSuggester,
    ) -> Option<StyleSuggestion> {
        match suggester.suggest_style(&self.lrc_text).await {
            Ok(suggestion) => {
                info!("[Session] 服务 '{}' 返回了样式建议。", suggester.name());
                Some(suggestion)
            }
            Err(e) => {
                warn!("[Session] 服务 '{}' 的样式建议失败: {}", suggester.name(), e);
                None
            }
        }
    }
}
