//! 基于 Google Gemini 的样式建议实现。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{LyricalAeError, Result},
    suggest::{StyleSuggester, StyleSuggestion},
};

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL_NAME: &str = "gemini-2.5-flash";

/// 发送给模型的歌词节选上限（字符数）。
const EXCERPT_CHAR_LIMIT: usize = 300;

/// 调用 Gemini `generateContent` 接口的样式建议服务。
pub struct GeminiSuggester {
    http_client: reqwest::Client,
    api_key: String,
}

impl GeminiSuggester {
    /// 用给定的 API Key 创建一个新实例。
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key,
        }
    }

    fn build_prompt(lyric_excerpt: &str) -> String {
        let excerpt: String = lyric_excerpt.chars().take(EXCERPT_CHAR_LIMIT).collect();
        format!(
            "分析以下歌词并为音乐视频建议配色方案和字体样式。\n\
             歌词: \"{excerpt}...\"\n\
             仅返回一个JSON对象: {{ \"textColor\": \"#hex\", \"fontFamily\": \"FontName\" }}.\n\
             字体请建议常用的系统字体或 Adobe 字体 (如 'Microsoft YaHei', 'SimHei')。\n\
             颜色请建议高对比度、符合意境的颜色。"
        )
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// 模型偶尔会把 JSON 包在 Markdown 代码块里，去掉围栏后再解析。
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

#[async_trait]
impl StyleSuggester for GeminiSuggester {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn suggest_style(&self, lyric_excerpt: &str) -> Result<StyleSuggestion> {
        let url = format!(
            "{API_BASE_URL}/{MODEL_NAME}:generateContent?key={}",
            self.api_key
        );
        let prompt = Self::build_prompt(lyric_excerpt);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };

        let response: GenerateContentResponse = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text = response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| LyricalAeError::ApiError(MODEL_NAME.to_string()))?;

        let json_str = strip_code_fences(text);
        debug!("[Gemini] 模型返回: {}", json_str);

        let suggestion: StyleSuggestion = serde_json::from_str(&json_str)?;
        Ok(suggestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 去掉 Markdown 围栏后应得到纯 JSON
    #[test]
    fn test_strip_code_fences() {
        let fenced = "```json\n{\"textColor\": \"#112233\"}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"textColor\": \"#112233\"}");

        let bare = "{\"fontFamily\": \"SimHei\"}";
        assert_eq!(strip_code_fences(bare), bare);
    }

    // 建议载荷允许缺省字段
    #[test]
    fn test_partial_suggestion_deserializes() {
        let suggestion: StyleSuggestion =
            serde_json::from_str("{\"fontFamily\": \"SimHei\"}").unwrap();
        assert_eq!(suggestion.font_family.as_deref(), Some("SimHei"));
        assert!(suggestion.text_color.is_none());

        let full: StyleSuggestion =
            serde_json::from_str("{\"textColor\": \"#FF8000\", \"fontFamily\": \"SimHei\"}")
                .unwrap();
        assert_eq!(full.text_color.unwrap().as_str(), "#ff8000");
    }

    // 非法颜色会让整份建议解析失败（随后按通用失败路径处理）
    #[test]
    fn test_invalid_color_rejected() {
        let result: std::result::Result<StyleSuggestion, _> =
            serde_json::from_str("{\"textColor\": \"red\"}");
        assert!(result.is_err());
    }

    // 提示词会截断过长的歌词节选
    #[test]
    fn test_prompt_truncates_excerpt() {
        let long_lyrics = "词".repeat(1000);
        let prompt = GeminiSuggester::build_prompt(&long_lyrics);
        assert!(prompt.chars().count() < 500);
        assert!(prompt.contains("textColor"));
    }
}
