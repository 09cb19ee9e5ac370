use async_trait::async_trait;

use lyrical_ae_rs::config::HexColor;
use lyrical_ae_rs::error::{LyricalAeError, Result};
use lyrical_ae_rs::session::SessionState;
use lyrical_ae_rs::suggest::{StyleSuggester, StyleSuggestion};

/// 总是返回固定建议的桩实现。
struct FixedSuggester {
    suggestion: StyleSuggestion,
}

#[async_trait]
impl StyleSuggester for FixedSuggester {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn suggest_style(&self, _lyric_excerpt: &str) -> Result<StyleSuggestion> {
        Ok(self.suggestion.clone())
    }
}

/// 总是失败的桩实现，模拟外部服务不可用。
struct FailingSuggester;

#[async_trait]
impl StyleSuggester for FailingSuggester {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn suggest_style(&self, _lyric_excerpt: &str) -> Result<StyleSuggestion> {
        Err(LyricalAeError::ApiError("failing".to_string()))
    }
}

#[tokio::test]
async fn test_suggestion_applies_to_session() {
    let mut session = SessionState::new();
    let suggester = FixedSuggester {
        suggestion: StyleSuggestion {
            text_color: Some(HexColor::new("#102030").unwrap()),
            font_family: Some("SimHei".to_string()),
        },
    };

    let suggestion = session
        .request_style_suggestion(&suggester)
        .await
        .expect("桩实现不应失败");
    session.apply_suggestion(suggestion);

    assert_eq!(session.config().text_color.as_str(), "#102030");
    assert_eq!(session.config().font_family, "SimHei");
    // 生成的脚本跟着配置一起更新
    assert!(session.script().contains("font: \"SimHei\","));
}

#[test_log::test(tokio::test)]
async fn test_failure_degrades_to_none() {
    let session = SessionState::new();
    let original_config = session.config().clone();

    // 失败被记录并化为 None，不向外传播
    let suggestion = session.request_style_suggestion(&FailingSuggester).await;
    assert!(suggestion.is_none());
    assert_eq!(session.config(), &original_config);
}

#[tokio::test]
async fn test_partial_suggestion_keeps_other_fields() {
    let mut session = SessionState::new();
    let original_color = session.config().text_color.clone();

    let suggester = FixedSuggester {
        suggestion: StyleSuggestion {
            text_color: None,
            font_family: Some("Noto Sans SC".to_string()),
        },
    };
    let suggestion = session.request_style_suggestion(&suggester).await.unwrap();
    session.apply_suggestion(suggestion);

    assert_eq!(session.config().text_color, original_color);
    assert_eq!(session.config().font_family, "Noto Sans SC");
}
