//! 定义了整个 `lyrical-ae` 库的错误类型 `LyricalAeError`。

use thiserror::Error;

/// `lyrical-ae` 库的通用错误枚举。
///
/// 核心路径（LRC 解析、脚本生成、预览计算）被设计为不可失败，
/// 因此这里只覆盖真正可能出错的边界：外部服务与输入校验。
#[derive(Error, Debug)]
pub enum LyricalAeError {
    /// 网络请求失败 (源自 `reqwest::Error`)
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// API 返回错误或空数据
    #[error("API 为 `{0}` 返回了错误或空数据")]
    ApiError(String),

    /// 无效的十六进制颜色字符串
    #[error("无效的颜色值: '{0}'，应为 `#RRGGBB` 形式")]
    InvalidColor(String),
}

/// `LyricalAeError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, LyricalAeError>;
