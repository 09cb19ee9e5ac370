//! 定义了合成与动画的样式配置类型。
//!
//! 配置由顶层会话独占持有，每次编辑时整体替换（见 [`crate::session`]），
//! 不存在跨会话的持久化。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::LyricalAeError;

/// 一个经过校验的 `#RRGGBB` 十六进制颜色。
///
/// 在构造时完成合法性检查，使得后续的脚本生成保持完全不可失败。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// 解析 `#RRGGBB` 形式的颜色字符串，大小写不敏感。
    pub fn new(s: &str) -> Result<Self, LyricalAeError> {
        let rest = s
            .strip_prefix('#')
            .ok_or_else(|| LyricalAeError::InvalidColor(s.to_string()))?;
        if rest.len() == 6 && rest.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(format!("#{}", rest.to_ascii_lowercase())))
        } else {
            Err(LyricalAeError::InvalidColor(s.to_string()))
        }
    }

    /// 返回规范化后的 `#rrggbb` 字符串。
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 将颜色转换为 [0,1] 区间的三个浮点通道值。
    #[must_use]
    pub fn to_unit_rgb(&self) -> [f64; 3] {
        let channel = |range: std::ops::Range<usize>| {
            // 构造时已校验过六位十六进制，这里不可能解析失败
            f64::from(u8::from_str_radix(&self.0[range], 16).unwrap_or(0)) / 255.0
        };
        [channel(1..3), channel(3..5), channel(5..7)]
    }

    /// 生成 AE 脚本中使用的颜色数组字面量内容，每个通道保留两位小数。
    ///
    /// 例如 `#FF8000` 会得到 `"1.00, 0.50, 0.00"`。
    #[must_use]
    pub fn to_ae_color_literal(&self) -> String {
        let [r, g, b] = self.to_unit_rgb();
        format!("{r:.2}, {g:.2}, {b:.2}")
    }
}

impl FromStr for HexColor {
    type Err = LyricalAeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = LyricalAeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 歌词文本的对齐方式。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// 左对齐 (Apple Music 风格)。
    #[default]
    Left,
    /// 居中对齐。
    Center,
}

/// 合成与动画的全部样式参数。
///
/// 这是一个扁平的不可变记录：所有字段由用户提供，生成器与预览器
/// 只读取、从不修改。超出常规范围的数值（如负的宽度）会被原样传递，
/// 参数校验不是本类型的职责。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// 合成名称。
    pub comp_name: String,
    /// 合成宽度（像素）。
    pub comp_width: u32,
    /// 合成高度（像素）。
    pub comp_height: u32,
    /// 帧率。
    pub fps: u32,
    /// 合成时长（秒）。
    pub duration_secs: f64,
    /// 字号（像素）。
    pub font_size: f64,
    /// 字体名称，建议使用 PostScript 名称。
    pub font_family: String,
    /// 激活行的颜色。
    pub text_color: HexColor,
    /// 未激活行的颜色。
    pub inactive_text_color: HexColor,
    /// 激活行的放大倍数。
    pub active_scale: f64,
    /// 未激活行的不透明度（百分比）。
    pub inactive_opacity: f64,
    /// 未激活行的高斯模糊半径。
    pub blur_amount: f64,
    /// 行间距（像素）。
    pub spacing: f64,
    /// 粘滞滚动的阻尼系数，控制回弹幅度。
    pub motion_damping: f64,
    /// 对齐方式。
    pub alignment: Alignment,
    /// 激活行已填充文字的上浮距离（像素）。
    pub text_lift: f64,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            comp_name: "Lyric_Comp".to_string(),
            comp_width: 1920,
            comp_height: 1920,
            fps: 30,
            duration_secs: 300.0,
            font_size: 90.0,
            font_family: "Microsoft YaHei".to_string(),
            text_color: HexColor("#ffffff".to_string()),
            inactive_text_color: HexColor("#888888".to_string()),
            active_scale: 1.1,
            inactive_opacity: 60.0,
            blur_amount: 20.0,
            spacing: 180.0,
            motion_damping: 0.8,
            alignment: Alignment::Left,
            text_lift: 10.0,
        }
    }
}

/// 内置的演示歌词（《世末歌者》）。
pub const DEFAULT_LRC: &str = "[ti:世末歌者]
[ar:COP/乐正绫]
[al:世末歌者-COSMOSⅡ]
[00:00.00]世末歌者 - COP/乐正绫 (Yuezheng Ling)
[00:03.26]词：COP
[00:06.52]曲：COP
[00:09.78]编调：COP
[00:13.04]蝉时雨 化成淡墨渲染暮色
[00:17.97]渗透着 勾勒出足迹与车辙
[00:23.05]欢笑声 与漂浮的水汽饱和
[00:28.15]隔着窗 同城市一并模糊了
[00:33.33]拨弄着 旧吉他 哼着四拍子的歌
[00:38.37]回音中 一个人 仿佛颇悠然自得
[00:43.39]等凉雨 的温度 将不安燥热中和
[00:48.52]寻觅着 风的波折
[00:52.73]我仍然在无人问津的阴雨霉湿之地
[00:57.82]和着雨音 唱着没有听众的歌曲
[01:02.74]人潮仍是漫无目的地向目的地散去
[01:08.59]忙碌着 无为着 继续
[01:13.03]等待着谁能够将我的心房轻轻叩击
[01:18.32]即使是你 也仅仅驻足了片刻便离去
[01:23.43]想着或许 下个路口会有谁与我相遇
[01:28.95]哪怕只一瞬的奇迹
[01:54.64]夏夜空 出现在遥远的记忆
[02:00.18]绽放的 璀璨花火拥着繁星
[02:05.24]消失前 做出最温柔的给予
[02:10.35]一如那些模糊身影的别离
[02:15.43]困惑地 拘束着 如城市池中之鱼
[02:20.52]或哽咽 或低泣 都融进了泡沫里
[02:25.58]拖曳疲惫身躯 沉入冰冷的池底
[02:30.64]注视着 色彩褪去
[02:35.08]我仍然在无人问津的阴雨霉湿之地
[02:40.01]和着雨音 唱着没有听众的歌曲
[02:45.00]人潮仍是漫无目的地向目的地散去
[02:50.68]忙碌着 无为着 继续
[02:55.43]祈求着谁能够将我的心房轻轻叩击
[03:00.36]今天的你是否会留意并尝试去靠近
[03:05.72]因为或许
[03:06.95]下个路口仍是同样的结局
[03:11.20]不存在刹那的奇迹";

#[cfg(test)]
mod tests {
    use super::*;

    // 纯白与纯黑的通道转换
    #[test]
    fn test_hex_color_extremes() {
        let white = HexColor::new("#FFFFFF").unwrap();
        assert_eq!(white.to_ae_color_literal(), "1.00, 1.00, 1.00");

        let black = HexColor::new("#000000").unwrap();
        assert_eq!(black.to_ae_color_literal(), "0.00, 0.00, 0.00");
    }

    // 中间值应在舍入容差内往返
    #[test]
    fn test_hex_color_orange() {
        let orange = HexColor::new("#FF8000").unwrap();
        assert_eq!(orange.to_ae_color_literal(), "1.00, 0.50, 0.00");
    }

    // 缺少前导 # 或长度不对的输入应被拒绝
    #[test]
    fn test_hex_color_rejects_malformed() {
        assert!(HexColor::new("ffffff").is_err());
        assert!(HexColor::new("#fff").is_err());
        assert!(HexColor::new("#gggggg").is_err());
        assert!(HexColor::new("#ffffff00").is_err());
    }

    // 大小写不敏感，内部规范化为小写
    #[test]
    fn test_hex_color_normalizes_case() {
        let color = HexColor::new("#AbCdEf").unwrap();
        assert_eq!(color.as_str(), "#abcdef");
    }

    // 对齐方式的字符串表示与脚本中的取值一致
    #[test]
    fn test_alignment_display() {
        assert_eq!(Alignment::Left.to_string(), "left");
        assert_eq!(Alignment::Center.to_string(), "center");
        assert_eq!("CENTER".parse::<Alignment>().unwrap(), Alignment::Center);
    }

    // 默认配置是 1920×1920 左对齐的白字方案
    #[test]
    fn test_default_config() {
        let config = ScriptConfig::default();
        assert_eq!(config.comp_width, 1920);
        assert_eq!(config.comp_height, 1920);
        assert_eq!(config.alignment, Alignment::Left);
        assert_eq!(config.text_color.as_str(), "#ffffff");
    }

    // 配置可以无损地经过 JSON 序列化
    #[test]
    fn test_config_serde_round_trip() {
        let config = ScriptConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ScriptConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
