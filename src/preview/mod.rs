//! 实时预览状态计算。
//!
//! 本模块把解析出的歌词行、样式配置和一个单调递增的播放时钟
//! 映射为每一帧的可视状态（位置、缩放、不透明度、模糊、逐字填充），
//! 供任意 UI 渲染层使用。所有计算都是确定性的纯函数；唯一的可变
//! 状态是 [`PreviewState`] 持有的时钟和滚动缓动值。

pub mod easing;

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    config::ScriptConfig,
    parser::LrcLine,
    preview::easing::{CubicBezier, EasedValue},
};

/// 播放到最后一行之后继续运行的宽限时长（秒），超过即回绕到 0。
pub const LOOP_GRACE_SECS: f64 = 10.0;

/// 最后一行的填充时间窗口（秒），因为它没有"下一行"作为终点。
pub const LAST_LINE_FILL_WINDOW_SECS: f64 = 5.0;

/// 粘滞滚动过渡的时长（秒）。
pub const SCROLL_TRANSITION_SECS: f64 = 1.2;

/// 预览的播放时钟。
///
/// 自由运行：播放时按墙钟速率前进，到达最后一行时间戳加宽限
/// 窗口后回绕到 0，形成可无限重启的循环。
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewClock {
    elapsed_secs: f64,
    playing: bool,
}

impl PreviewClock {
    /// 创建一个停在 0 秒、处于暂停状态的时钟。
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前播放时间（秒）。
    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// 是否正在播放。
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// 切换播放/暂停。暂停会取消下一次帧回调，此外没有其它取消语义。
    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    /// 按偏移量快进/快退，结果不会小于 0。
    pub fn seek(&mut self, offset_secs: f64) {
        self.elapsed_secs = (self.elapsed_secs + offset_secs).max(0.0);
    }

    /// 前进 `delta_secs`。只在播放状态下生效；当时间超过
    /// `last_timestamp + LOOP_GRACE_SECS` 时回绕到 0。
    pub fn tick(&mut self, delta_secs: f64, last_timestamp: Option<f64>) {
        if !self.playing {
            return;
        }
        self.elapsed_secs += delta_secs;
        if let Some(last) = last_timestamp
            && self.elapsed_secs > last + LOOP_GRACE_SECS
        {
            self.elapsed_secs = 0.0;
        }
    }
}

/// 求当前时刻的激活行下标。
///
/// 取满足 `t >= 时间戳` 的最大下标；若还没有任何行开始，返回 0。
/// 每帧重算一次的线性扫描，行数以歌曲长度为上界，开销可以忽略。
#[must_use]
pub fn active_index(lines: &[LrcLine], t: f64) -> usize {
    let mut active = 0;
    for (i, line) in lines.iter().enumerate() {
        if t >= line.timestamp_secs {
            active = i;
        }
    }
    active
}

/// 求一行的填充百分比，范围 [0, 100]。
///
/// 激活行在其时间戳与下一行时间戳之间线性爬升（最后一行使用
/// [`LAST_LINE_FILL_WINDOW_SECS`] 的窗口）；已经唱过的行固定为 100，
/// 还没到的行为 0。
#[must_use]
pub fn fill_percent(lines: &[LrcLine], index: usize, t: f64) -> f64 {
    let Some(line) = lines.get(index) else {
        return 0.0;
    };
    if t < line.timestamp_secs {
        return 0.0;
    }

    let start = line.timestamp_secs;
    let end = lines
        .get(index + 1)
        .map_or(start + LAST_LINE_FILL_WINDOW_SECS, |next| next.timestamp_secs);

    if t >= end {
        return 100.0;
    }
    let duration = end - start;
    if duration <= 0.0 {
        return 100.0;
    }
    ((t - start) / duration * 100.0).clamp(0.0, 100.0)
}

/// 按填充百分比把一行文本切成（已填充, 未填充）两段。
///
/// 切分点落在字素簇边界上，避免把合字或组合字符劈成两半。
/// 渲染层用它实现双层裁剪效果：背景层用未激活色显示未填充部分，
/// 前景层用激活色显示已填充部分并整体上浮。
#[must_use]
pub fn split_at_fill(text: &str, percent: f64) -> (&str, &str) {
    let graphemes: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
    let total = graphemes.len();
    if total == 0 {
        return ("", "");
    }

    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * total as f64).round() as usize;
    if filled >= total {
        return (text, "");
    }
    let byte_index = graphemes[filled].0;
    text.split_at(byte_index)
}

/// 一行歌词在某一瞬间的可视状态。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineVisual {
    /// 对应 [`LrcLine::id`]。
    pub id: usize,
    /// 是否为激活行。
    pub active: bool,
    /// 相对堆叠原点的纵向偏移（像素），等于行号乘以行间距。
    pub offset_y: f64,
    /// 缩放倍数：激活行放大，其余为 1。
    pub scale: f64,
    /// 不透明度（百分比）：激活行 100，其余取配置值。
    pub opacity_percent: f64,
    /// 高斯模糊半径：激活行 0，其余取配置值。
    pub blur: f64,
    /// 填充百分比，见 [`fill_percent`]。
    pub fill_percent: f64,
    /// 已填充（前景）文字层的上浮距离，仅激活行非零。
    pub lift: f64,
}

/// 一帧完整的预览状态。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewFrame {
    /// 本帧对应的播放时间（秒）。
    pub clock_secs: f64,
    /// 激活行在序列中的下标。
    pub active_index: usize,
    /// 整个歌词堆叠的纵向平移（像素），激活行被移到堆叠原点。
    pub stack_offset_y: f64,
    /// 每行的可视状态，顺序与输入序列一致。
    pub lines: Vec<LineVisual>,
}

/// 计算 `t` 时刻的预览帧。纯函数；滚动偏移取未经缓动的目标值。
#[must_use]
pub fn compute_frame(lines: &[LrcLine], config: &ScriptConfig, t: f64) -> PreviewFrame {
    let active = active_index(lines, t);

    let visuals = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let is_active = i == active;
            LineVisual {
                id: line.id,
                active: is_active,
                offset_y: i as f64 * config.spacing,
                scale: if is_active { config.active_scale } else { 1.0 },
                opacity_percent: if is_active {
                    100.0
                } else {
                    config.inactive_opacity
                },
                blur: if is_active { 0.0 } else { config.blur_amount },
                fill_percent: if is_active {
                    fill_percent(lines, i, t)
                } else if t > line.timestamp_secs {
                    100.0
                } else {
                    0.0
                },
                lift: if is_active { config.text_lift } else { 0.0 },
            }
        })
        .collect();

    PreviewFrame {
        clock_secs: t,
        active_index: active,
        stack_offset_y: -(active as f64) * config.spacing,
        lines: visuals,
    }
}

/// 预览的全部可变状态：播放时钟加上缓动中的滚动偏移。
///
/// 滚动过渡用独立的动画时基驱动，暂停播放不会冻结正在进行的过渡，
/// 与浏览器里 CSS 过渡的行为一致。
#[derive(Debug, Clone)]
pub struct PreviewState {
    clock: PreviewClock,
    scroll: EasedValue,
    anim_time: f64,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewState {
    /// 创建一个停在 0 秒的预览状态。
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: PreviewClock::new(),
            scroll: EasedValue::new(0.0, SCROLL_TRANSITION_SECS, CubicBezier::VISCOUS),
            anim_time: 0.0,
        }
    }

    /// 只读访问时钟。
    #[must_use]
    pub fn clock(&self) -> &PreviewClock {
        &self.clock
    }

    /// 切换播放/暂停。
    pub fn toggle_play(&mut self) {
        self.clock.toggle_play();
    }

    /// 快进/快退，下限为 0 秒。
    pub fn seek(&mut self, offset_secs: f64) {
        self.clock.seek(offset_secs);
    }

    /// 回到初始状态（歌词变化时由会话调用）。
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// 前进一帧并返回该帧的预览状态。
    ///
    /// `delta_secs` 为上一帧以来经过的真实时间。堆叠偏移被替换为
    /// 缓动后的值，其余字段与 [`compute_frame`] 相同。
    pub fn tick(
        &mut self,
        delta_secs: f64,
        lines: &[LrcLine],
        config: &ScriptConfig,
    ) -> PreviewFrame {
        self.anim_time += delta_secs;
        self.clock
            .tick(delta_secs, lines.last().map(|l| l.timestamp_secs));

        let mut frame = compute_frame(lines, config, self.clock.elapsed_secs());
        self.scroll.retarget(frame.stack_offset_y, self.anim_time);
        frame.stack_offset_y = self.scroll.sample(self.anim_time);
        frame
    }
}
