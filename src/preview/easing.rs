//! 缓动插值原语。
//!
//! 预览的"粘滞滚动"不是物理模拟，而是一段固定时长的三次贝塞尔
//! 缓动过渡，边界条件为（起始值、目标值、时长、缓入缓出曲线）。

/// 一条单位三次贝塞尔缓动曲线，端点固定为 (0,0) 和 (1,1)。
///
/// 与 CSS `cubic-bezier(x1, y1, x2, y2)` 的定义一致。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// 第一个控制点的 x 坐标。
    pub x1: f64,
    /// 第一个控制点的 y 坐标。
    pub y1: f64,
    /// 第二个控制点的 x 坐标。
    pub x2: f64,
    /// 第二个控制点的 y 坐标。
    pub y2: f64,
}

impl CubicBezier {
    /// 预览滚动使用的曲线，对应 `cubic-bezier(0.2, 0.8, 0.2, 1)`：
    /// 快速启动、缓慢收尾，产生粘滞感。
    pub const VISCOUS: Self = Self {
        x1: 0.2,
        y1: 0.8,
        x2: 0.2,
        y2: 1.0,
    };

    fn curve_x(&self, t: f64) -> f64 {
        let one_minus = 1.0 - t;
        3.0 * one_minus * one_minus * t * self.x1 + 3.0 * one_minus * t * t * self.x2 + t * t * t
    }

    fn curve_y(&self, t: f64) -> f64 {
        let one_minus = 1.0 - t;
        3.0 * one_minus * one_minus * t * self.y1 + 3.0 * one_minus * t * t * self.y2 + t * t * t
    }

    fn curve_x_derivative(&self, t: f64) -> f64 {
        let one_minus = 1.0 - t;
        3.0 * one_minus * one_minus * self.x1
            + 6.0 * one_minus * t * (self.x2 - self.x1)
            + 3.0 * t * t * (1.0 - self.x2)
    }

    /// 由横坐标 x 反解曲线参数 t，牛顿迭代失败时退回二分法。
    fn solve_t_for_x(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..8 {
            let x_err = self.curve_x(t) - x;
            if x_err.abs() < 1e-7 {
                return t;
            }
            let d = self.curve_x_derivative(t);
            if d.abs() < 1e-7 {
                break;
            }
            t -= x_err / d;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        t = x;
        while hi - lo > 1e-7 {
            if self.curve_x(t) < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    /// 在归一化进度 `x ∈ [0,1]` 处求缓动输出，端点处取精确值。
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        self.curve_y(self.solve_t_for_x(x))
    }
}

/// 一个朝目标值缓动的标量。
///
/// `retarget` 以当前采样值为新的起点重新开始过渡，因此目标在
/// 过渡中途改变时不会跳变。
#[derive(Debug, Clone, Copy)]
pub struct EasedValue {
    start_value: f64,
    target: f64,
    start_time: f64,
    duration_secs: f64,
    curve: CubicBezier,
}

impl EasedValue {
    /// 创建一个已静止在 `value` 的缓动标量。
    #[must_use]
    pub fn new(value: f64, duration_secs: f64, curve: CubicBezier) -> Self {
        Self {
            start_value: value,
            target: value,
            start_time: 0.0,
            duration_secs,
            curve,
        }
    }

    /// 当前的目标值。
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// 把目标改为 `target`，从 `now` 时刻、当前采样值处重新开始过渡。
    pub fn retarget(&mut self, target: f64, now: f64) {
        if (target - self.target).abs() < f64::EPSILON {
            return;
        }
        self.start_value = self.sample(now);
        self.target = target;
        self.start_time = now;
    }

    /// 立即跳到 `value`，不做过渡。
    pub fn snap_to(&mut self, value: f64) {
        self.start_value = value;
        self.target = value;
        self.start_time = 0.0;
    }

    /// 在 `now` 时刻采样当前值。
    #[must_use]
    pub fn sample(&self, now: f64) -> f64 {
        if self.duration_secs <= 0.0 {
            return self.target;
        }
        let progress = (now - self.start_time) / self.duration_secs;
        if progress >= 1.0 {
            return self.target;
        }
        self.start_value + (self.target - self.start_value) * self.curve.eval(progress)
    }
}
