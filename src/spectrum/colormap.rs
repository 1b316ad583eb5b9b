//! # 感知均匀色带
//!
//! 按扫描序号为曲线分配颜色：`(index, count, ramp) -> Rgb`。
//! 与绘图库解耦，转换为 plotters 颜色在 `spectrum/plot.rs` 中完成。
//!
//! ## 色带
//! - `Viridis`: 角度扫描（色带 A）
//! - `Plasma`: 功率扫描（色带 B）
//!
//! 两条色带各取 9 个等距控制点，在 sRGB 空间线性插值。
//!
//! ## 依赖关系
//! - 被 `spectrum/sweep.rs` 使用

/// 8 位 sRGB 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` 形式
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// 色带标识
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    Viridis,
    Plasma,
}

const VIRIDIS: [Rgb; 9] = [
    Rgb(0x44, 0x01, 0x54),
    Rgb(0x47, 0x2c, 0x7a),
    Rgb(0x3b, 0x51, 0x8b),
    Rgb(0x2c, 0x71, 0x8e),
    Rgb(0x21, 0x90, 0x8d),
    Rgb(0x27, 0xad, 0x81),
    Rgb(0x5c, 0xc8, 0x63),
    Rgb(0xaa, 0xdc, 0x32),
    Rgb(0xfd, 0xe7, 0x25),
];

const PLASMA: [Rgb; 9] = [
    Rgb(0x0d, 0x08, 0x87),
    Rgb(0x4c, 0x02, 0xa1),
    Rgb(0x7e, 0x03, 0xa8),
    Rgb(0xa9, 0x23, 0x95),
    Rgb(0xcc, 0x47, 0x78),
    Rgb(0xe5, 0x6b, 0x5d),
    Rgb(0xf8, 0x94, 0x41),
    Rgb(0xfd, 0xc3, 0x28),
    Rgb(0xf0, 0xf9, 0x21),
];

impl Ramp {
    fn stops(self) -> &'static [Rgb] {
        match self {
            Ramp::Viridis => &VIRIDIS,
            Ramp::Plasma => &PLASMA,
        }
    }

    /// 在位置 `t ∈ [0, 1]` 处取色，超出范围时截断
    pub fn sample(self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f64;
        let lo = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - lo as f64;

        let (a, b) = (stops[lo], stops[lo + 1]);
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
        Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }
}

/// 第 `index` 条曲线（共 `count` 条）在色带上的位置
///
/// `count <= 1` 时回退到色带起点 0.0。
pub fn ramp_position(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    index as f64 / (count - 1) as f64
}

/// 第 `index` 条曲线的颜色
pub fn color_for(index: usize, count: usize, ramp: Ramp) -> Rgb {
    ramp.sample(ramp_position(index, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(Ramp::Viridis.sample(0.0), Rgb(0x44, 0x01, 0x54));
        assert_eq!(Ramp::Viridis.sample(1.0), Rgb(0xfd, 0xe7, 0x25));
        assert_eq!(Ramp::Plasma.sample(0.0).to_hex(), "#0d0887");
        assert_eq!(Ramp::Plasma.sample(1.0).to_hex(), "#f0f921");
    }

    #[test]
    fn test_ramp_midpoint_hits_control_point() {
        assert_eq!(Ramp::Viridis.sample(0.5), Rgb(0x21, 0x90, 0x8d));
        assert_eq!(Ramp::Plasma.sample(0.5), Rgb(0xcc, 0x47, 0x78));
    }

    #[test]
    fn test_sample_clamps_out_of_range() {
        assert_eq!(Ramp::Plasma.sample(-0.3), Ramp::Plasma.sample(0.0));
        assert_eq!(Ramp::Plasma.sample(1.7), Ramp::Plasma.sample(1.0));
        assert_eq!(Ramp::Viridis.sample(f64::NAN), Ramp::Viridis.sample(0.0));
    }

    #[test]
    fn test_position_fallback_for_single_curve() {
        assert_eq!(ramp_position(0, 1), 0.0);
        assert_eq!(ramp_position(0, 0), 0.0);
        assert_eq!(color_for(0, 1, Ramp::Viridis), Ramp::Viridis.sample(0.0));
    }

    #[test]
    fn test_positions_span_ramp() {
        let positions: Vec<f64> = (0..7).map(|i| ramp_position(i, 7)).collect();
        assert_eq!(positions[0], 0.0);
        assert_eq!(positions[6], 1.0);
        assert!(positions.windows(2).all(|w| w[1] > w[0]));
    }
}
