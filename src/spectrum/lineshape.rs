//! # 洛伦兹线型
//!
//! 峰值归一化的洛伦兹函数：
//!
//! ```text
//! L(E) = (Γ/2)² / ((E − E0)² + (Γ/2)²)
//! ```
//!
//! L(E0) = 1，峰高与 Γ 无关；面积随 Γ 线性增长（非面积归一化）。
//!
//! ## 依赖关系
//! - 被 `spectrum/generator.rs` 调用
//! - 使用 `models/grid.rs` 的 EnergyGrid

use crate::error::Result;
use crate::models::parameters::check_linewidth;
use crate::models::EnergyGrid;

/// 洛伦兹线型（中心 E0，半高全宽 Γ）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lineshape {
    center: f64,
    gamma: f64,
}

impl Lineshape {
    /// 创建线型，Γ 必须严格为正
    pub fn new(center: f64, gamma: f64) -> Result<Self> {
        check_linewidth("gamma", gamma)?;
        Ok(Self { center, gamma })
    }

    /// 在单个能量点求值
    pub fn evaluate(&self, energy: f64) -> f64 {
        lorentzian(energy, self.center, self.gamma)
    }

    /// 在整个能量网格上求值
    pub fn profile(&self, grid: &EnergyGrid) -> Vec<f64> {
        grid.iter().map(|e| self.evaluate(e)).collect()
    }
}

/// 标量形式的洛伦兹函数
///
/// 调用方需保证 `gamma > 0`；经过校验的入口请使用 [`Lineshape::new`]。
pub fn lorentzian(energy: f64, center: f64, gamma: f64) -> f64 {
    let hw = gamma / 2.0;
    let delta = energy - center;
    hw * hw / (delta * delta + hw * hw)
}
