//! # 能量网格
//!
//! 光子能量采样网格（eV），严格递增，包含两端点。
//!
//! ## 依赖关系
//! - 被 `models/parameters.rs` 构造
//! - 被 `spectrum/` 所有计算模块使用

use crate::error::{Result, SpectraError};

/// 默认采样点数
pub const DEFAULT_POINTS: usize = 1000;

/// 能量网格
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyGrid {
    values: Vec<f64>,
}

impl EnergyGrid {
    /// 在 [min, max] 上线性采样 `count` 个点
    pub fn new(min: f64, max: f64, count: usize) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SpectraError::invalid(
                "energy range",
                format!("bounds must be finite (got {} .. {})", min, max),
            ));
        }
        if max <= min {
            return Err(SpectraError::invalid(
                "energy range",
                format!("E_max ({}) must be greater than E_min ({})", max, min),
            ));
        }
        if count < 2 {
            return Err(SpectraError::invalid(
                "points",
                format!("grid needs at least 2 points (got {})", count),
            ));
        }

        Ok(Self {
            values: linspace(min, max, count),
        })
    }

    /// 网格点
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 下界 E_min
    pub fn min(&self) -> f64 {
        self.values[0]
    }

    /// 上界 E_max
    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

/// 线性等分采样，包含两端点
///
/// `n == 1` 时只返回起点；最后一个点精确等于 `stop`。
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = stop;
            values
        }
    }
}
