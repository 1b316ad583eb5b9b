//! # 模型参数与扫描配置
//!
//! 激子/双激子光谱模型的参数记录，以及驱动两组扫描的完整配置。
//!
//! ## 参数范围
//! | 参数 | 范围 | 默认值 | 单位 |
//! |---|---|---|---|
//! | E_X | 1.0 – 2.0 | 1.5 | eV |
//! | E_XX | 1.0 – 2.5 | 1.8 | eV |
//! | E_min | 0.8 – 1.5 | 1.2 | eV |
//! | E_max | 1.8 – 2.5 | 2.0 | eV |
//! | Γ_X, Γ_XX | 0.01 – 0.1 | 0.05 | eV |
//! | FSS | 0 – 100 | 30 | meV |
//! | num_angles | 3 – 20 | 7 | |
//! | num_powers | 2 – 10 | 5 | |
//! | max_power | 1 – 100 | 10 | a.u. |
//! | fixed_power | 1 – max_power | 10 | a.u. |
//! | fixed_angle | 0 – 90 | 45 | ° |
//!
//! ## 依赖关系
//! - 被 `cli/` 参数转换使用
//! - 被 `spectrum/` 计算模块使用
//! - 使用 `models/grid.rs` 构造能量网格

use crate::error::{Result, SpectraError};
use crate::models::grid::{EnergyGrid, DEFAULT_POINTS};

// ─────────────────────────────────────────────────────────────
// 参数范围
// ─────────────────────────────────────────────────────────────

pub const E_X_RANGE: (f64, f64) = (1.0, 2.0);
pub const E_XX_RANGE: (f64, f64) = (1.0, 2.5);
pub const E_MIN_RANGE: (f64, f64) = (0.8, 1.5);
pub const E_MAX_RANGE: (f64, f64) = (1.8, 2.5);
pub const GAMMA_RANGE: (f64, f64) = (0.01, 0.1);
pub const FSS_MEV_RANGE: (f64, f64) = (0.0, 100.0);
pub const NUM_ANGLES_RANGE: (usize, usize) = (3, 20);
pub const NUM_POWERS_RANGE: (usize, usize) = (2, 10);
pub const MAX_POWER_RANGE: (f64, f64) = (1.0, 100.0);
pub const MIN_POWER: f64 = 1.0;
pub const ANGLE_RANGE_DEG: (f64, f64) = (0.0, 90.0);

/// meV -> eV
pub const MEV_TO_EV: f64 = 1e-3;

// ─────────────────────────────────────────────────────────────
// 光谱模型参数
// ─────────────────────────────────────────────────────────────

/// 激子/双激子模型参数（能量单位均为 eV）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParameters {
    /// 激子能量 E_X
    pub e_x: f64,
    /// 双激子能量 E_XX
    pub e_xx: f64,
    /// 激子线宽 Γ_X
    pub gamma_x: f64,
    /// 双激子线宽 Γ_XX
    pub gamma_xx: f64,
    /// 精细结构劈裂 Δ（可为 0）
    pub delta: f64,
}

impl ModelParameters {
    /// 创建并校验模型参数
    pub fn new(e_x: f64, e_xx: f64, gamma_x: f64, gamma_xx: f64, delta: f64) -> Result<Self> {
        check_finite("e_x", e_x)?;
        check_finite("e_xx", e_xx)?;
        check_linewidth("gamma_x", gamma_x)?;
        check_linewidth("gamma_xx", gamma_xx)?;
        check_finite("delta", delta)?;
        if delta < 0.0 {
            return Err(SpectraError::invalid(
                "delta",
                format!("fine-structure splitting must be >= 0 (got {})", delta),
            ));
        }

        Ok(Self {
            e_x,
            e_xx,
            gamma_x,
            gamma_xx,
            delta,
        })
    }
}

// ─────────────────────────────────────────────────────────────
// 功率标度
// ─────────────────────────────────────────────────────────────

/// 强度随功率的比例常数：α = k_α·P，β = k_β·P²
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerScaling {
    pub k_alpha: f64,
    pub k_beta: f64,
}

impl Default for PowerScaling {
    fn default() -> Self {
        PowerScaling {
            k_alpha: 1.0,
            k_beta: 0.1,
        }
    }
}

impl PowerScaling {
    /// 由激发功率计算激子/双激子振幅
    pub fn amplitudes(&self, power: f64) -> Amplitudes {
        // 激子线性依赖功率；双激子来自双光子过程，平方依赖
        Amplitudes::new(self.k_alpha * power, self.k_beta * power * power)
    }
}

/// 激子振幅 α 与双激子振幅 β
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amplitudes {
    pub alpha: f64,
    pub beta: f64,
}

impl Amplitudes {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }
}

impl Default for Amplitudes {
    fn default() -> Self {
        Amplitudes::new(1.0, 1.0)
    }
}

// ─────────────────────────────────────────────────────────────
// 扫描配置
// ─────────────────────────────────────────────────────────────

/// 两组扫描（角度扫描、功率扫描）的完整配置
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// 激子能量（eV）
    pub e_x: f64,
    /// 双激子能量（eV）
    pub e_xx: f64,
    /// 能量范围下界（eV）
    pub e_min: f64,
    /// 能量范围上界（eV）
    pub e_max: f64,
    /// 激子线宽（eV）
    pub gamma_x: f64,
    /// 双激子线宽（eV）
    pub gamma_xx: f64,
    /// 精细结构劈裂（meV）
    pub fss_mev: f64,
    /// 角度扫描曲线数
    pub num_angles: usize,
    /// 功率扫描曲线数
    pub num_powers: usize,
    /// 最大功率
    pub max_power: f64,
    /// 角度扫描时固定的功率
    pub fixed_power: f64,
    /// 功率扫描时固定的偏振角（度）
    pub fixed_angle_deg: f64,
    /// 能量网格点数
    pub points: usize,
    /// 功率标度常数
    pub scaling: PowerScaling,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            e_x: 1.5,
            e_xx: 1.8,
            e_min: 1.2,
            e_max: 2.0,
            gamma_x: 0.05,
            gamma_xx: 0.05,
            fss_mev: 30.0,
            num_angles: 7,
            num_powers: 5,
            max_power: 10.0,
            fixed_power: 10.0,
            fixed_angle_deg: 45.0,
            points: DEFAULT_POINTS,
            scaling: PowerScaling::default(),
        }
    }
}

impl SweepConfig {
    /// 校验所有参数是否在允许范围内
    pub fn validate(&self) -> Result<()> {
        check_range("e_x", self.e_x, E_X_RANGE)?;
        check_range("e_xx", self.e_xx, E_XX_RANGE)?;
        check_range("e_min", self.e_min, E_MIN_RANGE)?;
        check_range("e_max", self.e_max, E_MAX_RANGE)?;
        check_range("gamma_x", self.gamma_x, GAMMA_RANGE)?;
        check_range("gamma_xx", self.gamma_xx, GAMMA_RANGE)?;
        check_range("fss", self.fss_mev, FSS_MEV_RANGE)?;
        check_count("num_angles", self.num_angles, NUM_ANGLES_RANGE)?;
        check_count("num_powers", self.num_powers, NUM_POWERS_RANGE)?;
        check_range("max_power", self.max_power, MAX_POWER_RANGE)?;
        check_range("fixed_power", self.fixed_power, (MIN_POWER, self.max_power))?;
        check_range("fixed_angle", self.fixed_angle_deg, ANGLE_RANGE_DEG)?;

        if self.points < 2 {
            return Err(SpectraError::invalid(
                "points",
                format!("grid needs at least 2 points (got {})", self.points),
            ));
        }
        check_positive("k_alpha", self.scaling.k_alpha)?;
        check_positive("k_beta", self.scaling.k_beta)?;

        if self.e_max <= self.e_min {
            return Err(SpectraError::invalid(
                "energy range",
                format!(
                    "E_max ({}) must be greater than E_min ({})",
                    self.e_max, self.e_min
                ),
            ));
        }

        Ok(())
    }

    /// 精细结构劈裂（eV）
    pub fn delta_ev(&self) -> f64 {
        self.fss_mev * MEV_TO_EV
    }

    /// 构造模型参数
    pub fn model(&self) -> Result<ModelParameters> {
        ModelParameters::new(
            self.e_x,
            self.e_xx,
            self.gamma_x,
            self.gamma_xx,
            self.delta_ev(),
        )
    }

    /// 构造能量网格
    pub fn energy_grid(&self) -> Result<EnergyGrid> {
        EnergyGrid::new(self.e_min, self.e_max, self.points)
    }

    /// 参数一览（名称, 当前值, 允许范围, 单位）
    pub fn parameter_rows(&self) -> Vec<ParameterRow> {
        let float = |name: &str, value: f64, range: (f64, f64), unit: &str| ParameterRow {
            name: name.to_string(),
            value: format!("{}", value),
            range: format!("{} – {}", range.0, range.1),
            unit: unit.to_string(),
        };
        let count = |name: &str, value: usize, range: (usize, usize)| ParameterRow {
            name: name.to_string(),
            value: value.to_string(),
            range: format!("{} – {}", range.0, range.1),
            unit: "count".to_string(),
        };

        vec![
            float("E_X", self.e_x, E_X_RANGE, "eV"),
            float("E_XX", self.e_xx, E_XX_RANGE, "eV"),
            float("E_min", self.e_min, E_MIN_RANGE, "eV"),
            float("E_max", self.e_max, E_MAX_RANGE, "eV"),
            float("Γ_X", self.gamma_x, GAMMA_RANGE, "eV"),
            float("Γ_XX", self.gamma_xx, GAMMA_RANGE, "eV"),
            float("FSS", self.fss_mev, FSS_MEV_RANGE, "meV"),
            count("num_angles", self.num_angles, NUM_ANGLES_RANGE),
            count("num_powers", self.num_powers, NUM_POWERS_RANGE),
            float("max_power", self.max_power, MAX_POWER_RANGE, "a.u."),
            float(
                "fixed_power",
                self.fixed_power,
                (MIN_POWER, self.max_power),
                "a.u.",
            ),
            float("fixed_angle", self.fixed_angle_deg, ANGLE_RANGE_DEG, "deg"),
            ParameterRow {
                name: "points".to_string(),
                value: self.points.to_string(),
                range: ">= 2".to_string(),
                unit: "count".to_string(),
            },
            ParameterRow {
                name: "k_alpha".to_string(),
                value: format!("{}", self.scaling.k_alpha),
                range: "> 0".to_string(),
                unit: "1/P".to_string(),
            },
            ParameterRow {
                name: "k_beta".to_string(),
                value: format!("{}", self.scaling.k_beta),
                range: "> 0".to_string(),
                unit: "1/P²".to_string(),
            },
        ]
    }
}

/// 参数表中的一行
#[derive(Debug, Clone)]
pub struct ParameterRow {
    pub name: String,
    pub value: String,
    pub range: String,
    pub unit: String,
}

// ─────────────────────────────────────────────────────────────
// 校验工具
// ─────────────────────────────────────────────────────────────

fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SpectraError::invalid(name, format!("must be finite (got {})", value)))
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    check_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SpectraError::invalid(name, format!("must be > 0 (got {})", value)))
    }
}

/// 线宽必须严格为正，否则洛伦兹线型退化
pub(crate) fn check_linewidth(name: &str, gamma: f64) -> Result<()> {
    check_finite(name, gamma)?;
    if gamma > 0.0 {
        Ok(())
    } else {
        Err(SpectraError::invalid(
            name,
            format!("linewidth must be > 0 eV (got {})", gamma),
        ))
    }
}

pub(crate) fn check_range(name: &str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    check_finite(name, value)?;
    if value < min || value > max {
        return Err(SpectraError::invalid(
            name,
            format!("{} is outside the allowed range [{}, {}]", value, min, max),
        ));
    }
    Ok(())
}

fn check_count(name: &str, value: usize, (min, max): (usize, usize)) -> Result<()> {
    if value < min || value > max {
        return Err(SpectraError::invalid(
            name,
            format!("{} is outside the allowed range [{}, {}]", value, min, max),
        ));
    }
    Ok(())
}
