//! # 参数扫描驱动
//!
//! 构建两组相互独立的扫描，并将结果组织为两张面板：
//! - 角度扫描：固定功率，偏振角 0° – 90° 等分 N_θ 个
//! - 功率扫描：固定偏振角，功率 1.0 – max_power 等分 N_P 个
//!
//! ## 并行
//! 两组扫描通过 `rayon::join` 同时计算；组内各扫描值使用 rayon 并行迭代，
//! `collect` 保持原始顺序，因此序号、颜色与标签始终一一对应。
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs` 调用
//! - 使用 `spectrum/generator.rs` 计算光谱
//! - 使用 `spectrum/colormap.rs` 分配颜色
//! - 使用 `rayon` 进行并行计算

use crate::error::Result;
use crate::models::{linspace, EnergyGrid, ModelParameters, PowerScaling, SweepConfig};
use crate::spectrum::colormap::{color_for, Ramp, Rgb};
use crate::spectrum::generator::{generate_spectrum, SpectrumCurve};

use rayon::prelude::*;

/// 扫描类型及其固定参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepKind {
    /// 扫描偏振角，功率固定
    Angle { fixed_power: f64 },
    /// 扫描功率，偏振角固定（度）
    Power { fixed_angle_deg: f64 },
}

impl SweepKind {
    /// 该扫描使用的色带
    pub fn ramp(&self) -> Ramp {
        match self {
            SweepKind::Angle { .. } => Ramp::Viridis,
            SweepKind::Power { .. } => Ramp::Plasma,
        }
    }

    /// 曲线图例标签
    pub fn label(&self, value: f64) -> String {
        match self {
            SweepKind::Angle { .. } => format!("θ = {:.1}°", value),
            SweepKind::Power { .. } => format!("Power = {:.1}", value),
        }
    }

    /// 面板标题，注明固定参数
    pub fn title(&self) -> String {
        match self {
            SweepKind::Angle { fixed_power } => {
                format!("Varying Polarizer Angles (Power = {:.1})", fixed_power)
            }
            SweepKind::Power { fixed_angle_deg } => {
                format!("Varying Power Levels (Angle = {:.1}°)", fixed_angle_deg)
            }
        }
    }

    /// 短名称，用于导出文件名和表格
    pub fn short_name(&self) -> &'static str {
        match self {
            SweepKind::Angle { .. } => "angle",
            SweepKind::Power { .. } => "power",
        }
    }
}

/// 扫描中的一条曲线
#[derive(Debug, Clone)]
pub struct SweepCurve {
    /// 扫描值（角度为度，功率为 a.u.）
    pub value: f64,
    /// 图例标签
    pub label: String,
    /// 曲线颜色
    pub color: Rgb,
    /// 光谱
    pub spectrum: SpectrumCurve,
}

/// 一张面板：同一扫描的全部曲线
#[derive(Debug, Clone)]
pub struct SweepPanel {
    pub kind: SweepKind,
    pub title: String,
    /// 按扫描顺序排列
    pub curves: Vec<SweepCurve>,
}

impl SweepPanel {
    /// 面板内所有曲线的最大强度
    pub fn max_intensity(&self) -> f64 {
        self.curves
            .iter()
            .map(|c| c.spectrum.max_intensity())
            .fold(0.0_f64, f64::max)
    }
}

/// 两张并排面板及共享的能量网格
#[derive(Debug, Clone)]
pub struct SweepFigure {
    pub grid: EnergyGrid,
    pub angle: SweepPanel,
    pub power: SweepPanel,
}

impl SweepFigure {
    /// 两张面板共享的强度上限
    pub fn max_intensity(&self) -> f64 {
        self.angle.max_intensity().max(self.power.max_intensity())
    }

    pub fn panels(&self) -> [&SweepPanel; 2] {
        [&self.angle, &self.power]
    }
}

/// 角度扫描
pub fn angle_sweep(
    grid: &EnergyGrid,
    params: &ModelParameters,
    scaling: &PowerScaling,
    fixed_power: f64,
    num_angles: usize,
) -> Result<SweepPanel> {
    let kind = SweepKind::Angle { fixed_power };
    let amplitudes = scaling.amplitudes(fixed_power);
    let angles = linspace(0.0, 90.0, num_angles);

    let curves = angles
        .par_iter()
        .enumerate()
        .map(|(i, &deg)| {
            let spectrum = generate_spectrum(grid, params, deg.to_radians(), amplitudes)?;
            Ok(SweepCurve {
                value: deg,
                label: kind.label(deg),
                color: color_for(i, angles.len(), kind.ramp()),
                spectrum,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SweepPanel {
        kind,
        title: kind.title(),
        curves,
    })
}

/// 功率扫描
pub fn power_sweep(
    grid: &EnergyGrid,
    params: &ModelParameters,
    scaling: &PowerScaling,
    fixed_angle_deg: f64,
    max_power: f64,
    num_powers: usize,
) -> Result<SweepPanel> {
    let kind = SweepKind::Power { fixed_angle_deg };
    let theta = fixed_angle_deg.to_radians();
    let powers = linspace(1.0, max_power, num_powers);

    let curves = powers
        .par_iter()
        .enumerate()
        .map(|(i, &power)| {
            let spectrum = generate_spectrum(grid, params, theta, scaling.amplitudes(power))?;
            Ok(SweepCurve {
                value: power,
                label: kind.label(power),
                color: color_for(i, powers.len(), kind.ramp()),
                spectrum,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SweepPanel {
        kind,
        title: kind.title(),
        curves,
    })
}

/// 校验配置并运行两组扫描
pub fn run_sweeps(config: &SweepConfig) -> Result<SweepFigure> {
    config.validate()?;
    let grid = config.energy_grid()?;
    let params = config.model()?;

    let (angle, power) = rayon::join(
        || {
            angle_sweep(
                &grid,
                &params,
                &config.scaling,
                config.fixed_power,
                config.num_angles,
            )
        },
        || {
            power_sweep(
                &grid,
                &params,
                &config.scaling,
                config.fixed_angle_deg,
                config.max_power,
                config.num_powers,
            )
        },
    );

    Ok(SweepFigure {
        grid,
        angle: angle?,
        power: power?,
    })
}
