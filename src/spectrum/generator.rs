//! # 激子/双激子光谱生成器
//!
//! 将若干洛伦兹线型按偏振角与振幅加权叠加，得到总强度及各分量。
//!
//! ## 模型
//! - Δ = 0 时：`I_X = α·L(E; E_X, Γ_X)`，与角度无关
//! - Δ ≠ 0 时：`I_X = α·[cos²θ·L(E; E_X+Δ/2) + sin²θ·L(E; E_X−Δ/2)]`
//! - 始终：`I_XX = β·[sin²θ·L(E; E_XX+Δ/2) + cos²θ·L(E; E_XX−Δ/2)]`
//! - `I_total = I_X + I_XX`
//!
//! Δ = 0 时 I_XX 的两项中心重合、权重和为 1，同样与角度无关，但保持两项形式。
//!
//! ## 依赖关系
//! - 被 `spectrum/sweep.rs` 和 `commands/spectrum.rs` 调用
//! - 使用 `spectrum/lineshape.rs`
//! - 使用 `models/` 的 EnergyGrid, ModelParameters, Amplitudes

use crate::error::Result;
use crate::models::{Amplitudes, EnergyGrid, ModelParameters};
use crate::spectrum::lineshape::Lineshape;

/// 一次光谱计算的结果，三条序列与能量网格逐点对齐
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumCurve {
    total: Vec<f64>,
    exciton: Vec<f64>,
    biexciton: Vec<f64>,
}

impl SpectrumCurve {
    /// 由激子与双激子分量构造，总强度逐点相加
    fn from_components(exciton: Vec<f64>, biexciton: Vec<f64>) -> Self {
        let total = exciton
            .iter()
            .zip(&biexciton)
            .map(|(x, xx)| x + xx)
            .collect();
        Self {
            total,
            exciton,
            biexciton,
        }
    }

    /// 总强度 I_total
    pub fn total(&self) -> &[f64] {
        &self.total
    }

    /// 激子分量 I_X
    pub fn exciton(&self) -> &[f64] {
        &self.exciton
    }

    /// 双激子分量 I_XX
    pub fn biexciton(&self) -> &[f64] {
        &self.biexciton
    }

    /// 采样点数
    pub fn len(&self) -> usize {
        self.total.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }

    /// 总强度最大值
    pub fn max_intensity(&self) -> f64 {
        self.total.iter().copied().fold(0.0_f64, f64::max)
    }

    /// 总强度峰位 (能量, 强度)，并列时取第一个
    ///
    /// 曲线为空或与网格长度不一致时返回 `None`。
    pub fn peak(&self, grid: &EnergyGrid) -> Option<(f64, f64)> {
        if self.is_empty() || self.len() != grid.len() {
            return None;
        }
        let mut best: Option<(usize, f64)> = None;
        for (i, &value) in self.total.iter().enumerate() {
            match best {
                Some((_, current)) if value <= current => {}
                _ => best = Some((i, value)),
            }
        }
        best.and_then(|(i, value)| grid.values().get(i).map(|&e| (e, value)))
    }
}

/// 计算一条光谱
///
/// `theta` 为偏振角（弧度）。
pub fn generate_spectrum(
    grid: &EnergyGrid,
    params: &ModelParameters,
    theta: f64,
    amplitudes: Amplitudes,
) -> Result<SpectrumCurve> {
    let Amplitudes { alpha, beta } = amplitudes;
    let delta = params.delta;
    let cos2 = theta.cos().powi(2);
    let sin2 = theta.sin().powi(2);

    let exciton: Vec<f64> = if delta == 0.0 {
        let line = Lineshape::new(params.e_x, params.gamma_x)?;
        line.profile(grid).into_iter().map(|v| alpha * v).collect()
    } else {
        let upper = Lineshape::new(params.e_x + delta / 2.0, params.gamma_x)?;
        let lower = Lineshape::new(params.e_x - delta / 2.0, params.gamma_x)?;
        grid.iter()
            .map(|e| alpha * (cos2 * upper.evaluate(e) + sin2 * lower.evaluate(e)))
            .collect()
    };

    // 双激子分支的角度权重与激子相反
    let upper = Lineshape::new(params.e_xx + delta / 2.0, params.gamma_xx)?;
    let lower = Lineshape::new(params.e_xx - delta / 2.0, params.gamma_xx)?;
    let biexciton: Vec<f64> = grid
        .iter()
        .map(|e| beta * (sin2 * upper.evaluate(e) + cos2 * lower.evaluate(e)))
        .collect();

    Ok(SpectrumCurve::from_components(exciton, biexciton))
}

// ─────────────────────────────────────────────────────────────
// 发射谱线列表
// ─────────────────────────────────────────────────────────────

/// 谱线所属分支
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Exciton,
    Biexciton,
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Branch::Exciton => write!(f, "X"),
            Branch::Biexciton => write!(f, "XX"),
        }
    }
}

/// 叠加到光谱中的一条子峰
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionLine {
    pub branch: Branch,
    /// 中心能量（eV）
    pub center: f64,
    /// 线宽 Γ（eV）
    pub gamma: f64,
    /// 有效峰高 = 振幅 × 角度权重
    pub weight: f64,
}

/// 列出 `generate_spectrum` 叠加的全部子峰，分支结构与之相同
pub fn emission_lines(
    params: &ModelParameters,
    theta: f64,
    amplitudes: Amplitudes,
) -> Vec<EmissionLine> {
    let Amplitudes { alpha, beta } = amplitudes;
    let delta = params.delta;
    let cos2 = theta.cos().powi(2);
    let sin2 = theta.sin().powi(2);

    let line = |branch, center, gamma, weight| EmissionLine {
        branch,
        center,
        gamma,
        weight,
    };

    let mut lines = Vec::with_capacity(4);
    if delta == 0.0 {
        lines.push(line(Branch::Exciton, params.e_x, params.gamma_x, alpha));
    } else {
        lines.push(line(
            Branch::Exciton,
            params.e_x + delta / 2.0,
            params.gamma_x,
            alpha * cos2,
        ));
        lines.push(line(
            Branch::Exciton,
            params.e_x - delta / 2.0,
            params.gamma_x,
            alpha * sin2,
        ));
    }
    lines.push(line(
        Branch::Biexciton,
        params.e_xx + delta / 2.0,
        params.gamma_xx,
        beta * sin2,
    ));
    lines.push(line(
        Branch::Biexciton,
        params.e_xx - delta / 2.0,
        params.gamma_xx,
        beta * cos2,
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::lineshape::lorentzian;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn params(delta: f64) -> ModelParameters {
        ModelParameters::new(1.5, 1.8, 0.05, 0.05, delta).unwrap()
    }

    fn grid() -> EnergyGrid {
        EnergyGrid::new(1.2, 2.0, 1000).unwrap()
    }

    #[test]
    fn test_total_is_sum_of_components() {
        let grid = grid();
        for &theta in &[0.0, 0.3, FRAC_PI_4, 1.2, FRAC_PI_2] {
            let curve =
                generate_spectrum(&grid, &params(0.03), theta, Amplitudes::new(10.0, 10.0))
                    .unwrap();
            assert_eq!(curve.len(), grid.len());
            for i in 0..curve.len() {
                assert_eq!(curve.total()[i], curve.exciton()[i] + curve.biexciton()[i]);
            }
        }
    }

    #[test]
    fn test_zero_splitting_is_angle_independent() {
        let grid = grid();
        let amps = Amplitudes::new(1.0, 1.0);
        let at_zero = generate_spectrum(&grid, &params(0.0), 0.0, amps).unwrap();
        let at_right = generate_spectrum(&grid, &params(0.0), FRAC_PI_2, amps).unwrap();

        assert_eq!(at_zero.exciton(), at_right.exciton());
        for (a, b) in at_zero.biexciton().iter().zip(at_right.biexciton()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_splitting_exciton_is_single_line() {
        let grid = grid();
        let curve = generate_spectrum(&grid, &params(0.0), 0.7, Amplitudes::new(2.0, 0.0))
            .unwrap();
        for (e, value) in grid.iter().zip(curve.exciton()) {
            assert_eq!(*value, 2.0 * lorentzian(e, 1.5, 0.05));
        }
    }

    #[test]
    fn test_amplitude_scaling() {
        let grid = grid();
        let p = params(0.03);
        let base = generate_spectrum(&grid, &p, 0.4, Amplitudes::new(1.0, 0.5)).unwrap();
        let doubled = generate_spectrum(&grid, &p, 0.4, Amplitudes::new(2.0, 0.5)).unwrap();
        for (a, b) in base.exciton().iter().zip(doubled.exciton()) {
            assert!((2.0 * a - b).abs() < 1e-12);
        }
        assert_eq!(base.biexciton(), doubled.biexciton());
    }

    #[test]
    fn test_doubling_power_follows_power_laws() {
        let grid = grid();
        let p = params(0.03);
        let scaling = crate::models::PowerScaling::default();
        let low = generate_spectrum(&grid, &p, 0.4, scaling.amplitudes(3.0)).unwrap();
        let high = generate_spectrum(&grid, &p, 0.4, scaling.amplitudes(6.0)).unwrap();
        for i in 0..grid.len() {
            assert!((high.exciton()[i] - 2.0 * low.exciton()[i]).abs() < 1e-12);
            assert!((high.biexciton()[i] - 4.0 * low.biexciton()[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_angle_selects_upper_exciton_line() {
        // θ = 0: 仅 1.515 eV 子峰有权重
        let p = params(0.03);
        let lines = emission_lines(&p, 0.0, Amplitudes::new(1.0, 1.0));
        let exciton: Vec<_> = lines
            .iter()
            .filter(|l| l.branch == Branch::Exciton)
            .collect();
        assert_eq!(exciton.len(), 2);
        assert!((exciton[0].center - 1.515).abs() < 1e-12);
        assert_eq!(exciton[0].weight, 1.0);
        assert!((exciton[1].center - 1.485).abs() < 1e-12);
        assert_eq!(exciton[1].weight, 0.0);

        let grid = EnergyGrid::new(1.4, 1.6, 2001).unwrap();
        let curve = generate_spectrum(&grid, &p, 0.0, Amplitudes::new(1.0, 0.0)).unwrap();
        let (energy, intensity) = curve.peak(&grid).unwrap();
        assert!((energy - 1.515).abs() < 1e-3);
        assert!((intensity - 1.0).abs() < 1e-4);
        // 对称位置 1.485 eV 上无额外子峰，强度只来自 1.515 eV 线的拖尾
        let i_low = grid.iter().position(|e| (e - 1.485).abs() < 5e-5).unwrap();
        let expected = lorentzian(grid.values()[i_low], 1.515, 0.05);
        assert!((curve.exciton()[i_low] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_45_degrees_gives_symmetric_doublet() {
        let p = params(0.03);
        let lines = emission_lines(&p, FRAC_PI_4, Amplitudes::new(1.0, 1.0));
        assert!((lines[0].weight - 0.5).abs() < 1e-12);
        assert!((lines[1].weight - 0.5).abs() < 1e-12);

        // 网格关于 E_X = 1.5 eV 对称
        let grid = EnergyGrid::new(1.4, 1.6, 201).unwrap();
        let mid = 100;
        assert!((grid.values()[mid] - 1.5).abs() < 1e-12);

        let curve = generate_spectrum(&grid, &p, FRAC_PI_4, Amplitudes::new(1.0, 0.0)).unwrap();
        assert!(curve.biexciton().iter().all(|&v| v == 0.0));
        for k in 1..=mid {
            let left = curve.exciton()[mid - k];
            let right = curve.exciton()[mid + k];
            assert!((left - right).abs() < 1e-9, "k = {}", k);
        }
        // 两子峰等高，中点为两线拖尾之和
        let center = curve.exciton()[mid];
        assert!((center - lorentzian(1.5, 1.515, 0.05)).abs() < 1e-9);
    }

    #[test]
    fn test_peak_requires_matching_grid() {
        let curve = generate_spectrum(&grid(), &params(0.03), 0.3, Amplitudes::default()).unwrap();
        let other = EnergyGrid::new(1.2, 2.0, 500).unwrap();
        assert!(curve.peak(&other).is_none());
        assert!(curve.peak(&grid()).is_some());
    }

    #[test]
    fn test_emission_lines_match_branch_structure() {
        assert_eq!(emission_lines(&params(0.0), 0.5, Amplitudes::default()).len(), 3);
        assert_eq!(emission_lines(&params(0.02), 0.5, Amplitudes::default()).len(), 4);
    }

    #[test]
    fn test_emission_lines_reproduce_spectrum() {
        let grid = grid();
        let p = params(0.03);
        let amps = Amplitudes::new(3.0, 0.9);
        let curve = generate_spectrum(&grid, &p, 0.6, amps).unwrap();
        let lines = emission_lines(&p, 0.6, amps);
        for (i, e) in grid.iter().enumerate() {
            let sum: f64 = lines
                .iter()
                .map(|l| l.weight * lorentzian(e, l.center, l.gamma))
                .sum();
            assert!((sum - curve.total()[i]).abs() < 1e-9);
        }
    }
}
