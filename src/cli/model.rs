//! # 模型参数 CLI 定义
//!
//! 所有子命令共享的光谱模型与扫描参数，经 `#[command(flatten)]` 嵌入。
//!
//! ## 依赖关系
//! - 被 `cli/sweep.rs`, `cli/spectrum.rs`, `cli/mod.rs` 使用
//! - 转换为 `models/parameters.rs` 的 SweepConfig

use crate::models::{PowerScaling, SweepConfig};

use clap::Args;

/// 光谱模型与扫描参数
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Exciton energy E_X in eV [1.0, 2.0]
    #[arg(long = "ex", default_value_t = 1.5)]
    pub e_x: f64,

    /// Biexciton energy E_XX in eV [1.0, 2.5]
    #[arg(long = "exx", default_value_t = 1.8)]
    pub e_xx: f64,

    /// Lower bound of the energy axis in eV [0.8, 1.5]
    #[arg(long, default_value_t = 1.2)]
    pub e_min: f64,

    /// Upper bound of the energy axis in eV [1.8, 2.5]
    #[arg(long, default_value_t = 2.0)]
    pub e_max: f64,

    /// Exciton linewidth Γ_X (FWHM) in eV [0.01, 0.1]
    #[arg(long, default_value_t = 0.05)]
    pub gamma_x: f64,

    /// Biexciton linewidth Γ_XX (FWHM) in eV [0.01, 0.1]
    #[arg(long, default_value_t = 0.05)]
    pub gamma_xx: f64,

    /// Fine-structure splitting in meV [0, 100]
    #[arg(long, default_value_t = 30.0)]
    pub fss: f64,

    /// Number of polarizer angles between 0° and 90° [3, 20]
    #[arg(long, default_value_t = 7)]
    pub num_angles: usize,

    /// Number of power levels between 1.0 and --max-power [2, 10]
    #[arg(long, default_value_t = 5)]
    pub num_powers: usize,

    /// Maximum excitation power [1, 100]
    #[arg(long, default_value_t = 10.0)]
    pub max_power: f64,

    /// Excitation power held fixed during the angle sweep [1, max-power]
    #[arg(long, default_value_t = 10.0)]
    pub fixed_power: f64,

    /// Polarizer angle in degrees held fixed during the power sweep [0, 90]
    #[arg(long, default_value_t = 45.0)]
    pub fixed_angle: f64,

    /// Number of points on the energy grid
    #[arg(long, env = "EXSPEC_POINTS", default_value_t = 1000)]
    pub points: usize,

    /// Exciton amplitude per unit power (α = k_α·P)
    #[arg(long, default_value_t = 1.0)]
    pub k_alpha: f64,

    /// Biexciton amplitude per unit power squared (β = k_β·P²)
    #[arg(long, default_value_t = 0.1)]
    pub k_beta: f64,
}

impl ModelArgs {
    /// 转换为扫描配置（尚未校验）
    pub fn to_config(&self) -> SweepConfig {
        SweepConfig {
            e_x: self.e_x,
            e_xx: self.e_xx,
            e_min: self.e_min,
            e_max: self.e_max,
            gamma_x: self.gamma_x,
            gamma_xx: self.gamma_xx,
            fss_mev: self.fss,
            num_angles: self.num_angles,
            num_powers: self.num_powers,
            max_power: self.max_power,
            fixed_power: self.fixed_power,
            fixed_angle_deg: self.fixed_angle,
            points: self.points,
            scaling: PowerScaling {
                k_alpha: self.k_alpha,
                k_beta: self.k_beta,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["exspec", "params"]);
        match cli.command {
            Commands::Params(args) => assert_eq!(args.model.to_config(), SweepConfig::default()),
            _ => panic!("expected params"),
        }
    }

    #[test]
    fn test_flags_reach_config() {
        let cli = Cli::parse_from([
            "exspec",
            "params",
            "--ex",
            "1.6",
            "--fss",
            "0",
            "--num-angles",
            "3",
            "--fixed-angle",
            "30",
            "--k-beta",
            "0.2",
        ]);
        let Commands::Params(args) = cli.command else {
            panic!("expected params");
        };
        let config = args.model.to_config();
        assert_eq!(config.e_x, 1.6);
        assert_eq!(config.fss_mev, 0.0);
        assert_eq!(config.num_angles, 3);
        assert_eq!(config.fixed_angle_deg, 30.0);
        assert_eq!(config.scaling.k_beta, 0.2);
        assert!(config.validate().is_ok());
    }
}
