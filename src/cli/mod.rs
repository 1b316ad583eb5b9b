//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `sweep`: 角度扫描 + 功率扫描并排图
//! - `spectrum`: 指定角度与功率的单条光谱
//! - `params`: 打印校验后的参数表
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: model, sweep, spectrum

pub mod model;
pub mod spectrum;
pub mod sweep;

use clap::{Args, Parser, Subcommand};

/// exspec - 激子/双激子光致发光光谱扫描工具
#[derive(Parser)]
#[command(name = "exspec")]
#[command(version)]
#[command(
    about = "Synthetic exciton/biexciton photoluminescence spectra under polarization and power sweeps",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Render the polarization-angle sweep and the power sweep side by side
    Sweep(sweep::SweepArgs),

    /// Compute a single spectrum and show its exciton/biexciton components
    Spectrum(spectrum::SpectrumArgs),

    /// Print the resolved model parameters and their allowed ranges
    Params(ParamsArgs),
}

/// params 子命令参数
#[derive(Args, Debug)]
pub struct ParamsArgs {
    #[command(flatten)]
    pub model: model::ModelArgs,
}
