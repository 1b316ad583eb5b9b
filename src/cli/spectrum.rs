//! # spectrum 子命令 CLI 定义
//!
//! 单条光谱（总强度及激子 / 双激子分量）。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/spectrum.rs`

use super::model::ModelArgs;
use super::sweep::OutputFormat;
use clap::Args;
use std::path::PathBuf;

/// spectrum 子命令参数
#[derive(Args, Debug)]
pub struct SpectrumArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Polarizer angle in degrees (default: --fixed-angle)
    #[arg(long)]
    pub angle: Option<f64>,

    /// Excitation power (default: --fixed-power)
    #[arg(long)]
    pub power: Option<f64>,

    /// Output file (PNG/SVG plot or CSV/XY data); omit to only print the line table
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, env = "EXSPEC_WIDTH", default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, env = "EXSPEC_HEIGHT", default_value_t = 800)]
    pub height: u32,

    /// Plot title (default: describes angle and power)
    #[arg(long)]
    pub title: Option<String>,
}
