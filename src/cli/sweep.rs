//! # sweep 子命令 CLI 定义
//!
//! 角度扫描与功率扫描并排输出。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/sweep.rs`

use super::model::ModelArgs;
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
    /// CSV data file
    Csv,
    /// XY data file (tab separated, '#' comment header)
    Xy,
}

impl OutputFormat {
    /// 从文件扩展名推断输出格式，默认 PNG
    pub fn from_extension(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("svg") => OutputFormat::Svg,
            Some("csv") => OutputFormat::Csv,
            Some("xy") | Some("dat") | Some("txt") => OutputFormat::Xy,
            _ => OutputFormat::Png,
        }
    }

    /// 对应的文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Csv => "csv",
            OutputFormat::Xy => "xy",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Svg)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// sweep 子命令参数
#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Output file. Data formats write '<stem>_angle.<ext>' and '<stem>_power.<ext>'
    #[arg(short, long, default_value = "exciton_sweeps.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also write a per-curve summary CSV (peak energy and intensity)
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, env = "EXSPEC_WIDTH", default_value_t = 2000)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, env = "EXSPEC_HEIGHT", default_value_t = 1000)]
    pub height: u32,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_extension(Path::new("a.svg")), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_extension(Path::new("a.CSV")), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_extension(Path::new("a.dat")), OutputFormat::Xy);
        assert_eq!(OutputFormat::from_extension(Path::new("figure")), OutputFormat::Png);
    }
}
