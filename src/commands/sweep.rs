//! # sweep 命令实现
//!
//! 运行角度扫描与功率扫描，输出并排图或数据文件。
//!
//! ## 功能
//! - 校验全部参数后再计算，不输出残缺结果
//! - 并行计算（rayon，`--jobs` 控制线程数）
//! - 输出图像 (PNG/SVG) 或数据文件 (CSV/XY)
//! - 终端打印每条曲线的峰位表格，可选导出汇总 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/sweep.rs` 定义的 SweepArgs
//! - 使用 `spectrum/` 模块进行计算与输出
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::sweep::{OutputFormat, SweepArgs};
use crate::error::{Result, SpectraError};
use crate::spectrum::export::{self, CurveSummary};
use crate::spectrum::{plot, run_sweeps};
use crate::utils::{output, progress};

use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 执行 sweep 命令
pub fn execute(args: SweepArgs) -> Result<()> {
    output::print_header("Exciton / Biexciton Spectral Sweeps");

    let config = args.model.to_config();
    config.validate()?;

    output::print_info(&format!(
        "Energy grid: {:.2} – {:.2} eV ({} points)",
        config.e_min, config.e_max, config.points
    ));
    output::print_info(&format!(
        "E_X = {:.3} eV, E_XX = {:.3} eV, FSS = {:.1} meV",
        config.e_x, config.e_xx, config.fss_mev
    ));

    // 配置 rayon 线程池
    let jobs = if args.jobs == 0 {
        num_cpus::get()
    } else {
        args.jobs
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| SpectraError::Other(format!("Failed to build thread pool: {}", e)))?;

    let figure = pool.install(|| run_sweeps(&config))?;

    output::print_success(&format!(
        "Computed {} angle curves and {} power curves",
        figure.angle.curves.len(),
        figure.power.curves.len()
    ));

    let summary = export::summarize(&figure);
    print_curve_table(&summary);

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_extension(&args.output));

    match format {
        OutputFormat::Png | OutputFormat::Svg => {
            let spinner = progress::create_spinner("Rendering figure...");
            let result = plot::generate_sweep_plot(
                &figure,
                &args.output,
                args.width,
                args.height,
                format == OutputFormat::Svg,
            );
            spinner.finish_and_clear();
            result?;
            output::print_saved("figure", &args.output.display().to_string());
        }
        OutputFormat::Csv | OutputFormat::Xy => {
            for panel in figure.panels() {
                let path = panel_output_path(&args.output, panel.kind.short_name(), format);
                if format == OutputFormat::Csv {
                    export::sweep_panel_to_csv(&figure.grid, panel, &path)?;
                } else {
                    export::sweep_panel_to_xy(&figure.grid, panel, &path)?;
                }
                output::print_saved(panel.kind.short_name(), &path.display().to_string());
            }
        }
    }

    if let Some(ref summary_path) = args.summary {
        export::summary_to_csv(&summary, summary_path)?;
        output::print_saved("summary", &summary_path.display().to_string());
    }

    Ok(())
}

/// 数据格式下每张面板的输出路径：`<stem>_<sweep>.<ext>`
fn panel_output_path(output: &Path, sweep: &str, format: OutputFormat) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("exciton_sweeps");
    output.with_file_name(format!("{}_{}.{}", stem, sweep, format.extension()))
}

/// 打印曲线峰位表格
fn print_curve_table(summary: &[CurveSummary]) {
    #[derive(Tabled)]
    struct CurveRow {
        #[tabled(rename = "Sweep")]
        sweep: String,
        #[tabled(rename = "Curve")]
        label: String,
        #[tabled(rename = "Color")]
        color: String,
        #[tabled(rename = "Peak E (eV)")]
        peak_energy: String,
        #[tabled(rename = "Peak I (a.u.)")]
        peak_intensity: String,
    }

    let rows: Vec<CurveRow> = summary
        .iter()
        .map(|s| CurveRow {
            sweep: s.sweep.to_string(),
            label: s.label.clone(),
            color: s.color.clone(),
            peak_energy: format!("{:.4}", s.peak_energy_ev),
            peak_intensity: format!("{:.3}", s.peak_intensity),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header("Sweep Curves");
        let table = Table::new(&rows);
        println!("{}", table);
        output::print_separator();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_output_path() {
        let path = panel_output_path(Path::new("out/run1.csv"), "angle", OutputFormat::Csv);
        assert_eq!(path, PathBuf::from("out/run1_angle.csv"));

        let path = panel_output_path(Path::new("data.txt"), "power", OutputFormat::Xy);
        assert_eq!(path, PathBuf::from("data_power.xy"));
    }
}
