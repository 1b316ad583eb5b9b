//! # 光谱数据导出
//!
//! 导出扫描曲线与单条光谱到 CSV 和 XY 格式。
//!
//! ## 支持格式
//! - CSV: 第一列为能量，其后每条曲线一列（扫描）或 total/X/XX 三列（单条光谱）
//! - XY: 以 `#` 注释行开头的制表符分隔文本
//! - 汇总 CSV: 每条曲线的扫描值、标签、峰位与峰强
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs` 和 `commands/spectrum.rs` 调用
//! - 使用 `spectrum/sweep.rs` 的 SweepFigure, SweepPanel
//! - 使用 `csv` 与 `serde` 写入 CSV 文件

use crate::error::{Result, SpectraError};
use crate::models::EnergyGrid;
use crate::spectrum::generator::SpectrumCurve;
use crate::spectrum::sweep::{SweepFigure, SweepPanel};

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn write_error(path: &Path, source: std::io::Error) -> SpectraError {
    SpectraError::FileWriteError {
        path: path.display().to_string(),
        source,
    }
}

/// 光谱序列必须与能量网格逐点对齐
fn check_aligned(grid: &EnergyGrid, curve: &SpectrumCurve) -> Result<()> {
    if grid.is_empty() || curve.len() != grid.len() {
        return Err(SpectraError::invalid(
            "spectrum",
            format!(
                "{} samples do not match an energy grid of {} points",
                curve.len(),
                grid.len()
            ),
        ));
    }
    Ok(())
}

/// 导出一张扫描面板为 CSV
pub fn sweep_panel_to_csv(grid: &EnergyGrid, panel: &SweepPanel, output_path: &Path) -> Result<()> {
    for curve in &panel.curves {
        check_aligned(grid, &curve.spectrum)?;
    }
    let mut wtr = csv::Writer::from_path(output_path)?;

    let mut header = vec!["energy_eV".to_string()];
    header.extend(panel.curves.iter().map(|c| c.label.clone()));
    wtr.write_record(&header)?;

    for (i, energy) in grid.iter().enumerate() {
        let mut record = Vec::with_capacity(panel.curves.len() + 1);
        record.push(format!("{:.6}", energy));
        record.extend(
            panel
                .curves
                .iter()
                .map(|c| format!("{:.6}", c.spectrum.total()[i])),
        );
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| write_error(output_path, e))?;
    Ok(())
}

/// 导出一张扫描面板为 XY 格式
pub fn sweep_panel_to_xy(grid: &EnergyGrid, panel: &SweepPanel, output_path: &Path) -> Result<()> {
    for curve in &panel.curves {
        check_aligned(grid, &curve.spectrum)?;
    }
    let file = File::create(output_path).map_err(|e| write_error(output_path, e))?;
    let mut out = BufWriter::new(file);

    let labels: Vec<&str> = panel.curves.iter().map(|c| c.label.as_str()).collect();
    let write_all = |out: &mut BufWriter<File>| -> std::io::Result<()> {
        writeln!(out, "# Exciton/biexciton spectra: {}", panel.title)?;
        writeln!(out, "# Columns: Energy (eV)\t{}", labels.join("\t"))?;
        writeln!(out, "#")?;
        for (i, energy) in grid.iter().enumerate() {
            write!(out, "{:.6}", energy)?;
            for curve in &panel.curves {
                write!(out, "\t{:.6}", curve.spectrum.total()[i])?;
            }
            writeln!(out)?;
        }
        out.flush()
    };

    write_all(&mut out).map_err(|e| write_error(output_path, e))
}

/// 导出单条光谱（total, X, XX）为 CSV
pub fn spectrum_to_csv(grid: &EnergyGrid, curve: &SpectrumCurve, output_path: &Path) -> Result<()> {
    check_aligned(grid, curve)?;
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["energy_eV", "total", "exciton", "biexciton"])?;

    for (i, energy) in grid.iter().enumerate() {
        wtr.write_record(&[
            format!("{:.6}", energy),
            format!("{:.6}", curve.total()[i]),
            format!("{:.6}", curve.exciton()[i]),
            format!("{:.6}", curve.biexciton()[i]),
        ])?;
    }

    wtr.flush().map_err(|e| write_error(output_path, e))?;
    Ok(())
}

/// 导出单条光谱为 XY 格式
pub fn spectrum_to_xy(
    grid: &EnergyGrid,
    curve: &SpectrumCurve,
    description: &str,
    output_path: &Path,
) -> Result<()> {
    check_aligned(grid, curve)?;
    let file = File::create(output_path).map_err(|e| write_error(output_path, e))?;
    let mut out = BufWriter::new(file);

    let write_all = |out: &mut BufWriter<File>| -> std::io::Result<()> {
        writeln!(out, "# Exciton/biexciton spectrum: {}", description)?;
        writeln!(out, "# Columns: Energy (eV)\tI_total\tI_X\tI_XX")?;
        writeln!(out, "#")?;
        for (i, energy) in grid.iter().enumerate() {
            writeln!(
                out,
                "{:.6}\t{:.6}\t{:.6}\t{:.6}",
                energy,
                curve.total()[i],
                curve.exciton()[i],
                curve.biexciton()[i]
            )?;
        }
        out.flush()
    };

    write_all(&mut out).map_err(|e| write_error(output_path, e))
}

// ─────────────────────────────────────────────────────────────
// 曲线汇总
// ─────────────────────────────────────────────────────────────

/// 汇总表中的一行
#[derive(Debug, Clone, Serialize)]
pub struct CurveSummary {
    pub sweep: &'static str,
    pub value: f64,
    pub label: String,
    pub color: String,
    pub peak_energy_ev: f64,
    pub peak_intensity: f64,
}

/// 为两张面板的每条曲线生成汇总
pub fn summarize(figure: &SweepFigure) -> Vec<CurveSummary> {
    figure
        .panels()
        .into_iter()
        .flat_map(|panel| {
            panel.curves.iter().map(move |curve| {
                let (peak_energy_ev, peak_intensity) =
                    curve.spectrum.peak(&figure.grid).unwrap_or((f64::NAN, 0.0));
                CurveSummary {
                    sweep: panel.kind.short_name(),
                    value: curve.value,
                    label: curve.label.clone(),
                    color: curve.color.to_hex(),
                    peak_energy_ev,
                    peak_intensity,
                }
            })
        })
        .collect()
}

/// 导出曲线汇总为 CSV
pub fn summary_to_csv(summary: &[CurveSummary], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for row in summary {
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(|e| write_error(output_path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SweepConfig;
    use crate::spectrum::sweep::run_sweeps;
    use std::fs;

    fn small_figure() -> SweepFigure {
        let config = SweepConfig {
            points: 11,
            ..SweepConfig::default()
        };
        run_sweeps(&config).unwrap()
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("exspec_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_sweep_panel_csv_shape() {
        let figure = small_figure();
        let path = temp_path("angle.csv");
        sweep_panel_to_csv(&figure.grid, &figure.angle, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with("energy_eV,θ = 0.0°"));
        assert_eq!(lines[1].split(',').count(), 8);
        assert!(lines[1].starts_with("1.200000,"));
        assert!(lines[11].starts_with("2.000000,"));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_sweep_panel_xy_header() {
        let figure = small_figure();
        let path = temp_path("power.xy");
        sweep_panel_to_xy(&figure.grid, &figure.power, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3 + 11);
        assert!(lines[0].contains("Varying Power Levels"));
        assert!(lines[1].ends_with("Power = 10.0"));
        assert_eq!(lines[3].split('\t').count(), 6);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_spectrum_csv_columns() {
        let figure = small_figure();
        let curve = &figure.angle.curves[0].spectrum;
        let path = temp_path("spectrum.csv");
        spectrum_to_csv(&figure.grid, curve, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "energy_eV,total,exciton,biexciton"
        );
        assert_eq!(lines.count(), 11);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_export_rejects_misaligned_grid() {
        let figure = small_figure();
        let other = EnergyGrid::new(1.2, 2.0, 25).unwrap();
        let path = temp_path("misaligned.csv");

        let result = spectrum_to_csv(&other, &figure.angle.curves[0].spectrum, &path);
        assert!(matches!(result, Err(SpectraError::InvalidParameter { .. })));
        assert!(sweep_panel_to_xy(&other, &figure.power, &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_summary_rows() {
        let figure = small_figure();
        let summary = summarize(&figure);
        assert_eq!(summary.len(), 7 + 5);
        assert_eq!(summary[0].sweep, "angle");
        assert_eq!(summary[7].sweep, "power");
        assert_eq!(summary[7].value, 1.0);

        let path = temp_path("summary.csv");
        summary_to_csv(&summary, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "sweep,value,label,color,peak_energy_ev,peak_intensity"
        );
        assert_eq!(text.lines().count(), 13);
        fs::remove_file(&path).ok();
    }
}
