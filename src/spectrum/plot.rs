//! # 光谱图表生成
//!
//! 使用 `plotters` 库渲染光谱图。
//!
//! ## 功能
//! - 角度扫描 / 功率扫描两张面板并排，共享能量轴范围与强度刻度
//! - 每条曲线带图例标签，颜色取自对应色带
//! - 单条光谱图：总强度与 X / XX 分量
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs` 和 `commands/spectrum.rs` 调用
//! - 使用 `spectrum/sweep.rs` 的 SweepFigure, SweepPanel
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, SpectraError};
use crate::models::EnergyGrid;
use crate::spectrum::colormap::Rgb;
use crate::spectrum::generator::SpectrumCurve;
use crate::spectrum::sweep::{SweepFigure, SweepPanel};

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 整张图的标题
pub const FIGURE_TITLE: &str = "Exciton and Biexciton Intensity Spectra";

const X_DESC: &str = "Energy (eV)";
const Y_DESC: &str = "Intensity (a.u.)";

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.0, c.1, c.2)
    }
}

/// 强度轴上限，留出 5% 余量
fn intensity_ceiling(max_intensity: f64) -> f64 {
    if max_intensity > 0.0 && max_intensity.is_finite() {
        max_intensity * 1.05
    } else {
        1.0
    }
}

/// 生成两组扫描的并排图
pub fn generate_sweep_plot(
    figure: &SweepFigure,
    output_path: &Path,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_sweep_figure(&root, figure)?;
        root.present()
            .map_err(|e| SpectraError::RenderError(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_sweep_figure(&root, figure)?;
        root.present()
            .map_err(|e| SpectraError::RenderError(e.to_string()))?;
    }
    Ok(())
}

/// 绘制并排的两张面板
fn draw_sweep_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &SweepFigure,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| SpectraError::RenderError(format!("{:?}", e)))?;

    let body = root
        .titled(FIGURE_TITLE, ("sans-serif", 32))
        .map_err(|e| SpectraError::RenderError(format!("{:?}", e)))?;

    let y_max = intensity_ceiling(figure.max_intensity());
    let areas = body.split_evenly((1, 2));

    for (i, (area, panel)) in areas.iter().zip(figure.panels()).enumerate() {
        // 第二张面板共享纵轴，省略纵轴标题
        draw_panel(area, panel, &figure.grid, y_max, i == 0)?;
    }

    Ok(())
}

/// 绘制单张扫描面板
fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &SweepPanel,
    grid: &EnergyGrid,
    y_max: f64,
    show_y_desc: bool,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let caption = format!("Intensity vs Energy: {}", panel.title);

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 22).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(grid.min()..grid.max(), 0.0..y_max)
        .map_err(|e| SpectraError::RenderError(format!("{:?}", e)))?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(X_DESC)
            .x_label_style(("sans-serif", 16))
            .y_label_style(("sans-serif", 16))
            .axis_desc_style(("sans-serif", 18));
        if show_y_desc {
            mesh.y_desc(Y_DESC);
        }
        mesh.draw()
            .map_err(|e| SpectraError::RenderError(format!("{:?}", e)))?;
    }

    for curve in &panel.curves {
        let color: RGBColor = curve.color.into();
        chart
            .draw_series(LineSeries::new(
                grid.iter().zip(curve.spectrum.total().iter().copied()),
                color.stroke_width(2),
            ))
            .map_err(|e| SpectraError::RenderError(format!("{:?}", e)))?
            .label(curve.label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", 14))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| SpectraError::RenderError(format!("{:?}", e)))?;

    Ok(())
}

/// 生成单条光谱图（总强度及 X / XX 分量）
pub fn generate_spectrum_plot(
    grid: &EnergyGrid,
    curve: &SpectrumCurve,
    title: &str,
    output_path: &Path,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_spectrum_chart(&root, grid, curve, title)?;
        root.present()
            .map_err(|e| SpectraError::RenderError(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_spectrum_chart(&root, grid, curve, title)?;
        root.present()
            .map_err(|e| SpectraError::RenderError(e.to_string()))?;
    }
    Ok(())
}

/// 绘制单条光谱
fn draw_spectrum_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    grid: &EnergyGrid,
    curve: &SpectrumCurve,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| SpectraError::RenderError(format!("{:?}", e)))?;

    let y_max = intensity_ceiling(curve.max_intensity());

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(grid.min()..grid.max(), 0.0..y_max)
        .map_err(|e| SpectraError::RenderError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| SpectraError::RenderError(format!("{:?}", e)))?;

    let series: [(&str, &[f64], RGBColor, u32); 3] = [
        ("I_total", curve.total(), BLACK, 3),
        ("I_X", curve.exciton(), RGBColor(0, 102, 204), 2),
        ("I_XX", curve.biexciton(), RGBColor(204, 51, 0), 2),
    ];

    for (label, values, color, width) in series {
        chart
            .draw_series(LineSeries::new(
                grid.iter().zip(values.iter().copied()),
                color.stroke_width(width),
            ))
            .map_err(|e| SpectraError::RenderError(format!("{:?}", e)))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| SpectraError::RenderError(format!("{:?}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amplitudes, SweepConfig};
    use crate::spectrum::generator::generate_spectrum;
    use crate::spectrum::sweep::run_sweeps;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("exspec_plot_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_intensity_ceiling() {
        assert!((intensity_ceiling(20.0) - 21.0).abs() < 1e-12);
        assert_eq!(intensity_ceiling(0.0), 1.0);
        assert_eq!(intensity_ceiling(f64::NAN), 1.0);
    }

    #[test]
    fn test_ramp_color_conversion() {
        let color: RGBColor = Rgb(0x44, 0x01, 0x54).into();
        assert_eq!((color.0, color.1, color.2), (0x44, 0x01, 0x54));
    }

    #[test]
    fn test_sweep_figure_svg_contents() {
        let config = SweepConfig {
            points: 200,
            ..SweepConfig::default()
        };
        let figure = run_sweeps(&config).unwrap();
        let path = temp_path("sweeps.svg");
        generate_sweep_plot(&figure, &path, 2000, 1000, true).unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert_eq!(svg.matches(FIGURE_TITLE).count(), 1);
        // 纵轴标题只出现在第一张面板
        assert_eq!(svg.matches(Y_DESC).count(), 1);
        assert_eq!(svg.matches(X_DESC).count(), 2);
        assert!(svg.contains("Intensity vs Energy: Varying Polarizer Angles (Power = 10.0)"));
        assert!(svg.contains("Intensity vs Energy: Varying Power Levels (Angle = 45.0°)"));

        for panel in figure.panels() {
            for curve in &panel.curves {
                assert!(svg.contains(&curve.label), "missing legend {}", curve.label);
            }
        }
        assert!(svg.contains("θ = 0.0°"));
        assert!(svg.contains("θ = 90.0°"));
        assert!(svg.contains("Power = 1.0"));
        assert!(svg.contains("Power = 10.0"));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_spectrum_svg_contents() {
        let grid = EnergyGrid::new(1.2, 2.0, 200).unwrap();
        let params = SweepConfig::default().model().unwrap();
        let curve = generate_spectrum(&grid, &params, 0.5, Amplitudes::new(10.0, 10.0)).unwrap();
        let path = temp_path("spectrum.svg");
        generate_spectrum_plot(&grid, &curve, "Single spectrum", &path, 1200, 800, true).unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Single spectrum"));
        assert!(svg.contains(Y_DESC));
        for label in ["I_total", "I_X", "I_XX"] {
            assert!(svg.contains(label), "missing legend {}", label);
        }
        fs::remove_file(&path).ok();
    }
}
