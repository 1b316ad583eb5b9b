//! # spectrum 命令实现
//!
//! 在指定偏振角与激发功率下计算单条光谱。
//!
//! ## 功能
//! - 打印叠加的子峰列表（分支、中心能量、线宽、有效峰高）
//! - 报告总强度峰位
//! - 输出图像 (PNG/SVG，含 total/X/XX 三条曲线) 或数据文件 (CSV/XY)
//!
//! ## 依赖关系
//! - 使用 `cli/spectrum.rs` 定义的 SpectrumArgs
//! - 使用 `spectrum/generator.rs`, `spectrum/plot.rs`, `spectrum/export.rs`
//! - 使用 `utils/output.rs`

use crate::cli::spectrum::SpectrumArgs;
use crate::cli::sweep::OutputFormat;
use crate::error::Result;
use crate::models::parameters::{check_range, ANGLE_RANGE_DEG, MIN_POWER};
use crate::spectrum::{emission_lines, export, generate_spectrum, plot, EmissionLine};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 执行 spectrum 命令
pub fn execute(args: SpectrumArgs) -> Result<()> {
    output::print_header("Exciton / Biexciton Spectrum");

    let config = args.model.to_config();
    config.validate()?;

    let angle_deg = args.angle.unwrap_or(config.fixed_angle_deg);
    let power = args.power.unwrap_or(config.fixed_power);
    check_range("angle", angle_deg, ANGLE_RANGE_DEG)?;
    check_range("power", power, (MIN_POWER, config.max_power))?;

    let grid = config.energy_grid()?;
    let params = config.model()?;
    let amplitudes = config.scaling.amplitudes(power);
    let theta = angle_deg.to_radians();

    output::print_info(&format!(
        "θ = {:.1}°, P = {:.1} (α = {:.3}, β = {:.3})",
        angle_deg, power, amplitudes.alpha, amplitudes.beta
    ));

    let curve = generate_spectrum(&grid, &params, theta, amplitudes)?;
    print_line_table(&emission_lines(&params, theta, amplitudes));

    if let Some((energy, intensity)) = curve.peak(&grid) {
        output::print_success(&format!(
            "Peak of I_total at {:.4} eV (I = {:.3})",
            energy, intensity
        ));
    }

    let Some(ref output_path) = args.output else {
        return Ok(());
    };

    let description = format!("θ = {:.1}°, Power = {:.1}", angle_deg, power);
    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_extension(output_path));

    if args.title.is_some() && !format.is_image() {
        output::print_warning("--title only applies to PNG/SVG output, ignoring");
    }

    match format {
        OutputFormat::Png | OutputFormat::Svg => {
            let title = args
                .title
                .clone()
                .unwrap_or_else(|| format!("Intensity vs Energy ({})", description));
            plot::generate_spectrum_plot(
                &grid,
                &curve,
                &title,
                output_path,
                args.width,
                args.height,
                format == OutputFormat::Svg,
            )?;
        }
        OutputFormat::Csv => export::spectrum_to_csv(&grid, &curve, output_path)?,
        OutputFormat::Xy => export::spectrum_to_xy(&grid, &curve, &description, output_path)?,
    }

    output::print_saved(
        &format!("spectrum ({})", format),
        &output_path.display().to_string(),
    );

    Ok(())
}

/// 打印子峰表格
fn print_line_table(lines: &[EmissionLine]) {
    #[derive(Tabled)]
    struct LineRow {
        #[tabled(rename = "Branch")]
        branch: String,
        #[tabled(rename = "E0 (eV)")]
        center: String,
        #[tabled(rename = "Γ (eV)")]
        gamma: String,
        #[tabled(rename = "Peak weight")]
        weight: String,
    }

    let rows: Vec<LineRow> = lines
        .iter()
        .map(|l| LineRow {
            branch: l.branch.to_string(),
            center: format!("{:.4}", l.center),
            gamma: format!("{:.3}", l.gamma),
            weight: format!("{:.4}", l.weight),
        })
        .collect();

    output::print_header(&format!("{} Emission Lines", rows.len()));
    let table = Table::new(&rows);
    println!("{}", table);
}
