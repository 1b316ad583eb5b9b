//! # params 命令实现
//!
//! 校验参数是否在允许范围内，通过后打印解析后的参数表。
//!
//! ## 依赖关系
//! - 使用 `cli/mod.rs` 定义的 ParamsArgs
//! - 使用 `models/parameters.rs` 的 SweepConfig
//! - 使用 `utils/output.rs`

use crate::cli::ParamsArgs;
use crate::error::Result;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 执行 params 命令
pub fn execute(args: ParamsArgs) -> Result<()> {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Parameter")]
        name: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Range")]
        range: String,
        #[tabled(rename = "Unit")]
        unit: String,
    }

    let config = args.model.to_config();
    config.validate()?;

    let rows: Vec<Row> = config
        .parameter_rows()
        .into_iter()
        .map(|p| Row {
            name: p.name,
            value: p.value,
            range: p.range,
            unit: p.unit,
        })
        .collect();

    output::print_header("Model Parameters");
    println!("{}", Table::new(&rows));

    output::print_success("All parameters are within their allowed ranges");
    output::print_info(&format!(
        "FSS = {:.4} eV, α(P_fixed) = {:.3}, β(P_fixed) = {:.3}",
        config.delta_ev(),
        config.scaling.amplitudes(config.fixed_power).alpha,
        config.scaling.amplitudes(config.fixed_power).beta
    ));

    Ok(())
}
