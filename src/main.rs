//! # exspec - 激子/双激子光谱扫描工具
//!
//! 计算激子/双激子模型的合成光致发光光谱，并在两种扫描下绘图：
//! 固定功率改变偏振角，以及固定偏振角改变激发功率。
//!
//! ## 子命令
//! - `sweep`    - 角度扫描与功率扫描并排图 (PNG/SVG) 或数据 (CSV/XY)
//! - `spectrum` - 单条光谱及其激子 / 双激子分量
//! - `params`   - 参数表与范围校验
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   ├── spectrum/   (线型、光谱、扫描、绘图、导出)
//!   ├── models/     (网格、参数、配置)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod models;
mod spectrum;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
