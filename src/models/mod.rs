//! # 数据模型模块
//!
//! 定义能量网格、光谱模型参数和扫描配置。
//!
//! ## 依赖关系
//! - 被 `cli/`、`commands/` 和 `spectrum/` 使用
//! - 子模块: grid, parameters

pub mod grid;
pub mod parameters;

pub use grid::{linspace, EnergyGrid};
pub use parameters::{Amplitudes, ModelParameters, PowerScaling, SweepConfig};
