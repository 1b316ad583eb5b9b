//! # 光谱计算模块
//!
//! 激子/双激子光致发光光谱的模型计算、参数扫描与输出。
//!
//! ## 子模块
//! - `lineshape`: 峰值归一化洛伦兹线型
//! - `generator`: 单条光谱的叠加计算
//! - `colormap`: 曲线配色色带
//! - `sweep`: 角度 / 功率扫描驱动
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/` 的网格、参数与配置

pub mod colormap;
pub mod export;
pub mod generator;
pub mod lineshape;
pub mod plot;
pub mod sweep;

pub use generator::{emission_lines, generate_spectrum, EmissionLine};
pub use sweep::run_sweeps;
