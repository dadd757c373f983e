#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 提供三维标签图谱 (atlas) 的正交三平面编辑模型:
//! 光标同步与平面间标签插值.
//!
//! 该 crate 只负责编辑逻辑本身. 图形界面渲染, 显微图像格式读取,
//! 配准和三维可视化都由外部调用者负责.
//!
//! # 注意
//!
//! 1. 标签体数据以 `(z, y, x)` 顺序存储, 标签值为 `i32`. 允许负值
//!   (左右半脑镜像标签), 0 为背景.
//! 2. 所有操作都是单线程同步调用. 编辑会话在调用期间独占标签体数据,
//!   多会话并发访问同一标签体不在考虑范围内.
//! 3. 不带 `try_` 前缀的索引访问在越界时 panic, 不会导致内存错误.
//!
//! # 开发计划
//!
//! ### 三个正交平面的坐标转换 ✅
//!
//! `xy`, `xz`, `yz` 三个平面各自有一个显示顺序, 与标准 `(z, y, x)`
//! 顺序之间通过固定的置换互相转换.
//!
//! 实现位于 `atlas-ed/src/data/axis.rs`.
//!
//! ### 光标同步 ✅
//!
//! 任何一个平面视图报告的光标坐标都会被转换为标准坐标,
//! 再分发给三个视图.
//!
//! 实现位于 `atlas-ed/src/sync.rs`.
//!
//! ### 平面间标签插值 ✅
//!
//! 用户在同一方向上手动编辑两个平面后, 用两者之间的形状插值填充中间所有平面.
//! 插值基于有符号距离场, 默认先对齐两个边界形状的质心再混合.
//!
//! 实现位于 `atlas-ed/src/interp/*`.
//!
//! ### 编辑会话与撤销 ✅
//!
//! 插值前将受影响的平面压缩保存, 支持按步撤销.
//!
//! 实现位于 `atlas-ed/src/session.rs` 和 `atlas-ed/src/data/slice/mirror.rs`.
//!
//! ### 多线程填充 ✅
//!
//! 打开 `rayon` feature 后, 中间平面并行填充.

/// 二维索引, 同时也可一定程度上用作非负整数向量.
pub type Idx2d = (usize, usize);

/// 三维索引, 同时也可一定程度上用作非负整数向量.
pub type Idx3d = (usize, usize, usize);

/// 高精度通用二维坐标.
type Idx2dF = (f64, f64);

/// 标签 ID. 0 为背景, 负值代表镜像标签.
pub type LabelId = i32;

type Predicate = fn(LabelId) -> bool;

/// 三维标签体与平面切片.
mod data;

pub use data::axis::PlaneAxis;
pub use data::slice::{ImgWriteVis, PlaneRangeMirror, PlaneSlice, PlaneSliceMut, Rect, RectIter};
pub use data::LabelVolume;

pub mod config;
pub mod consts;

mod error;
pub use error::{EditError, EditResult};

pub mod interp;
pub mod prelude;
pub mod session;
pub mod sync;
