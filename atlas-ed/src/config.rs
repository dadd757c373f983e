//! 编辑配置.
//!
//! 所有配置都以值的形式显式传入编辑会话或插值器, 不存在进程级的全局状态.

use crate::consts::label::BACKGROUND;
use crate::consts::DEFAULT_HISTORY_LEN;
use crate::LabelId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 两个边界平面之间的形状插值方式.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum InterpMethod {
    /// 先将两个边界形状按质心对齐到插值后的质心, 再混合有符号距离场.
    /// 适合沿平面方向平移的结构.
    #[default]
    AlignedSdf,

    /// 在原位混合有符号距离场. 两个边界形状不重叠时, 中间平面可能为空.
    Sdf,

    /// 直接复制距离较近的边界平面掩膜. 仅作为对照.
    Nearest,
}

impl InterpMethod {
    /// 全部插值方式.
    pub const ALL: [InterpMethod; 3] = [
        InterpMethod::AlignedSdf,
        InterpMethod::Sdf,
        InterpMethod::Nearest,
    ];

    /// 简短名称.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            InterpMethod::AlignedSdf => "aligned-sdf",
            InterpMethod::Sdf => "sdf",
            InterpMethod::Nearest => "nearest",
        }
    }
}

/// 平面间插值配置.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InterpConfig {
    /// 插值方式.
    pub method: InterpMethod,

    /// 被清除的目标标签像素改写成的值.
    pub background: LabelId,

    /// 写入区域在两个边界形状并集外接矩形基础上向外扩展的像素数.
    pub bbox_margin: usize,

    /// 是否并行填充中间平面. 仅在打开 `rayon` feature 时生效.
    pub parallel: bool,
}

impl Default for InterpConfig {
    fn default() -> Self {
        Self {
            method: InterpMethod::default(),
            background: BACKGROUND,
            bbox_margin: 0,
            parallel: true,
        }
    }
}

impl InterpConfig {
    /// 使用给定插值方式, 其余取默认值.
    #[inline]
    pub fn with_method(method: InterpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }
}

/// 编辑会话配置.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EditorConfig {
    /// 插值配置.
    pub interp: InterpConfig,

    /// 最多保留的撤销步数. 为 0 时不保留历史.
    pub history_len: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            interp: InterpConfig::default(),
            history_len: DEFAULT_HISTORY_LEN,
        }
    }
}
