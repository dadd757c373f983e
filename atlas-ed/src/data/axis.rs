//! 三个正交观察平面.
//!
//! 标签体以标准的 `(z, y, x)` 顺序存储. 每个观察平面固定一个体轴,
//! 并把剩下两个轴作为二维图像的 (高, 宽). 我们把 "被固定的轴" 放在第一位,
//! 得到该平面的 **显示顺序**:
//!
//! | 平面 | 固定轴 | 显示顺序 |
//! |------|--------|----------|
//! | `xy` | z      | `(z, y, x)` |
//! | `xz` | y      | `(y, z, x)` |
//! | `yz` | x      | `(x, z, y)` |
//!
//! 显示顺序由两次元素交换得到: `xz` 交换第 0, 1 位; `yz` 先交换第 0, 1 位,
//! 再交换第 0, 2 位. 逆变换按相反顺序执行同样的交换.

use crate::Idx3d;
use std::fmt::Formatter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 正交观察平面, 同时也标识了平面法向所在的体轴.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PlaneAxis {
    /// 轴 0, 固定 z. 主视图.
    Xy,

    /// 轴 1, 固定 y.
    Xz,

    /// 轴 2, 固定 x.
    Yz,
}

/// 交换三元组中的两个分量.
#[inline]
fn swap((a, b, c): Idx3d, i: usize, j: usize) -> Idx3d {
    let mut arr = [a, b, c];
    arr.swap(i, j);
    (arr[0], arr[1], arr[2])
}

impl PlaneAxis {
    /// 按轴序排列的全部平面.
    pub const ALL: [PlaneAxis; 3] = [PlaneAxis::Xy, PlaneAxis::Xz, PlaneAxis::Yz];

    /// 轴序号 (0, 1, 2).
    #[inline]
    pub const fn index(&self) -> usize {
        match self {
            PlaneAxis::Xy => 0,
            PlaneAxis::Xz => 1,
            PlaneAxis::Yz => 2,
        }
    }

    /// 由轴序号获得平面. 序号不小于 3 时返回 `None`.
    #[inline]
    pub const fn from_index(index: usize) -> Option<PlaneAxis> {
        match index {
            0 => Some(PlaneAxis::Xy),
            1 => Some(PlaneAxis::Xz),
            2 => Some(PlaneAxis::Yz),
            _ => None,
        }
    }

    /// 平面名称, 如 `"xy"`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            PlaneAxis::Xy => "xy",
            PlaneAxis::Xz => "xz",
            PlaneAxis::Yz => "yz",
        }
    }

    /// 与平面正交的体轴名称, 即被固定的轴: `z`, `y` 或 `x`.
    #[inline]
    pub const fn axis_name(&self) -> &'static str {
        match self {
            PlaneAxis::Xy => "z",
            PlaneAxis::Xz => "y",
            PlaneAxis::Yz => "x",
        }
    }

    /// 将标准 `(z, y, x)` 坐标转换为该平面的显示顺序.
    pub fn to_display(&self, canonical: Idx3d) -> Idx3d {
        match self {
            PlaneAxis::Xy => canonical,
            PlaneAxis::Xz => swap(canonical, 0, 1),
            PlaneAxis::Yz => swap(swap(canonical, 0, 1), 0, 2),
        }
    }

    /// 将该平面显示顺序的坐标转换回标准 `(z, y, x)` 顺序.
    pub fn to_canonical(&self, display: Idx3d) -> Idx3d {
        match self {
            PlaneAxis::Xy => display,
            PlaneAxis::Xz => swap(display, 0, 1),
            PlaneAxis::Yz => swap(swap(display, 0, 2), 0, 1),
        }
    }

    /// 用于 `ndarray::ArrayBase::permuted_axes` 的置换.
    /// 置换后数组第 `k` 维对应原数组第 `permutation()[k]` 维.
    #[inline]
    pub const fn permutation(&self) -> [usize; 3] {
        match self {
            PlaneAxis::Xy => [0, 1, 2],
            PlaneAxis::Xz => [1, 0, 2],
            PlaneAxis::Yz => [2, 0, 1],
        }
    }

    /// 被固定的体轴在标准 `(z, y, x)` 顺序中的位置.
    ///
    /// 剩余两个体轴在显示顺序中保持原有的先后次序, 因此沿该轴取出的二维视图
    /// 可以直接按显示顺序 (高, 宽) 访问.
    #[inline]
    pub const fn fixed_axis(&self) -> usize {
        self.permutation()[0]
    }

    /// 形状为 `shape` 的标签体在该方向上的平面个数.
    #[inline]
    pub fn plane_len(&self, shape: Idx3d) -> usize {
        self.to_display(shape).0
    }

    /// 形状为 `shape` 的标签体在该方向上单个平面的 (高, 宽).
    #[inline]
    pub fn plane_shape(&self, shape: Idx3d) -> (usize, usize) {
        let (_, h, w) = self.to_display(shape);
        (h, w)
    }
}

impl std::fmt::Display for PlaneAxis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
