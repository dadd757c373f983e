use std::collections::BTreeSet;
use std::ops::{Index, IndexMut};

use ndarray::{Array3, ArrayView, ArrayView3, ArrayViewMut, ArrayViewMut3, Axis, Ix3};

use crate::error::{EditError, EditResult};
use crate::{Idx3d, LabelId, Predicate};

pub mod axis;
pub mod slice;

use axis::PlaneAxis;
use slice::{PlaneSlice, PlaneSliceMut};

/// 三维标签体, 按 `(z, y, x)` 顺序存储 `i32` 标签值.
///
/// 标签体由编辑会话独占持有; 核心算法只在调用方给定的区域内读写体素.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelVolume {
    data: Array3<LabelId>,
}

impl Index<Idx3d> for LabelVolume {
    type Output = LabelId;

    #[inline]
    fn index(&self, index: Idx3d) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<Idx3d> for LabelVolume {
    #[inline]
    fn index_mut(&mut self, index: Idx3d) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl From<Array3<LabelId>> for LabelVolume {
    #[inline]
    fn from(data: Array3<LabelId>) -> Self {
        Self::from_array(data)
    }
}

impl LabelVolume {
    /// 由 `(z, y, x)` 顺序的数组直接创建标签体.
    ///
    /// 非标准内存布局的数组会被复制为行优先布局.
    pub fn from_array(data: Array3<LabelId>) -> Self {
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().to_owned()
        };
        debug_assert!(data.is_standard_layout());
        Self { data }
    }

    /// 创建形状为 `shape`, 全为背景的标签体.
    #[inline]
    pub fn zeros(shape: Idx3d) -> Self {
        Self {
            data: Array3::zeros(shape),
        }
    }

    /// 获取数据形状大小 `(z, y, x)`.
    #[inline]
    pub fn shape(&self) -> Idx3d {
        self.data.dim()
    }

    /// 获取数据体素个数.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 检查索引是否合法.
    #[inline]
    pub fn check(&self, (z0, y0, x0): &Idx3d) -> bool {
        let (z, y, x) = self.shape();
        *z0 < z && *y0 < y && *x0 < x
    }

    /// 获取给定位置的标签值. 越界时返回 `None`.
    #[inline]
    pub fn get(&self, pos: Idx3d) -> Option<&LabelId> {
        self.data.get(pos)
    }

    /// 获取 `axis` 方向上的平面个数.
    #[inline]
    pub fn plane_len(&self, axis: PlaneAxis) -> usize {
        axis.plane_len(self.shape())
    }

    /// 按 `axis` 的显示顺序获得整个标签体的不可变视图.
    /// 视图第 0 维即为平面序号.
    #[inline]
    pub fn view_along(&self, axis: PlaneAxis) -> ArrayView3<'_, LabelId> {
        self.data.view().permuted_axes(axis.permutation())
    }

    /// 按 `axis` 的显示顺序获得整个标签体的可变视图.
    /// 视图第 0 维即为平面序号.
    #[inline]
    pub fn view_along_mut(&mut self, axis: PlaneAxis) -> ArrayViewMut3<'_, LabelId> {
        self.data.view_mut().permuted_axes(axis.permutation())
    }

    /// 获取 `axis` 方向上第 `index` 个平面的不可变视图.
    ///
    /// 当 `index` 越界时 panic.
    #[inline]
    pub fn plane_at(&self, axis: PlaneAxis, index: usize) -> PlaneSlice<'_> {
        PlaneSlice::new(self.data.index_axis(Axis(axis.fixed_axis()), index))
    }

    /// 获取 `axis` 方向上第 `index` 个平面的可变视图.
    ///
    /// 当 `index` 越界时 panic.
    #[inline]
    pub fn plane_at_mut(&mut self, axis: PlaneAxis, index: usize) -> PlaneSliceMut<'_> {
        PlaneSliceMut::new(self.data.index_axis_mut(Axis(axis.fixed_axis()), index))
    }

    /// 检查平面序号是否越界, 越界时返回 [`EditError::OutOfRange`].
    pub fn check_plane(&self, axis: PlaneAxis, index: usize) -> EditResult<()> {
        let len = self.plane_len(axis);
        if index < len {
            Ok(())
        } else {
            Err(EditError::OutOfRange { axis, index, len })
        }
    }

    /// 与 [`Self::plane_at`] 相同, 但越界时返回 `Err` 而非 panic.
    #[inline]
    pub fn try_plane_at(&self, axis: PlaneAxis, index: usize) -> EditResult<PlaneSlice<'_>> {
        self.check_plane(axis, index)?;
        Ok(self.plane_at(axis, index))
    }

    /// 获取能按升序迭代 `axis` 方向不可变平面的迭代器.
    #[inline]
    pub fn plane_iter(&self, axis: PlaneAxis) -> impl ExactSizeIterator<Item = PlaneSlice<'_>> {
        self.data
            .axis_iter(Axis(axis.fixed_axis()))
            .map(PlaneSlice::new)
    }

    /// 获取能按升序迭代 `axis` 方向可变平面的迭代器.
    #[inline]
    pub fn plane_iter_mut(
        &mut self,
        axis: PlaneAxis,
    ) -> impl ExactSizeIterator<Item = PlaneSliceMut<'_>> {
        self.data
            .axis_iter_mut(Axis(axis.fixed_axis()))
            .map(PlaneSliceMut::new)
    }

    /// 获得数据的一份不可变 shallow copy.
    #[inline]
    pub fn data(&self) -> ArrayView<'_, LabelId, Ix3> {
        self.data.view()
    }

    /// 获得数据的一份可变 shallow copy.
    #[inline]
    pub fn data_mut(&mut self) -> ArrayViewMut<'_, LabelId, Ix3> {
        self.data.view_mut()
    }

    /// 直接获得底层数据.
    #[inline]
    pub fn into_raw(self) -> Array3<LabelId> {
        self.data
    }

    /// 获取标签体中值为 `label` 的体素个数.
    #[inline]
    pub fn count(&self, label: LabelId) -> usize {
        self.data.iter().filter(|p| **p == label).count()
    }

    /// 按升序获取标签体中出现过的所有标签值 (包括背景).
    pub fn labels(&self) -> Vec<LabelId> {
        self.data
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 将标签体中值为 `old` 的体素全部替换为 `new`.
    ///
    /// 返回总共成功替换的个数.
    pub fn replace(&mut self, old: LabelId, new: LabelId) -> usize {
        let mut cnt = 0usize;
        self.data_mut()
            .iter_mut()
            .filter(|pix| **pix == old)
            .for_each(|p| {
                cnt += 1;
                *p = new;
            });
        cnt
    }

    /// 收集满足谓词 `pred` 的所有体素对应的下标, 结果按行优先存储.
    pub fn filter_pos(&self, pred: Predicate) -> Vec<Idx3d> {
        self.data
            .indexed_iter()
            .filter_map(|(pos, label)| pred(*label).then_some(pos))
            .collect()
    }
}
