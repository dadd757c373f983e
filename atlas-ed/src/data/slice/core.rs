use super::Rect;
use crate::{Idx2d, Idx2dF, LabelId};
use ndarray::iter::{Iter, IterMut};
use ndarray::{Array2, ArrayView2, ArrayViewMut2, Ix2};
use std::ops::{Index, IndexMut};

/// 不可变、借用的二维标签平面.
///
/// 平面按所属 [`crate::PlaneAxis`] 的显示顺序以 (高, 宽) 访问.
pub struct PlaneSlice<'a> {
    /// 底层数据的轻量级视图, 借用于 [`crate::LabelVolume`].
    data: ArrayView2<'a, LabelId>,
}

impl Index<Idx2d> for PlaneSlice<'_> {
    type Output = LabelId;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

/// 可变、借用的二维标签平面.
pub struct PlaneSliceMut<'a> {
    /// 底层数据的轻量级视图, 借用于 [`crate::LabelVolume`].
    data: ArrayViewMut2<'a, LabelId>,
}

/// 可变方法集合.
impl<'a> PlaneSliceMut<'a> {
    /// 获得 **底层** 数据的一份可变 shallow copy.
    #[inline]
    pub fn array_view_mut(&mut self) -> ArrayViewMut2<'_, LabelId> {
        self.data.view_mut()
    }

    /// 获取可以迭代并修改平面像素的迭代器.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, LabelId, Ix2> {
        self.data.iter_mut()
    }

    /// 获取给定位置 (高, 宽) 的像素值, 并可就地修改. 越界时返回 `None`.
    #[inline]
    pub fn get_mut(&mut self, pos: Idx2d) -> Option<&mut LabelId> {
        self.data.get_mut(pos)
    }

    /// 将平面中值为 `old` 的像素全部替换为 `new`.
    ///
    /// 返回总共成功替换的个数.
    pub fn replace(&mut self, old: LabelId, new: LabelId) -> usize {
        let mut cnt = 0usize;
        self.iter_mut().filter(|pix| **pix == old).for_each(|p| {
            cnt += 1;
            *p = new;
        });
        cnt
    }

    /// 将 `it` 中的每个索引对应的像素改为 `new`.
    pub fn fill_batch<I: IntoIterator<Item = Idx2d>>(&mut self, it: I, new: LabelId) {
        for pos in it.into_iter() {
            self[pos] = new;
        }
    }

    /// 用 `src` 覆写平面内容. 形状不一致时 panic.
    pub fn assign(&mut self, src: &ArrayView2<LabelId>) {
        self.data.assign(src);
    }
}

impl Index<Idx2d> for PlaneSliceMut<'_> {
    type Output = LabelId;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<Idx2d> for PlaneSliceMut<'_> {
    #[inline]
    fn index_mut(&mut self, index: Idx2d) -> &mut Self::Output {
        &mut self.data[index]
    }
}

/// 标签平面不可变方法集合.
macro_rules! impl_plane_slice_immut {
    ($life: lifetime, $slice: ty, $array: ty) => {
        /// 不可变方法集合.
        impl<$life> $slice {
            /// 直接初始化.
            #[inline]
            pub(crate) fn new(data: $array) -> Self {
                Self { data }
            }

            /// 获得 **底层** 数据的一份不可变 shallow copy.
            #[inline]
            pub fn array_view(&self) -> ArrayView2<'_, LabelId> {
                self.data.view()
            }

            /// 获取可以迭代平面像素的迭代器.
            #[inline]
            pub fn iter(&self) -> Iter<'_, LabelId, Ix2> {
                self.data.iter()
            }

            /// 获取给定位置 (高, 宽) 的像素值. 越界时返回 `None`.
            #[inline]
            pub fn get(&self, pos: Idx2d) -> Option<&LabelId> {
                self.data.get(pos)
            }

            /// 平面的分辨率 (高, 宽).
            #[inline]
            pub fn shape(&self) -> Idx2d {
                self.data.dim()
            }

            /// 平面的像素个数.
            #[inline]
            pub fn size(&self) -> usize {
                let (h, w) = self.shape();
                h * w
            }

            /// 判断一个索引是否合法 (未越界).
            #[inline]
            pub fn check(&self, (h, w): Idx2d) -> bool {
                let (h_len, w_len) = self.shape();
                h < h_len && w < w_len
            }

            /// 统计平面中值为 `label` 的像素总个数.
            #[inline]
            pub fn count(&self, label: LabelId) -> usize {
                self.data.iter().filter(|&p| *p == label).count()
            }

            /// 平面中是否存在值为 `label` 的像素?
            #[inline]
            pub fn contains_label(&self, label: LabelId) -> bool {
                self.data.iter().any(|&p| p == label)
            }

            /// 以行优先规则, 获取能迭代平面所有 `(索引, 标签值)` 的迭代器.
            #[inline]
            pub fn indexed_iter(&self) -> impl Iterator<Item = (Idx2d, &LabelId)> {
                self.data.indexed_iter()
            }

            /// 以行优先规则, 获取值为 `label` 的所有像素索引.
            pub fn label_pos<B: FromIterator<Idx2d>>(&self, label: LabelId) -> B {
                self.data
                    .indexed_iter()
                    .filter_map(|(pos, &p)| (p == label).then_some(pos))
                    .collect()
            }

            /// 获取 `label` 的隶属掩膜. 掩膜形状与平面相同.
            pub fn mask(&self, label: LabelId) -> Array2<bool> {
                self.data.mapv(|p| p == label)
            }

            /// 获取包含所有 `label` 像素的最小矩形. 不存在该标签时返回 `None`.
            #[inline]
            pub fn bbox(&self, label: LabelId) -> Option<Rect> {
                Rect::bounding(
                    self.data
                        .indexed_iter()
                        .filter_map(|(pos, &p)| (p == label).then_some(pos)),
                )
            }

            /// 获取所有 `label` 像素的质心 (高, 宽). 不存在该标签时返回 `None`.
            pub fn centroid(&self, label: LabelId) -> Option<Idx2dF> {
                let (mut n, mut sh, mut sw) = (0u64, 0.0, 0.0);
                for ((h, w), _) in self.indexed_iter().filter(|(_, p)| **p == label) {
                    n += 1;
                    sh += h as f64;
                    sw += w as f64;
                }
                (n != 0).then(|| (sh / n as f64, sw / n as f64))
            }

            /// 克隆自己, 获得一个拥有所有权的二维数组.
            #[inline]
            pub fn to_owned(&self) -> Array2<LabelId> {
                self.data.to_owned()
            }

            /// 获得平面的高.
            #[inline]
            pub fn height(&self) -> usize {
                self.shape().0
            }

            /// 获得平面的宽.
            #[inline]
            pub fn width(&self) -> usize {
                self.shape().1
            }
        }
    };
}

impl_plane_slice_immut!('a, PlaneSlice<'a>, ArrayView2<'a, LabelId>);
impl_plane_slice_immut!('a, PlaneSliceMut<'a>, ArrayViewMut2<'a, LabelId>);

#[cfg(test)]
mod tests {
    use crate::{LabelVolume, PlaneAxis, Rect};

    fn sample() -> LabelVolume {
        let mut vol = LabelVolume::zeros((2, 6, 7));
        let mut plane = vol.plane_at_mut(PlaneAxis::Xy, 1);
        plane.fill_batch([(1, 1), (1, 2), (3, 2), (3, 1)], 5);
        plane[(5, 6)] = -2;
        vol
    }

    #[test]
    fn test_bbox_and_centroid() {
        let vol = sample();
        let plane = vol.plane_at(PlaneAxis::Xy, 1);
        assert_eq!(plane.bbox(5), Some(Rect::new((1, 1), (4, 3))));
        assert_eq!(plane.centroid(5), Some((2.0, 1.5)));
        assert_eq!(plane.bbox(9), None);
        assert_eq!(plane.centroid(9), None);
        assert_eq!(plane.count(5), 4);
        assert!(plane.contains_label(-2));
        assert!(!vol.plane_at(PlaneAxis::Xy, 0).contains_label(5));
    }

    #[test]
    fn test_mask_and_replace() {
        let mut vol = sample();
        let mask = vol.plane_at(PlaneAxis::Xy, 1).mask(5);
        assert_eq!(mask.iter().filter(|m| **m).count(), 4);
        assert!(mask[(3, 2)] && !mask[(0, 0)]);

        let mut plane = vol.plane_at_mut(PlaneAxis::Xy, 1);
        assert_eq!(plane.replace(5, 0), 4);
        assert_eq!(plane.count(5), 0);
        let pos: Vec<_> = plane.label_pos(-2);
        assert_eq!(pos, vec![(5, 6)]);
    }
}
