//! 平面间标签插值.
//!
//! 用户在同一方向上手动编辑两个平面 (边界平面) 后,
//! [`PlaneRangeInterpolator`] 以两个边界平面上目标标签的形状为依据,
//! 改写两者之间的所有平面. 边界平面本身保持不变.

mod bounds;
mod sdf;
mod shape;

pub use bounds::PlaneBounds;
pub use sdf::DistanceField;

use crate::config::InterpConfig;
use crate::consts::FILL_LABEL_TEXT;
use crate::error::{EditError, EditResult};
use crate::{LabelId, LabelVolume, PlaneAxis, PlaneSliceMut};
use log::{debug, trace, warn};
use ndarray::{s, Axis};
use shape::ShapeInterp;
use std::fmt::Formatter;
use std::ops::{Add, AddAssign, Range};

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
    }
}

/// 一次插值的统计信息.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct InterpStats {
    /// 改写的平面数.
    pub planes: usize,
    /// 新写入目标标签的体素数.
    pub set: usize,
    /// 从目标标签改回背景的体素数.
    pub cleared: usize,
}

impl InterpStats {
    /// 是否没有任何体素被改写?
    #[inline]
    pub fn is_unchanged(&self) -> bool {
        self.set == 0 && self.cleared == 0
    }
}

impl Add for InterpStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            planes: self.planes + rhs.planes,
            set: self.set + rhs.set,
            cleared: self.cleared + rhs.cleared,
        }
    }
}

impl AddAssign for InterpStats {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// 外部 "Fill" 按钮的显示状态. 仅供界面参考.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FillAffordance {
    /// 按钮文字.
    pub text: String,
    /// 是否可用.
    pub enabled: bool,
}

/// 等待执行的平面范围插值请求.
///
/// 方向和标签总是同时设置. 记录一个与当前不同的方向或标签时,
/// 已有的边界记录会先被清空.
///
/// 插值成功后不会自动清空边界; 以相同边界重复插值结果不变.
/// 需要时可调用 [`Self::reset`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PlaneRangeInterpolator {
    axis: Option<PlaneAxis>,
    label_id: Option<LabelId>,
    bounds: PlaneBounds,
}

impl PlaneRangeInterpolator {
    /// 空请求.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录用户在 `axis` 方向第 `plane_index` 个平面上编辑了标签 `label_id`.
    ///
    /// 不检查平面序号是否越界, 越界在 [`Self::interpolate`] 时报告.
    pub fn record(&mut self, axis: PlaneAxis, plane_index: usize, label_id: LabelId) {
        if self.axis != Some(axis) || self.label_id != Some(label_id) {
            self.bounds.clear();
            self.axis = Some(axis);
            self.label_id = Some(label_id);
        }
        self.bounds.push(plane_index);
        trace!("recorded plane edit: {self}");
    }

    /// 两个边界平面是否都已记录?
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.bounds.is_full()
    }

    /// 当前方向.
    #[inline]
    pub fn axis(&self) -> Option<PlaneAxis> {
        self.axis
    }

    /// 当前目标标签.
    #[inline]
    pub fn label_id(&self) -> Option<LabelId> {
        self.label_id
    }

    /// 当前边界记录.
    #[inline]
    pub fn bounds(&self) -> PlaneBounds {
        self.bounds
    }

    /// 清空请求.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 插值会改写的平面范围, 即两个边界平面之间 (不含) 的所有平面.
    ///
    /// 未就绪时返回 `None`.
    pub fn fill_range(&self) -> Option<Range<usize>> {
        self.bounds.ordered().map(|(lo, hi)| (lo + 1).min(hi)..hi)
    }

    /// "Fill" 按钮的文字.
    ///
    /// 尚未记录任何平面时为 `Fill Label`,
    /// 否则形如 `Fill z [5, 9]\nID 3`.
    pub fn describe(&self) -> String {
        match (self.axis, self.label_id) {
            (Some(axis), Some(label)) if !self.bounds.is_empty() => {
                format!("Fill {} {}\nID {}", axis.axis_name(), self.bounds, label)
            }
            _ => FILL_LABEL_TEXT.to_string(),
        }
    }

    /// "Fill" 按钮的文字与可用状态. 仅在就绪时可用.
    #[inline]
    pub fn affordance(&self) -> FillAffordance {
        FillAffordance {
            text: self.describe(),
            enabled: self.is_ready(),
        }
    }

    /// 在 `volume` 中以形状插值改写两个边界平面之间的所有平面.
    ///
    /// # 错误
    ///
    /// - 未就绪: [`EditError::InvalidState`];
    /// - 边界平面越界: [`EditError::OutOfRange`];
    /// - 两个边界平面上都没有目标标签: [`EditError::EmptyRegion`].
    ///
    /// 出错时 `volume` 保持不变. 两个边界平面相同时什么都不做, 返回空的统计.
    pub fn interpolate(
        &self,
        volume: &mut LabelVolume,
        config: &InterpConfig,
    ) -> EditResult<InterpStats> {
        let (axis, label, (lo, hi)) = match (self.axis, self.label_id, self.bounds.ordered()) {
            (Some(axis), Some(label), Some(range)) => (axis, label, range),
            _ => {
                return Err(EditError::InvalidState {
                    bounds: self.bounds,
                })
            }
        };
        volume.check_plane(axis, lo)?;
        volume.check_plane(axis, hi)?;
        if lo == hi {
            warn!("boundaries of {axis} both at plane {lo}, nothing to fill");
            return Ok(InterpStats::default());
        }

        let shape = ShapeInterp::new(
            &volume.plane_at(axis, lo),
            &volume.plane_at(axis, hi),
            label,
            config,
        )
        .ok_or(EditError::EmptyRegion {
            label_id: label,
            lo,
            hi,
        })?;
        trace!("fill region {:?} on {axis} planes {}..{hi}", shape.region(), lo + 1);

        let span = (hi - lo) as f64;
        let t = |i: usize| (i + 1) as f64 / span;
        let background = config.background;
        let mut view = volume.view_along_mut(axis);
        let mut inner = view.slice_mut(s![lo + 1..hi, .., ..]);
        let stats = match config.parallel {
            #[cfg(feature = "rayon")]
            true => inner
                .axis_iter_mut(Axis(0))
                .into_par_iter()
                .enumerate()
                .map(|(i, v)| shape.fill_plane(&mut PlaneSliceMut::new(v), t(i), label, background))
                .reduce(InterpStats::default, |a, b| a + b),
            _ => inner
                .axis_iter_mut(Axis(0))
                .enumerate()
                .map(|(i, v)| shape.fill_plane(&mut PlaneSliceMut::new(v), t(i), label, background))
                .fold(InterpStats::default(), |a, b| a + b),
        };

        debug!(
            "filled label {label} on {axis} planes {}..{hi} ({}): +{} -{}",
            lo + 1,
            config.method.name(),
            stats.set,
            stats.cleared
        );
        Ok(stats)
    }
}

/// 形如 `z: [5, 9] (ID: 3)`.
impl std::fmt::Display for PlaneRangeInterpolator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let axis = self.axis.map_or("None", |a| a.axis_name());
        match self.label_id {
            Some(label) => write!(f, "{axis}: {} (ID: {label})", self.bounds),
            None => write!(f, "{axis}: {} (ID: None)", self.bounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InterpStats, PlaneBounds, PlaneRangeInterpolator};
    use crate::config::{InterpConfig, InterpMethod};
    use crate::consts::FILL_LABEL_TEXT;
    use crate::{EditError, LabelVolume, PlaneAxis};
    use itertools::iproduct;

    fn bounds_of(slots: [Option<usize>; 2]) -> PlaneBounds {
        let mut b = PlaneBounds::new();
        for s in slots.into_iter().flatten() {
            b.push(s);
        }
        b
    }

    /// 在平面 `z` 上画圆心 `(cy, cx)`, 半径 3 的圆盘.
    fn disk(vol: &mut LabelVolume, z: usize, (cy, cx): (usize, usize), label: i32) {
        let (_, h, w) = vol.shape();
        for (y, x) in iproduct!(0..h, 0..w) {
            if y.abs_diff(cy).pow(2) + x.abs_diff(cx).pow(2) <= 9 {
                vol[(z, y, x)] = label;
            }
        }
    }

    #[test]
    fn test_record_and_ready() {
        let mut it = PlaneRangeInterpolator::new();
        assert!(!it.is_ready());
        it.record(PlaneAxis::Xy, 5, 3);
        assert!(!it.is_ready());
        it.record(PlaneAxis::Xy, 9, 3);
        assert!(it.is_ready());
        assert_eq!(it.bounds().ordered(), Some((5, 9)));

        // 换标签
        it.record(PlaneAxis::Xy, 11, 4);
        assert!(!it.is_ready());
        assert_eq!(it.bounds(), bounds_of([None, Some(11)]));
    }

    #[test]
    fn test_record_new_axis_clears_bounds() {
        let mut it = PlaneRangeInterpolator::new();
        it.record(PlaneAxis::Xy, 5, 3);
        it.record(PlaneAxis::Xy, 9, 3);
        it.record(PlaneAxis::Xz, 2, 3);
        assert!(!it.is_ready());
        assert_eq!(it.bounds().slots(), [None, Some(2)]);
        assert_eq!(it.axis(), Some(PlaneAxis::Xz));

        // 同一方向同一标签, 最旧的记录被挤出.
        it.record(PlaneAxis::Xz, 4, 3);
        it.record(PlaneAxis::Xz, 8, 3);
        assert_eq!(it.bounds().slots(), [Some(4), Some(8)]);
    }

    #[test]
    fn test_describe_and_display() {
        let mut it = PlaneRangeInterpolator::new();
        assert_eq!(it.describe(), FILL_LABEL_TEXT);
        assert!(!it.affordance().enabled);
        assert_eq!(it.to_string(), "None: [None, None] (ID: None)");

        it.record(PlaneAxis::Xz, 7, -2);
        assert_eq!(it.describe(), "Fill y [None, 7]\nID -2");
        it.record(PlaneAxis::Xz, 3, -2);
        let aff = it.affordance();
        assert_eq!(aff.text, "Fill y [7, 3]\nID -2");
        assert!(aff.enabled);
        assert_eq!(it.to_string(), "y: [7, 3] (ID: -2)");

        it.reset();
        assert_eq!(it, PlaneRangeInterpolator::default());
    }

    #[test]
    fn test_not_ready() {
        let mut vol = LabelVolume::zeros((4, 8, 8));
        disk(&mut vol, 0, (4, 4), 7);
        let before = vol.clone();
        let mut it = PlaneRangeInterpolator::new();
        it.record(PlaneAxis::Xy, 0, 7);
        let err = it.interpolate(&mut vol, &InterpConfig::default());
        assert!(matches!(err, Err(EditError::InvalidState { .. })));
        assert_eq!(vol, before);
    }

    #[test]
    fn test_degenerate_range() {
        let mut vol = LabelVolume::zeros((4, 8, 8));
        disk(&mut vol, 2, (4, 4), 7);
        let before = vol.clone();
        let mut it = PlaneRangeInterpolator::new();
        it.record(PlaneAxis::Xy, 2, 7);
        it.record(PlaneAxis::Xy, 2, 7);
        assert!(it.is_ready());
        let stats = it.interpolate(&mut vol, &InterpConfig::default()).unwrap();
        assert_eq!(stats, InterpStats::default());
        assert_eq!(vol, before);
    }

    #[test]
    fn test_out_of_range_and_empty() {
        let mut vol = LabelVolume::zeros((4, 8, 8));
        let before = vol.clone();
        let mut it = PlaneRangeInterpolator::new();
        it.record(PlaneAxis::Xy, 1, 7);
        it.record(PlaneAxis::Xy, 4, 7);
        assert!(matches!(
            it.interpolate(&mut vol, &InterpConfig::default()),
            Err(EditError::OutOfRange { index: 4, len: 4, .. })
        ));

        it.record(PlaneAxis::Xy, 3, 7);
        assert!(matches!(
            it.interpolate(&mut vol, &InterpConfig::default()),
            Err(EditError::OutOfRange { index: 4, .. })
        ));

        it.record(PlaneAxis::Xy, 0, 7);
        assert!(matches!(
            it.interpolate(&mut vol, &InterpConfig::default()),
            Err(EditError::EmptyRegion { label_id: 7, lo: 0, hi: 3 })
        ));
        assert_eq!(vol, before);
    }

    #[test]
    fn test_moving_disk() {
        for parallel in [false, true] {
            let mut vol = LabelVolume::zeros((8, 32, 32));
            disk(&mut vol, 2, (10, 10), 7);
            disk(&mut vol, 6, (20, 10), 7);
            let before = vol.clone();

            let mut it = PlaneRangeInterpolator::new();
            it.record(PlaneAxis::Xy, 6, 7);
            it.record(PlaneAxis::Xy, 2, 7);
            let config = InterpConfig {
                parallel,
                ..InterpConfig::default()
            };
            let stats = it.interpolate(&mut vol, &config).unwrap();
            assert_eq!(stats.planes, 3);
            assert_eq!(stats.cleared, 0);

            for z in [0, 1, 2, 6, 7] {
                assert_eq!(vol.plane_at(PlaneAxis::Xy, z).to_owned(), before.plane_at(PlaneAxis::Xy, z).to_owned());
            }
            let mut last = 10.0;
            for z in 3..6 {
                let (cy, cx) = vol.plane_at(PlaneAxis::Xy, z).centroid(7).unwrap();
                assert!(cy > last && cy < 20.0, "plane {z}: {cy}");
                assert!((cx - 10.0).abs() < 1e-9);
                last = cy;
            }
            // 正中间的平面恰好是平移后的圆盘.
            assert_eq!(vol.plane_at(PlaneAxis::Xy, 4).count(7), vol.plane_at(PlaneAxis::Xy, 2).count(7));

            // 重复执行, 结果不变.
            let once = vol.clone();
            let again = it.interpolate(&mut vol, &config).unwrap();
            assert!(again.is_unchanged());
            assert_eq!(vol, once);
        }
    }

    #[test]
    fn test_other_labels_preserved() {
        let mut vol = LabelVolume::zeros((5, 16, 16));
        disk(&mut vol, 0, (5, 5), 1);
        disk(&mut vol, 4, (9, 5), 1);
        // 在写入范围外的其他标签, 以及范围内的旧目标标签.
        vol[(2, 15, 15)] = 2;
        vol[(2, 0, 0)] = 1;
        vol[(2, 2, 2)] = 1;
        vol[(2, 7, 12)] = 3;

        let mut it = PlaneRangeInterpolator::new();
        it.record(PlaneAxis::Xy, 0, 1);
        it.record(PlaneAxis::Xy, 4, 1);
        let stats = it.interpolate(&mut vol, &InterpConfig::with_method(InterpMethod::Sdf)).unwrap();
        assert_eq!(stats.planes, 3);
        assert_eq!(vol[(2, 15, 15)], 2);
        assert_eq!(vol[(2, 0, 0)], 1);
        assert_eq!(vol[(2, 7, 12)], 3);
        // (2, 2) 在写入范围内但不在插值形状中.
        assert_eq!(vol[(2, 2, 2)], 0);
        assert_eq!(vol[(2, 7, 5)], 1);
    }
}
