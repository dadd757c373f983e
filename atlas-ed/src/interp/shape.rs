//! 两个边界平面掩膜之间的形状插值.

use super::sdf::DistanceField;
use super::InterpStats;
use crate::config::{InterpConfig, InterpMethod};
use crate::{Idx2d, Idx2dF, LabelId, PlaneSlice, PlaneSliceMut, Rect};
use ndarray::Array2;

/// 一个边界平面上目标标签的形状信息.
struct Boundary {
    mask: Array2<bool>,
    sdf: Option<DistanceField>,
    centroid: Option<Idx2dF>,
    bbox: Option<Rect>,
}

impl Boundary {
    fn new(plane: &PlaneSlice, label: LabelId) -> Self {
        let mask = plane.mask(label);
        let sdf = DistanceField::from_mask(&mask.view());
        Self {
            sdf,
            centroid: plane.centroid(label),
            bbox: plane.bbox(label),
            mask,
        }
    }

    /// 实数位置的有符号距离. 空形状处处取 `empty`.
    #[inline]
    fn distance(&self, pos: Idx2dF, empty: f64) -> f64 {
        self.sdf.as_ref().map_or(empty, |s| s.sample(pos))
    }
}

/// 两个边界平面之间的形状插值器.
///
/// 构造完成后不再借用标签体, 因此可以在随后可变地写入中间平面.
pub(crate) struct ShapeInterp {
    lo: Boundary,
    hi: Boundary,
    method: InterpMethod,
    /// 空形状的距离值, 大于平面上任意真实距离.
    empty: f64,
    /// 写入范围.
    region: Rect,
}

impl ShapeInterp {
    /// 由两个边界平面 `lo`, `hi` 上的 `label` 形状构造插值器.
    ///
    /// 两个边界平面上都不存在 `label` 时返回 `None`.
    pub fn new(
        lo: &PlaneSlice,
        hi: &PlaneSlice,
        label: LabelId,
        config: &InterpConfig,
    ) -> Option<Self> {
        debug_assert_eq!(lo.shape(), hi.shape());
        let (lo, hi) = (Boundary::new(lo, label), Boundary::new(hi, label));
        let bbox = match (lo.bbox, hi.bbox) {
            (Some(a), Some(b)) => a.union(&b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => return None,
        };
        let (h, w) = lo.mask.dim();
        Some(Self {
            region: bbox.expand(config.bbox_margin, (h, w)),
            empty: (h + w) as f64,
            method: config.method,
            lo,
            hi,
        })
    }

    /// 写入范围.
    #[inline]
    pub fn region(&self) -> Rect {
        self.region
    }

    /// 在相对位置 `t` (`0 < t < 1`) 的中间平面上, `pos` 是否属于插值形状.
    pub fn is_member(&self, (h, w): Idx2d, t: f64) -> bool {
        let q = (h as f64, w as f64);
        match self.method {
            InterpMethod::Nearest => {
                if t < 0.5 {
                    self.lo.mask[(h, w)]
                } else {
                    self.hi.mask[(h, w)]
                }
            }
            InterpMethod::Sdf => self.blend(q, q, t) < 0.0,
            InterpMethod::AlignedSdf => {
                // 插值质心为 c_lo + t * d. 中间平面上的点 q 对应 lo 上的
                // q - t * d 和 hi 上的 q + (1 - t) * d.
                let (dy, dx) = match (self.lo.centroid, self.hi.centroid) {
                    (Some((ly, lx)), Some((hy, hx))) => (hy - ly, hx - lx),
                    _ => (0.0, 0.0),
                };
                let at_lo = (q.0 - t * dy, q.1 - t * dx);
                let at_hi = (q.0 + (1.0 - t) * dy, q.1 + (1.0 - t) * dx);
                self.blend(at_lo, at_hi, t) < 0.0
            }
        }
    }

    #[inline]
    fn blend(&self, at_lo: Idx2dF, at_hi: Idx2dF, t: f64) -> f64 {
        (1.0 - t) * self.lo.distance(at_lo, self.empty) + t * self.hi.distance(at_hi, self.empty)
    }

    /// 按相对位置 `t` 改写一个中间平面.
    ///
    /// 只在写入范围内操作: 属于插值形状的像素改为 `label`;
    /// 原本为 `label` 但不属于插值形状的像素改为 `background`;
    /// 其他像素保持不变.
    pub fn fill_plane(
        &self,
        plane: &mut PlaneSliceMut,
        t: f64,
        label: LabelId,
        background: LabelId,
    ) -> InterpStats {
        let mut stats = InterpStats {
            planes: 1,
            ..InterpStats::default()
        };
        for pos in self.region.iter() {
            let old = plane[pos];
            if self.is_member(pos, t) {
                if old != label {
                    plane[pos] = label;
                    stats.set += 1;
                }
            } else if old == label {
                plane[pos] = background;
                stats.cleared += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::ShapeInterp;
    use crate::config::{InterpConfig, InterpMethod};
    use crate::{LabelVolume, PlaneAxis, Rect};
    use itertools::iproduct;

    /// 两个平面: 平面 0 上是 (2..5, 2..5) 的方块, 平面 1 上是 (2..5, 10..13) 的方块.
    fn two_squares() -> LabelVolume {
        let mut vol = LabelVolume::zeros((2, 8, 16));
        for (y, x) in iproduct!(2..5, 2..5) {
            vol[(0, y, x)] = 4;
            vol[(1, y, x + 8)] = 4;
        }
        vol
    }

    fn build(vol: &LabelVolume, method: InterpMethod) -> ShapeInterp {
        ShapeInterp::new(
            &vol.plane_at(PlaneAxis::Xy, 0),
            &vol.plane_at(PlaneAxis::Xy, 1),
            4,
            &InterpConfig::with_method(method),
        )
        .unwrap()
    }

    fn members(s: &ShapeInterp, t: f64) -> Vec<(usize, usize)> {
        iproduct!(0..8, 0..16)
            .filter(|p| s.is_member(*p, t))
            .collect()
    }

    #[test]
    fn test_region_is_union_bbox() {
        let vol = two_squares();
        let s = build(&vol, InterpMethod::AlignedSdf);
        assert_eq!(s.region(), Rect::new((2, 2), (5, 13)));
    }

    #[test]
    fn test_limits_match_boundaries() {
        let vol = two_squares();
        for method in InterpMethod::ALL {
            let s = build(&vol, method);
            let lo: Vec<_> = vol.plane_at(PlaneAxis::Xy, 0).label_pos(4);
            let hi: Vec<_> = vol.plane_at(PlaneAxis::Xy, 1).label_pos(4);
            assert_eq!(members(&s, 0.0), lo, "{}", method.name());
            assert_eq!(members(&s, 1.0), hi, "{}", method.name());
        }
    }

    #[test]
    fn test_aligned_translates() {
        let vol = two_squares();
        let s = build(&vol, InterpMethod::AlignedSdf);
        // 正中间: 方块平移 4 个像素.
        let mid = members(&s, 0.5);
        let expect: Vec<_> = iproduct!(2..5, 6..9).collect();
        assert_eq!(mid, expect);
    }

    #[test]
    fn test_plain_sdf_vanishes_between_disjoint_shapes() {
        let vol = two_squares();
        let s = build(&vol, InterpMethod::Sdf);
        assert!(members(&s, 0.5).is_empty());
    }

    #[test]
    fn test_one_sided_shrinks() {
        let mut vol = LabelVolume::zeros((2, 9, 9));
        for (y, x) in iproduct!(1..8, 1..8) {
            vol[(0, y, x)] = 2;
        }
        let s = ShapeInterp::new(
            &vol.plane_at(PlaneAxis::Xy, 0),
            &vol.plane_at(PlaneAxis::Xy, 1),
            2,
            &InterpConfig::default(),
        )
        .unwrap();
        let sizes: Vec<usize> = [0.1, 0.3, 0.5, 0.7, 0.9]
            .iter()
            .map(|&t| iproduct!(0..9, 0..9).filter(|p| s.is_member(*p, t)).count())
            .collect();
        assert!(sizes.windows(2).all(|w| w[0] >= w[1]), "{sizes:?}");
        assert!(sizes[0] > 0);
        assert_eq!(*sizes.last().unwrap(), 0);
    }
}
