//! 合成标签体 (phantom). 提供已知真值的平面间插值测试用例.

use atlas_ed::prelude::*;
use itertools::iproduct;
use std::ops::Range;

/// 平面上的轴对齐椭圆, 坐标按平面显示顺序 (高, 宽).
#[derive(Copy, Clone, Debug)]
pub struct Ellipse {
    pub center: (f64, f64),
    pub radii: (f64, f64),
}

impl Ellipse {
    /// 圆.
    #[inline]
    pub const fn disk(center: (f64, f64), r: f64) -> Self {
        Self {
            center,
            radii: (r, r),
        }
    }

    /// 在 `self` 与 `other` 之间线性插值.
    pub fn lerp(&self, other: &Ellipse, t: f64) -> Ellipse {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Ellipse {
            center: (
                mix(self.center.0, other.center.0),
                mix(self.center.1, other.center.1),
            ),
            radii: (
                mix(self.radii.0, other.radii.0),
                mix(self.radii.1, other.radii.1),
            ),
        }
    }

    /// 像素 `(h, w)` 是否在椭圆内?
    #[inline]
    pub fn contains(&self, (h, w): Idx2d) -> bool {
        let dy = (h as f64 - self.center.0) / self.radii.0;
        let dx = (w as f64 - self.center.1) / self.radii.1;
        dy * dy + dx * dx <= 1.0
    }

    /// 在平面上以 `label` 画出椭圆.
    pub fn paint(&self, plane: &mut PlaneSliceMut, label: LabelId) {
        if self.radii.0 <= 0.0 || self.radii.1 <= 0.0 {
            return;
        }
        let (h, w) = plane.shape();
        for pos in iproduct!(0..h, 0..w) {
            if self.contains(pos) {
                plane[pos] = label;
            }
        }
    }
}

/// 一个插值测试用例.
#[derive(Clone, Debug)]
pub struct Phantom {
    /// 用例名称.
    pub name: &'static str,
    /// 完整的真值标签体.
    pub truth: LabelVolume,
    /// 插值方向.
    pub axis: PlaneAxis,
    /// 目标标签.
    pub label: LabelId,
    /// 较小的边界平面.
    pub lo: usize,
    /// 较大的边界平面.
    pub hi: usize,
}

impl Phantom {
    /// 两个边界平面之间 (不含) 的平面.
    #[inline]
    pub fn interior(&self) -> Range<usize> {
        self.lo + 1..self.hi
    }

    /// 将真值中间平面上的目标标签清除, 作为插值的输入.
    pub fn sparse(&self) -> LabelVolume {
        let mut vol = self.truth.clone();
        for p in self.interior() {
            vol.plane_at_mut(self.axis, p).replace(self.label, BACKGROUND);
        }
        vol
    }

    /// `vol` 与真值在中间平面上关于目标标签的 Dice 系数.
    ///
    /// 两者都为空时返回 1.
    pub fn dice(&self, vol: &LabelVolume) -> f64 {
        let (mut both, mut a, mut b) = (0usize, 0usize, 0usize);
        for p in self.interior() {
            let truth = self.truth.plane_at(self.axis, p);
            let got = vol.plane_at(self.axis, p);
            for (x, y) in truth.iter().zip(got.iter()) {
                let (x, y) = (*x == self.label, *y == self.label);
                both += usize::from(x && y);
                a += usize::from(x);
                b += usize::from(y);
            }
        }
        match a + b {
            0 => 1.0,
            s => 2.0 * both as f64 / s as f64,
        }
    }
}

/// 在 `axis` 方向 `lo..=hi` 的每个平面上画出从 `from` 渐变到 `to` 的椭圆.
pub fn morphing_ellipse(
    name: &'static str,
    shape: Idx3d,
    axis: PlaneAxis,
    label: LabelId,
    (lo, hi): (usize, usize),
    from: Ellipse,
    to: Ellipse,
) -> Phantom {
    let mut truth = LabelVolume::zeros(shape);
    for p in lo..=hi {
        let t = (p - lo) as f64 / (hi - lo) as f64;
        let mut plane = truth.plane_at_mut(axis, p);
        from.lerp(&to, t).paint(&mut plane, label);
    }
    Phantom {
        name,
        truth,
        axis,
        label,
        lo,
        hi,
    }
}

/// 球心位于 `axis` 方向第 `c` 个平面, 平面内圆心为 `center`, 半径为 `r` 的球.
///
/// 边界平面取球心两侧各 `half` 个平面.
pub fn sphere(
    name: &'static str,
    shape: Idx3d,
    axis: PlaneAxis,
    label: LabelId,
    (c, center): (usize, (f64, f64)),
    r: f64,
    half: usize,
) -> Phantom {
    let mut truth = LabelVolume::zeros(shape);
    for p in 0..axis.plane_len(shape) {
        let d = p as f64 - c as f64;
        if d.abs() <= r {
            Ellipse::disk(center, (r * r - d * d).sqrt())
                .paint(&mut truth.plane_at_mut(axis, p), label);
        }
    }
    Phantom {
        name,
        truth,
        axis,
        label,
        lo: c - half,
        hi: c + half,
    }
}

/// 一组标准用例, 覆盖三个平面方向.
pub fn standard() -> Vec<Phantom> {
    let mut neighbour = morphing_ellipse(
        "neighbour",
        (24, 48, 48),
        PlaneAxis::Xy,
        -3,
        (4, 16),
        Ellipse::disk((16.0, 16.0), 6.0),
        Ellipse::disk((24.0, 22.0), 8.0),
    );
    // 中间平面上紧挨着目标的另一个结构, 插值不应改变它.
    for p in neighbour.interior() {
        let mut plane = neighbour.truth.plane_at_mut(PlaneAxis::Xy, p);
        Ellipse::disk((36.0, 36.0), 5.0).paint(&mut plane, 3);
    }

    vec![
        morphing_ellipse(
            "translate",
            (16, 40, 40),
            PlaneAxis::Xy,
            7,
            (2, 12),
            Ellipse::disk((10.0, 10.0), 4.0),
            Ellipse::disk((28.0, 14.0), 4.0),
        ),
        morphing_ellipse(
            "stretch",
            (32, 20, 36),
            PlaneAxis::Yz,
            2,
            (3, 30),
            Ellipse {
                center: (12.0, 8.0),
                radii: (3.0, 5.0),
            },
            Ellipse {
                center: (18.0, 10.0),
                radii: (8.0, 4.0),
            },
        ),
        sphere(
            "sphere",
            (40, 24, 40),
            PlaneAxis::Xz,
            1,
            (12, (20.0, 20.0)),
            10.0,
            7,
        ),
        neighbour,
    ]
}

#[cfg(test)]
mod tests {
    use super::standard;

    #[test]
    fn test_truth_is_perfect() {
        for case in standard() {
            assert_eq!(case.dice(&case.truth), 1.0, "{}", case.name);
            assert!(case.dice(&case.sparse()) < 0.5, "{}", case.name);
            assert!(case.lo < case.hi && case.hi < case.axis.plane_len(case.truth.shape()));
        }
    }
}
