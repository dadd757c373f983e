//! 二维掩膜的有符号欧氏距离场.
//!
//! 距离变换使用 Felzenszwalb & Huttenlocher 的下包络线算法:
//! 先逐列做一维平方距离变换, 再对结果逐行做一次, 得到精确的欧氏距离平方.
//!
//! 有符号距离场约定: 掩膜内部为负, 外部为正, 零等值线位于内外像素中间.
//! 因此内部像素的值不大于 `-0.5`, 外部像素的值不小于 `0.5`,
//! 以 `< 0` 为阈值即可精确还原原掩膜.

use crate::{Idx2d, Idx2dF};
use ndarray::{Array2, ArrayView2, Axis};

/// 一维平方距离变换的工作区, 避免每行每列重新分配.
struct Workspace {
    f: Vec<f64>,
    d: Vec<f64>,
    v: Vec<usize>,
    z: Vec<f64>,
}

impl Workspace {
    fn new(n: usize) -> Self {
        Self {
            f: vec![0.0; n],
            d: vec![0.0; n],
            v: vec![0; n],
            z: vec![0.0; n + 1],
        }
    }

    /// 对 `self.f[..n]` 做一维平方距离变换, 结果写入 `self.d[..n]`.
    fn transform(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let Self { f, d, v, z } = self;
        let sq = |i: usize| (i * i) as f64;
        let intersect = |q: usize, p: usize| {
            ((f[q] + sq(q)) - (f[p] + sq(p))) / (2.0 * (q - p) as f64)
        };

        let mut k = 0usize;
        v[0] = 0;
        z[0] = f64::NEG_INFINITY;
        z[1] = f64::INFINITY;
        for q in 1..n {
            let mut s = intersect(q, v[k]);
            // z[0] 为负无穷, 所以 k 不会越过 0.
            while s <= z[k] {
                k -= 1;
                s = intersect(q, v[k]);
            }
            k += 1;
            v[k] = q;
            z[k] = s;
            z[k + 1] = f64::INFINITY;
        }

        k = 0;
        for (q, dq) in d.iter_mut().enumerate().take(n) {
            while z[k + 1] < q as f64 {
                k += 1;
            }
            *dq = sq(q.abs_diff(v[k])) + f[v[k]];
        }
    }
}

/// 计算每个像素到最近的 `mask == target` 像素的欧氏距离平方.
///
/// 如果不存在这样的像素, 则所有值都不小于 `h * h + w * w + 1`.
fn squared_distance_to(mask: &ArrayView2<bool>, target: bool) -> Array2<f64> {
    let (h, w) = mask.dim();
    let far = (h * h + w * w) as f64 + 1.0;
    let mut out = mask.mapv(|m| if m == target { 0.0 } else { far });
    let mut ws = Workspace::new(h.max(w));

    // 逐列
    for mut col in out.axis_iter_mut(Axis(1)) {
        for (i, p) in col.iter().enumerate() {
            ws.f[i] = *p;
        }
        ws.transform(h);
        for (i, p) in col.iter_mut().enumerate() {
            *p = ws.d[i];
        }
    }
    // 逐行
    for mut row in out.axis_iter_mut(Axis(0)) {
        for (i, p) in row.iter().enumerate() {
            ws.f[i] = *p;
        }
        ws.transform(w);
        for (i, p) in row.iter_mut().enumerate() {
            *p = ws.d[i];
        }
    }
    out
}

/// 一个平面掩膜的有符号距离场.
#[derive(Clone, Debug)]
pub struct DistanceField {
    field: Array2<f64>,
}

impl DistanceField {
    /// 由掩膜计算有符号距离场. 掩膜全为 `false` 时返回 `None`.
    ///
    /// 距离的绝对值被截断到 `h + w`, 保证距离场处处有限.
    pub fn from_mask(mask: &ArrayView2<bool>) -> Option<Self> {
        if !mask.iter().any(|m| *m) {
            return None;
        }
        let (h, w) = mask.dim();
        let cap = (h + w) as f64;
        let to_inside = squared_distance_to(mask, true);
        let to_outside = squared_distance_to(mask, false);

        let mut field = Array2::zeros((h, w));
        ndarray::Zip::from(&mut field)
            .and(mask)
            .and(&to_inside)
            .and(&to_outside)
            .for_each(|f, &m, &din, &dout| {
                *f = if m {
                    -(dout.sqrt().min(cap) - 0.5)
                } else {
                    din.sqrt().min(cap) - 0.5
                };
            });
        Some(Self { field })
    }

    /// 距离场形状 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.field.dim()
    }

    /// 获取整数位置的距离值. 越界时 panic.
    #[inline]
    pub fn at(&self, pos: Idx2d) -> f64 {
        self.field[pos]
    }

    /// 以双线性插值获取任意实数位置 `(y, x)` 的距离值.
    ///
    /// 平面外的位置取最近边缘点的值, 再加上到该点的欧氏距离.
    pub fn sample(&self, (y, x): Idx2dF) -> f64 {
        let (h, w) = self.field.dim();
        let cy = num::clamp(y, 0.0, (h - 1) as f64);
        let cx = num::clamp(x, 0.0, (w - 1) as f64);
        let outside = ((y - cy).powi(2) + (x - cx).powi(2)).sqrt();

        let (y0, x0) = (cy.floor() as usize, cx.floor() as usize);
        let (y1, x1) = ((y0 + 1).min(h - 1), (x0 + 1).min(w - 1));
        let (fy, fx) = (cy - y0 as f64, cx - x0 as f64);

        let f = &self.field;
        let top = f[(y0, x0)] * (1.0 - fx) + f[(y0, x1)] * fx;
        let bottom = f[(y1, x0)] * (1.0 - fx) + f[(y1, x1)] * fx;
        top * (1.0 - fy) + bottom * fy + outside
    }
}

#[cfg(test)]
mod tests {
    use super::{squared_distance_to, DistanceField};
    use itertools::iproduct;
    use ndarray::Array2;

    /// 暴力计算到最近目标像素的欧氏距离平方.
    fn brute(mask: &Array2<bool>, target: bool) -> Array2<f64> {
        let (h, w) = mask.dim();
        Array2::from_shape_fn((h, w), |(y, x)| {
            iproduct!(0..h, 0..w)
                .filter(|p| mask[*p] == target)
                .map(|(py, px)| (y.abs_diff(py).pow(2) + x.abs_diff(px).pow(2)) as f64)
                .fold(f64::INFINITY, f64::min)
        })
    }

    #[test]
    fn test_edt_matches_brute_force() {
        let (h, w) = (9, 11);
        // 几个稀疏的前景点和一条斜线.
        let mask = Array2::from_shape_fn((h, w), |(y, x)| {
            matches!((y, x), (0, 0) | (4, 7) | (8, 2)) || (y == x && y > 5)
        });
        for target in [true, false] {
            let fast = squared_distance_to(&mask.view(), target);
            let slow = brute(&mask, target);
            for pos in iproduct!(0..h, 0..w) {
                assert_eq!(fast[pos], slow[pos], "at {pos:?}, target {target}");
            }
        }
    }

    #[test]
    fn test_sdf_sign_and_threshold() {
        let mask = Array2::from_shape_fn((7, 7), |(y, x)| (2..5).contains(&y) && (2..5).contains(&x));
        let sdf = DistanceField::from_mask(&mask.view()).unwrap();
        assert_eq!(sdf.at((3, 3)), -1.5);
        assert_eq!(sdf.at((2, 2)), -0.5);
        assert_eq!(sdf.at((1, 3)), 0.5);
        assert_eq!(sdf.at((0, 3)), 1.5);
        for pos in iproduct!(0..7, 0..7) {
            assert_eq!(sdf.at(pos) < 0.0, mask[pos]);
        }
    }

    #[test]
    fn test_sdf_empty_and_full() {
        let empty = Array2::from_elem((4, 4), false);
        assert!(DistanceField::from_mask(&empty.view()).is_none());

        let full = Array2::from_elem((4, 4), true);
        let sdf = DistanceField::from_mask(&full.view()).unwrap();
        assert!(sdf.at((0, 0)) < 0.0);
        assert!(sdf.at((3, 3)).is_finite());
    }

    #[test]
    fn test_sample() {
        let mask = Array2::from_shape_fn((5, 5), |p| p == (2, 2));
        let sdf = DistanceField::from_mask(&mask.view()).unwrap();
        assert_eq!(sdf.sample((2.0, 2.0)), -0.5);
        assert_eq!(sdf.sample((2.0, 3.0)), 0.5);
        // 两像素中点
        assert_eq!(sdf.sample((2.0, 2.5)), 0.0);
        // 平面外: 最近边缘点 (2, 4) 的值为 1.5, 再加 3.
        assert_eq!(sdf.sample((2.0, 7.0)), 4.5);
    }
}
