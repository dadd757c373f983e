use crate::Idx2d;

/// 平面上的轴对齐矩形区域, 左闭右开.
///
/// 用于限定插值的写入范围, 避免触碰两个边界形状之外的其他标签.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Rect {
    top: usize,
    left: usize,
    bottom: usize,
    right: usize,
}

impl Rect {
    /// 以 `[top, bottom) x [left, right)` 创建矩形.
    /// 如果 `bottom <= top` 或 `right <= left`, 则矩形为空.
    #[inline]
    pub const fn new((top, left): Idx2d, (bottom, right): Idx2d) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// 覆盖整个 `(h, w)` 平面的矩形.
    #[inline]
    pub const fn full((h, w): Idx2d) -> Self {
        Self::new((0, 0), (h, w))
    }

    /// 包含 `it` 中所有点的最小矩形. `it` 为空时返回 `None`.
    pub fn bounding<I: IntoIterator<Item = Idx2d>>(it: I) -> Option<Self> {
        it.into_iter().fold(None, |acc, (h, w)| {
            let point = Self::new((h, w), (h + 1, w + 1));
            Some(match acc {
                None => point,
                Some(r) => r.union(&point),
            })
        })
    }

    /// 同时包含 `self` 和 `other` 的最小矩形.
    #[inline]
    pub fn union(&self, other: &Rect) -> Rect {
        Self {
            top: self.top.min(other.top),
            left: self.left.min(other.left),
            bottom: self.bottom.max(other.bottom),
            right: self.right.max(other.right),
        }
    }

    /// 向四周扩展 `margin` 个像素, 并裁剪到 `(h, w)` 平面内.
    pub fn expand(&self, margin: usize, (h, w): Idx2d) -> Rect {
        Self {
            top: self.top.saturating_sub(margin),
            left: self.left.saturating_sub(margin),
            bottom: self.bottom.saturating_add(margin).min(h),
            right: self.right.saturating_add(margin).min(w),
        }
    }

    /// 左上角 (含).
    #[inline]
    pub fn top_left(&self) -> Idx2d {
        (self.top, self.left)
    }

    /// 右下角 (不含).
    #[inline]
    pub fn bottom_right(&self) -> Idx2d {
        (self.bottom, self.right)
    }

    /// 矩形的高.
    #[inline]
    pub fn height(&self) -> usize {
        self.bottom.saturating_sub(self.top)
    }

    /// 矩形的宽.
    #[inline]
    pub fn width(&self) -> usize {
        self.right.saturating_sub(self.left)
    }

    /// 矩形是否不包含任何像素.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    /// 判断 `(h, w)` 是否位于矩形内.
    #[inline]
    pub fn contains(&self, (h, w): Idx2d) -> bool {
        (self.top..self.bottom).contains(&h) && (self.left..self.right).contains(&w)
    }

    /// 以行优先规则, 获取能迭代矩形内所有索引的迭代器.
    #[inline]
    pub fn iter(&self) -> RectIter {
        RectIter::new(*self)
    }
}

/// 矩形区域的行优先索引迭代器.
///
/// 与 `iproduct!(top..bottom, left..right)` 等价, 但状态只有两个游标.
#[derive(Debug)]
pub struct RectIter {
    cur_h: usize,
    cur_w: usize,
    rect: Rect,
}

impl RectIter {
    #[inline]
    fn new(rect: Rect) -> Self {
        Self {
            cur_h: rect.top,
            cur_w: rect.left,
            rect,
        }
    }
}

impl Iterator for RectIter {
    type Item = Idx2d;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rect.is_empty() || self.cur_h >= self.rect.bottom {
            return None;
        }
        let ret_pos = (self.cur_h, self.cur_w);
        if self.cur_w + 1 == self.rect.right {
            self.cur_w = self.rect.left;
            self.cur_h += 1;
        } else {
            self.cur_w += 1;
        }
        Some(ret_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;
    use itertools::iproduct;

    #[test]
    fn test_rect_iter() {
        for (t, l, b, r) in iproduct!(0..3usize, 0..3usize, 0..5usize, 0..5usize) {
            let rect = Rect::new((t, l), (b, r));
            let expect: Vec<_> = iproduct!(t..b, l..r).collect();
            assert!(Iterator::eq(rect.iter(), expect.into_iter()));
        }
    }

    #[test]
    fn test_bounding_and_expand() {
        assert_eq!(Rect::bounding(std::iter::empty()), None);
        let r = Rect::bounding([(3, 4), (1, 7), (2, 2)]).unwrap();
        assert_eq!(r, Rect::new((1, 2), (4, 8)));
        assert_eq!((r.height(), r.width()), (3, 6));
        assert!(r.contains((1, 2)) && !r.contains((4, 2)));

        let e = r.expand(2, (5, 9));
        assert_eq!(e, Rect::new((0, 0), (5, 9)));
        assert_eq!(e, Rect::full((5, 9)));
    }
}
