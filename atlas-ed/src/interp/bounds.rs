use std::fmt::Formatter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 两个槽位的先进先出边界记录.
///
/// 新的平面序号总是写入后槽, 原后槽的值移到前槽, 原前槽的值被丢弃.
/// 记录按写入顺序保存, 不排序.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct PlaneBounds([Option<usize>; 2]);

impl PlaneBounds {
    /// 空记录.
    #[inline]
    pub const fn new() -> Self {
        Self([None, None])
    }

    /// 写入平面序号 `index`, 丢弃最旧的记录.
    #[inline]
    pub fn push(&mut self, index: usize) {
        self.0 = [self.0[1], Some(index)];
    }

    /// 清空两个槽位.
    #[inline]
    pub fn clear(&mut self) {
        self.0 = [None, None];
    }

    /// 两个槽位是否都已写入?
    #[inline]
    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// 两个槽位是否都为空?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// 按写入顺序获取两个槽位.
    #[inline]
    pub fn slots(&self) -> [Option<usize>; 2] {
        self.0
    }

    /// 两个槽位都已写入时, 返回升序的 `(lo, hi)`.
    #[inline]
    pub fn ordered(&self) -> Option<(usize, usize)> {
        match self.0 {
            [Some(a), Some(b)] => Some((a.min(b), a.max(b))),
            _ => None,
        }
    }
}

/// 形如 `[None, 5]` 或 `[5, 9]`.
impl std::fmt::Display for PlaneBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let show = |slot: Option<usize>| slot.map_or_else(|| "None".to_string(), |i| i.to_string());
        write!(f, "[{}, {}]", show(self.0[0]), show(self.0[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::PlaneBounds;

    #[test]
    fn test_fifo() {
        let mut b = PlaneBounds::new();
        assert!(b.is_empty() && !b.is_full());
        assert_eq!(b.to_string(), "[None, None]");

        b.push(9);
        assert_eq!(b.slots(), [None, Some(9)]);
        assert!(!b.is_empty() && !b.is_full());
        assert_eq!(b.ordered(), None);

        b.push(5);
        assert_eq!(b.slots(), [Some(9), Some(5)]);
        assert_eq!(b.ordered(), Some((5, 9)));
        assert_eq!(b.to_string(), "[9, 5]");

        b.push(12);
        assert_eq!(b.slots(), [Some(5), Some(12)]);

        b.clear();
        assert_eq!(b, PlaneBounds::default());
    }
}
