//! 三个正交平面视图之间的光标同步.

use crate::{Idx3d, PlaneAxis};

/// 一个平面视图. 由界面层实现.
pub trait PlaneViewer {
    /// 接收按本视图显示顺序排列的光标坐标.
    fn receive_coord(&mut self, coord: Idx3d);

    /// 重绘当前平面. 默认什么都不做.
    fn refresh(&mut self) {}
}

impl<V: PlaneViewer + ?Sized> PlaneViewer for Box<V> {
    #[inline]
    fn receive_coord(&mut self, coord: Idx3d) {
        (**self).receive_coord(coord)
    }

    #[inline]
    fn refresh(&mut self) {
        (**self).refresh()
    }
}

/// 光标同步器. 每个平面方向注册一个视图.
///
/// 任意视图报告的坐标都先转换为标准 `(z, y, x)` 顺序保存为光标,
/// 再按各自的显示顺序分发给全部三个视图, 每个视图恰好收到一次.
/// 坐标不做越界检查, 由视图自行处理.
#[derive(Debug)]
pub struct CoordSync<V> {
    viewers: [V; 3],
    cursor: Idx3d,
}

impl<V: PlaneViewer> CoordSync<V> {
    /// 注册三个视图, 按 [`PlaneAxis::index`] 排列. 光标初始为原点, 不通知视图.
    pub fn new(viewers: [V; 3]) -> Self {
        Self {
            viewers,
            cursor: (0, 0, 0),
        }
    }

    /// `source` 方向的视图报告了按其显示顺序排列的坐标 `coord`.
    pub fn update(&mut self, coord: Idx3d, source: PlaneAxis) {
        let canonical = source.to_canonical(coord);
        self.cursor = canonical;
        for axis in PlaneAxis::ALL {
            self.viewers[axis.index()].receive_coord(axis.to_display(canonical));
        }
    }

    /// 当前光标, 标准顺序.
    #[inline]
    pub fn cursor(&self) -> Idx3d {
        self.cursor
    }

    /// `axis` 方向的视图.
    #[inline]
    pub fn viewer(&self, axis: PlaneAxis) -> &V {
        &self.viewers[axis.index()]
    }

    /// `axis` 方向的视图, 可变.
    #[inline]
    pub fn viewer_mut(&mut self, axis: PlaneAxis) -> &mut V {
        &mut self.viewers[axis.index()]
    }

    /// 取回全部视图.
    #[inline]
    pub fn into_viewers(self) -> [V; 3] {
        self.viewers
    }

    /// 让除 `except` 以外的所有视图重绘. `except` 为 `None` 时全部重绘.
    pub fn refresh_except(&mut self, except: Option<PlaneAxis>) {
        for axis in PlaneAxis::ALL {
            if Some(axis) != except {
                self.viewers[axis.index()].refresh();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoordSync, PlaneViewer};
    use crate::{Idx3d, PlaneAxis};
    use itertools::iproduct;

    #[derive(Default, Debug)]
    struct Recorder {
        coords: Vec<Idx3d>,
        refreshed: usize,
    }

    impl PlaneViewer for Recorder {
        fn receive_coord(&mut self, coord: Idx3d) {
            self.coords.push(coord);
        }

        fn refresh(&mut self) {
            self.refreshed += 1;
        }
    }

    fn recorders() -> CoordSync<Recorder> {
        CoordSync::new(Default::default())
    }

    #[test]
    fn test_round_trip_all_axes() {
        for (source, coord) in iproduct!(PlaneAxis::ALL, [(0, 0, 0), (3, 7, 11), (12, 1, 5)]) {
            let mut sync = recorders();
            sync.update(coord, source);
            let canonical = source.to_canonical(coord);
            assert_eq!(sync.cursor(), canonical);
            for axis in PlaneAxis::ALL {
                let got = &sync.viewer(axis).coords;
                assert_eq!(got.len(), 1, "{axis} from {source}");
                assert_eq!(axis.to_canonical(got[0]), canonical);
            }
        }
    }

    #[test]
    fn test_display_orders() {
        let mut sync = recorders();
        sync.update((1, 2, 3), PlaneAxis::Xy);
        assert_eq!(sync.viewer(PlaneAxis::Xy).coords, vec![(1, 2, 3)]);
        assert_eq!(sync.viewer(PlaneAxis::Xz).coords, vec![(2, 1, 3)]);
        assert_eq!(sync.viewer(PlaneAxis::Yz).coords, vec![(3, 1, 2)]);

        // 从 yz 视图报告, 回到同一个标准坐标.
        sync.update((3, 1, 2), PlaneAxis::Yz);
        assert_eq!(sync.cursor(), (1, 2, 3));
    }

    #[test]
    fn test_refresh_except() {
        let mut sync = recorders();
        sync.refresh_except(Some(PlaneAxis::Xz));
        sync.refresh_except(None);
        let [xy, xz, yz] = sync.into_viewers();
        assert_eq!((xy.refreshed, xz.refreshed, yz.refreshed), (2, 1, 2));
    }

    #[test]
    fn test_boxed_viewers() {
        let viewers: [Box<dyn PlaneViewer>; 3] = [
            Box::<Recorder>::default(),
            Box::<Recorder>::default(),
            Box::<Recorder>::default(),
        ];
        let mut sync = CoordSync::new(viewers);
        sync.update((4, 5, 6), PlaneAxis::Xz);
        assert_eq!(sync.cursor(), (5, 4, 6));
    }
}
