//! 图谱编辑会话.
//!
//! 会话在整个生命周期内独占标签体. 多个会话并发编辑同一标签体不受支持;
//! 需要时由调用者在会话之外自行同步.

use std::collections::VecDeque;

use log::debug;

use crate::config::EditorConfig;
use crate::error::{EditError, EditResult};
use crate::interp::{InterpStats, PlaneRangeInterpolator};
use crate::sync::{CoordSync, PlaneViewer};
use crate::{Idx3d, LabelId, LabelVolume, PlaneAxis, PlaneRangeMirror};

/// 正交三平面图谱编辑会话: 标签体, 三个平面视图, 插值请求与撤销历史.
pub struct AtlasEditSession<V> {
    volume: LabelVolume,
    sync: CoordSync<V>,
    interp: PlaneRangeInterpolator,
    config: EditorConfig,
    history: VecDeque<PlaneRangeMirror>,
}

impl<V: PlaneViewer> AtlasEditSession<V> {
    /// 新建会话.
    ///
    /// `offset` 为按 `(x, y, z)` 顺序给出的初始光标, 会以 `xy` 平面的名义
    /// 同步给所有视图.
    pub fn new(volume: LabelVolume, offset: Idx3d, viewers: [V; 3], config: EditorConfig) -> Self {
        let (x, y, z) = offset;
        let mut sync = CoordSync::new(viewers);
        sync.update((z, y, x), PlaneAxis::Xy);
        debug!("edit session on volume {:?}, cursor {:?}", volume.shape(), sync.cursor());
        Self {
            volume,
            sync,
            interp: PlaneRangeInterpolator::new(),
            config,
            history: VecDeque::with_capacity(config.history_len),
        }
    }

    /// `axis` 方向的视图报告了按其显示顺序排列的光标坐标.
    #[inline]
    pub fn move_cursor(&mut self, coord: Idx3d, axis: PlaneAxis) {
        self.sync.update(coord, axis);
    }

    /// 用户在 `axis` 方向的第 `plane` 个平面上编辑了标签 `label`.
    #[inline]
    pub fn record_edit(&mut self, axis: PlaneAxis, plane: usize, label: LabelId) {
        self.interp.record(axis, plane, label);
    }

    /// 执行插值, 并让所有视图重绘.
    ///
    /// 插值前保存受影响的平面, 以便 [`Self::undo`]. 出错时标签体和历史都不变.
    pub fn fill(&mut self) -> EditResult<InterpStats> {
        let snapshot = match (self.interp.axis(), self.interp.bounds().ordered()) {
            (Some(axis), Some((lo, hi))) if self.config.history_len > 0 && hi - lo > 1 => {
                // 先检查边界, 越界时报告的是边界本身而不是快照范围.
                self.volume.check_plane(axis, lo)?;
                self.volume.check_plane(axis, hi)?;
                Some(PlaneRangeMirror::capture(&self.volume, axis, lo + 1..hi)?)
            }
            _ => None,
        };
        let stats = self.interp.interpolate(&mut self.volume, &self.config.interp)?;

        if let Some(snapshot) = snapshot {
            debug!(
                "saved {} planes {:?} ({} bytes)",
                snapshot.axis(),
                snapshot.planes(),
                snapshot.compressed_len()
            );
            self.history.push_back(snapshot);
            while self.history.len() > self.config.history_len {
                self.history.pop_front();
            }
        }
        self.sync.refresh_except(None);
        Ok(stats)
    }

    /// 撤销最近一次插值, 并让所有视图重绘.
    pub fn undo(&mut self) -> EditResult<()> {
        let snapshot = self.history.back().ok_or(EditError::NothingToUndo)?;
        snapshot.restore(&mut self.volume)?;
        debug!("restored {} planes {:?}", snapshot.axis(), snapshot.planes());
        self.history.pop_back();
        self.sync.refresh_except(None);
        Ok(())
    }

    /// 可撤销的步数.
    #[inline]
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// 当前光标, 标准 `(z, y, x)` 顺序.
    #[inline]
    pub fn cursor(&self) -> Idx3d {
        self.sync.cursor()
    }

    /// 标签体.
    #[inline]
    pub fn volume(&self) -> &LabelVolume {
        &self.volume
    }

    /// 标签体, 可变. 用于界面层的手动绘制.
    #[inline]
    pub fn volume_mut(&mut self) -> &mut LabelVolume {
        &mut self.volume
    }

    /// 结束会话, 取回标签体.
    #[inline]
    pub fn into_volume(self) -> LabelVolume {
        self.volume
    }

    /// 插值请求.
    #[inline]
    pub fn interpolator(&self) -> &PlaneRangeInterpolator {
        &self.interp
    }

    /// 光标同步器.
    #[inline]
    pub fn sync(&self) -> &CoordSync<V> {
        &self.sync
    }

    /// 会话配置.
    #[inline]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }
}
