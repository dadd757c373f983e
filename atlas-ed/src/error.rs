//! 编辑操作的运行时错误.

use std::io;

use thiserror::Error;

use crate::interp::PlaneBounds;
use crate::{LabelId, PlaneAxis};

/// 编辑操作运行时错误.
///
/// 这些错误都代表界面流程上的前置条件没有满足, 不是瞬时故障, 重试没有意义.
/// 发生错误时, 标签体和编辑状态都保持调用前的样子.
#[derive(Error, Debug)]
pub enum EditError {
    /// 两个边界平面尚未全部设置, 无法插值.
    #[error("boundaries not fully set: {bounds}")]
    InvalidState {
        /// 当前的边界记录.
        bounds: PlaneBounds,
    },

    /// 平面序号超出标签体在该方向上的范围.
    #[error("plane `{index}` of {axis} not in range (0..{len})")]
    OutOfRange {
        /// 平面方向.
        axis: PlaneAxis,
        /// 给定的平面序号.
        index: usize,
        /// 该方向上的平面个数.
        len: usize,
    },

    /// 两个边界平面上都不存在目标标签.
    #[error("label {label_id} not found in boundary planes {lo} and {hi}")]
    EmptyRegion {
        /// 目标标签.
        label_id: LabelId,
        /// 较小的边界平面序号.
        lo: usize,
        /// 较大的边界平面序号.
        hi: usize,
    },

    /// 撤销历史为空.
    #[error("nothing to undo")]
    NothingToUndo,

    /// 平面快照与当前标签体不匹配或已损坏.
    #[error("snapshot does not match the volume: {reason}")]
    Corrupted {
        /// 具体原因.
        reason: String,
    },

    /// 快照压缩/解压时发生 I/O 错误.
    #[error("an I/O error occurred while (de)compressing a snapshot")]
    Io {
        #[from]
        /// 原始错误.
        source: io::Error,
    },
}

/// 编辑操作结果.
pub type EditResult<T> = Result<T, EditError>;
