//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Idx2d, Idx3d, LabelId};

pub use crate::data::slice::{ImgWriteVis, PlaneRangeMirror, PlaneSlice, PlaneSliceMut, Rect};
pub use crate::{LabelVolume, PlaneAxis};

pub use crate::config::{EditorConfig, InterpConfig, InterpMethod};
pub use crate::consts::label::{is_background, is_foreground, BACKGROUND};
pub use crate::error::{EditError, EditResult};

pub use crate::interp::{FillAffordance, InterpStats, PlaneBounds, PlaneRangeInterpolator};
pub use crate::session::AtlasEditSession;
pub use crate::sync::{CoordSync, PlaneViewer};
