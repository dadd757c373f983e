//! 标签体平面切片对象的操作.

mod core;
mod iter;
mod mirror;
mod save;

pub use self::core::{PlaneSlice, PlaneSliceMut};

pub use iter::{Rect, RectIter};

pub use mirror::PlaneRangeMirror;

pub use save::ImgWriteVis;
