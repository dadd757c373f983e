//! 平面的持久化存储, 仅用于人工检查.

use crate::consts::gray::*;
use crate::consts::label::BACKGROUND;
use crate::{LabelId, PlaneSlice, PlaneSliceMut};
use image::ImageResult;
use std::path::Path;

/// 表明一个可以通过 **可视化友好** 模式持久化存储的平面对象.
///
/// 标签值本身没有灰度含义, 保存时背景映射为黑色,
/// 其他标签映射为肉眼较易区分的灰度.
pub trait ImgWriteVis {
    /// 按照一定的可视化规则将平面保存到 `path` 路径.
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()>;
}

/// 使标签更有利于单通道可视化.
///
/// 背景为黑色; 其他标签散列到 `[DARK_GRAY, WHITE]` 区间,
/// 相邻的标签 ID 会得到差别较大的灰度.
#[inline]
pub(crate) fn pretty(label: LabelId) -> u8 {
    if label == BACKGROUND {
        return BLACK;
    }
    const SPAN: u32 = (WHITE - DARK_GRAY) as u32 + 1;
    let hashed = (label as u32).wrapping_mul(0x9E37_79B1) >> 24;
    DARK_GRAY + (hashed % SPAN) as u8
}

macro_rules! impl_plane_vis {
    ($($slice: ty),+) => {
        $(
            /// 背景映射为黑色, 其他标签映射为散列灰度.
            impl ImgWriteVis for $slice {
                fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
                    let (height, width) = self.shape();
                    let mut buf = image::GrayImage::new(width as u32, height as u32);
                    for ((h, w), &pix) in self.indexed_iter() {
                        buf.put_pixel(w as u32, h as u32, image::Luma([pretty(pix)]));
                    }
                    buf.save(path)
                }
            }
        )+
    };
}

impl_plane_vis!(PlaneSlice<'_>, PlaneSliceMut<'_>);
