//! 平面范围镜像. 用于在插值前保存受影响的平面, 并在撤销时复原.

use crate::error::{EditError, EditResult};
use crate::{LabelId, LabelVolume, PlaneAxis};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use ndarray::{s, Array3, Axis};
use std::io::{Read, Write};
use std::ops::Range;

const ELEM_BYTES: usize = std::mem::size_of::<LabelId>();

/// 一段连续平面的压缩镜像; 不透明类型.
///
/// 标签体大多是大片相同的值, 因此以 zlib 压缩后占用很小,
/// 适合在撤销历史中保留多份.
#[derive(Debug, Clone)]
pub struct PlaneRangeMirror {
    /// 平面方向.
    axis: PlaneAxis,

    /// 平面范围.
    planes: Range<usize>,

    /// 按显示顺序的范围形状 `(平面数, 高, 宽)`.
    sh: (usize, usize, usize),

    /// 压缩的小端字节流.
    buf: Vec<u8>,
}

impl PlaneRangeMirror {
    /// 保存 `volume` 在 `axis` 方向上 `planes` 范围内的所有平面.
    ///
    /// 如果 `planes` 超出标签体范围, 则返回 [`EditError::OutOfRange`].
    pub fn capture(
        volume: &LabelVolume,
        axis: PlaneAxis,
        planes: Range<usize>,
    ) -> EditResult<Self> {
        if planes.end > volume.plane_len(axis) {
            return Err(EditError::OutOfRange {
                axis,
                index: planes.end.saturating_sub(1),
                len: volume.plane_len(axis),
            });
        }
        let view = volume.view_along(axis);
        let range = view.slice(s![planes.clone(), .., ..]);

        let mut e = ZlibEncoder::new(Vec::with_capacity(64), Compression::default());
        for p in range.iter() {
            e.write_all(&p.to_le_bytes())?;
        }
        Ok(Self {
            axis,
            sh: range.dim(),
            planes,
            buf: e.finish()?,
        })
    }

    /// 镜像所属的平面方向.
    #[inline]
    pub fn axis(&self) -> PlaneAxis {
        self.axis
    }

    /// 镜像覆盖的平面范围.
    #[inline]
    pub fn planes(&self) -> Range<usize> {
        self.planes.clone()
    }

    /// 压缩后的字节数.
    #[inline]
    pub fn compressed_len(&self) -> usize {
        self.buf.len()
    }

    /// 解压得到按显示顺序排列的平面数据.
    fn decompress(&self) -> EditResult<Array3<LabelId>> {
        let (n, h, w) = self.sh;
        let mut d = ZlibDecoder::new(self.buf.as_slice());
        let mut raw = Vec::with_capacity(n * h * w * ELEM_BYTES);
        d.read_to_end(&mut raw)?;
        if raw.len() != n * h * w * ELEM_BYTES {
            return Err(EditError::Corrupted {
                reason: format!("expected {} bytes, got {}", n * h * w * ELEM_BYTES, raw.len()),
            });
        }
        let data: Vec<LabelId> = raw
            .chunks_exact(ELEM_BYTES)
            .map(|c| LabelId::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Array3::from_shape_vec(self.sh, data).map_err(|e| EditError::Corrupted {
            reason: e.to_string(),
        })
    }

    /// 用镜像覆写 `volume` 中对应的平面.
    ///
    /// 如果标签体形状已不再匹配, 则返回 [`EditError::Corrupted`], 且不修改标签体.
    pub fn restore(&self, volume: &mut LabelVolume) -> EditResult<()> {
        let (n, h, w) = self.sh;
        if self.planes.end > volume.plane_len(self.axis)
            || self.axis.plane_shape(volume.shape()) != (h, w)
            || self.planes.len() != n
        {
            return Err(EditError::Corrupted {
                reason: format!(
                    "mirror of {} planes {:?} does not fit volume {:?}",
                    self.axis,
                    self.planes,
                    volume.shape()
                ),
            });
        }
        let data = self.decompress()?;
        for (i, src) in self.planes.clone().zip(data.axis_iter(Axis(0))) {
            volume.plane_at_mut(self.axis, i).assign(&src);
        }
        Ok(())
    }
}
