//! 通用常量.

/// 标签值.
pub mod label {
    use crate::LabelId;

    /// 背景标签值.
    pub const BACKGROUND: LabelId = 0;

    /// 标签是否是背景?
    #[inline]
    pub const fn is_background(p: LabelId) -> bool {
        p == BACKGROUND
    }

    /// 标签是否是前景 (任意非背景标签, 包括负值镜像标签)?
    #[inline]
    pub const fn is_foreground(p: LabelId) -> bool {
        !is_background(p)
    }
}

/// 单通道颜色.
pub mod gray {
    /// 单通道黑色.
    pub const BLACK: u8 = 0b_0000_0000;

    /// 单通道暗灰色.
    pub const DARK_GRAY: u8 = 0b_0100_0000;

    /// 单通道白色.
    pub const WHITE: u8 = 0b_1111_1111;
}

/// "Fill" 按钮在没有任何记录时的默认文字.
pub const FILL_LABEL_TEXT: &str = "Fill Label";

/// 默认撤销历史长度.
pub const DEFAULT_HISTORY_LEN: usize = 8;
