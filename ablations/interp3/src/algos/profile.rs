//! 算法运行统计.

use std::time::{Duration, Instant};

/// ablation/benchmark 计时器.
///
/// 该计时器支持 "中途中断" 与 "结束中断, 继续开始计时".
#[derive(Clone, Debug)]
struct AccTimer {
    consumed: Duration,
    since: Instant,
}

impl AccTimer {
    /// 初始化计时器. 初始化时会视为已经开始计时.
    #[inline]
    pub fn new() -> Self {
        Self {
            consumed: Duration::ZERO,
            since: Instant::now(),
        }
    }

    /// 开始计时.
    #[inline]
    pub fn start(&mut self) {
        self.since = Instant::now();
    }

    /// 结束计时, 并将这一区间的时间累加. 返回本轮计时时长.
    ///
    /// 上一次调用必须是 `self.start()`, 否则计算时间值无意义.
    #[inline]
    pub fn elapsed(&mut self) -> Duration {
        let d = self.since.elapsed();
        self.consumed += d;
        d
    }

    /// 获得总共累计下来的时间 (以微秒为单位).
    #[inline]
    pub fn get_total_us(&self) -> u64 {
        self.consumed.as_micros() as u64
    }
}

/// 单个插值方式在全部用例上的统计.
#[derive(Clone, Debug)]
pub struct Profile {
    /// 每个成功用例的 Dice 系数.
    dice: Vec<(&'static str, f64)>,

    /// 插值报错的用例个数.
    failed: u64,

    /// 插值本身花费的总时间.
    target_time: AccTimer,

    /// 整个任务花费的总时间 (包括构造输入与计算 Dice 的时间).
    real_time: AccTimer,

    /// 最耗时的一次插值.
    most: Option<Duration>,

    /// 写入目标标签的体素总数.
    voxels: u64,
}

impl Profile {
    /// 初始化.
    #[inline]
    pub fn new() -> Self {
        Self {
            dice: Vec::new(),
            failed: 0,
            target_time: AccTimer::new(),
            real_time: AccTimer::new(),
            most: None,
            voxels: 0,
        }
    }

    /// 开始一次插值计时.
    #[inline]
    pub fn target_start(&mut self) {
        self.target_time.start();
    }

    /// 结束一次插值计时.
    #[inline]
    pub fn target_elapsed(&mut self) {
        let d = self.target_time.elapsed();
        self.most = Some(self.most.map_or(d, |m| m.max(d)));
    }

    /// 记录一个成功的用例.
    #[inline]
    pub fn count_case(&mut self, name: &'static str, dice: f64, voxels: u64) {
        self.dice.push((name, dice));
        self.voxels += voxels;
    }

    /// 记录一个失败的用例.
    #[inline]
    pub fn count_failed(&mut self) {
        self.failed += 1;
    }

    /// 结束全部计时.
    #[inline]
    pub fn finish(mut self) -> Self {
        self.real_time.elapsed();
        self
    }

    /// 每个成功用例的 Dice 系数.
    #[inline]
    pub fn get_dice(&self) -> &[(&'static str, f64)] {
        &self.dice
    }

    /// 平均 Dice 系数.
    pub fn get_avg_dice(&self) -> Option<f64> {
        match self.dice.len() {
            0 => None,
            n => Some(self.dice.iter().map(|(_, d)| d).sum::<f64>() / n as f64),
        }
    }

    /// 最差的 Dice 系数.
    pub fn get_worst_dice(&self) -> Option<f64> {
        self.dice.iter().map(|(_, d)| *d).reduce(f64::min)
    }

    /// 失败用例个数.
    #[inline]
    pub fn get_failed(&self) -> u64 {
        self.failed
    }

    /// 写入目标标签的体素总数.
    #[inline]
    pub fn get_voxels(&self) -> u64 {
        self.voxels
    }

    /// 以微秒为单位获得插值的总花费时间.
    #[inline]
    pub fn get_target_time_us(&self) -> u64 {
        self.target_time.get_total_us()
    }

    /// 以微秒为单位获得任务的总时间.
    #[inline]
    pub fn get_real_time_us(&self) -> u64 {
        self.real_time.get_total_us()
    }

    /// 最耗时的一次插值. 不存在时返回 `None`.
    #[inline]
    pub fn get_most_time_consuming(&self) -> Option<Duration> {
        self.most
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}
