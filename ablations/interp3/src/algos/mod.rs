mod profile;

use atlas_ed::prelude::*;
use log::{info, warn};
use std::path::Path;
use utils::phantom::Phantom;

pub use profile::Profile;

/// 用 `method` 在每个用例上插值, 统计耗时与 Dice 系数.
///
/// 给出 `dump` 时, 把每个用例正中间的插值平面保存为 PNG.
pub fn evaluate(method: InterpMethod, cases: &[Phantom], dump: Option<&Path>) -> Profile {
    let mut profile = Profile::new();
    // 各方法已经在各自的线程中运行, 不再在平面间并行.
    let config = InterpConfig {
        parallel: false,
        ..InterpConfig::with_method(method)
    };

    for case in cases {
        info!("{}: case `{}`...", method.name(), case.name);
        let mut vol = case.sparse();
        let mut interp = PlaneRangeInterpolator::new();
        interp.record(case.axis, case.hi, case.label);
        interp.record(case.axis, case.lo, case.label);

        profile.target_start();
        let res = interp.interpolate(&mut vol, &config);
        profile.target_elapsed();

        match res {
            Ok(stats) => {
                let dice = case.dice(&vol);
                profile.count_case(case.name, dice, stats.set as u64);
                if let Some(dir) = dump {
                    let mid = (case.lo + case.hi) / 2;
                    let path = dir.join(format!("{}-{}.png", case.name, method.name()));
                    if let Err(e) = vol.plane_at(case.axis, mid).save(&path) {
                        warn!("Failed to save {}: {e}", path.display());
                    }
                }
            }
            Err(e) => {
                warn!("{}: case `{}` failed: {e}", method.name(), case.name);
                profile.count_failed();
            }
        }
    }
    profile.finish()
}
