//! 实验结果.

use crate::algos::Profile;
use std::io::{self, Write};

/// 将 `profile` 的结果写进 `w` 中.
fn describe_into<W: Write>(name: &str, p: &Profile, w: &mut W) -> io::Result<()> {
    const S4: &str = "    ";

    #[inline]
    fn f64_to_display(f: Option<f64>) -> String {
        match f {
            Some(f) => format!("{f:.6}"),
            None => "/".to_string(),
        }
    }

    writeln!(w, "Profile `{name}`:")?;
    for (case, dice) in p.get_dice() {
        writeln!(w, "{S4}Dice on `{case}`: {dice:.6}")?;
    }
    writeln!(w, "{S4}Average dice: {}", f64_to_display(p.get_avg_dice()))?;
    writeln!(w, "{S4}Worst dice: {}", f64_to_display(p.get_worst_dice()))?;
    writeln!(w, "{S4}Failed cases: {}", p.get_failed())?;
    writeln!(w, "{S4}Voxels written: {}", p.get_voxels())?;
    writeln!(w, "{S4}Interpolation time: {} us", p.get_target_time_us())?;
    writeln!(w, "{S4}Total machine time: {} us", p.get_real_time_us())?;
    let t = p.get_most_time_consuming().map(|d| d.as_micros() as f64);
    write!(w, "{S4}Most time-consuming case costs {} us", f64_to_display(t))?;
    Ok(())
}

/// 消融实验最终结果.
pub struct AblationResult {
    data: Vec<(&'static str, Profile)>,
}

impl AblationResult {
    pub fn from_iter<I: IntoIterator<Item = (&'static str, Profile)>>(it: I) -> Self {
        Self {
            data: it.into_iter().collect(),
        }
    }

    /// 分析运行结果.
    pub fn analyze(&self) {
        utils::sep();
        let mut buf = Vec::with_capacity(512);

        for (key, profile) in self.data.iter() {
            describe_into(key, profile, &mut buf).unwrap();
            utils::sep_to(&mut buf).unwrap();
            print!("{}", String::from_utf8_lossy(&buf));
            buf.clear();
        }
    }
}
