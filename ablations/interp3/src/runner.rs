//! 程序运行函数.

use crate::result::AblationResult;
use atlas_ed::config::InterpMethod;
use std::path::PathBuf;
use std::{env, thread};
use utils::phantom;

/// 实际运行.
pub fn run() -> AblationResult {
    let cases = phantom::standard();
    let dump = env::var("INTERP3_DUMP_DIR").ok().map(PathBuf::from);
    if let Some(d) = dump.as_ref() {
        assert!(d.is_dir(), "`{}` is not a directory", d.display());
    }

    println!("Running ablation studies on {} cases...", cases.len());
    thread::scope(|s| {
        let (cases, dump) = (&cases, dump.as_deref());
        let handles =
            InterpMethod::ALL.map(|m| s.spawn(move || crate::algos::evaluate(m, cases, dump)));

        AblationResult::from_iter(
            InterpMethod::ALL.map(|m| m.name()).into_iter().zip(
                handles
                    .into_iter()
                    .map(|th| th.join().expect("Thread joining error")),
            ),
        )
    })
}
