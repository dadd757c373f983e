//! 平面间插值方式的消融实验.
//!
//! 在已知真值的合成标签体上比较各插值方式的 Dice 系数与耗时.
//! 设置环境变量 `INTERP3_DUMP_DIR` 时, 会把每个用例正中间的插值平面保存为 PNG.

mod algos;
mod result;
mod runner;

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .unwrap();

    log::info!("Using {} threads", utils::cpus());
    let result = runner::run();
    result.analyze();
}
