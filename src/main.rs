use clap::Parser;

use file2png::{
    cli::Cli,
    handler::{handle_decode, handle_encode},
};

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据 `--decode` 标志
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    if cli.decode {
        handle_decode(cli.args)
    } else {
        handle_encode(cli.args)
    }
}
