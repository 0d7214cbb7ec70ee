use std::io::BufRead;

use anyhow::{Context, Result};

/// 初始化日志系统
pub fn init_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // 日志写到stderr，stdout只输出译文
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// 读取待翻译的单词：命令行参数优先，否则逐行读取输入
///
/// 空行会被保留，由翻译器按空输入处理。
pub fn collect_words<R: BufRead>(args: &[String], reader: R) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args.to_vec());
    }

    reader
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .context("读取标准输入失败")
}
