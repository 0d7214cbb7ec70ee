use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use word_translator::api_constants::setting_keys;
use word_translator::config::Cli;
use word_translator::stats::{format_duration, write_translation_stats};
use word_translator::utils::{collect_words, init_logging};
use word_translator::{
    DefaultMessages, MemorySettings, TranslationRequest, TranslationResult, Translator,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    init_logging(cli.verbose, cli.quiet);

    // 命令行选择的后端同时写入设置，后端选择以设置为准
    let settings = MemorySettings::with_setting(setting_keys::TRANSLATION_API, cli.api.as_str());
    let config = cli.to_config();
    let translator = Translator::from_config(&config, Arc::new(settings), Arc::new(DefaultMessages))
        .context("创建翻译器失败")?;

    let words = collect_words(&cli.words, io::stdin().lock())?;

    if !cli.quiet {
        info!("🚀 启动翻译 - 后端: {}", cli.api);
        info!("🌐 {} -> {}", cli.source, cli.target);
    }

    let total_start = Instant::now();
    let mut failures = 0usize;

    for word in &words {
        let request = TranslationRequest::new(word, &cli.source, &cli.target, cli.api);
        let result = translator.translate_request(&request).await;

        if result.is_error {
            failures += 1;
            error!("❌ {}: {}", request.source_word, result.error_message);
        }
        print_result(&result, cli.json)?;
    }

    let total_duration = total_start.elapsed();
    if !cli.quiet {
        info!(
            "✅ 完成 {} 个单词，失败 {} 个，耗时 {}",
            words.len(),
            failures,
            format_duration(total_duration)
        );
    }

    if cli.stats || cli.verbose {
        // stdout 只留给译文，报告写到 stderr
        write_translation_stats(&mut io::stderr().lock(), &translator.stats(), total_duration)
            .context("输出统计信息失败")?;
    }

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn print_result(result: &TranslationResult, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(result).context("序列化结果失败")?;
        println!("{}", line);
        return Ok(());
    }

    if result.is_error {
        println!();
        return Ok(());
    }

    println!("{}", result.result_text);
    if !result.candidate_text.is_empty() {
        print!("{}", result.candidate_text);
    }
    Ok(())
}
