//! 配置管理模块
//!
//! 提供CLI参数解析和翻译器配置管理功能

// 标准库导入
use std::time::Duration;

// 第三方crate导入
use clap::Parser;

// 本地模块导入
use crate::api_constants::{api_config, is_valid_api_url, service_config};
use crate::error::Result;
use crate::translation_error;
use crate::types::TranslationApi;

/// 翻译器配置结构体
///
/// 支持Builder模式进行链式配置。
///
/// # Examples
///
/// ```rust
/// use word_translator::config::TranslatorConfig;
///
/// let config = TranslatorConfig::new()
///     .with_google_url("http://localhost:8080/translate_a/single")
///     .with_timeout(std::time::Duration::from_secs(10));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// Google 接口地址
    google_url: String,
    /// DeepL 接口地址
    deepl_url: String,
    /// 请求超时，`None` 表示使用HTTP客户端默认行为
    timeout: Option<Duration>,
    /// User-Agent
    user_agent: String,
}

impl TranslatorConfig {
    /// 创建新的配置实例
    ///
    /// 返回具有默认值的配置实例：
    /// - Google: 公共 `translate_a/single` 接口
    /// - DeepL: `www2.deepl.com/jsonrpc`
    /// - 无超时
    pub fn new() -> Self {
        Self {
            google_url: api_config::GOOGLE_API_URL.to_string(),
            deepl_url: api_config::DEEPL_API_URL.to_string(),
            timeout: None,
            user_agent: service_config::DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn google_url(&self) -> &str {
        &self.google_url
    }

    pub fn deepl_url(&self) -> &str {
        &self.deepl_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// 设置 Google 接口地址
    pub fn with_google_url(mut self, url: &str) -> Self {
        self.google_url = url.to_string();
        self
    }

    /// 设置 DeepL 接口地址
    pub fn with_deepl_url(mut self, url: &str) -> Self {
        self.deepl_url = url.to_string();
        self
    }

    /// 设置请求超时
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// 设置User-Agent
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// 检查接口地址
    pub fn validate(&self) -> Result<()> {
        if !is_valid_api_url(&self.google_url) {
            return Err(translation_error!(config, "google_url", "必须以 http:// 或 https:// 开头"));
        }
        if !is_valid_api_url(&self.deepl_url) {
            return Err(translation_error!(config, "deepl_url", "必须以 http:// 或 https:// 开头"));
        }
        Ok(())
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// CLI参数结构
#[derive(Parser, Debug)]
#[command(author, version, about = "单词翻译CLI工具 - 支持Google与DeepL后端", long_about = None)]
pub struct Cli {
    /// 待翻译的单词或短语；省略时从标准输入逐行读取
    #[arg(value_name = "WORDS")]
    pub words: Vec<String>,

    /// 源语言代码 (auto 表示自动检测)
    #[arg(short, long, default_value = service_config::DEFAULT_SOURCE_LANG)]
    pub source: String,

    /// 目标语言代码 (如: en, zh, ja, de)
    #[arg(short, long, default_value = service_config::DEFAULT_TARGET_LANG)]
    pub target: String,

    /// 翻译后端
    #[arg(short, long, value_enum, default_value_t = TranslationApi::Google)]
    pub api: TranslationApi,

    /// 以JSON输出结果
    #[arg(long)]
    pub json: bool,

    /// 请求超时时间（秒）
    #[arg(long)]
    pub timeout: Option<u64>,

    /// 自定义 Google 接口地址
    #[arg(long, default_value = api_config::GOOGLE_API_URL)]
    pub google_url: String,

    /// 自定义 DeepL 接口地址
    #[arg(long, default_value = api_config::DEEPL_API_URL)]
    pub deepl_url: String,

    /// 详细输出模式
    #[arg(short, long)]
    pub verbose: bool,

    /// 静默模式 (仅输出错误)
    #[arg(short, long)]
    pub quiet: bool,

    /// 显示统计信息
    #[arg(long)]
    pub stats: bool,
}

impl Cli {
    /// 由命令行参数生成翻译器配置
    pub fn to_config(&self) -> TranslatorConfig {
        let config = TranslatorConfig::new()
            .with_google_url(&self.google_url)
            .with_deepl_url(&self.deepl_url);
        match self.timeout {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = TranslatorConfig::default();
        assert_eq!(config.google_url(), api_config::GOOGLE_API_URL);
        assert_eq!(config.deepl_url(), api_config::DEEPL_API_URL);
        assert_eq!(config.timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = TranslatorConfig::new()
            .with_deepl_url("http://localhost:1188/jsonrpc")
            .with_timeout(Duration::from_secs(3))
            .with_user_agent("test-agent");

        assert_eq!(config.deepl_url(), "http://localhost:1188/jsonrpc");
        assert_eq!(config.timeout(), Some(Duration::from_secs(3)));
        assert_eq!(config.user_agent(), "test-agent");
    }

    #[test]
    fn test_config_rejects_bad_url() {
        let config = TranslatorConfig::new().with_google_url("translate.googleapis.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "word-translator",
            "--api",
            "deepl",
            "-t",
            "de",
            "--timeout",
            "5",
            "hello",
            "world",
        ]);
        assert_eq!(cli.api, TranslationApi::DeepL);
        assert_eq!(cli.target, "de");
        assert_eq!(cli.source, "auto");
        assert_eq!(cli.words, vec!["hello", "world"]);

        let config = cli.to_config();
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }
}
