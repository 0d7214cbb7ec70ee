//! 翻译调度器
//!
//! 入口 [`Translator::translate`]：去除空白 → 查询历史 → 未命中时按设置选择后端 → 记录历史 → 返回。
//! 网络路径上的任何失败都体现在结果记录中，调用方总能拿到一个结果。

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::api_constants::{service_config, setting_keys};
use crate::config::TranslatorConfig;
use crate::deepl::DeepLBackend;
use crate::google::GoogleBackend;
use crate::history::History;
use crate::providers::{MessageProvider, SettingsProvider};
use crate::stats::{StatsCounters, TranslationStats};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{TranslationApi, TranslationRequest, TranslationResult};

/// 翻译后端适配器
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    fn api(&self) -> TranslationApi;

    /// 执行一次翻译，失败时返回 `is_error` 为真的结果
    async fn translate(&self, word: &str, source_lang: &str, target_lang: &str) -> TranslationResult;
}

pub struct Translator {
    history: History,
    google: Arc<dyn TranslationBackend>,
    deepl: Arc<dyn TranslationBackend>,
    settings: Arc<dyn SettingsProvider>,
    stats: StatsCounters,
}

impl Translator {
    /// 使用给定的传输层创建两个后端
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        settings: Arc<dyn SettingsProvider>,
        messages: Arc<dyn MessageProvider>,
        config: &TranslatorConfig,
    ) -> Self {
        let google = GoogleBackend::new(
            Arc::clone(&transport),
            Arc::clone(&messages),
            config.google_url(),
        );
        let deepl = DeepLBackend::new(transport, messages, config.deepl_url());
        Self::with_backends(Arc::new(google), Arc::new(deepl), settings)
    }

    /// 使用 reqwest 传输层创建
    pub fn from_config(
        config: &TranslatorConfig,
        settings: Arc<dyn SettingsProvider>,
        messages: Arc<dyn MessageProvider>,
    ) -> Result<Self> {
        config.validate().context("翻译器配置无效")?;
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), settings, messages, config))
    }

    pub fn with_backends(
        google: Arc<dyn TranslationBackend>,
        deepl: Arc<dyn TranslationBackend>,
        settings: Arc<dyn SettingsProvider>,
    ) -> Self {
        Self {
            history: History::new(),
            google,
            deepl,
            settings,
            stats: StatsCounters::default(),
        }
    }

    /// 翻译单词或短语
    ///
    /// `source_lang` 为 `None` 时使用 `"auto"`。返回的结果与历史记录共享。
    pub async fn translate(
        &self,
        source_word: &str,
        source_lang: Option<&str>,
        target_lang: &str,
        translation_api: TranslationApi,
    ) -> Arc<TranslationResult> {
        let source_lang = source_lang.unwrap_or(service_config::DEFAULT_SOURCE_LANG);
        debug!(
            "translate(): {:?} {} -> {} [{}]",
            source_word, source_lang, target_lang, translation_api
        );
        self.stats.record_lookup();

        let word = source_word.trim();
        if word.is_empty() {
            self.stats.record_empty_input();
            return Arc::new(TranslationResult::empty());
        }

        if let Some(cached) = self
            .history
            .lookup(word, source_lang, target_lang, translation_api)
        {
            debug!("💾 命中翻译历史: {}", word);
            self.stats.record_cache_hit();
            return cached;
        }
        self.stats.record_cache_miss();

        let backend = self.select_backend();
        info!("🌐 使用 {} 翻译: {}", backend.api(), word);
        let result = Arc::new(backend.translate(word, source_lang, target_lang).await);
        if result.is_error {
            self.stats.record_error();
            warn!("翻译失败: {}", result.error_message);
        }

        self.history.record(
            word,
            source_lang,
            target_lang,
            translation_api,
            Arc::clone(&result),
        );
        result
    }

    /// 按请求对象翻译
    pub async fn translate_request(&self, request: &TranslationRequest) -> Arc<TranslationResult> {
        self.translate(
            &request.source_word,
            Some(request.source_lang.as_str()),
            &request.target_lang,
            request.translation_api,
        )
        .await
    }

    /// 设置项为 "google" 时使用 Google，其他任何值（包括未设置）使用 DeepL
    fn select_backend(&self) -> &Arc<dyn TranslationBackend> {
        match self
            .settings
            .get_setting(setting_keys::TRANSLATION_API)
            .as_deref()
        {
            Some("google") => &self.google,
            _ => &self.deepl,
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn stats(&self) -> TranslationStats {
        self.stats.snapshot(self.history.len())
    }
}
