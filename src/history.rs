//! 翻译历史缓存
//!
//! 进程内、只追加的翻译记录。查找按插入顺序线性扫描，
//! 首个匹配且非错误的记录胜出；错误记录会被保存但永远不会命中。

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::types::{TranslationApi, TranslationResult};

/// 一条历史记录
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub source_word: String,
    pub source_lang: String,
    pub target_lang: String,
    pub translation_api: TranslationApi,
    pub result: Arc<TranslationResult>,
}

impl HistoryEntry {
    fn matches(
        &self,
        source_word: &str,
        source_lang: &str,
        target_lang: &str,
        translation_api: TranslationApi,
    ) -> bool {
        self.source_word == source_word
            && self.source_lang == source_lang
            && self.target_lang == target_lang
            && self.translation_api == translation_api
            && !self.result.is_error
    }
}

/// 翻译历史，无容量上限、无过期
///
/// 锁只在单次查找或追加期间持有，不会跨越 `.await`。
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// 查找可复用的结果
    pub fn lookup(
        &self,
        source_word: &str,
        source_lang: &str,
        target_lang: &str,
        translation_api: TranslationApi,
    ) -> Option<Arc<TranslationResult>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .iter()
            .find(|entry| entry.matches(source_word, source_lang, target_lang, translation_api))
            .map(|entry| Arc::clone(&entry.result))
    }

    /// 追加一条记录，不去重
    pub fn record(
        &self,
        source_word: &str,
        source_lang: &str,
        target_lang: &str,
        translation_api: TranslationApi,
        result: Arc<TranslationResult>,
    ) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.push(HistoryEntry {
            source_word: source_word.to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            translation_api,
            result,
        });
        debug!("历史记录数: {}", entries.len());
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
