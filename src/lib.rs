//! Word Translator - 单词翻译适配器库
//!
//! 这个库把 Google 与 DeepL 两种翻译接口的请求和响应统一为 [`TranslationResult`]，
//! 并在进程内缓存成功的翻译结果。

pub mod api_constants;
pub mod config;
pub mod deepl;
pub mod error;
pub mod google;
pub mod history;
pub mod providers;
pub mod stats;
pub mod translator;
pub mod transport;
pub mod types;
pub mod utils;

pub use config::TranslatorConfig;
pub use error::TranslationError;
pub use providers::{DefaultMessages, MemorySettings, MessageProvider, SettingsProvider};
pub use translator::{TranslationBackend, Translator};
pub use types::{TranslationApi, TranslationRequest, TranslationResult};
