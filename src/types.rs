//! 翻译请求与结果的数据模型

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api_constants::service_config;
use crate::error::TranslationError;
use crate::translation_error;

/// 翻译后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TranslationApi {
    Google,
    #[value(name = "deepl")]
    DeepL,
}

impl TranslationApi {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationApi::Google => "google",
            TranslationApi::DeepL => "deepl",
        }
    }
}

impl fmt::Display for TranslationApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslationApi {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(TranslationApi::Google),
            "deepl" => Ok(TranslationApi::DeepL),
            other => Err(translation_error!(
                config,
                "translationApi",
                format!("不支持的翻译后端: {}", other)
            )),
        }
    }
}

/// 一次翻译请求
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationRequest {
    pub source_word: String,
    pub source_lang: String,
    pub target_lang: String,
    pub translation_api: TranslationApi,
}

impl TranslationRequest {
    /// 创建请求，源词会被去除首尾空白
    pub fn new(
        source_word: &str,
        source_lang: &str,
        target_lang: &str,
        translation_api: TranslationApi,
    ) -> Self {
        Self {
            source_word: source_word.trim().to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            translation_api,
        }
    }
}

/// 归一化后的翻译结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// 译文
    pub result_text: String,
    /// 其他词义/词性，可能为空
    pub candidate_text: String,
    /// 检测到的源语言，未知时为空
    pub source_language: String,
    /// 置信度 0.0–1.0
    pub percentage: f64,
    pub is_error: bool,
    /// 非错误时为空
    pub error_message: String,
}

impl TranslationResult {
    /// 空输入时直接返回的结果
    pub fn empty() -> Self {
        Self {
            source_language: service_config::EMPTY_RESULT_SOURCE_LANG.to_string(),
            ..Self::default()
        }
    }

    /// 构造错误结果
    pub fn error(error_message: String) -> Self {
        Self {
            is_error: true,
            error_message,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_parse_and_display() {
        assert_eq!("google".parse::<TranslationApi>().unwrap(), TranslationApi::Google);
        assert_eq!("DeepL".parse::<TranslationApi>().unwrap(), TranslationApi::DeepL);
        assert!("bing".parse::<TranslationApi>().is_err());
        assert_eq!(TranslationApi::DeepL.to_string(), "deepl");
    }

    #[test]
    fn test_request_trims_word() {
        let req = TranslationRequest::new("  hello \n", "auto", "ja", TranslationApi::Google);
        assert_eq!(req.source_word, "hello");
        assert_eq!(req.source_lang, "auto");
        assert_eq!(req.target_lang, "ja");
    }

    #[test]
    fn test_empty_result() {
        let result = TranslationResult::empty();
        assert_eq!(result.result_text, "");
        assert_eq!(result.candidate_text, "");
        assert_eq!(result.source_language, "en");
        assert_eq!(result.percentage, 0.0);
        assert!(!result.is_error);
        assert_eq!(result.error_message, "");
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = TranslationResult::error("boom".to_string());
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["errorMessage"], "boom");
        assert_eq!(value["resultText"], "");
    }
}
