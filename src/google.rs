//! Google 翻译后端
//!
//! 调用公共 `translate_a/single` 接口（`dj=1` JSON 格式），同时请求译文(`dt=t`)与词典(`dt=bd`)数据。

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};
use url::Url;

use crate::api_constants::api_config;
use crate::error::{Result, TranslationError};
use crate::providers::MessageProvider;
use crate::transport::{HttpResponse, HttpTransport};
use crate::translator::TranslationBackend;
use crate::types::{TranslationApi, TranslationResult};

#[derive(Debug, Default, Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    src: String,
    #[serde(default)]
    ld_result: Option<LanguageDetection>,
    #[serde(default)]
    sentences: Vec<Sentence>,
    #[serde(default)]
    dict: Option<Vec<DictEntry>>,
}

#[derive(Debug, Default, Deserialize)]
struct LanguageDetection {
    #[serde(default)]
    srclangs_confidences: Vec<f64>,
}

/// 音译条目没有 `trans` 字段
#[derive(Debug, Default, Deserialize)]
struct Sentence {
    #[serde(default)]
    trans: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DictEntry {
    #[serde(default)]
    pos: String,
    #[serde(default)]
    terms: Vec<String>,
}

/// Google 后端适配器
pub struct GoogleBackend {
    transport: Arc<dyn HttpTransport>,
    messages: Arc<dyn MessageProvider>,
    base_url: String,
}

impl GoogleBackend {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        messages: Arc<dyn MessageProvider>,
        base_url: &str,
    ) -> Self {
        Self {
            transport,
            messages,
            base_url: base_url.to_string(),
        }
    }

    /// 构造请求地址，单词经过URL转义
    pub fn build_url(&self, word: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        let mut url = Url::parse(&self.base_url).map_err(|e| TranslationError::Configuration {
            field: "google_url".to_string(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("client", api_config::GOOGLE_CLIENT_ID)
            .append_pair("sl", source_lang)
            .append_pair("tl", target_lang)
            .append_pair("dt", "t")
            .append_pair("dt", "bd")
            .append_pair("dj", "1")
            .append_pair("q", word);
        Ok(url.into())
    }

    async fn send_request(
        &self,
        word: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<TranslationResult> {
        let url = self.build_url(word, source_lang, target_lang)?;
        let response = self.transport.get(&url).await?;
        check_status(&response)?;

        let data: GoogleResponse =
            serde_json::from_str(&response.body).map_err(|e| TranslationError::Unknown {
                status_code: response.status,
                status_text: response.status_text.clone(),
                message: Some(e.to_string()),
            })?;
        Ok(normalize_response(data))
    }
}

#[async_trait]
impl TranslationBackend for GoogleBackend {
    fn api(&self) -> TranslationApi {
        TranslationApi::Google
    }

    async fn translate(&self, word: &str, source_lang: &str, target_lang: &str) -> TranslationResult {
        match self.send_request(word, source_lang, target_lang).await {
            Ok(result) => {
                debug!("Google翻译完成: {:?}", result);
                result
            }
            Err(err) => {
                error!("❌ Google翻译请求失败: {}", err);
                TranslationResult::error(err.localized_message(self.messages.as_ref()))
            }
        }
    }
}

/// 按状态码分类失败响应
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_ok() {
        return Ok(());
    }
    match response.status {
        0 => Err(TranslationError::Network {
            message: "状态码为0".to_string(),
        }),
        429 | 503 => Err(TranslationError::Unavailable {
            status_code: response.status,
        }),
        status => Err(TranslationError::Unknown {
            status_code: status,
            status_text: response.status_text.clone(),
            message: None,
        }),
    }
}

fn normalize_response(data: GoogleResponse) -> TranslationResult {
    let percentage = data
        .ld_result
        .as_ref()
        .and_then(|ld| ld.srclangs_confidences.first().copied())
        .unwrap_or(0.0);

    let result_text: String = data
        .sentences
        .iter()
        .filter_map(|sentence| sentence.trans.as_deref())
        .collect();

    let candidate_text: String = data
        .dict
        .unwrap_or_default()
        .iter()
        .map(|entry| {
            let separator = if entry.pos.is_empty() { "" } else { ": " };
            format!("{}{}{}\n", entry.pos, separator, entry.terms.join(", "))
        })
        .collect();

    TranslationResult {
        result_text,
        candidate_text,
        source_language: data.src,
        percentage,
        is_error: false,
        error_message: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_constants::message_keys;
    use crate::providers::DefaultMessages;
    use crate::transport::testing::ScriptedTransport;

    fn backend(transport: Arc<ScriptedTransport>) -> GoogleBackend {
        GoogleBackend::new(transport, Arc::new(DefaultMessages), api_config::GOOGLE_API_URL)
    }

    #[test]
    fn test_build_url() {
        let backend = backend(Arc::new(ScriptedTransport::new()));
        let url = backend.build_url("hello world&", "auto", "ja").unwrap();
        assert!(url.starts_with("https://translate.googleapis.com/translate_a/single?"));
        assert!(url.contains("client=gtx&sl=auto&tl=ja&dt=t&dt=bd&dj=1&q="));
        assert!(url.ends_with("q=hello+world%26"));
    }

    #[test]
    fn test_build_url_bad_base() {
        let backend = GoogleBackend::new(
            Arc::new(ScriptedTransport::new()),
            Arc::new(DefaultMessages),
            "not a url",
        );
        assert!(matches!(
            backend.build_url("a", "auto", "en"),
            Err(TranslationError::Configuration { .. })
        ));
    }

    #[tokio::test]
    async fn test_sentences_are_concatenated() {
        let transport = Arc::new(ScriptedTransport::new().respond(
            200,
            r#"{"sentences":[{"trans":"a"},{"trans":"b"}],"src":"en","ld_result":{"srclangs_confidences":[0.75]}}"#,
        ));
        let result = backend(Arc::clone(&transport)).translate("x", "auto", "ja").await;

        assert!(!result.is_error);
        assert_eq!(result.result_text, "ab");
        assert_eq!(result.source_language, "en");
        assert_eq!(result.percentage, 0.75);
        assert_eq!(result.candidate_text, "");
        assert_eq!(transport.call_count(), 1);
        assert_eq!(transport.requests()[0].method, "GET");
    }

    #[tokio::test]
    async fn test_dictionary_candidates() {
        let body = r#"{
            "sentences":[{"trans":"犬","orig":"dog"},{"src_translit":"inu"}],
            "dict":[
                {"pos":"noun","terms":["犬","イヌ"]},
                {"pos":"","terms":["ドッグ"]}
            ],
            "src":"en",
            "ld_result":{"srclangs_confidences":[1.0]}
        }"#;
        let transport = Arc::new(ScriptedTransport::new().respond(200, body));
        let result = backend(transport).translate("dog", "auto", "ja").await;

        assert_eq!(result.result_text, "犬");
        assert_eq!(result.candidate_text, "noun: 犬, イヌ\nドッグ\n");
        assert_eq!(result.percentage, 1.0);
    }

    #[tokio::test]
    async fn test_unavailable_status() {
        let messages = DefaultMessages;
        for status in [429, 503] {
            let transport = Arc::new(ScriptedTransport::new().respond(status, ""));
            let result = backend(transport).translate("x", "auto", "ja").await;
            assert!(result.is_error);
            assert_eq!(
                result.error_message,
                messages.message(message_keys::UNAVAILABLE_ERROR)
            );
        }
    }

    #[tokio::test]
    async fn test_network_error() {
        let transport = Arc::new(ScriptedTransport::new().fail("connection refused"));
        let result = backend(transport).translate("x", "auto", "ja").await;
        assert!(result.is_error);
        assert_eq!(
            result.error_message,
            DefaultMessages.message(message_keys::NETWORK_ERROR)
        );
    }

    #[tokio::test]
    async fn test_status_zero_is_network_error() {
        let transport = Arc::new(ScriptedTransport::new().respond(0, ""));
        let result = backend(transport).translate("x", "auto", "ja").await;
        assert_eq!(
            result.error_message,
            DefaultMessages.message(message_keys::NETWORK_ERROR)
        );
    }

    #[tokio::test]
    async fn test_unknown_status() {
        let transport = Arc::new(ScriptedTransport::new().respond(400, "bad"));
        let result = backend(transport).translate("x", "auto", "ja").await;
        assert!(result.is_error);
        assert_eq!(
            result.error_message,
            format!(
                "{} [400 Bad Request]",
                DefaultMessages.message(message_keys::UNKNOWN_ERROR)
            )
        );
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let transport = Arc::new(ScriptedTransport::new().respond(200, "<html>"));
        let result = backend(transport).translate("x", "auto", "ja").await;
        assert!(result.is_error);
        assert!(result.error_message.contains("[200 OK]"));
    }
}
