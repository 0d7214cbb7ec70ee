//! DeepL 翻译后端
//!
//! 使用网页版的 JSON-RPC 接口 (`LMT_handle_texts`)。该接口会校验请求的几个特征：
//!
//! - 请求ID为 `[100000, 199998]` 内的随机数乘以1000；
//! - 时间戳需与文本中字母 `i` 的个数加一同余（没有 `i` 时直接使用当前时间）；
//! - 序列化后的 `"method":` 冒号两侧的空格取决于请求ID。
//!
//! 三者必须与浏览器端行为逐字节一致。

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::api_constants::{api_config, service_config};
use crate::error::{Result, TranslationError};
use crate::providers::MessageProvider;
use crate::transport::{HttpResponse, HttpTransport};
use crate::translator::TranslationBackend;
use crate::types::{TranslationApi, TranslationResult};

/// 字段顺序即序列化顺序
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: RpcParams<'a>,
    id: u64,
}

#[derive(Debug, Serialize)]
struct RpcParams<'a> {
    splitting: &'static str,
    lang: RpcLang,
    texts: Vec<RpcText<'a>>,
    timestamp: i64,
}

#[derive(Debug, Serialize)]
struct RpcLang {
    source_lang_user_selected: &'static str,
    target_lang: String,
}

#[derive(Debug, Serialize)]
struct RpcText<'a> {
    text: &'a str,
    #[serde(rename = "requestAlternatives")]
    request_alternatives: u32,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: RpcResult,
}

#[derive(Debug, Deserialize)]
struct RpcResult {
    texts: Vec<RpcResultText>,
}

#[derive(Debug, Deserialize)]
struct RpcResultText {
    text: String,
}

/// 失败响应体，远端错误消息位于顶层 `message`
#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// 生成请求ID
pub fn random_request_id() -> u64 {
    let base = rand::thread_rng().gen_range(api_config::DEEPL_ID_MIN..=api_config::DEEPL_ID_MAX);
    base * api_config::DEEPL_ID_SCALE
}

/// 文本中字母 `i` 的个数
pub fn count_letter_i(text: &str) -> u64 {
    text.chars().filter(|&c| c == 'i').count() as u64
}

/// 根据 `i` 的个数调整时间戳（毫秒）
pub fn adjust_timestamp(now_ms: i64, i_count: u64) -> i64 {
    if i_count == 0 {
        return now_ms;
    }
    let modulus = i_count as i64 + 1;
    now_ms - now_ms % modulus + modulus
}

/// 目标语言大写，为空时回退为 EN
pub fn normalize_target_lang(target_lang: &str) -> String {
    let upper = target_lang.to_uppercase();
    if upper.is_empty() {
        service_config::DEEPL_FALLBACK_TARGET_LANG.to_string()
    } else {
        upper
    }
}

/// 是否在 `"method"` 冒号前也插入空格
pub fn spaces_around_method_colon(id: u64) -> bool {
    (id + 5) % 29 == 0 || (id + 3) % 13 == 0
}

/// 序列化请求体
pub fn build_payload(text: &str, target_lang: &str, id: u64, timestamp: i64) -> Result<String> {
    let request = RpcRequest {
        jsonrpc: "2.0",
        method: api_config::DEEPL_METHOD,
        params: RpcParams {
            splitting: "newlines",
            lang: RpcLang {
                source_lang_user_selected: service_config::DEFAULT_SOURCE_LANG,
                target_lang: normalize_target_lang(target_lang),
            },
            texts: vec![RpcText {
                text,
                request_alternatives: api_config::DEEPL_REQUEST_ALTERNATIVES,
            }],
            timestamp,
        },
        id,
    };
    let serialized = serde_json::to_string(&request).map_err(|e| TranslationError::Internal {
        source: e.into(),
    })?;

    let replacement = if spaces_around_method_colon(id) {
        "\"method\" : \""
    } else {
        "\"method\": \""
    };
    Ok(serialized.replacen("\"method\":\"", replacement, 1))
}

/// DeepL 后端适配器
pub struct DeepLBackend {
    transport: Arc<dyn HttpTransport>,
    messages: Arc<dyn MessageProvider>,
    url: String,
}

impl DeepLBackend {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        messages: Arc<dyn MessageProvider>,
        url: &str,
    ) -> Self {
        Self {
            transport,
            messages,
            url: url.to_string(),
        }
    }

    async fn send_request(&self, text: &str, target_lang: &str) -> Result<TranslationResult> {
        let id = random_request_id();
        let timestamp = adjust_timestamp(chrono::Utc::now().timestamp_millis(), count_letter_i(text));
        let payload = build_payload(text, target_lang, id, timestamp)?;
        debug!("DeepL请求: {}", payload);

        let response = self.transport.post_json(&self.url, payload).await?;
        check_status(&response)?;

        let data: RpcResponse =
            serde_json::from_str(&response.body).map_err(|e| TranslationError::Unknown {
                status_code: response.status,
                status_text: response.status_text.clone(),
                message: Some(e.to_string()),
            })?;
        let result_text = data
            .result
            .texts
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| TranslationError::Unknown {
                status_code: response.status,
                status_text: response.status_text.clone(),
                message: Some("empty result.texts".to_string()),
            })?;

        // 该接口不返回可靠的检测语言，source_language 保持为空
        Ok(TranslationResult {
            result_text,
            percentage: 1.0,
            ..TranslationResult::default()
        })
    }
}

#[async_trait]
impl TranslationBackend for DeepLBackend {
    fn api(&self) -> TranslationApi {
        TranslationApi::DeepL
    }

    /// 源语言参数被忽略，始终使用 auto
    async fn translate(&self, word: &str, _source_lang: &str, target_lang: &str) -> TranslationResult {
        let text = word.trim();
        if text.is_empty() {
            return TranslationResult::empty();
        }

        match self.send_request(text, target_lang).await {
            Ok(result) => {
                debug!("DeepL翻译完成: {:?}", result);
                result
            }
            Err(err) => {
                error!("❌ DeepL翻译请求失败: {}", err);
                TranslationResult::error(err.localized_message(self.messages.as_ref()))
            }
        }
    }
}

/// 按状态码分类失败响应，未知错误附带响应体中的 `message`
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_ok() {
        return Ok(());
    }
    match response.status {
        0 => Err(TranslationError::Network {
            message: "状态码为0".to_string(),
        }),
        403 => Err(TranslationError::Authorization {
            status_code: response.status,
        }),
        status => {
            let message = serde_json::from_str::<RpcErrorBody>(&response.body)
                .ok()
                .and_then(|body| body.message);
            Err(TranslationError::Unknown {
                status_code: status,
                status_text: response.status_text.clone(),
                message,
            })
        }
    }
}
