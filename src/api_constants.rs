/// 翻译API配置常量
///
/// 该文件定义了所有翻译后端相关的常量配置，方便统一管理和维护

/// 后端服务地址
pub mod api_config {
    /// Google 公共翻译接口
    pub const GOOGLE_API_URL: &str = "https://translate.googleapis.com/translate_a/single";

    /// Google 接口的客户端标识
    pub const GOOGLE_CLIENT_ID: &str = "gtx";

    /// DeepL JSON-RPC 接口
    pub const DEEPL_API_URL: &str = "https://www2.deepl.com/jsonrpc";

    /// DeepL 文本处理方法名
    pub const DEEPL_METHOD: &str = "LMT_handle_texts";

    /// DeepL 请求的备选译文数量
    pub const DEEPL_REQUEST_ALTERNATIVES: u32 = 3;

    /// DeepL 请求ID随机区间（再乘以 DEEPL_ID_SCALE）
    pub const DEEPL_ID_MIN: u64 = 100_000;
    pub const DEEPL_ID_MAX: u64 = 199_998;
    pub const DEEPL_ID_SCALE: u64 = 1000;
}

/// 翻译服务配置
pub mod service_config {
    /// 默认源语言
    pub const DEFAULT_SOURCE_LANG: &str = "auto";

    /// 默认目标语言
    pub const DEFAULT_TARGET_LANG: &str = "en";

    /// DeepL 目标语言为空时的回退值
    pub const DEEPL_FALLBACK_TARGET_LANG: &str = "EN";

    /// 空输入时返回的源语言
    pub const EMPTY_RESULT_SOURCE_LANG: &str = "en";

    /// 默认User-Agent
    pub const DEFAULT_USER_AGENT: &str = "word-translator/0.1.0";
}

/// 设置项键名
pub mod setting_keys {
    /// 选择翻译后端的设置项，值为 "google" 时使用 Google，其余情况使用 DeepL
    pub const TRANSLATION_API: &str = "translationApi";
}

/// 本地化消息键名
pub mod message_keys {
    pub const NETWORK_ERROR: &str = "networkError";
    pub const UNAVAILABLE_ERROR: &str = "unavailableError";
    pub const UNKNOWN_ERROR: &str = "unknownError";
    pub const DEEPL_AUTH_ERROR: &str = "deeplAuthError";
}

/// 验证API URL是否有效
pub fn is_valid_api_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
