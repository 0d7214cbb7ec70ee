//! 统一错误处理模块
//!
//! 定义翻译适配器的错误分类。网络路径上的错误不会向调用方抛出，
//! 而是通过 [`TranslationError::localized_message`] 写入结果记录。

// 标准库导入
use std::fmt;

// 第三方crate导入
use anyhow::Error as AnyhowError;

// 本地模块导入
use crate::api_constants::message_keys;
use crate::providers::MessageProvider;

/// 翻译适配器统一错误类型
#[derive(Debug)]
pub enum TranslationError {
    /// 没有收到响应（连接失败、DNS错误、状态码0等）
    Network {
        /// 底层错误信息
        message: String,
    },

    /// 服务暂不可用（Google 返回 429 或 503）
    Unavailable {
        /// HTTP状态码
        status_code: u16,
    },

    /// 授权失败（DeepL 返回 403）
    Authorization {
        /// HTTP状态码
        status_code: u16,
    },

    /// 其他非200响应
    Unknown {
        /// HTTP状态码
        status_code: u16,
        /// 状态描述
        status_text: String,
        /// 远端返回的错误消息（如果有）
        message: Option<String>,
    },

    /// 配置相关错误
    Configuration {
        /// 配置项名称
        field: String,
        /// 错误原因
        reason: String,
    },

    /// 内部处理错误（包装anyhow::Error）
    Internal {
        /// 包装的错误
        source: AnyhowError,
    },
}

impl TranslationError {
    /// 对应的本地化消息键
    pub fn message_key(&self) -> &'static str {
        match self {
            TranslationError::Network { .. } => message_keys::NETWORK_ERROR,
            TranslationError::Unavailable { .. } => message_keys::UNAVAILABLE_ERROR,
            TranslationError::Authorization { .. } => message_keys::DEEPL_AUTH_ERROR,
            _ => message_keys::UNKNOWN_ERROR,
        }
    }

    /// 生成写入结果记录的本地化错误消息
    ///
    /// 未知错误会附带 `[状态码 状态描述]`，以及远端错误消息（如果有）。
    pub fn localized_message(&self, messages: &dyn MessageProvider) -> String {
        let base = messages.message(self.message_key());
        match self {
            TranslationError::Unknown {
                status_code,
                status_text,
                message,
            } => {
                let mut text = format!("{} [{} {}]", base, status_code, status_text);
                if let Some(message) = message {
                    text.push(' ');
                    text.push_str(message);
                }
                text
            }
            _ => base,
        }
    }
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::Network { message } => {
                write!(f, "网络请求失败: {}", message)
            }
            TranslationError::Unavailable { status_code } => {
                write!(f, "翻译服务暂不可用 [{}]", status_code)
            }
            TranslationError::Authorization { status_code } => {
                write!(f, "翻译服务授权失败 [{}]", status_code)
            }
            TranslationError::Unknown {
                status_code,
                status_text,
                message,
            } => match message {
                Some(message) => {
                    write!(f, "未知错误 [{} {}]: {}", status_code, status_text, message)
                }
                None => write!(f, "未知错误 [{} {}]", status_code, status_text),
            },
            TranslationError::Configuration { field, reason } => {
                write!(f, "配置错误 [{}]: {}", field, reason)
            }
            TranslationError::Internal { source } => {
                write!(f, "内部处理错误: {}", source)
            }
        }
    }
}

impl std::error::Error for TranslationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranslationError::Internal { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// 翻译适配器结果类型别名
pub type Result<T> = std::result::Result<T, TranslationError>;

/// 便捷的错误创建宏
#[macro_export]
macro_rules! translation_error {
    (network, $msg:expr) => {
        $crate::error::TranslationError::Network {
            message: $msg.to_string(),
        }
    };
    (unknown, $code:expr, $text:expr) => {
        $crate::error::TranslationError::Unknown {
            status_code: $code,
            status_text: $text.to_string(),
            message: None,
        }
    };
    (unknown, $code:expr, $text:expr, $msg:expr) => {
        $crate::error::TranslationError::Unknown {
            status_code: $code,
            status_text: $text.to_string(),
            message: Some($msg.to_string()),
        }
    };
    (config, $field:expr, $reason:expr) => {
        $crate::error::TranslationError::Configuration {
            field: $field.to_string(),
            reason: $reason.to_string(),
        }
    };
}

/// 从anyhow::Error转换为TranslationError
impl From<AnyhowError> for TranslationError {
    fn from(error: AnyhowError) -> Self {
        TranslationError::Internal { source: error }
    }
}

/// 从reqwest::Error转换为TranslationError
///
/// 传输层错误一律视为没有收到响应。
impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        TranslationError::Network {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::DefaultMessages;

    #[test]
    fn test_error_display() {
        let err = TranslationError::Unknown {
            status_code: 500,
            status_text: "Internal Server Error".to_string(),
            message: None,
        };

        assert_eq!(format!("{}", err), "未知错误 [500 Internal Server Error]");
    }

    #[test]
    fn test_error_macro() {
        let err = translation_error!(unknown, 404, "Not Found", "missing");
        match err {
            TranslationError::Unknown {
                status_code,
                status_text,
                message,
            } => {
                assert_eq!(status_code, 404);
                assert_eq!(status_text, "Not Found");
                assert_eq!(message.as_deref(), Some("missing"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_anyhow_conversion() {
        let anyhow_err = anyhow::anyhow!("Test anyhow error");
        let translation_err: TranslationError = anyhow_err.into();

        match translation_err {
            TranslationError::Internal { .. } => {}
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_message_keys() {
        assert_eq!(
            translation_error!(network, "refused").message_key(),
            message_keys::NETWORK_ERROR
        );
        assert_eq!(
            TranslationError::Unavailable { status_code: 429 }.message_key(),
            message_keys::UNAVAILABLE_ERROR
        );
        assert_eq!(
            TranslationError::Authorization { status_code: 403 }.message_key(),
            message_keys::DEEPL_AUTH_ERROR
        );
        assert_eq!(
            translation_error!(config, "timeout", "bad").message_key(),
            message_keys::UNKNOWN_ERROR
        );
    }

    #[test]
    fn test_localized_unknown_message() {
        let messages = DefaultMessages;
        let unknown = messages.message(message_keys::UNKNOWN_ERROR);

        let err = translation_error!(unknown, 500, "Internal Server Error");
        assert_eq!(
            err.localized_message(&messages),
            format!("{} [500 Internal Server Error]", unknown)
        );

        let err = translation_error!(unknown, 429, "Too Many Requests", "Too many requests");
        assert_eq!(
            err.localized_message(&messages),
            format!("{} [429 Too Many Requests] Too many requests", unknown)
        );
    }

    #[test]
    fn test_localized_plain_messages() {
        let messages = DefaultMessages;
        let err = TranslationError::Authorization { status_code: 403 };
        assert_eq!(
            err.localized_message(&messages),
            messages.message(message_keys::DEEPL_AUTH_ERROR)
        );
    }
}
