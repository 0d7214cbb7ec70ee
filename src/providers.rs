//! 外部协作者接口
//!
//! 翻译器依赖两个由宿主提供的服务：设置读取与本地化消息。
//! 二者都以trait形式在构造时注入，便于在测试中替换。

use std::collections::HashMap;
use std::sync::RwLock;

use crate::api_constants::message_keys;

/// 设置读取接口
pub trait SettingsProvider: Send + Sync {
    /// 读取设置项，不存在时返回 `None`
    fn get_setting(&self, key: &str) -> Option<String>;
}

/// 本地化消息接口
pub trait MessageProvider: Send + Sync {
    /// 按键取得本地化消息；未知键返回空字符串
    fn message(&self, key: &str) -> String;
}

/// 内存中的设置存储
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以单个设置项创建
    pub fn with_setting(key: &str, value: &str) -> Self {
        let settings = Self::new();
        settings.set(key, value);
        settings
    }

    /// 写入设置项，已存在时覆盖
    pub fn set(&self, key: &str, value: &str) {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
    }
}

impl SettingsProvider for MemorySettings {
    fn get_setting(&self, key: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }
}

/// 默认英文消息
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMessages;

impl MessageProvider for DefaultMessages {
    fn message(&self, key: &str) -> String {
        let text = match key {
            message_keys::NETWORK_ERROR => "A network error has occurred.",
            message_keys::UNAVAILABLE_ERROR => {
                "The translation service is temporarily unavailable. Please try again later."
            }
            message_keys::UNKNOWN_ERROR => "An unknown error has occurred.",
            message_keys::DEEPL_AUTH_ERROR => "DeepL rejected the request (authorization error).",
            _ => "",
        };
        text.to_string()
    }
}

/// 基于映射表的消息提供者，用于自定义语言包
#[derive(Debug, Default, Clone)]
pub struct MessageTable {
    messages: HashMap<String, String>,
}

impl MessageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, key: &str, text: &str) -> Self {
        self.messages.insert(key.to_string(), text.to_string());
        self
    }
}

impl MessageProvider for MessageTable {
    fn message(&self, key: &str) -> String {
        self.messages.get(key).cloned().unwrap_or_default()
    }
}
