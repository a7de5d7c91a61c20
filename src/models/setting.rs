//! 应用设置
//!
//! 以键值对形式存放在 settings.toml 中。所有受支持的键显式列在
//! [`SettingKey`] 上，不做任何运行时扫描。

use std::collections::HashMap;
use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult, FileError};

/// 受支持的设置键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    /// 生成服务的 API Key
    OpenAiKey,
}

impl SettingKey {
    /// 全部受支持的设置键
    pub const ALL: &'static [SettingKey] = &[SettingKey::OpenAiKey];

    /// 在 settings.toml 中使用的键名
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::OpenAiKey => "openai.key",
        }
    }
}

/// 设置存储
///
/// 文件不存在不算错误：未配置的键在读取时返回 None，由使用方
/// 决定缺失是否致命（例如生成服务在发起请求前检查 API Key）。
#[derive(Debug, Default)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    /// 从 TOML 文件加载设置
    ///
    /// 文件格式为顶层键值对，含点的键需要加引号：
    ///
    /// ```toml
    /// "openai.key" = "sk-..."
    /// ```
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("设置文件不存在，使用空设置: {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            AppError::file_read_failed(path.to_string_lossy().to_string(), e)
        })?;

        let values: HashMap<String, String> = toml::from_str(&content).map_err(|e| {
            AppError::File(FileError::TomlParseFailed {
                path: path.to_string_lossy().to_string(),
                source: Box::new(e),
            })
        })?;

        Ok(Self { values })
    }

    /// 读取某个设置键的值
    pub fn get(&self, key: SettingKey) -> Option<&str> {
        self.values.get(key.as_str()).map(String::as_str)
    }
}
