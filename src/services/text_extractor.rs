//! 文本提取服务 - 业务能力层
//!
//! 只负责"资料文件 → 纯文本"能力，不关心流程
//!
//! PDF 用 pdf-extract 解析（阻塞操作，放到阻塞线程池执行），
//! 其余文件按 UTF-8 文本读取。

use std::path::{Path, PathBuf};

use regex::Regex;
use tokio::fs;
use tokio::task;
use tracing::debug;

use crate::error::{AppError, AppResult, FileError};
use crate::services::llm_service::FileAttachment;

/// 文本提取服务
///
/// 职责：
/// - 把单个资料文件转成纯文本
/// - 为附件上传路径读出原始字节
/// - 不出现 Exam / Question
pub struct TextExtractor;

impl TextExtractor {
    /// 创建新的文本提取服务
    pub fn new() -> Self {
        Self
    }

    /// 提取资料文件的纯文本
    ///
    /// # 参数
    /// - `path`: 资料文件路径
    ///
    /// # 返回
    /// 返回规整后的纯文本（连续空行已折叠）
    ///
    /// # 错误
    /// 文件不存在时返回 NotFound
    pub async fn extract_text(&self, path: impl AsRef<Path>) -> AppResult<String> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::file_not_found(path.to_string_lossy().to_string()));
        }

        let is_pdf = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        let text = if is_pdf {
            debug!("按 PDF 解析: {}", path.display());
            let owned: PathBuf = path.to_path_buf();
            task::spawn_blocking(move || {
                pdf_extract::extract_text(&owned).map_err(|e| e.to_string())
            })
            .await
            .map_err(|e| AppError::Other(format!("阻塞任务失败: {}", e)))?
            .map_err(|detail| {
                AppError::File(FileError::ReadFailed {
                    path: path.to_string_lossy().to_string(),
                    source: detail.into(),
                })
            })?
        } else {
            debug!("按纯文本读取: {}", path.display());
            fs::read_to_string(path).await.map_err(|e| {
                AppError::file_read_failed(path.to_string_lossy().to_string(), e)
            })?
        };

        normalize_text(&text)
    }

    /// 读出文件的原始字节，作为请求附件
    pub async fn read_attachment(&self, path: impl AsRef<Path>) -> AppResult<FileAttachment> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::file_not_found(path.to_string_lossy().to_string()));
        }

        let bytes = fs::read(path).await.map_err(|e| {
            AppError::file_read_failed(path.to_string_lossy().to_string(), e)
        })?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        debug!("读取附件: {} ({} 字节)", filename, bytes.len());

        Ok(FileAttachment { bytes, filename })
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// 折叠三个以上的连续换行，去除两端空白
fn normalize_text(text: &str) -> AppResult<String> {
    let re = Regex::new(r"\n{3,}")?;
    Ok(re.replace_all(text, "\n\n").trim().to_string())
}
