//! 试卷导出服务 - 业务能力层
//!
//! 只负责"把试卷写成文档"能力，不关心流程
//!
//! 导出内容不依赖也不影响答题状态：先是题目和选项，最后附上
//! 答案与解析，方便打印后自测。

use std::fmt::Write as _;
use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::Exam;

/// 试卷导出服务
pub struct ExamExporter {
    export_folder: String,
}

impl ExamExporter {
    /// 创建新的导出服务
    pub fn new(config: &Config) -> Self {
        Self {
            export_folder: config.export_folder.clone(),
        }
    }

    /// 使用自定义目录创建
    pub fn with_folder(folder: impl Into<String>) -> Self {
        Self {
            export_folder: folder.into(),
        }
    }

    /// 把试卷导出为文本文档
    ///
    /// # 参数
    /// - `exam`: 已解析的试卷
    ///
    /// # 返回
    /// 返回写入的文件路径
    pub async fn export_exam(&self, exam: &Exam) -> AppResult<PathBuf> {
        let folder = PathBuf::from(&self.export_folder);
        fs::create_dir_all(&folder).await.map_err(|e| {
            AppError::file_write_failed(self.export_folder.clone(), e)
        })?;

        let filename = format!(
            "exam_{}.txt",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = folder.join(filename);

        let document = render_document(exam);
        debug!("导出文档 {} 字符", document.chars().count());

        fs::write(&path, document).await.map_err(|e| {
            AppError::file_write_failed(path.to_string_lossy().to_string(), e)
        })?;

        info!("✓ 试卷已导出: {}", path.display());

        Ok(path)
    }
}

/// 渲染导出文档
fn render_document(exam: &Exam) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "{}", "=".repeat(60));
    let _ = writeln!(
        doc,
        "试卷 - 共 {} 题 - 生成于 {}",
        exam.questions.len(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(doc, "{}\n", "=".repeat(60));

    for (index, question) in exam.questions.iter().enumerate() {
        let _ = writeln!(doc, "{}. {}", index + 1, question.content);
        for option in &question.options {
            let _ = writeln!(doc, "   {}) {}", option.number, option.content);
        }
        let _ = writeln!(doc);
    }

    let _ = writeln!(doc, "{}", "─".repeat(60));
    let _ = writeln!(doc, "答案与解析");
    let _ = writeln!(doc, "{}\n", "─".repeat(60));

    for (index, question) in exam.questions.iter().enumerate() {
        let _ = writeln!(
            doc,
            "{}. 正确选项: {}",
            index + 1,
            question.correct_option
        );
        let _ = writeln!(doc, "   {}\n", question.explanation);
    }

    doc
}
