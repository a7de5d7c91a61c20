//! 出题流水线 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责把各项能力串成完整的出题流程。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：合并设置文件里的凭证、创建各项服务
//! 2. **出题流程**：提取资料 → 构建提示词 → 调用生成 → 解析校验
//! 3. **原子发布**：解析先落到局部变量，成功才装载进答题会话
//! 4. **错误回收**：所有错误类别在本层转成用户可见信息，不外泄
//!
//! ## 设计特点
//!
//! - **单写者**：只有本层（交互流程）触碰会话状态；生成与提取
//!   是仅有的耗时操作，await 结束后结果才回到交互流程
//! - **要么全装载，要么不动**：解析或校验失败时，已装载的试卷
//!   保持原样，只更新状态文本

use std::path::Path;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{Product, ProductKind, SettingKey, Settings};
use crate::orchestrator::exam_runner;
use crate::services::{
    build_prompt, exam_parser, ExamExporter, LlmService, TextExtractor,
};
use crate::utils::logging::truncate_text;
use crate::workflow::AssessmentSession;

/// 应用主结构
pub struct App {
    config: Config,
    llm: LlmService,
    extractor: TextExtractor,
    exporter: ExamExporter,
    session: AssessmentSession,
    /// 最近一次生成调用返回的原始文本
    result_text: String,
    /// 面向用户的状态信息（出题失败时的提示）
    status_message: String,
    /// 最近一次成功出题的产物（交给存储边界）
    product: Option<Product>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(mut config: Config) -> Result<Self> {
        // 环境变量没给 API Key 时，从设置文件读取
        if config.llm_api_key.is_empty() {
            let settings = Settings::load(&config.settings_file).await?;
            if let Some(key) = settings.get(SettingKey::OpenAiKey) {
                config.llm_api_key = key.to_string();
            }
        }

        log_startup(&config);

        let llm = LlmService::new(&config);
        let exporter = ExamExporter::new(&config);

        Ok(Self {
            config,
            llm,
            extractor: TextExtractor::new(),
            exporter,
            session: AssessmentSession::new(),
            result_text: String::new(),
            status_message: String::new(),
            product: None,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self) -> Result<()> {
        if let Err(e) = self.create_exam().await {
            // 错误在最靠近来源的边界回收成用户信息；校验错误单独
            // 记录，便于定位生成质量问题
            if e.is_validation() {
                warn!("⚠️ 生成内容未通过校验: {}", e);
            } else {
                error!("❌ 出题失败: {}", e);
            }
            self.status_message = format!("创建试卷失败: {}", e);
        }

        if self.session.has_exam() {
            exam_runner::run_interactive(&mut self.session, &self.exporter).await?;
        } else if self.status_message.is_empty() {
            info!("没有试卷可作答");
        } else {
            info!("{}", self.status_message);
        }

        Ok(())
    }

    /// 完整出题流程
    async fn create_exam(&mut self) -> AppResult<()> {
        let source_file = self.config.source_file.clone();
        let source_path = Path::new(&source_file);
        info!("📄 资料文件: {}", source_path.display());

        // 附件模式下资料不进提示词，由请求体携带；两种模式共用
        // 同一份指令头
        let (prompt, attachment) = if self.config.embed_source_as_file {
            let attachment = self.extractor.read_attachment(source_path).await?;
            let prompt = build_prompt(self.config.question_count, None, true);
            (prompt, Some(attachment))
        } else {
            let text = self.extractor.extract_text(source_path).await?;
            info!("✓ 提取完成，共 {} 字符", text.chars().count());
            if self.config.verbose_logging {
                info!("资料预览: {}", truncate_text(&text, 80));
            }
            let prompt = build_prompt(self.config.question_count, Some(&text), false);
            (prompt, None)
        };

        info!("🔍 正在请求生成 {} 道题目...", self.config.question_count);
        let raw = self.llm.generate(&prompt, attachment.as_ref()).await?;

        self.publish_result(raw, source_path)
    }

    /// 原子发布生成结果
    ///
    /// 解析完全在局部完成，只有产出合法试卷才触碰会话；失败时
    /// 除了原始文本和状态信息外什么都不变。
    fn publish_result(&mut self, raw: String, source_path: &Path) -> AppResult<()> {
        self.result_text = raw;
        self.status_message.clear();

        let exam = match exam_parser::parse(&self.result_text)? {
            Some(exam) => exam,
            None => {
                // 空响应：尚无可解析内容，不算失败
                warn!("⚠️ 生成服务返回了空响应");
                return Ok(());
            }
        };

        let source_name = source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.config.source_file.clone());

        self.product = Some(Product {
            name: format!("{} - 试卷", source_name),
            content: self.result_text.clone(),
            source_name,
            kind: ProductKind::Exam,
        });

        info!("✅ 出题成功，共 {} 道题目", exam.questions.len());
        self.session.load_exam(exam);

        Ok(())
    }

    /// 最近一次成功出题的产物
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    /// 当前答题会话
    pub fn session(&self) -> &AssessmentSession {
        &self.session
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 资料出题模式");
    info!("📊 题目数量: {}", config.question_count);
    info!("🤖 模型: {}", config.llm_model_name);
    info!("{}", "=".repeat(60));
}
