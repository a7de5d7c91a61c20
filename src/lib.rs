//! # Exam Generator
//!
//! 把任意学习资料变成可以当场作答的选择题试卷
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 数据模型层（Models）
//! - `models/` - 不可变的值类型
//! - `Exam` / `Question` / `AnswerOption` - 与生成服务的 JSON 线协议对应
//! - `Product` / `SettingKey` - 交给存储边界的产物与显式设置键
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务只有一项能力
//! - `prompt_builder` - 固定指令头 + 资料文本 → 请求文本（纯函数）
//! - `llm_service` - 提示词 → 原始响应文本（凭证检查在发请求之前）
//! - `exam_parser` - 原始文本 → 校验过的试卷，或分好类的失败
//! - `text_extractor` - 资料文件 → 纯文本
//! - `exam_exporter` - 试卷 → 文本文档
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 答题会话状态机
//! - `AssessmentSession` - 作答 / 互斥选择 / 取消 / 纠错揭示
//! - `SessionObserver` - 每次实际变更同步通知，恰好一次、按序
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 出题流水线，错误统一在此回收
//! - `orchestrator/exam_runner` - 终端互动答题循环
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnswerOption, Exam, Product, ProductKind, Question};
pub use orchestrator::App;
pub use services::{build_prompt, parse, ExamExporter, FileAttachment, LlmService, TextExtractor};
pub use workflow::{AssessmentSession, SessionEvent, SessionObserver};
