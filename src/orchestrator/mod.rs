//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 出题流水线
//! - 管理应用生命周期（初始化、运行）
//! - 串联提取 → 提示词 → 生成 → 解析 → 发布
//! - 在本层回收所有错误类别，转成用户可见信息
//!
//! ### `exam_runner` - 互动答题
//! - 终端里的薄展示层
//! - 把用户输入转成会话操作，渲染当前状态
//!
//! ## 层次关系
//!
//! ```text
//! app (出题流水线)
//!     ↓
//! exam_runner (互动答题循环)
//!     ↓
//! workflow::AssessmentSession (答题状态机)
//!     ↓
//! services (能力层：prompt / llm / parse / extract / export)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：app 管流水线，exam_runner 管交互
//! 2. **单写者**：会话状态只被交互流程变更
//! 3. **向下依赖**：编排层 → workflow → services
//! 4. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod app;
pub mod exam_runner;

// 重新导出主要类型
pub use app::App;
