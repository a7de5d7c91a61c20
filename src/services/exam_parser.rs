//! 试卷解析 - 业务能力层
//!
//! 把生成服务返回的原始文本变成经过校验的 [`Exam`]，或者一个
//! 分好类的失败。
//!
//! 三种结果必须区分开：
//! - `Ok(None)`：还没有可解析的内容（空响应不是错误）
//! - `Ok(Some(exam))`：结构合法且全部题目通过不变量校验
//! - `Err(...)`：尝试解析但失败（格式错误 / 没有题目 / 校验不过）
//!
//! 解析是全有或全无的：只要任何一道题违反不变量，整份响应作废，
//! 绝不返回部分试卷。

use tracing::{debug, warn};

use crate::error::{AppError, AppResult, ParseFailure};
use crate::models::Exam;

/// 解析生成服务的原始响应
///
/// # 参数
/// - `raw`: 原始响应文本
///
/// # 返回
/// - `Ok(None)`: 去除空白后没有内容，尚无可解析的输入
/// - `Ok(Some(exam))`: 解析并校验通过的试卷
/// - `Err(AppError::Parse(MalformedResponse))`: 不是合法的试卷 JSON
/// - `Err(AppError::Parse(NoQuestionsFound))`: 合法结构但题目为空
///   （生成契约规定无法完成时输出 {"Questions":[]}）
/// - `Err(AppError::Validation(..))`: 结构可解码但违反题目不变量
pub fn parse(raw: &str) -> AppResult<Option<Exam>> {
    let text = raw.trim();
    if text.is_empty() {
        // 与解析失败区分开：没有输入不算尝试失败
        return Ok(None);
    }

    let exam: Exam = serde_json::from_str(text).map_err(|e| {
        debug!("响应解码失败: {}", e);
        AppError::Parse(ParseFailure::MalformedResponse {
            detail: e.to_string(),
        })
    })?;

    if exam.questions.is_empty() {
        return Err(AppError::Parse(ParseFailure::NoQuestionsFound));
    }

    // 结构解码成功不代表可用：生成契约的每条不变量都在这里重新校验，
    // 不信任服务端承诺
    if let Err(e) = exam.validate() {
        warn!("试卷校验不通过: {}", e);
        return Err(AppError::Validation(e));
    }

    debug!("解析成功，共 {} 道题目", exam.questions.len());

    Ok(Some(exam))
}
