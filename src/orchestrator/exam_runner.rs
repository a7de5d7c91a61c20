//! 互动答题 - 编排层
//!
//! ## 职责
//!
//! 终端里的薄展示层：列出题目、接收选择、切换纠错揭示、导出。
//! 所有状态都在 [`AssessmentSession`] 里，本模块只读取和转发。
//!
//! 命令：
//! - `<题号> <选项号>`：选择；对已选中的选项重复输入即取消作答
//! - `c`：切换纠错模式（揭示对错与解析，不改变任何选择）
//! - `e`：导出试卷文档
//! - `q`：退出

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::warn;

use crate::services::ExamExporter;
use crate::workflow::AssessmentSession;

/// 运行互动答题循环
///
/// 会话里没有试卷时不应调用（调用方先检查 `has_exam`）。
pub async fn run_interactive(
    session: &mut AssessmentSession,
    exporter: &ExamExporter,
) -> Result<()> {
    println!("\n命令: <题号> <选项号> 选择 | c 纠错模式 | e 导出 | q 退出\n");
    render(session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let input = line?;
        let input = input.trim();

        match input {
            "" => continue,
            "q" => break,
            "c" => {
                session.toggle_correction_mode();
                render(session);
            }
            "e" => {
                // 可用性在每次调用前重新评估：有试卷才允许导出
                match session.exam() {
                    Some(exam) => {
                        let path = exporter.export_exam(exam).await?;
                        println!("已导出: {}", path.display());
                    }
                    None => println!("没有可导出的试卷"),
                }
            }
            _ => {
                apply_selection(session, input);
                render(session);
            }
        }
    }

    print_summary(session);
    Ok(())
}

/// 解析并应用一次选择输入
///
/// 用户输入是数据不是代码：越界题号和不存在的选项在这里拦下，
/// 不会让带着坏索引的调用打到会话上。
fn apply_selection(session: &mut AssessmentSession, input: &str) {
    let mut parts = input.split_whitespace();
    let question = parts.next().and_then(|s| s.parse::<usize>().ok());
    let option = parts.next().and_then(|s| s.parse::<u32>().ok());

    let (Some(question), Some(option)) = (question, option) else {
        println!("无法识别的命令: {}", input);
        return;
    };

    if question < 1 || question > session.question_count() {
        warn!("题号 {} 越界（共 {} 题）", question, session.question_count());
        println!("题号 {} 不存在", question);
        return;
    }
    let question_index = question - 1;

    let option_exists = session
        .exam()
        .map(|exam| exam.questions[question_index].option(option).is_some())
        .unwrap_or(false);
    if !option_exists {
        println!("题目 {} 没有选项 {}", question, option);
        return;
    }

    session.select_option(question_index, option);
}

/// 渲染整份试卷和当前状态
fn render(session: &AssessmentSession) {
    let correction = session.correction_mode();
    let Some(exam) = session.exam() else { return };

    let mut out = String::new();

    for (index, question) in exam.questions.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", index + 1, question.content));

        for option in &question.options {
            let marker = if session.is_option_selected(index, option.number) {
                "[x]"
            } else {
                "[ ]"
            };
            let reveal = if correction && option.number == question.correct_option {
                " ✓"
            } else {
                ""
            };
            out.push_str(&format!("   {} {}) {}{}\n", marker, option.number, option.content, reveal));
        }

        if correction && session.is_answered(index) {
            let verdict = if session.is_correct(index) { "✓ 正确" } else { "✗ 错误" };
            out.push_str(&format!("   {} 解析: {}\n", verdict, question.explanation));
        }
    }

    println!("{}", out);
}

fn print_summary(session: &AssessmentSession) {
    println!(
        "\n已作答 {}/{}，答对 {} 题",
        session.answered_count(),
        session.question_count(),
        session.correct_count()
    );
}
