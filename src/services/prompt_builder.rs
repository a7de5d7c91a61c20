//! 提示词构建 - 业务能力层
//!
//! 只负责"拼出生成请求文本"，不发请求、不做 I/O。
//!
//! 提示词由固定的指令头加上可选的资料文本组成。指令头是与生成
//! 服务之间的输出契约：要求只输出一个 JSON 对象，并规定了试卷
//! 的目标结构和各项约束。同一题目数量下指令头逐字节相同，这样
//! 无论是否附带文件，复用的都是同一份契约文本。

/// 构建生成请求文本
///
/// # 参数
/// - `question_count`: 要求生成的题目数量（插入指令头）
/// - `source_text`: 资料文本；为 None 或空串时不追加
/// - `embed_source_as_file`: 资料作为文件附件随请求上传时为 true，
///   此时资料文本不会拼进返回值，由调用方在请求体中携带
///
/// # 返回
/// 完整的请求文本。纯函数：相同输入永远得到相同输出。
pub fn build_prompt(
    question_count: u32,
    source_text: Option<&str>,
    embed_source_as_file: bool,
) -> String {
    let header = prompt_header(question_count);

    match source_text {
        Some(text) if !embed_source_as_file && !text.is_empty() => {
            // 资料原文逐字追加，不转义、不截断
            format!("{}\n{}", header, text)
        }
        _ => header,
    }
}

/// 固定指令头，只随题目数量变化
fn prompt_header(question_count: u32) -> String {
    format!(
        r#"You are a JSON generator. You must output ONLY a single valid JSON object and nothing else.

ABSOLUTE OUTPUT RULES:
- Output must be raw JSON only (no Markdown, no code fences).
- No explanations, no comments, no extra text before or after the JSON.
- Do not add any keys other than those defined below.
- Ensure the output is strictly parseable JSON (double quotes, no trailing commas).

TARGET SHAPE (must match exactly):

Exam:
{{
  "Questions": Question[]
}}

Question:
{{
  "Content": string,
  "Options": Option[],
  "CorrectOption": integer,
  "Explanation": string
}}

Option:
{{
  "Number": integer,
  "Content": string
}}

CONSTRAINTS:
- "Questions" must be a non-empty array containing exactly {} questions.
- Each Question must have 3 to 6 options.
- Option.Number must start at 1 and increment by 1 within each question (1..N).
- CorrectOption must be one of the Option.Number values for that question.
- Exactly one best answer per question; CorrectOption points to it.
- Explanation must justify why the CorrectOption is correct.
- Explanation should quote or cite the relevant part of the SOURCE MATERIAL (prefer short verbatim quotes).
  If exact quoting is not possible, reference a specific section/heading/paragraph by name and summarize it.
- Explanation must be plain text (no Markdown, no LaTeX).
- Option.Content must be plain text (no Markdown, no LaTeX).
- Do not invent citations: only cite text that appears in SOURCE MATERIAL.

If you cannot comply with all rules, output exactly:
{{"Questions":[]}}"#,
        question_count
    )
}
