//! 试卷数据模型
//!
//! 与生成服务的 JSON 线协议一一对应（字段名为 PascalCase）。
//! 试卷一旦构造完成即不可变：解析器产出 `Exam`，答题会话只读取它。

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// 每道题允许的最少选项数
pub const MIN_OPTIONS: usize = 3;
/// 每道题允许的最多选项数
pub const MAX_OPTIONS: usize = 6;

/// 单个选项
///
/// `number` 是选项在题目内的编号，从 1 开始。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    #[serde(rename = "Number")]
    pub number: u32,

    #[serde(rename = "Content")]
    pub content: String,
}

/// 单道题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "Content")]
    pub content: String,

    #[serde(rename = "Options")]
    pub options: Vec<AnswerOption>,

    #[serde(rename = "CorrectOption")]
    pub correct_option: u32,

    #[serde(rename = "Explanation")]
    pub explanation: String,
}

impl Question {
    /// 按编号查找选项
    pub fn option(&self, number: u32) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.number == number)
    }

    /// 校验单道题目的不变量
    ///
    /// # 参数
    /// - `question_index`: 题目在试卷中的序号（从 1 开始，仅用于报错）
    ///
    /// 不变量：
    /// - 选项数量在 3..=6 之间
    /// - 选项编号恰好是 1..=N，无缺口无重复
    /// - 正确选项编号必须命中其中一个选项
    /// - 解析说明非空
    pub fn validate(&self, question_index: usize) -> Result<(), ValidationError> {
        let count = self.options.len();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&count) {
            return Err(ValidationError::OptionCountOutOfRange {
                question: question_index,
                count,
            });
        }

        // 编号集合必须恰好覆盖 1..=N，每个值只出现一次
        let mut seen = vec![false; count];
        for option in &self.options {
            let number = option.number as usize;
            if number < 1 || number > count || seen[number - 1] {
                return Err(ValidationError::OptionNumbersNotCompact {
                    question: question_index,
                });
            }
            seen[number - 1] = true;
        }

        if self.option(self.correct_option).is_none() {
            return Err(ValidationError::CorrectOptionInvalid {
                question: question_index,
                correct_option: self.correct_option,
            });
        }

        if self.explanation.trim().is_empty() {
            return Err(ValidationError::EmptyExplanation {
                question: question_index,
            });
        }

        Ok(())
    }
}

/// 完整试卷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    #[serde(rename = "Questions")]
    pub questions: Vec<Question>,
}

impl Exam {
    /// 校验所有题目的不变量
    ///
    /// 题目序号从 1 开始报告。空试卷不在此处处理（解析器把它
    /// 归类为 NoQuestionsFound，而不是校验错误）。
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (index, question) in self.questions.iter().enumerate() {
            question.validate(index + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(number: u32, content: &str) -> AnswerOption {
        AnswerOption {
            number,
            content: content.to_string(),
        }
    }

    fn valid_question() -> Question {
        Question {
            content: "太阳系中最大的行星是？".to_string(),
            options: vec![option(1, "地球"), option(2, "木星"), option(3, "火星")],
            correct_option: 2,
            explanation: "木星的质量超过其他行星总和。".to_string(),
        }
    }

    #[test]
    fn validate_accepts_well_formed_question() {
        assert!(valid_question().validate(1).is_ok());
    }

    #[test]
    fn validate_rejects_too_few_options() {
        let mut q = valid_question();
        q.options.truncate(2);
        q.correct_option = 1;
        assert!(matches!(
            q.validate(1),
            Err(ValidationError::OptionCountOutOfRange { question: 1, count: 2 })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_option_numbers() {
        let mut q = valid_question();
        q.options[2].number = 1; // 编号 [1, 2, 1]
        assert!(matches!(
            q.validate(1),
            Err(ValidationError::OptionNumbersNotCompact { question: 1 })
        ));
    }

    #[test]
    fn validate_rejects_gapped_option_numbers() {
        let mut q = valid_question();
        q.options[2].number = 5; // 编号 [1, 2, 5]
        assert!(matches!(
            q.validate(1),
            Err(ValidationError::OptionNumbersNotCompact { question: 1 })
        ));
    }

    #[test]
    fn validate_rejects_correct_option_outside_numbers() {
        let mut q = valid_question();
        q.correct_option = 4;
        assert!(matches!(
            q.validate(1),
            Err(ValidationError::CorrectOptionInvalid {
                question: 1,
                correct_option: 4
            })
        ));
    }

    #[test]
    fn validate_rejects_blank_explanation() {
        let mut q = valid_question();
        q.explanation = "   ".to_string();
        assert!(matches!(
            q.validate(1),
            Err(ValidationError::EmptyExplanation { question: 1 })
        ));
    }

    #[test]
    fn exam_validate_reports_first_bad_question() {
        let mut bad = valid_question();
        bad.correct_option = 9;
        let exam = Exam {
            questions: vec![valid_question(), bad],
        };
        assert!(matches!(
            exam.validate(),
            Err(ValidationError::CorrectOptionInvalid { question: 2, .. })
        ));
    }

    #[test]
    fn wire_shape_uses_pascal_case_keys() {
        let exam = Exam {
            questions: vec![valid_question()],
        };
        let json = serde_json::to_string(&exam).unwrap();
        assert!(json.contains("\"Questions\""));
        assert!(json.contains("\"CorrectOption\""));
        assert!(json.contains("\"Explanation\""));
        assert!(json.contains("\"Number\""));
    }
}
