//! 答题会话 - 流程层
//!
//! 核心职责：在一份已解析的试卷之上维护作答 / 选择 / 纠错状态
//!
//! 状态规则：
//! 1. 每道题同一时刻至多选中一个选项（互斥）
//! 2. 再次选择当前已选中的选项 → 取消作答（这是唯一的取消途径）
//! 3. 纠错模式只控制是否向展示层揭示对错与解析，不碰任何选择
//! 4. 装载新试卷是替换底层试卷的唯一途径，必然丢弃全部旧作答

use tracing::debug;

use crate::models::Exam;
use crate::workflow::events::{SessionEvent, SessionObserver};

/// 单道题的作答状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionState {
    /// 未作答
    Unanswered,
    /// 已作答（记录选中的选项编号）
    Answered(u32),
}

/// 答题会话
///
/// 职责：
/// - 持有当前试卷和每道题的作答状态
/// - 提供选择 / 取消 / 纠错模式操作
/// - 对错与是否作答按需从当前状态推导，从不单独缓存
/// - 不做解析，不做 I/O
///
/// 状态只在交互线程上变更（单写者）；生成与提取的结果必须先落地
/// 再回到交互流程里调用本类型。
pub struct AssessmentSession {
    exam: Option<Exam>,
    states: Vec<QuestionState>,
    correction_mode: bool,
    observer: Option<Box<dyn SessionObserver + Send>>,
}

impl AssessmentSession {
    /// 创建空会话（尚未装载试卷）
    pub fn new() -> Self {
        Self {
            exam: None,
            states: Vec::new(),
            correction_mode: false,
            observer: None,
        }
    }

    /// 注册观察者（替换之前注册的）
    pub fn set_observer(&mut self, observer: Box<dyn SessionObserver + Send>) {
        self.observer = Some(observer);
    }

    /// 是否已装载试卷
    pub fn has_exam(&self) -> bool {
        self.exam.is_some()
    }

    /// 当前试卷（导出时从这里取；未装载时为 None）
    pub fn exam(&self) -> Option<&Exam> {
        self.exam.as_ref()
    }

    /// 当前试卷的题目数量
    pub fn question_count(&self) -> usize {
        self.states.len()
    }

    /// 纠错模式是否开启
    pub fn correction_mode(&self) -> bool {
        self.correction_mode
    }

    /// 装载新试卷
    ///
    /// 替换当前试卷，为每道题重建全新的未作答状态，并强制关闭
    /// 纠错模式。旧作答一律丢弃，没有"继续上次"的路径。
    pub fn load_exam(&mut self, exam: Exam) {
        // 先关纠错模式再装载，关闭本身是一次可观察的变更
        if self.correction_mode {
            self.correction_mode = false;
            self.emit(SessionEvent::CorrectionModeChanged { enabled: false });
        }

        let question_count = exam.questions.len();
        self.states = vec![QuestionState::Unanswered; question_count];
        self.exam = Some(exam);

        debug!("装载试卷，共 {} 道题目", question_count);
        self.emit(SessionEvent::ExamLoaded { question_count });
    }

    /// 选择某道题的某个选项
    ///
    /// - 未作答或已选其他选项：改选该选项（互斥，旧选择被取代）
    /// - 已选中同一选项：取消作答
    ///
    /// # Panics
    /// 未装载试卷、题目索引越界、选项编号不存在时 panic。
    /// 这些属于调用方的编程错误，不是可恢复的情况。
    pub fn select_option(&mut self, question_index: usize, option_number: u32) {
        let exam = self
            .exam
            .as_ref()
            .expect("select_option 在未装载试卷时被调用");

        let question = exam.questions.get(question_index).unwrap_or_else(|| {
            panic!(
                "题目索引 {} 越界（共 {} 题）",
                question_index,
                exam.questions.len()
            )
        });

        assert!(
            question.option(option_number).is_some(),
            "题目 {} 不存在编号为 {} 的选项",
            question_index + 1,
            option_number
        );

        let next = match self.states[question_index] {
            // 再次选择当前答案 → 取消作答
            QuestionState::Answered(current) if current == option_number => {
                QuestionState::Unanswered
            }
            _ => QuestionState::Answered(option_number),
        };

        self.states[question_index] = next;

        let selected = match next {
            QuestionState::Answered(n) => Some(n),
            QuestionState::Unanswered => None,
        };
        self.emit(SessionEvent::SelectionChanged {
            question_index,
            selected,
        });
    }

    /// 切换纠错模式
    ///
    /// 只翻转开关，不改变任何选择状态。
    pub fn toggle_correction_mode(&mut self) {
        self.correction_mode = !self.correction_mode;
        self.emit(SessionEvent::CorrectionModeChanged {
            enabled: self.correction_mode,
        });
    }

    /// 某道题当前选中的选项编号
    ///
    /// # Panics
    /// 题目索引越界时 panic。
    pub fn selected_option(&self, question_index: usize) -> Option<u32> {
        match self.states[question_index] {
            QuestionState::Answered(n) => Some(n),
            QuestionState::Unanswered => None,
        }
    }

    /// 某道题是否已作答
    pub fn is_answered(&self, question_index: usize) -> bool {
        self.selected_option(question_index).is_some()
    }

    /// 某道题是否答对
    ///
    /// 按需推导：已作答且选中编号等于该题的正确选项。
    pub fn is_correct(&self, question_index: usize) -> bool {
        let exam = self.exam.as_ref().expect("is_correct 在未装载试卷时被调用");
        match self.states[question_index] {
            QuestionState::Answered(n) => n == exam.questions[question_index].correct_option,
            QuestionState::Unanswered => false,
        }
    }

    /// 某道题的某个选项当前是否被选中
    pub fn is_option_selected(&self, question_index: usize, option_number: u32) -> bool {
        self.selected_option(question_index) == Some(option_number)
    }

    /// 已作答题目数
    pub fn answered_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| matches!(s, QuestionState::Answered(_)))
            .count()
    }

    /// 答对题目数
    pub fn correct_count(&self) -> usize {
        (0..self.states.len()).filter(|&i| self.is_correct(i)).count()
    }

    fn emit(&mut self, event: SessionEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(&event);
        }
    }
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerOption, Question};
    use std::sync::{Arc, Mutex};

    fn option(number: u32, content: &str) -> AnswerOption {
        AnswerOption {
            number,
            content: content.to_string(),
        }
    }

    /// 与会话无关的最小试卷：题目不变量由解析器负责，
    /// 会话层不重复校验，可以直接构造两选项的题目
    fn two_plus_two_exam() -> Exam {
        Exam {
            questions: vec![Question {
                content: "What is 2+2?".to_string(),
                options: vec![option(1, "3"), option(2, "4")],
                correct_option: 2,
                explanation: "2+2=4.".to_string(),
            }],
        }
    }

    fn two_question_exam() -> Exam {
        Exam {
            questions: vec![
                Question {
                    content: "甲".to_string(),
                    options: vec![option(1, "a"), option(2, "b"), option(3, "c")],
                    correct_option: 1,
                    explanation: "解析甲".to_string(),
                },
                Question {
                    content: "乙".to_string(),
                    options: vec![option(1, "a"), option(2, "b"), option(3, "c")],
                    correct_option: 3,
                    explanation: "解析乙".to_string(),
                },
            ],
        }
    }

    struct Recorder(Arc<Mutex<Vec<SessionEvent>>>);

    impl SessionObserver for Recorder {
        fn on_event(&mut self, event: &SessionEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn load_exam_resets_everything() {
        let mut session = AssessmentSession::new();
        session.load_exam(two_question_exam());
        session.select_option(0, 2);
        session.toggle_correction_mode();

        session.load_exam(two_question_exam());

        assert!(!session.correction_mode());
        assert_eq!(session.question_count(), 2);
        for i in 0..2 {
            assert!(!session.is_answered(i));
        }
    }

    #[test]
    fn reselecting_same_option_clears_the_answer() {
        let mut session = AssessmentSession::new();
        session.load_exam(two_question_exam());

        session.select_option(0, 2);
        assert!(session.is_answered(0));

        session.select_option(0, 2);
        assert!(!session.is_answered(0));
        assert_eq!(session.selected_option(0), None);
    }

    #[test]
    fn selection_is_exclusive_per_question() {
        let mut session = AssessmentSession::new();
        session.load_exam(two_question_exam());

        session.select_option(0, 1);
        session.select_option(0, 2);

        assert!(session.is_option_selected(0, 2));
        assert!(!session.is_option_selected(0, 1));
        assert_eq!(session.selected_option(0), Some(2));
    }

    #[test]
    fn questions_answer_independently() {
        let mut session = AssessmentSession::new();
        session.load_exam(two_question_exam());

        session.select_option(0, 1);
        session.select_option(1, 2);

        assert_eq!(session.selected_option(0), Some(1));
        assert_eq!(session.selected_option(1), Some(2));
        assert!(session.is_correct(0));
        assert!(!session.is_correct(1));
    }

    #[test]
    fn correctness_follows_correct_option() {
        let mut session = AssessmentSession::new();
        session.load_exam(two_plus_two_exam());

        assert!(!session.is_correct(0));

        session.select_option(0, 1);
        assert!(session.is_answered(0));
        assert!(!session.is_correct(0));

        session.select_option(0, 2);
        assert!(session.is_answered(0));
        assert!(session.is_correct(0));
    }

    #[test]
    fn correction_mode_does_not_touch_selections() {
        let mut session = AssessmentSession::new();
        session.load_exam(two_plus_two_exam());
        session.select_option(0, 2);

        session.toggle_correction_mode();
        assert!(session.correction_mode());
        assert!(session.is_answered(0));
        assert!(session.is_correct(0));

        session.toggle_correction_mode();
        assert!(!session.correction_mode());
        assert!(session.is_answered(0));
    }

    #[test]
    fn counts_track_current_state() {
        let mut session = AssessmentSession::new();
        session.load_exam(two_question_exam());

        session.select_option(0, 1); // 答对
        session.select_option(1, 1); // 答错
        assert_eq!(session.answered_count(), 2);
        assert_eq!(session.correct_count(), 1);

        session.select_option(1, 1); // 取消
        assert_eq!(session.answered_count(), 1);
        assert_eq!(session.correct_count(), 1);
    }

    #[test]
    fn events_fire_once_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut session = AssessmentSession::new();
        session.set_observer(Box::new(Recorder(log.clone())));

        session.load_exam(two_question_exam());
        session.select_option(0, 2);
        session.select_option(0, 2);
        session.toggle_correction_mode();
        session.load_exam(two_question_exam());

        let events = log.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                SessionEvent::ExamLoaded { question_count: 2 },
                SessionEvent::SelectionChanged {
                    question_index: 0,
                    selected: Some(2)
                },
                SessionEvent::SelectionChanged {
                    question_index: 0,
                    selected: None
                },
                SessionEvent::CorrectionModeChanged { enabled: true },
                // 重新装载：先关纠错模式，再通知新试卷
                SessionEvent::CorrectionModeChanged { enabled: false },
                SessionEvent::ExamLoaded { question_count: 2 },
            ]
        );
    }

    #[test]
    #[should_panic(expected = "越界")]
    fn out_of_range_question_index_panics() {
        let mut session = AssessmentSession::new();
        session.load_exam(two_plus_two_exam());
        session.select_option(5, 1);
    }

    #[test]
    #[should_panic(expected = "不存在编号")]
    fn unknown_option_number_panics() {
        let mut session = AssessmentSession::new();
        session.load_exam(two_plus_two_exam());
        session.select_option(0, 9);
    }

    #[test]
    #[should_panic(expected = "未装载试卷")]
    fn selecting_without_exam_panics() {
        let mut session = AssessmentSession::new();
        session.select_option(0, 1);
    }
}
