use exam_generator::services::{build_prompt, exam_parser, ExamExporter, LlmService, TextExtractor};
use exam_generator::utils::logging;
use exam_generator::{AppError, AssessmentSession, Config};

/// 一份符合生成契约的典型响应
const RAW_RESPONSE: &str = r#"
{
  "Questions": [
    {
      "Content": "细胞膜的主要成分是什么？",
      "Options": [
        { "Number": 1, "Content": "磷脂和蛋白质" },
        { "Number": 2, "Content": "纤维素" },
        { "Number": 3, "Content": "淀粉" },
        { "Number": 4, "Content": "核酸" }
      ],
      "CorrectOption": 1,
      "Explanation": "资料第一节指出，细胞膜主要由磷脂双分子层和蛋白质构成。"
    },
    {
      "Content": "下列哪种结构负责细胞内的能量转换？",
      "Options": [
        { "Number": 1, "Content": "核糖体" },
        { "Number": 2, "Content": "线粒体" },
        { "Number": 3, "Content": "高尔基体" }
      ],
      "CorrectOption": 2,
      "Explanation": "资料指出线粒体是细胞的\"动力工厂\"。"
    }
  ]
}
"#;

/// 从原始响应到可作答会话的完整流程
#[test]
fn response_flows_into_an_answerable_session() {
    let exam = exam_parser::parse(RAW_RESPONSE)
        .expect("解析不应失败")
        .expect("应该产出试卷");

    let mut session = AssessmentSession::new();
    session.load_exam(exam);

    assert_eq!(session.question_count(), 2);
    assert!(!session.correction_mode());

    // 作答第一题（答对）、第二题（答错），再揭示
    session.select_option(0, 1);
    session.select_option(1, 1);
    session.toggle_correction_mode();

    assert!(session.is_correct(0));
    assert!(!session.is_correct(1));
    assert_eq!(session.answered_count(), 2);
    assert_eq!(session.correct_count(), 1);

    // 重复选择取消作答，纠错模式不受影响
    session.select_option(1, 1);
    assert_eq!(session.answered_count(), 1);
    assert!(session.correction_mode());
}

/// 提示词 → 序列化试卷 → 解析，全链路保持一致
#[test]
fn prompt_and_parse_round_trip() {
    let source = "线粒体是细胞的动力工厂。";
    let prompt = build_prompt(3, Some(source), false);
    assert!(prompt.ends_with(source));

    let exam = exam_parser::parse(RAW_RESPONSE).unwrap().unwrap();
    let serialized = serde_json::to_string(&exam).unwrap();
    let reparsed = exam_parser::parse(&serialized).unwrap().unwrap();
    assert_eq!(reparsed, exam);
}

/// 失败响应不产出试卷，会话保持原状
#[test]
fn failed_parse_leaves_session_untouched() {
    let exam = exam_parser::parse(RAW_RESPONSE).unwrap().unwrap();
    let mut session = AssessmentSession::new();
    session.load_exam(exam);
    session.select_option(0, 1);

    // 新响应坏掉了：解析失败，之前的会话状态原样保留
    let err = exam_parser::parse("```json not really```").unwrap_err();
    assert!(matches!(err, AppError::Parse(_)));

    assert!(session.is_answered(0));
    assert_eq!(session.question_count(), 2);
}

/// 提取 → 导出两端的文件路径能力
#[tokio::test]
async fn extract_then_export_round_trip() {
    let folder = std::env::temp_dir().join("exam_generator_integration");
    tokio::fs::create_dir_all(&folder).await.unwrap();

    let source_path = folder.join("material.txt");
    tokio::fs::write(&source_path, "细胞膜主要由磷脂双分子层和蛋白质构成。")
        .await
        .unwrap();

    let extractor = TextExtractor::new();
    let text = extractor.extract_text(&source_path).await.unwrap();
    assert!(text.contains("磷脂"));

    let exam = exam_parser::parse(RAW_RESPONSE).unwrap().unwrap();
    let exporter = ExamExporter::with_folder(folder.to_string_lossy().to_string());
    let exported = exporter.export_exam(&exam).await.unwrap();

    let document = tokio::fs::read_to_string(&exported).await.unwrap();
    assert!(document.contains("细胞膜的主要成分是什么？"));
    assert!(document.contains("答案与解析"));

    tokio::fs::remove_dir_all(&folder).await.unwrap();
}

/// 端到端出题（需要真实凭证）
///
/// 运行方式：LLM_API_KEY=sk-... cargo test -- --ignored --nocapture
#[tokio::test]
#[ignore]
async fn test_generate_exam_live() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();
    let service = LlmService::new(&config);

    let source = "光合作用在叶绿体中进行，把光能转化为化学能并释放氧气。";
    let prompt = build_prompt(3, Some(source), false);

    let raw = service.generate(&prompt, None).await.expect("生成失败");
    println!("模型响应:\n{}", raw);

    let exam = exam_parser::parse(&raw)
        .expect("响应应该可以解析")
        .expect("响应应该包含题目");
    assert!(!exam.questions.is_empty());
}
