/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 待出题的资料文件（纯文本或 PDF）
    pub source_file: String,
    /// 生成题目数量
    pub question_count: u32,
    /// 资料以文件附件随请求上传，而不是拼接进提示词
    pub embed_source_as_file: bool,
    /// 导出文档存放目录
    pub export_folder: String,
    /// 设置文件路径（存放 API Key）
    pub settings_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_file: "source.txt".to_string(),
            question_count: 5,
            embed_source_as_file: false,
            export_folder: "exports".to_string(),
            settings_file: "settings.toml".to_string(),
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            source_file: std::env::var("SOURCE_FILE").unwrap_or(default.source_file),
            question_count: std::env::var("QUESTION_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.question_count),
            embed_source_as_file: std::env::var("EMBED_SOURCE_AS_FILE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.embed_source_as_file),
            export_folder: std::env::var("EXPORT_FOLDER").unwrap_or(default.export_folder),
            settings_file: std::env::var("SETTINGS_FILE").unwrap_or(default.settings_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }
}
