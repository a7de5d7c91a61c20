use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 配置错误
    Config(ConfigError),
    /// 生成服务网络错误
    Network(NetworkError),
    /// 响应解析错误
    Parse(ParseFailure),
    /// 试卷校验错误
    Validation(ValidationError),
    /// 文件操作错误
    File(FileError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Network(e) => write!(f, "网络错误: {}", e),
            AppError::Parse(e) => write!(f, "解析错误: {}", e),
            AppError::Validation(e) => write!(f, "校验错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Network(e) => Some(e),
            AppError::Parse(e) => Some(e),
            AppError::Validation(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 缺少 API Key（环境变量和 settings.toml 中均未配置）
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingApiKey => {
                write!(f, "未配置 API Key，请在 settings.toml 或环境变量中设置")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// 生成服务网络错误
#[derive(Debug)]
pub enum NetworkError {
    /// 网络请求失败
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回非成功状态码
    BadStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// API 返回内容为空
    EmptyCompletion { model: String },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::RequestFailed { endpoint, source } => {
                write!(f, "请求失败 ({}): {}", endpoint, source)
            }
            NetworkError::BadStatus {
                endpoint,
                status,
                body,
            } => {
                write!(
                    f,
                    "API返回错误状态 ({}): status={}, body={}",
                    endpoint, status, body
                )
            }
            NetworkError::EmptyCompletion { model } => {
                write!(f, "模型返回内容为空 (模型: {})", model)
            }
        }
    }
}

impl std::error::Error for NetworkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NetworkError::RequestFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 响应解析错误
///
/// 原始响应没有产出可用的试卷。试卷保持未加载状态。
#[derive(Debug)]
pub enum ParseFailure {
    /// 响应不是合法的试卷 JSON（语法错误、缺字段、类型不符）
    MalformedResponse { detail: String },
    /// 结构合法但没有任何题目（生成契约的兜底输出 {"Questions":[]}）
    NoQuestionsFound,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::MalformedResponse { detail } => {
                write!(f, "响应不是合法的试卷 JSON: {}", detail)
            }
            ParseFailure::NoQuestionsFound => write!(f, "响应中没有题目"),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// 试卷校验错误
///
/// 响应结构上可解码，但违反了题目不变量。对用户呈现上与解析失败
/// 等同，但单独记录日志以便定位生成质量问题。
#[derive(Debug)]
pub enum ValidationError {
    /// 选项数量不在 3..=6 范围内
    OptionCountOutOfRange { question: usize, count: usize },
    /// 选项编号不是恰好 1..=N（有缺口或重复）
    OptionNumbersNotCompact { question: usize },
    /// 正确选项编号不在该题的选项编号中
    CorrectOptionInvalid { question: usize, correct_option: u32 },
    /// 解析说明为空
    EmptyExplanation { question: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::OptionCountOutOfRange { question, count } => {
                write!(f, "题目 {} 的选项数量 {} 不在 3..=6 范围内", question, count)
            }
            ValidationError::OptionNumbersNotCompact { question } => {
                write!(f, "题目 {} 的选项编号不是连续的 1..=N", question)
            }
            ValidationError::CorrectOptionInvalid {
                question,
                correct_option,
            } => {
                write!(
                    f,
                    "题目 {} 的正确选项 {} 不在选项编号中",
                    question, correct_option
                )
            }
            ValidationError::EmptyExplanation { question } => {
                write!(f, "题目 {} 缺少解析说明", question)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 文件不存在
    NotFound { path: String },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "文件不存在: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
            FileError::TomlParseFailed { path, source } => {
                write!(f, "TOML解析失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. }
            | FileError::WriteFailed { source, .. }
            | FileError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(ParseFailure::MalformedResponse {
            detail: err.to_string(),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: Box::new(err),
        })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err.url().map(|u| u.to_string()).unwrap_or_default();
        AppError::Network(NetworkError::RequestFailed {
            endpoint,
            source: Box::new(err),
        })
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::Network(NetworkError::RequestFailed {
            endpoint: "chat/completions".to_string(),
            source: Box::new(err),
        })
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Other(format!("正则表达式错误: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件不存在错误
    pub fn file_not_found(path: impl Into<String>) -> Self {
        AppError::File(FileError::NotFound { path: path.into() })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建响应格式错误
    pub fn malformed_response(detail: impl Into<String>) -> Self {
        AppError::Parse(ParseFailure::MalformedResponse {
            detail: detail.into(),
        })
    }

    /// 是否属于校验错误（用于区分日志通道）
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
