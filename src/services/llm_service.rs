//! LLM 生成服务 - 业务能力层
//!
//! 只负责"把提示词变成原始响应文本"能力，不解析试卷、不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行普通对话调用
//! - 资料作为文件附件上传时，用 `reqwest` 直接构造带 input_file
//!   部分的请求体
//! - 兼容 OpenAI API 的服务（支持自定义 API 端点和模型）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use base64::Engine;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError, NetworkError};

/// 随请求上传的文件附件
///
/// 附件存在时，资料不会拼进提示词文本，而是编码进请求体。
#[derive(Debug, Clone)]
pub struct FileAttachment {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// LLM 生成服务
///
/// 职责：
/// - 调用生成 API，返回原始响应文本
/// - 发起任何网络请求前检查凭证
/// - 不出现 Exam / Question
/// - 不做解析，不关心流程顺序
pub struct LlmService {
    client: Client<OpenAIConfig>,
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    model_name: String,
}

impl LlmService {
    /// 创建新的生成服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            http: reqwest::Client::new(),
            api_key: config.llm_api_key.clone(),
            api_base_url: config.llm_api_base_url.clone(),
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 生成试卷的原始响应文本
    ///
    /// # 参数
    /// - `prompt`: 完整的请求文本（指令头，或指令头加资料）
    /// - `attachment`: 可选的文件附件；提供时走带文件的请求路径
    ///
    /// # 返回
    /// 返回模型输出的原始文本（两端空白已去除）
    ///
    /// # 错误
    /// - 未配置 API Key 时返回配置错误，此时不会发起任何网络请求
    /// - 传输或 HTTP 失败时返回网络错误；不自动重试，由用户重新提交
    pub async fn generate(
        &self,
        prompt: &str,
        attachment: Option<&FileAttachment>,
    ) -> AppResult<String> {
        if self.api_key.is_empty() {
            return Err(AppError::Config(ConfigError::MissingApiKey));
        }

        debug!("调用生成 API，模型: {}", self.model_name);
        debug!("提示词长度: {} 字符", prompt.chars().count());

        match attachment {
            Some(file) => self.send_with_attachment(prompt, file).await,
            None => self.send_plain(prompt).await,
        }
    }

    /// 普通路径：纯文本提示词
    async fn send_plain(&self, prompt: &str) -> AppResult<String> {
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(0.3)
            .max_tokens(4096u32)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("生成 API 调用失败: {}", e);
            AppError::from(e)
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                AppError::Network(NetworkError::EmptyCompletion {
                    model: self.model_name.clone(),
                })
            })?;

        debug!("生成 API 调用成功");

        Ok(content.trim().to_string())
    }

    /// 附件路径：请求体里带 input_file 和 input_text 两部分
    async fn send_with_attachment(
        &self,
        prompt: &str,
        file: &FileAttachment,
    ) -> AppResult<String> {
        let endpoint = format!(
            "{}/chat/completions",
            self.api_base_url.trim_end_matches('/')
        );

        let filename = if file.filename.trim().is_empty() {
            "file.bin"
        } else {
            file.filename.as_str()
        };

        let file_data = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
        debug!("附件: {} ({} 字节)", filename, file.bytes.len());

        let payload = json!({
            "model": self.model_name,
            "input": [
                {
                    "role": "user",
                    "content": [
                        { "type": "input_file", "filename": filename, "file_data": file_data },
                        { "type": "input_text", "text": prompt }
                    ]
                }
            ]
        });

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("生成 API 返回错误状态: {}", status);
            return Err(AppError::Network(NetworkError::BadStatus {
                endpoint,
                status: status.as_u16(),
                body,
            }));
        }

        Ok(extract_content(&body).trim().to_string())
    }
}

/// 从响应体中提取模型输出
///
/// 先按 chat completions 的信封取 choices[0].message.content；
/// 取不到时尝试 "output" 键；再不行就原样返回响应体。
fn extract_content(body: &str) -> String {
    let value: JsonValue = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return body.to_string(),
    };

    if let Some(content) = value
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
    {
        return content.to_string();
    }

    if let Some(output) = value.get("output") {
        return output.to_string();
    }

    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::prompt_builder::build_prompt;

    #[test]
    fn extract_content_reads_chat_envelope() {
        let body = r#"{"choices":[{"message":{"content":"{\"Questions\":[]}"}}]}"#;
        assert_eq!(extract_content(body), r#"{"Questions":[]}"#);
    }

    #[test]
    fn extract_content_falls_back_to_output_key() {
        let body = r#"{"output":"raw text"}"#;
        assert_eq!(extract_content(body), "\"raw text\"");
    }

    #[test]
    fn extract_content_returns_raw_body_when_not_json() {
        assert_eq!(extract_content("plain text"), "plain text");
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let service = LlmService::new(&Config::default());
        let err = service
            .generate(&build_prompt(5, Some("资料"), false), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::MissingApiKey)));
    }

    /// 测试真实端点调用
    ///
    /// 运行方式：
    /// ```bash
    /// LLM_API_KEY=sk-... cargo test test_generate_live -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_generate_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env();
        let service = LlmService::new(&config);

        let prompt = build_prompt(3, Some("水的沸点在标准大气压下是 100 摄氏度。"), false);
        let result = service.generate(&prompt, None).await;

        match result {
            Ok(response) => {
                println!("\n========== 模型响应 ==========");
                println!("{}", response);
                println!("==============================\n");
                assert!(!response.is_empty());
            }
            Err(e) => panic!("生成调用失败: {}", e),
        }
    }
}
