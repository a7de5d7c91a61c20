//! 生成产物模型
//!
//! 流水线的产出物：一份挂在某个资料文件下的生成内容（试卷或摘要）。
//! 持久化（建库、列表、检索）不在本仓库范围内，这里只定义交给
//! 存储边界的值类型。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 产物类型
///
/// 持久化时以固定字符串存储（"exam" / "summary"），不依赖
/// 运行时类型名序列化。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductKind {
    Exam,
    Summary,
}

impl ProductKind {
    /// 全部受支持的产物类型
    pub const ALL: &'static [ProductKind] = &[ProductKind::Exam, ProductKind::Summary];

    /// 稳定的存储字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Exam => "exam",
            ProductKind::Summary => "summary",
        }
    }

    /// 从存储字符串还原
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "exam" => Some(ProductKind::Exam),
            "summary" => Some(ProductKind::Summary),
            _ => None,
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 生成产物
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// 产物名称（默认取资料文件名）
    pub name: String,
    /// 生成的原始内容（对试卷而言是原始 JSON 响应）
    pub content: String,
    /// 来源资料文件名
    pub source_name: String,
    /// 产物类型
    pub kind: ProductKind,
}
