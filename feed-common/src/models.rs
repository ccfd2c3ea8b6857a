use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::date::parse_post_date;
use crate::error::Result;
use chrono::NaiveDate;

/// 作者没有名字时使用的显示名
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

/// 数据层返回的 feed 文章 (`PostForFeed`)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// 文章唯一标识符
    pub id: i64,
    /// 文章标题
    pub title: String,
    /// 文章副标题
    #[serde(default)]
    pub subtitle: String,
    /// 文章正文, 可能带有编辑器生成的标记
    #[serde(default)]
    pub content: String,
    /// 文章标签列表
    #[serde(default)]
    pub tags: Vec<String>,
    /// 作者标识符
    pub author_id: i64,
    /// 作者显示名
    #[serde(default)]
    pub author_name: String,
    /// 发布日期 `DD.MM.YYYY`, 保留原始字符串
    #[serde(default)]
    pub date: String,
    /// 点赞数
    #[serde(rename = "likes", default)]
    pub like_count: u32,
    /// 当前用户是否已点赞
    #[serde(rename = "initialLiked", default)]
    pub viewer_has_liked: bool,
}

impl PostRecord {
    /// 按日在前解析发布日期, 格式错误时为 `None`
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_post_date(&self.date)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn author(&self) -> AuthorRef {
        AuthorRef::new(self.author_id, &self.author_name)
    }
}

/// 作者选择器使用的作者信息
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AuthorRef {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name", default)]
    pub name: String,
}

impl AuthorRef {
    /// 空白名字回退为 [`UNKNOWN_AUTHOR`]
    pub fn new(id: i64, name: &str) -> Self {
        let name = name.trim();
        Self {
            id,
            name: if name.is_empty() { UNKNOWN_AUTHOR.to_string() } else { name.to_string() },
        }
    }
}

/// 已登录用户的身份
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ViewerIdentity {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

/// 当前用户 - 显式传给需要它的地方
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Viewer {
    #[default]
    Anonymous,
    Authenticated(ViewerIdentity),
}

impl Viewer {
    pub fn id(&self) -> Option<i64> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Authenticated(identity) => Some(identity.id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Viewer::Authenticated(_))
    }

    /// 解析会话数据；`null`、`{}` 或没有 id 的数据视为匿名
    pub fn from_json(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct RawViewer {
            id: Option<i64>,
            #[serde(default)]
            name: String,
            #[serde(default)]
            role: String,
        }

        let raw: Option<RawViewer> = parse_json(json)?;
        Ok(match raw {
            Some(RawViewer { id: Some(id), name, role }) => {
                Viewer::Authenticated(ViewerIdentity { id, name, role })
            }
            _ => Viewer::Anonymous,
        })
    }
}

/// `loadPostsForAuthor` 的响应
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct LoadResponse {
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub posts: Vec<PostRecord>,
}

/// 远端修改操作（如 `setLike`）的响应
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MutationResponse {
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl MutationResponse {
    pub fn ok() -> Self {
        Self { status: true, message: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { status: false, message: Some(message.into()) }
    }
}

/// 解析 JS 或文件传入的 JSON, 错误统一为 [`FeedError::Json`](crate::FeedError::Json)
pub fn parse_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}
