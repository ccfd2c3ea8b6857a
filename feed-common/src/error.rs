//! feed 模块共用的错误类型.
//!
//! 筛选引擎本身不会失败；这些错误来自输入处理、视图生命周期和点赞切换。

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    /// 来自 JS 或文章导出文件的 JSON 格式错误
    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),

    /// 该操作需要已登录的用户
    #[error("用户未登录")]
    Unauthenticated,

    /// 标签输入被拒绝
    #[error("无效的标签: {0}")]
    InvalidTag(String),

    /// 日期边界无法解析
    #[error("无效的日期边界: {0:?}")]
    InvalidDateBound(String),

    /// 该文章的点赞仍在等待远端结果
    #[error("文章 {0} 的点赞仍在等待确认")]
    LikePending(i64),

    /// 远端结果对应的文章没有待确认的点赞
    #[error("文章 {0} 没有待确认的点赞")]
    NoPendingLike(i64),

    /// 文章不在已加载的 feed 中
    #[error("文章 {0} 不在 feed 中")]
    UnknownPost(i64),

    /// 数据层报告加载失败
    #[error("加载文章失败: {0}")]
    LoadFailed(String),
}

/// feed 模块的 Result 别名
pub type Result<T> = std::result::Result<T, FeedError>;
