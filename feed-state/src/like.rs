use feed_common::{console, FeedError, MutationResponse, PostRecord, Result, Viewer};
use serde::Serialize;

/// 调用方需要发送给 `setLike` 的修改请求
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    /// 文章标识符
    pub post_id: i64,
    /// 切换后的点赞状态
    pub liked: bool,
}

/// 根据远端结果确认点赞后的结果
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum LikeOutcome {
    /// 远端接受, 保留乐观更新的状态
    Confirmed,
    /// 远端拒绝, 恢复本地状态
    RolledBack { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
// 点赞切换前的状态
struct Snapshot {
    liked: bool,
    count: u32,
}

/// 当前用户对一篇文章的本地点赞状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeState {
    post_id: i64,
    liked: bool,
    count: u32,
    /// 未确认的切换之前的状态
    pending: Option<Snapshot>,
}

impl LikeState {
    pub fn from_post(post: &PostRecord) -> Self {
        Self {
            post_id: post.id,
            liked: post.viewer_has_liked,
            count: post.like_count,
            pending: None,
        }
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// 乐观地切换点赞并返回需要发送的请求.
    ///
    /// 匿名用户, 以及上一次切换尚未确认时的切换都会被拒绝, 状态不变。
    pub fn toggle(&mut self, viewer: &Viewer) -> Result<LikeRequest> {
        if !viewer.is_authenticated() {
            return Err(FeedError::Unauthenticated);
        }
        if self.pending.is_some() {
            return Err(FeedError::LikePending(self.post_id));
        }

        // 先保存快照, 失败时回滚
        self.pending = Some(Snapshot {
            liked: self.liked,
            count: self.count,
        });
        self.liked = !self.liked;
        self.count = if self.liked {
            self.count.saturating_add(1)
        } else {
            self.count.saturating_sub(1)
        };

        Ok(LikeRequest {
            post_id: self.post_id,
            liked: self.liked,
        })
    }

    /// 用远端结果确认未完成的切换
    pub fn settle(&mut self, response: &MutationResponse) -> Result<LikeOutcome> {
        let snapshot = self.pending.take().ok_or(FeedError::NoPendingLike(self.post_id))?;

        if response.status {
            return Ok(LikeOutcome::Confirmed);
        }

        // 远端失败, 恢复快照
        self.liked = snapshot.liked;
        self.count = snapshot.count;

        let message = response
            .message
            .clone()
            .unwrap_or_else(|| "点赞保存失败".to_string());
        console::warn(&format!("文章 {} 的点赞已回滚: {}", self.post_id, message));
        Ok(LikeOutcome::RolledBack { message })
    }

    /// 把本地状态写入文章记录用于展示
    pub fn apply_to(&self, post: &mut PostRecord) {
        post.viewer_has_liked = self.liked;
        post.like_count = self.count;
    }
}
