//! 个人 feed 视图的生命周期.
//!
//! 视图持有一次挂载期间的文章快照。每次加载带有代数,
//! 在新的加载开始之后或视图卸载之后到达的结果会被丢弃。

use crate::like::{LikeOutcome, LikeRequest, LikeState};
use feed_common::{console, AuthorRef, FeedError, LoadResponse, MutationResponse, PostRecord, Result, Viewer};
use feed_filter::{rank_view, FilterSpec};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

/// [`FeedView::begin_load`] 返回的加载凭据
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoadTicket {
    /// 加载代数
    pub generation: u64,
    /// 数据层需要加载其文章的作者
    pub author_id: i64,
}

/// 加载状态
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// 加载结果的处理方式
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum LoadApplied {
    Applied { count: usize },
    Failed { message: String },
    /// 过期或在卸载后到达, 状态不变
    Discarded,
}

/// 个人 feed 视图状态
#[derive(Debug)]
pub struct FeedView {
    viewer: Viewer,
    posts: Vec<PostRecord>,
    /// 当前顺序, 为 `posts` 的下标
    visible: Vec<usize>,
    matched: usize,
    likes: HashMap<i64, LikeState>,
    generation: u64,
    mounted: bool,
    status: LoadStatus,
}

impl FeedView {
    pub fn new(viewer: Viewer) -> Self {
        Self {
            viewer,
            posts: Vec::new(),
            visible: Vec::new(),
            matched: 0,
            likes: HashMap::new(),
            generation: 0,
            mounted: true,
            status: LoadStatus::Idle,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// 开始加载当前用户的 feed
    pub fn begin_load(&mut self) -> Result<LoadTicket> {
        let author_id = self.viewer.id().ok_or(FeedError::Unauthenticated)?;
        self.generation += 1;
        self.status = LoadStatus::Loading;
        Ok(LoadTicket {
            generation: self.generation,
            author_id,
        })
    }

    /// 凭据仍然有效时应用加载结果
    pub fn apply_load(&mut self, ticket: LoadTicket, response: LoadResponse) -> LoadApplied {
        // 过期或已卸载的结果直接丢弃
        if !self.mounted || ticket.generation != self.generation {
            console::log(&format!(
                "丢弃 feed 加载 {} (当前 {}, 已挂载 {})",
                ticket.generation, self.generation, self.mounted
            ));
            return LoadApplied::Discarded;
        }

        // 加载失败时清空文章, 不做筛选
        if !response.status {
            let message = response
                .message
                .unwrap_or_else(|| "加载文章失败".to_string());
            console::error(&FeedError::LoadFailed(message.clone()).to_string());
            self.replace_snapshot(Vec::new());
            self.status = LoadStatus::Failed(message.clone());
            return LoadApplied::Failed { message };
        }

        let count = response.posts.len();
        self.replace_snapshot(response.posts);
        self.status = LoadStatus::Ready;
        LoadApplied::Applied { count }
    }

    /// 卸载视图；之后到达的加载结果都会被丢弃
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    // 替换文章快照并重建点赞状态
    fn replace_snapshot(&mut self, posts: Vec<PostRecord>) {
        self.likes = posts.iter().map(|p| (p.id, LikeState::from_post(p))).collect();
        self.visible = (0..posts.len()).collect();
        self.matched = 0;
        self.posts = posts;
    }

    /// 按新条件重新排序并返回可见文章
    pub fn refilter(&mut self, spec: &FilterSpec) -> Vec<PostRecord> {
        if self.status != LoadStatus::Ready {
            return Vec::new();
        }

        let ranked = rank_view(&self.posts, spec);
        self.matched = ranked.matched;
        self.visible = ranked.order;
        self.visible_posts()
    }

    /// 按最近一次排序返回文章, 并应用本地点赞状态
    pub fn visible_posts(&self) -> Vec<PostRecord> {
        self.visible
            .iter()
            .map(|&i| {
                let mut post = self.posts[i].clone();
                if let Some(like) = self.likes.get(&post.id) {
                    like.apply_to(&mut post);
                }
                post
            })
            .collect()
    }

    /// 最近一次筛选的匹配数
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// 去重后的作者, 按首次出现顺序
    pub fn authors(&self) -> Vec<AuthorRef> {
        let mut seen = HashSet::new();
        self.posts
            .iter()
            .filter(|p| seen.insert(p.author_id))
            .map(PostRecord::author)
            .collect()
    }

    /// 快照中的全部标签, 已排序
    pub fn tags(&self) -> Vec<String> {
        self.posts
            .iter()
            .flat_map(|p| p.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn like_state(&self, post_id: i64) -> Option<&LikeState> {
        self.likes.get(&post_id)
    }

    /// 乐观地切换一篇文章的点赞
    pub fn toggle_like(&mut self, post_id: i64) -> Result<LikeRequest> {
        let like = self.likes.get_mut(&post_id).ok_or(FeedError::UnknownPost(post_id))?;
        like.toggle(&self.viewer)
    }

    /// 用 `setLike` 的响应确认切换
    pub fn settle_like(&mut self, post_id: i64, response: &MutationResponse) -> Result<LikeOutcome> {
        let like = self.likes.get_mut(&post_id).ok_or(FeedError::UnknownPost(post_id))?;
        like.settle(response)
    }
}
