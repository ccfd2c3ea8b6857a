use chrono::NaiveDate;
use feed_common::{console, parse_input_date, AuthorRef, PostRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 搜索文本超过该长度 (UTF-16 编码单元) 时筛选面板会提示
pub const MAX_SEARCH_LEN: usize = 999;
/// 标签输入允许的最大长度 (UTF-16 编码单元)
pub const MAX_TAG_LEN: usize = 100;

/// 一次筛选使用的条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// 匹配标题和正文的模式 (不区分大小写), 为空表示不限制
    pub search_text: String,
    /// 需要的标签, 命中任意一个即可
    pub tag_filter: HashSet<String>,
    /// 指定作者
    pub author_filter: Option<AuthorRef>,
    /// 日期下界 (含)
    pub date_from: Option<NaiveDate>,
    /// 日期上界 (含)
    pub date_to: Option<NaiveDate>,
}

impl FilterSpec {
    /// 没有任何生效条件时返回 true
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty()
            && self.tag_filter.is_empty()
            && self.author_filter.is_none()
            && !self.has_date_bound()
    }

    pub fn has_date_bound(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    /// 文章包含的筛选标签数量
    pub fn tag_overlap(&self, tags: &[String]) -> usize {
        self.tag_filter
            .iter()
            .filter(|tag| tags.iter().any(|t| t == *tag))
            .count()
    }
}

/// 筛选参数 - 客户端传递的筛选条件
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// 搜索文本 (可选)
    #[serde(default)]
    pub search: Option<String>,
    /// 标签筛选条件 (可选)
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// 选中的作者 (可选)
    #[serde(default)]
    pub author: Option<AuthorRef>,
    /// 日期下界 `YYYY-MM-DD` (可选, 为空表示不限)
    #[serde(default)]
    pub date_from: Option<String>,
    /// 日期上界 `YYYY-MM-DD` (可选, 为空表示不限)
    #[serde(default)]
    pub date_to: Option<String>,
}

impl FilterParams {
    /// 转换为筛选条件；无法解析的日期边界视为未设置
    pub fn into_spec(self) -> FilterSpec {
        FilterSpec {
            search_text: self.search.unwrap_or_default(),
            tag_filter: self
                .tags
                .unwrap_or_default()
                .into_iter()
                // 丢弃空标签, 重复的标签由集合去重
                .filter(|tag| !tag.is_empty())
                .collect(),
            author_filter: self.author,
            date_from: parse_bound("dateFrom", self.date_from.as_deref()),
            date_to: parse_bound("dateTo", self.date_to.as_deref()),
        }
    }
}

// 解析一个日期边界, 空字符串表示不限
fn parse_bound(name: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = parse_input_date(raw);
    if parsed.is_none() {
        console::warn(&format!("忽略无法解析的 {}: {:?}", name, raw));
    }
    parsed
}

/// 以输入下标表示的排序结果
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RankedView {
    /// 输入下标, 匹配的在前
    pub order: Vec<usize>,
    /// 前部匹配组的长度
    pub matched: usize,
}

impl RankedView {
    pub fn is_match_at(&self, position: usize) -> bool {
        position < self.matched
    }
}

/// 单篇文章在每个条件上的结果
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostMatch {
    pub author: bool,
    pub tags: bool,
    pub date_range: bool,
    pub text: bool,
    /// 文章包含的筛选标签数量
    pub tag_overlap: usize,
}

impl PostMatch {
    pub fn is_match(&self) -> bool {
        self.author && self.tags && self.date_range && self.text
    }
}

/// 筛选结果 - 返回给客户端
#[derive(Serialize, Debug)]
pub struct ViewResult {
    /// 排序后的全部文章
    pub posts: Vec<PostRecord>,
    /// 匹配的文章数
    pub matched: usize,
    /// 文章总数
    pub total: usize,
}
