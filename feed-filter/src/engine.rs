//! 已加载 feed 的软筛选.
//!
//! 满足全部生效条件的文章排在前面, 按命中的标签数量降序；
//! 其余文章保持原有顺序排在后面。不会丢弃任何文章, 输出总是输入的一个排列。

use crate::matcher::TextMatcher;
use crate::models::{FilterSpec, PostMatch, RankedView};
use feed_common::PostRecord;

/// 按筛选条件重新排序文章.
///
/// 结果与输入包含完全相同的文章。不修改任何参数, 相同的输入总是得到相同的顺序。
pub fn compute_view(posts: &[PostRecord], spec: &FilterSpec) -> Vec<PostRecord> {
    rank_view(posts, spec)
        .order
        .into_iter()
        .map(|i| posts[i].clone())
        .collect()
}

/// 与 [`compute_view`] 相同的排序, 以输入下标表示
pub fn rank_view(posts: &[PostRecord], spec: &FilterSpec) -> RankedView {
    // 搜索文本只编译一次
    let matcher = TextMatcher::new(&spec.search_text);

    // (下标, 命中标签数)
    let mut matched: Vec<(usize, usize)> = Vec::new();
    let mut unmatched: Vec<usize> = Vec::new();

    // 分为匹配与不匹配两组
    for (i, post) in posts.iter().enumerate() {
        let outcome = evaluate(post, spec, &matcher);
        if outcome.is_match() {
            matched.push((i, outcome.tag_overlap));
        } else {
            unmatched.push(i);
        }
    }

    // sort_by 是稳定排序, 命中数相同的保持输入顺序
    matched.sort_by(|a, b| b.1.cmp(&a.1));

    let matched_count = matched.len();
    // 匹配组在前, 不匹配的按原顺序接在后面
    let mut order: Vec<usize> = matched.into_iter().map(|(i, _)| i).collect();
    order.extend(unmatched);

    RankedView {
        order,
        matched: matched_count,
    }
}

/// 计算单篇文章在每个条件上的结果
pub fn evaluate(post: &PostRecord, spec: &FilterSpec, matcher: &TextMatcher) -> PostMatch {
    PostMatch {
        author: matches_author(post, spec),
        tags: matches_tags(post, spec),
        date_range: matches_date_range(post, spec),
        text: matcher.matches_any(&[post.title.as_str(), post.content.as_str()]),
        tag_overlap: spec.tag_overlap(&post.tags),
    }
}

fn matches_author(post: &PostRecord, spec: &FilterSpec) -> bool {
    match &spec.author_filter {
        Some(author) => post.author_id == author.id,
        None => true,
    }
}

fn matches_tags(post: &PostRecord, spec: &FilterSpec) -> bool {
    spec.tag_filter.is_empty() || spec.tag_filter.iter().any(|tag| post.has_tag(tag))
}

fn matches_date_range(post: &PostRecord, spec: &FilterSpec) -> bool {
    if !spec.has_date_bound() {
        return true;
    }

    // 设置了边界时, 无法解析的日期不满足条件
    let Some(date) = post.parsed_date() else {
        return false;
    };

    spec.date_from.map_or(true, |from| date >= from) && spec.date_to.map_or(true, |to| date <= to)
}
