use feed_common::console;
use regex::{Regex, RegexBuilder};

// 编译后模式的大小上限
const PATTERN_SIZE_LIMIT: usize = 1 << 25;

/// 编译后的全文检索条件
#[derive(Debug, Clone)]
pub enum TextMatcher {
    /// 搜索文本为空 - 所有文章都通过，不做模式匹配
    Unconstrained,
    /// 不区分大小写的正则
    Pattern(Regex),
    /// 超出大小上限的文本 - 按小写后的子串匹配
    Literal(String),
}

impl TextMatcher {
    /// 把搜索文本编译为不区分大小写的模式.
    ///
    /// 语法无效的文本（`*args`、未闭合的分组）按字面量匹配；
    /// 超出大小上限的模式退化为不区分大小写的子串匹配。
    /// 非空文本永远不会变成 `Unconstrained`。
    pub fn new(text: &str) -> Self {
        Self::with_size_limit(text, PATTERN_SIZE_LIMIT)
    }

    fn with_size_limit(text: &str, limit: usize) -> Self {
        if text.is_empty() {
            return TextMatcher::Unconstrained;
        }

        // 先按正则编译，语法错误时转义后按字面量编译
        let compiled = match build(text, limit) {
            Err(regex::Error::Syntax(e)) => {
                console::warn(&format!("搜索文本不是有效的模式, 按字面量匹配: {}", e));
                build(&regex::escape(text), limit)
            }
            other => other,
        };

        match compiled {
            Ok(regex) => TextMatcher::Pattern(regex),
            Err(e) => {
                console::warn(&format!("搜索模式过大, 改用子串匹配: {}", e));
                TextMatcher::Literal(text.to_lowercase())
            }
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        matches!(self, TextMatcher::Unconstrained)
    }

    /// 任一字段包含该模式时返回 true
    pub fn matches_any(&self, fields: &[&str]) -> bool {
        match self {
            TextMatcher::Unconstrained => true,
            TextMatcher::Pattern(regex) => fields.iter().any(|field| regex.is_match(field)),
            TextMatcher::Literal(needle) => fields
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
        }
    }
}

fn build(pattern: &str, limit: usize) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(limit)
        .build()
}
