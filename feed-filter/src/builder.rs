use crate::models::{FilterSpec, MAX_SEARCH_LEN, MAX_TAG_LEN};
use chrono::NaiveDate;
use feed_common::{parse_input_date, AuthorRef, FeedError, Result};

/// 筛选条件构建器 - 接收筛选面板的输入
#[derive(Debug, Clone, Default)]
pub struct FilterSpecBuilder {
    spec: FilterSpec,
}

impl FilterSpecBuilder {
    /// 创建没有任何生效条件的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置输入的搜索文本
    pub fn set_search_text(&mut self, text: &str) -> &mut Self {
        self.spec.search_text = text.to_string();
        self
    }

    /// 搜索文本超出面板允许的长度时返回 false
    pub fn search_is_valid(&self) -> bool {
        input_len(&self.spec.search_text) <= MAX_SEARCH_LEN
    }

    /// 添加标签输入框中的标签, 返回保存的 (去掉首尾空白的) 标签
    pub fn add_tag(&mut self, raw: &str) -> Result<String> {
        let tag = raw.trim();
        if tag.is_empty() {
            return Err(FeedError::InvalidTag("标签为空".to_string()));
        }
        // 长度按去空白之前的原始输入计算
        if input_len(raw) > MAX_TAG_LEN {
            return Err(FeedError::InvalidTag(format!("标签超过 {} 个字符", MAX_TAG_LEN)));
        }
        if self.spec.tag_filter.contains(tag) {
            return Err(FeedError::InvalidTag(format!("标签 {:?} 已选中", tag)));
        }

        self.spec.tag_filter.insert(tag.to_string());
        Ok(tag.to_string())
    }

    /// 移除标签, 返回它之前是否已选中
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.spec.tag_filter.remove(tag)
    }

    pub fn select_author(&mut self, author: Option<AuthorRef>) -> &mut Self {
        self.spec.author_filter = author;
        self
    }

    pub fn clear_author(&mut self) -> &mut Self {
        self.select_author(None)
    }

    pub fn set_date_from(&mut self, date: Option<NaiveDate>) -> &mut Self {
        self.spec.date_from = date;
        self
    }

    pub fn set_date_to(&mut self, date: Option<NaiveDate>) -> &mut Self {
        self.spec.date_to = date;
        self
    }

    /// 用日期输入框的值设置下界；为空时清除
    pub fn set_date_from_input(&mut self, raw: &str) -> Result<&mut Self> {
        let date = parse_bound_input(raw)?;
        Ok(self.set_date_from(date))
    }

    /// 用日期输入框的值设置上界；为空时清除
    pub fn set_date_to_input(&mut self, raw: &str) -> Result<&mut Self> {
        let date = parse_bound_input(raw)?;
        Ok(self.set_date_to(date))
    }

    /// 当前条件的快照
    pub fn build(&self) -> FilterSpec {
        self.spec.clone()
    }
}

// 输入框的长度, 以 UTF-16 编码单元计
fn input_len(text: &str) -> usize {
    text.encode_utf16().count()
}

// 空输入表示清除边界
fn parse_bound_input(raw: &str) -> Result<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_input_date(raw)
        .map(Some)
        .ok_or_else(|| FeedError::InvalidDateBound(raw.to_string()))
}
