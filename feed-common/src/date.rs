use chrono::NaiveDate;

/// 解析日在前的文章日期 (`DD.MM.YYYY`).
///
/// 日和月为一到两位数字，年份必须是四位。其他格式，
/// 以及越界的值（如 13 月）都返回 `None`。
pub fn parse_post_date(raw: &str) -> Option<NaiveDate> {
    // 按点号拆分为 日/月/年 三段
    let mut parts = raw.trim().split('.');
    let day = parse_field(parts.next()?, 1, 2)?;
    let month = parse_field(parts.next()?, 1, 2)?;
    let year = parse_field(parts.next()?, 4, 4)?;
    if parts.next().is_some() {
        return None;
    }

    // 日历中不存在的日期（如 30.02）在这里被拒绝
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// 解析 HTML 日期输入框的值 (`YYYY-MM-DD`)
pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// 按文章使用的格式输出日期
pub fn format_post_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

// 只接受纯数字且长度在范围内的字段
fn parse_field(part: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if part.len() < min_len || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
