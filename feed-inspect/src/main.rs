use std::fs;
use std::path::Path;

use clap::{Arg, ArgAction, Command};
use feed_common::{format_post_date, parse_json, AuthorRef, LoadResponse, PostRecord};
use feed_filter::{evaluate, rank_view, FilterSpec, FilterSpecBuilder, PostMatch, TextMatcher};
use serde::{Deserialize, Serialize};

/// 文章导出文件 - 文章数组或 `loadPostsForAuthor` 响应
#[derive(Deserialize)]
#[serde(untagged)]
enum PostDump {
    Posts(Vec<PostRecord>),
    Response(LoadResponse),
}

/// JSON 输出中的一行
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewLine<'a> {
    position: usize,
    matched: bool,
    #[serde(flatten)]
    criteria: PostMatch,
    post: &'a PostRecord,
}

fn main() {
    let matches = Command::new("feed-inspect")
        .version(env!("CARGO_PKG_VERSION"))
        .about("按筛选条件输出个人 feed 的排序")
        .arg(Arg::new("posts")
            .short('p')
            .long("posts")
            .value_name("FILE")
            .help("包含文章或 loadPostsForAuthor 响应的 JSON 文件")
            .required(true))
        .arg(Arg::new("search")
            .short('s')
            .long("search")
            .value_name("TEXT")
            .help("匹配标题和正文的模式 (不区分大小写)"))
        .arg(Arg::new("tag")
            .short('t')
            .long("tag")
            .value_name("TAG")
            .help("需要的标签, 可重复")
            .action(ArgAction::Append))
        .arg(Arg::new("author")
            .short('a')
            .long("author")
            .value_name("AUTHOR_ID")
            .help("只匹配该作者 id 的文章")
            .value_parser(clap::value_parser!(i64)))
        .arg(Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .help("日期下界 (含)"))
        .arg(Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .help("日期上界 (含)"))
        .arg(Arg::new("json")
            .long("json")
            .help("以 JSON 输出结果")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("explain")
            .short('e')
            .long("explain")
            .help("显示每篇文章在每个条件上的结果")
            .action(ArgAction::SetTrue))
        .get_matches();

    let posts_path = matches.get_one::<String>("posts").map(String::as_str).unwrap_or_default();

    // 读取文章
    let posts = match load_posts(Path::new(posts_path)) {
        Ok(posts) => posts,
        Err(e) => {
            eprintln!("错误: {}", e);
            std::process::exit(1);
        }
    };

    let tags: Vec<&str> = matches
        .get_many::<String>("tag")
        .map(|values| values.map(String::as_str).collect())
        .unwrap_or_default();

    // 构建筛选条件
    let spec = match build_spec(
        matches.get_one::<String>("search").map(String::as_str),
        &tags,
        matches.get_one::<i64>("author").copied(),
        &posts,
        matches.get_one::<String>("from").map(String::as_str),
        matches.get_one::<String>("to").map(String::as_str),
    ) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("错误: {}", e);
            std::process::exit(1);
        }
    };

    // 输出结果
    let result = if matches.get_flag("json") {
        print_json(&posts, &spec)
    } else {
        print_table(&posts, &spec, matches.get_flag("explain"));
        Ok(())
    };

    if let Err(e) = result {
        eprintln!("错误: {}", e);
        std::process::exit(1);
    }
}

// 读取并解析文章导出文件
fn load_posts(path: &Path) -> Result<Vec<PostRecord>, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("无法读取文件 {}: {}", path.display(), e))?;
    let dump: PostDump = parse_json(&raw)
        .map_err(|e| format!("无法解析文件 {}: {}", path.display(), e))?;

    match dump {
        PostDump::Posts(posts) => Ok(posts),
        PostDump::Response(response) if response.status => Ok(response.posts),
        PostDump::Response(response) => Err(format!(
            "导出文件是失败的响应: {}",
            response.message.unwrap_or_else(|| "无消息".to_string())
        )),
    }
}

// 把命令行参数转换为筛选条件
fn build_spec(
    search: Option<&str>,
    tags: &[&str],
    author_id: Option<i64>,
    posts: &[PostRecord],
    from: Option<&str>,
    to: Option<&str>,
) -> Result<FilterSpec, String> {
    let mut builder = FilterSpecBuilder::new();

    if let Some(text) = search {
        builder.set_search_text(text);
        if !builder.search_is_valid() {
            eprintln!("警告: 搜索文本超过允许的长度");
        }
    }

    for tag in tags {
        builder.add_tag(tag).map_err(|e| e.to_string())?;
    }

    if let Some(id) = author_id {
        // 作者在导出文件中时使用其显示名
        let author = posts
            .iter()
            .find(|p| p.author_id == id)
            .map(PostRecord::author)
            .unwrap_or_else(|| AuthorRef::new(id, ""));
        builder.select_author(Some(author));
    }

    if let Some(raw) = from {
        builder.set_date_from_input(raw).map_err(|e| e.to_string())?;
    }
    if let Some(raw) = to {
        builder.set_date_to_input(raw).map_err(|e| e.to_string())?;
    }

    Ok(builder.build())
}

fn print_table(posts: &[PostRecord], spec: &FilterSpec, explain: bool) {
    let ranked = rank_view(posts, spec);
    let matcher = TextMatcher::new(&spec.search_text);

    println!("共 {} 篇文章, {} 篇匹配", posts.len(), ranked.matched);

    for (position, &index) in ranked.order.iter().enumerate() {
        let post = &posts[index];
        let outcome = evaluate(post, spec, &matcher);
        let marker = if ranked.is_match_at(position) { '+' } else { ' ' };
        let date = post
            .parsed_date()
            .map(format_post_date)
            .unwrap_or_else(|| format!("?{}", post.date));

        println!(
            "{} {:>3}. #{:<6} tags {:<2} {:<11} {}",
            marker,
            position + 1,
            post.id,
            outcome.tag_overlap,
            date,
            post.title
        );

        if explain {
            println!(
                "        author {}  tags {}  date {}  text {}",
                yes_no(outcome.author),
                yes_no(outcome.tags),
                yes_no(outcome.date_range),
                yes_no(outcome.text)
            );
        }
    }
}

fn print_json(posts: &[PostRecord], spec: &FilterSpec) -> Result<(), String> {
    let ranked = rank_view(posts, spec);
    let matcher = TextMatcher::new(&spec.search_text);

    let lines: Vec<ViewLine> = ranked
        .order
        .iter()
        .enumerate()
        .map(|(position, &index)| ViewLine {
            position,
            matched: ranked.is_match_at(position),
            criteria: evaluate(&posts[index], spec, &matcher),
            post: &posts[index],
        })
        .collect();

    let json = serde_json::to_string_pretty(&lines).map_err(|e| format!("序列化结果失败: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_common::parse_input_date;

    fn post(id: i64, author_id: i64, name: &str) -> PostRecord {
        PostRecord {
            id,
            title: format!("t{}", id),
            subtitle: String::new(),
            content: String::new(),
            tags: vec![],
            author_id,
            author_name: name.to_string(),
            date: "01.02.2024".to_string(),
            like_count: 0,
            viewer_has_liked: false,
        }
    }

    #[test]
    fn dump_accepts_both_shapes() {
        let bare: PostDump = serde_json::from_str(r#"[{"id": 1, "title": "a", "authorId": 2}]"#).unwrap();
        assert!(matches!(bare, PostDump::Posts(ref p) if p.len() == 1));

        let response: PostDump =
            serde_json::from_str(r#"{"status": false, "message": "nope"}"#).unwrap();
        assert!(matches!(response, PostDump::Response(ref r) if !r.status));
    }

    #[test]
    fn spec_from_arguments() {
        let posts = vec![post(1, 4, "Dana")];
        let spec = build_spec(Some("rust"), &["a", "b"], Some(4), &posts, Some("2024-01-01"), None).unwrap();
        assert_eq!(spec.search_text, "rust");
        assert_eq!(spec.tag_filter.len(), 2);
        assert_eq!(spec.author_filter, Some(AuthorRef { id: 4, name: "Dana".to_string() }));
        assert_eq!(spec.date_from, parse_input_date("2024-01-01"));
        assert_eq!(spec.date_to, None);
    }

    #[test]
    fn malformed_dump_is_reported() {
        let path = std::env::temp_dir().join(format!("feed-inspect-bad-{}.json", std::process::id()));
        fs::write(&path, "[{").unwrap();
        let err = load_posts(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.contains("JSON 解析失败"), "{}", err);
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(build_spec(None, &["a", "a"], None, &[], None, None).is_err());
        assert!(build_spec(None, &[], None, &[], Some("01.01.2024"), None).is_err());
    }
}
