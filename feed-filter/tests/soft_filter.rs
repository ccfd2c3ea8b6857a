//! feed 排序的集成测试.

use chrono::NaiveDate;
use feed_common::{AuthorRef, PostRecord};
use feed_filter::{compute_view, rank_view, FilterParams, FilterSpec, FilterSpecBuilder};

fn post(id: i64, author_id: i64, tags: &[&str], date: &str, title: &str, content: &str) -> PostRecord {
    PostRecord {
        id,
        title: title.to_string(),
        subtitle: format!("subtitle {}", id),
        content: content.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        author_id,
        author_name: format!("author {}", author_id),
        date: date.to_string(),
        like_count: id as u32,
        viewer_has_liked: id % 2 == 0,
    }
}

fn sample_feed() -> Vec<PostRecord> {
    vec![
        post(1, 5, &["rust"], "01.01.2024", "Ownership basics", "<p>Borrowing explained</p>"),
        post(2, 7, &["rust", "wasm"], "15.02.2024", "Rust in the browser", "<p>wasm-bindgen</p>"),
        post(3, 5, &[], "bad-date", "Diary", "<p>Nothing technical</p>"),
        post(4, 7, &["go"], "31.03.2024", "Goroutines", "<p>channels</p>"),
        post(5, 5, &["wasm", "rust", "perf"], "01.04.2024", "Faster WASM", "<p>profiling</p>"),
        post(6, 9, &["wasm"], "20.12.2023", "Intro", "<p>Hello RUST world</p>"),
    ]
}

fn ids(posts: &[PostRecord]) -> Vec<i64> {
    posts.iter().map(|p| p.id).collect()
}

fn tags(list: &[&str]) -> std::collections::HashSet<String> {
    list.iter().map(|t| t.to_string()).collect()
}

fn sorted(mut v: Vec<i64>) -> Vec<i64> {
    v.sort();
    v
}

fn specs() -> Vec<FilterSpec> {
    vec![
        FilterSpec::default(),
        FilterSpec { tag_filter: tags(&["rust", "wasm"]), ..Default::default() },
        FilterSpec { search_text: "rust".to_string(), ..Default::default() },
        FilterSpec { author_filter: Some(AuthorRef::new(7, "author 7")), ..Default::default() },
        FilterSpec {
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            date_to: NaiveDate::from_ymd_opt(2024, 3, 31),
            ..Default::default()
        },
        FilterSpec {
            search_text: "(".to_string(),
            tag_filter: tags(&["nope"]),
            author_filter: Some(AuthorRef::new(42, "nobody")),
            date_from: NaiveDate::from_ymd_opt(2030, 1, 1),
            date_to: NaiveDate::from_ymd_opt(2020, 1, 1),
        },
    ]
}

#[test]
fn output_is_a_permutation_of_the_input() {
    let feed = sample_feed();
    for spec in specs() {
        let view = compute_view(&feed, &spec);
        assert_eq!(view.len(), feed.len());
        assert_eq!(sorted(ids(&view)), sorted(ids(&feed)));
    }
}

#[test]
fn matches_precede_non_matches() {
    let feed = sample_feed();
    for spec in specs() {
        let ranked = rank_view(&feed, &spec);
        let matcher = feed_filter::TextMatcher::new(&spec.search_text);
        for (position, &index) in ranked.order.iter().enumerate() {
            let is_match = feed_filter::evaluate(&feed[index], &spec, &matcher).is_match();
            assert_eq!(is_match, ranked.is_match_at(position), "post {} at {}", feed[index].id, position);
        }
    }
}

#[test]
fn empty_spec_keeps_original_order() {
    let feed = sample_feed();
    assert_eq!(compute_view(&feed, &FilterSpec::default()), feed);
}

#[test]
fn equal_overlap_keeps_input_order() {
    // 命中数: C = 1, A = 2, B = 2
    let feed = vec![
        post(3, 1, &["x"], "01.01.2024", "C", ""),
        post(1, 1, &["x", "y"], "01.01.2024", "A", ""),
        post(2, 1, &["y", "x", "z"], "01.01.2024", "B", ""),
    ];
    let spec = FilterSpec { tag_filter: tags(&["x", "y"]), ..Default::default() };
    assert_eq!(ids(&compute_view(&feed, &spec)), vec![1, 2, 3]);
}

#[test]
fn tags_match_with_or_semantics_and_rank_by_overlap() {
    let feed = sample_feed();
    let spec = FilterSpec { tag_filter: tags(&["rust", "wasm"]), ..Default::default() };
    let ranked = rank_view(&feed, &spec);
    assert_eq!(ranked.matched, 4);
    // 2 和 5 命中两个标签, 1 和 6 命中一个；3 和 4 保持输入顺序
    assert_eq!(ids(&compute_view(&feed, &spec)), vec![2, 5, 1, 6, 3, 4]);
}

#[test]
fn non_matches_are_not_resorted() {
    let feed = sample_feed();
    let spec = FilterSpec { author_filter: Some(AuthorRef::new(9, "author 9")), ..Default::default() };
    assert_eq!(ids(&compute_view(&feed, &spec)), vec![6, 1, 2, 3, 4, 5]);
}

#[test]
fn search_text_is_case_insensitive_over_title_and_content() {
    let feed = sample_feed();
    let spec = FilterSpec { search_text: "RUST".to_string(), ..Default::default() };
    // 标题 "Rust in the browser" 与正文 "Hello RUST world"
    assert_eq!(ids(&compute_view(&feed, &spec)), vec![2, 6, 1, 3, 4, 5]);
}

#[test]
fn date_range_is_inclusive_and_rejects_unreadable_dates() {
    let feed = sample_feed();
    let spec = FilterSpec {
        date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
        date_to: NaiveDate::from_ymd_opt(2024, 3, 31),
        ..Default::default()
    };
    let ranked = rank_view(&feed, &spec);
    assert_eq!(ranked.matched, 3);
    assert_eq!(ids(&compute_view(&feed, &spec)), vec![1, 2, 4, 3, 5, 6]);
}

#[test]
fn criteria_combine_with_and() {
    let feed = sample_feed();
    let spec = FilterSpec {
        search_text: "wasm".to_string(),
        tag_filter: tags(&["rust"]),
        author_filter: Some(AuthorRef::new(5, "author 5")),
        ..Default::default()
    };
    // 只有文章 5 同时满足作者 5、标签 rust、提到 wasm
    let ranked = rank_view(&feed, &spec);
    assert_eq!(ranked.matched, 1);
    assert_eq!(ids(&compute_view(&feed, &spec))[0], 5);
}

#[test]
fn oversized_search_text_still_narrows() {
    let feed = vec![
        post(1, 1, &[], "01.01.2024", "unrelated", ""),
        post(2, 1, &[], "01.01.2024", "nothing", ""),
    ];
    for len in [50_000, 100_000] {
        let spec = FilterSpec { search_text: format!("({}", "a".repeat(len)), ..Default::default() };
        let ranked = rank_view(&feed, &spec);
        assert_eq!(ranked.matched, 0, "search of length {}", len);
        assert_eq!(ranked.order, vec![0, 1]);
    }
}

#[test]
fn repeated_calls_give_identical_output() {
    let feed = sample_feed();
    for spec in specs() {
        assert_eq!(compute_view(&feed, &spec), compute_view(&feed, &spec));
    }
}

#[test]
fn inputs_are_left_untouched() {
    let feed = sample_feed();
    let before = feed.clone();
    let spec = FilterSpec { tag_filter: tags(&["wasm"]), ..Default::default() };
    let spec_before = spec.clone();
    let _ = compute_view(&feed, &spec);
    assert_eq!(feed, before);
    assert_eq!(spec, spec_before);
}

#[test]
fn builder_and_params_agree() {
    let feed = sample_feed();

    let mut builder = FilterSpecBuilder::new();
    builder.set_search_text("rust");
    builder.add_tag("wasm").unwrap();
    builder.set_date_from_input("2023-12-01").unwrap();

    let params: FilterParams = serde_json::from_str(
        r#"{"search": "rust", "tags": ["wasm"], "dateFrom": "2023-12-01", "dateTo": ""}"#,
    )
    .unwrap();

    assert_eq!(
        compute_view(&feed, &builder.build()),
        compute_view(&feed, &params.into_spec())
    );
}

#[test]
fn tagged_post_moves_ahead_of_untagged() {
    let feed = vec![
        post(1, 1, &[], "01.01.2024", "one", ""),
        post(2, 1, &["x"], "05.05.2024", "two", ""),
    ];
    let spec = FilterSpec { tag_filter: tags(&["x"]), ..Default::default() };
    assert_eq!(ids(&compute_view(&feed, &spec)), vec![2, 1]);
}
