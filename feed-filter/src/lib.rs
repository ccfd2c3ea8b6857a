use wasm_bindgen::prelude::*;
use feed_common::{console, parse_json, PostRecord};

// 导出模块
pub mod builder;
pub mod engine;
pub mod matcher;
pub mod models;

pub use builder::FilterSpecBuilder;
pub use engine::{compute_view, evaluate, rank_view};
pub use matcher::TextMatcher;
pub use models::{FilterParams, FilterSpec, PostMatch, RankedView, ViewResult, MAX_SEARCH_LEN, MAX_TAG_LEN};

// 可选的小体积分配器
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// 解析 JS 入口共用的 JSON 输入
fn parse_inputs(posts_json: &str, params_json: &str) -> feed_common::Result<(Vec<PostRecord>, FilterSpec)> {
    let posts: Vec<PostRecord> = parse_json(posts_json)?;
    let params: FilterParams = parse_json(params_json)?;
    Ok((posts, params.into_spec()))
}

// 解析失败时写入控制台并转换为 JS 错误
fn input_error(e: feed_common::FeedError) -> JsValue {
    let message = format!("解析输入失败: {}", e);
    console::error(&message);
    JsValue::from_str(&message)
}

/// Feed 筛选器 JS 接口
#[wasm_bindgen]
pub struct FeedFilterJS;

#[wasm_bindgen]
impl FeedFilterJS {
    /// 按筛选参数重新排序文章.
    ///
    /// 返回 `{ posts, matched, total }`；`posts` 总是包含全部输入文章。
    #[wasm_bindgen]
    pub fn compute_view(posts_json: &str, params_json: &str) -> Result<JsValue, JsValue> {
        let (posts, spec) = parse_inputs(posts_json, params_json).map_err(input_error)?;

        // 计算排序并组装结果
        let ranked = rank_view(&posts, &spec);
        let result = ViewResult {
            total: posts.len(),
            matched: ranked.matched,
            posts: ranked.order.iter().map(|&i| posts[i].clone()).collect(),
        };

        serde_wasm_bindgen::to_value(&result)
            .map_err(|e| JsValue::from_str(&format!("序列化结果失败: {}", e)))
    }

    /// 以输入下标返回同样的排序, 供自己保存文章数组的调用方使用
    #[wasm_bindgen]
    pub fn rank_view(posts_json: &str, params_json: &str) -> Result<js_sys::Uint32Array, JsValue> {
        let (posts, spec) = parse_inputs(posts_json, params_json).map_err(input_error)?;

        let order: Vec<u32> = rank_view(&posts, &spec).order.into_iter().map(|i| i as u32).collect();
        Ok(js_sys::Uint32Array::from(&order[..]))
    }
}
