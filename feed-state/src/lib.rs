use wasm_bindgen::prelude::*;
use feed_common::{parse_json, LoadResponse, MutationResponse, Viewer};
use feed_filter::FilterParams;
use serde::Serialize;

pub mod feed;
pub mod like;

pub use feed::{FeedView, LoadApplied, LoadStatus, LoadTicket};
pub use like::{LikeOutcome, LikeRequest, LikeState};

// start 函数和 wee_alloc 分配器由链接进来的 feed-filter 提供

fn to_js<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("序列化{}失败: {}", what, e)))
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Feed 视图 JS 接口 - 每个挂载的视图一个实例
#[wasm_bindgen]
pub struct FeedViewJS {
    inner: FeedView,
}

#[wasm_bindgen]
impl FeedViewJS {
    /// 根据会话数据创建视图 (匿名时为 `null`)
    #[wasm_bindgen(constructor)]
    pub fn new(viewer_json: &str) -> Result<FeedViewJS, JsValue> {
        console_error_panic_hook::set_once();
        let viewer = Viewer::from_json(viewer_json).map_err(js_err)?;
        Ok(FeedViewJS {
            inner: FeedView::new(viewer),
        })
    }

    /// 开始加载, 返回 `{ generation, authorId }`
    #[wasm_bindgen]
    pub fn begin_load(&mut self) -> Result<JsValue, JsValue> {
        let ticket = self.inner.begin_load().map_err(js_err)?;
        to_js(&ticket, "加载凭据")
    }

    /// 应用指定代数的 `loadPostsForAuthor` 响应
    #[wasm_bindgen]
    pub fn apply_load(&mut self, generation: u64, author_id: i64, response_json: &str) -> Result<JsValue, JsValue> {
        let response: LoadResponse = parse_json(response_json).map_err(js_err)?;
        let ticket = LoadTicket { generation, author_id };
        let applied = self.inner.apply_load(ticket, response);
        to_js(&applied, "加载结果")
    }

    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        self.inner.unmount();
    }

    #[wasm_bindgen]
    pub fn status(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.status(), "加载状态")
    }

    /// 按筛选参数重新排序并返回可见文章
    #[wasm_bindgen]
    pub fn refilter(&mut self, params_json: &str) -> Result<JsValue, JsValue> {
        let params: FilterParams = parse_json(params_json).map_err(js_err)?;
        let posts = self.inner.refilter(&params.into_spec());
        to_js(&posts, "文章")
    }

    #[wasm_bindgen]
    pub fn visible_posts(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.visible_posts(), "文章")
    }

    #[wasm_bindgen]
    pub fn matched(&self) -> usize {
        self.inner.matched()
    }

    /// 作者选择器的选项
    #[wasm_bindgen]
    pub fn authors(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.authors(), "作者")
    }

    #[wasm_bindgen]
    pub fn tags(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.tags(), "标签")
    }

    /// 在本地切换点赞, 返回需要发送给 `setLike` 的 `{ postId, liked }`
    #[wasm_bindgen]
    pub fn toggle_like(&mut self, post_id: i64) -> Result<JsValue, JsValue> {
        let request = self.inner.toggle_like(post_id).map_err(js_err)?;
        to_js(&request, "点赞请求")
    }

    /// 用 `setLike` 的响应确认点赞
    #[wasm_bindgen]
    pub fn settle_like(&mut self, post_id: i64, response_json: &str) -> Result<JsValue, JsValue> {
        let response: MutationResponse = parse_json(response_json).map_err(js_err)?;
        let outcome = self.inner.settle_like(post_id, &response).map_err(js_err)?;
        to_js(&outcome, "点赞结果")
    }
}
