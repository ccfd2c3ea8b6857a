pub mod console;
pub mod date;
pub mod error;
pub mod models;

// 各 feed 模块共用的导出
pub use date::{format_post_date, parse_input_date, parse_post_date};
pub use error::{FeedError, Result};
pub use models::{parse_json, AuthorRef, LoadResponse, MutationResponse, PostRecord, Viewer, ViewerIdentity, UNKNOWN_AUTHOR};
