//! feed 模块的控制台输出.
//!
//! 浏览器中写入开发者工具控制台；本地构建（测试、命令行工具）写入 stderr，
//! JS console 只在 `wasm32` 上可用。

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
#[cfg(target_arch = "wasm32")]
use web_sys::console;

/// 普通日志
pub fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    console::log_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{}", message);
}

/// 警告
pub fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("warning: {}", message);
}

/// 错误
pub fn error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    console::error_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("error: {}", message);
}
