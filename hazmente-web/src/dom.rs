use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Storage, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Perform a fetch request and return the browser `Response`.
///
/// # Errors
/// Returns a readable message if no window is available, the request fails,
/// or the value cannot be converted to `Response`.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_response(url: &str) -> Result<Response, String> {
    let win = window().ok_or_else(|| String::from("window unavailable"))?;
    let resp_value = JsFuture::from(win.fetch_with_str(url))
        .await
        .map_err(|err| js_error_message(&err))?;
    resp_value
        .dyn_into::<Response>()
        .map_err(|err| js_error_message(&err))
}

/// Fetch `url` and return its body as text. Non-2xx statuses are errors.
///
/// # Errors
/// Returns a readable message when the request or body read fails.
#[allow(clippy::future_not_send)]
pub async fn fetch_text(url: &str) -> Result<String, String> {
    let response = fetch_response(url).await?;
    if !response.ok() {
        return Err(format!("{url} returned HTTP {}", response.status()));
    }
    let body = response.text().map_err(|err| js_error_message(&err))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|err| js_error_message(&err))?;
    text.as_string()
        .ok_or_else(|| format!("{url} did not return text"))
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns a readable message if the browser window cannot be accessed or
/// `localStorage` is unavailable (privacy mode, sandboxed frames).
pub fn local_storage() -> Result<Storage, String> {
    window()
        .ok_or_else(|| String::from("window unavailable"))?
        .local_storage()
        .map_err(|err| js_error_message(&err))?
        .ok_or_else(|| String::from("localStorage unavailable"))
}
