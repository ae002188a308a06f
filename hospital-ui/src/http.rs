#![cfg(target_arch = "wasm32")]

use hospital_core::{DirectoryError, ResourceKind};
use hospital_data::DocumentSource;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Tải tài liệu bằng `window.fetch`.
pub struct HttpSource;

impl DocumentSource for HttpSource {
    async fn fetch(
        &self,
        resource: ResourceKind,
        location: &str,
    ) -> Result<String, DirectoryError> {
        let fail = |message: String| DirectoryError::Fetch { resource, message };

        let window = web_sys::window().ok_or_else(|| fail("Không có window".to_string()))?;
        let response = JsFuture::from(window.fetch_with_str(location))
            .await
            .map_err(|err| fail(describe(&err)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| fail("Phản hồi không phải Response".to_string()))?;

        if !response.ok() {
            return Err(fail(format!("HTTP {} cho {location}", response.status())));
        }

        let text = response.text().map_err(|err| fail(describe(&err)))?;
        JsFuture::from(text)
            .await
            .map_err(|err| fail(describe(&err)))?
            .as_string()
            .ok_or_else(|| fail("Nội dung phản hồi không phải chuỗi".to_string()))
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
