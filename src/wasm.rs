use wasm_bindgen::prelude::*;

use crate::model::Canvas;

/// Lay out a dashboard JSON string for the browser. `template` may be a
/// template name or `undefined` for the default dashboard layout.
#[wasm_bindgen]
pub fn layout_dashboard(
    json: &str,
    template: Option<String>,
    width: f64,
    height: f64,
) -> Result<String, JsValue> {
    crate::layout_json(json, template.as_deref(), Canvas::new(width, height))
        .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))
}
