use gloo::timers::callback::Timeout;
use tohu_kaiako_core::DocumentExport;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::local_store::js_err;

const REVOKE_DELAY_MS: u32 = 1_000;

/// Saves the document through a temporary object URL and anchor click.
pub(crate) fn download_document(export: &DocumentExport) -> Result<(), String> {
    let bytes = export.bytes().map_err(|err| err.to_string())?;
    let array = js_sys::Uint8Array::from(bytes.as_slice());
    let parts = js_sys::Array::of1(&array);
    let options = BlobPropertyBag::new();
    options.set_type(export.mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "missing document".to_string())?;
    let anchor = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| "anchor element unavailable".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(&export.file_name);
    anchor.click();
    Timeout::new(REVOKE_DELAY_MS, move || {
        if let Err(err) = Url::revoke_object_url(&url) {
            gloo::console::warn!("document download: revoke failed", js_err(err));
        }
    })
    .forget();
    Ok(())
}
