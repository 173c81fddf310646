//! Browser file-save side effects for the export buttons.

use js_sys::Array;
use log::debug;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::flow::{FlowLink, links_to_csv};

/// MIME type of the CSV export.
pub const CSV_MIME: &str = "text/csv;charset=utf-8";
/// MIME type of the vector export.
pub const SVG_MIME: &str = "image/svg+xml;charset=utf-8";

/// Why a download did not start.
#[derive(Error, Debug)]
pub enum DownloadError {
	/// Nothing to write
	#[error("Nothing to download")]
	EmptyContent,

	/// Not running inside a page
	#[error("No browser document available")]
	NoDocument,

	/// A DOM call failed
	#[error("Browser error: {0}")]
	Browser(String),
}

impl From<JsValue> for DownloadError {
	fn from(value: JsValue) -> Self {
		DownloadError::Browser(format!("{:?}", value))
	}
}

/// Result alias for download operations.
pub type Result<T> = std::result::Result<T, DownloadError>;

/// Saves `content` as `filename` through a temporary object URL.
pub fn download_text(content: &str, filename: &str, mime: &str) -> Result<()> {
	if content.is_empty() {
		return Err(DownloadError::EmptyContent);
	}
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(DownloadError::NoDocument)?;

	let parts = Array::of1(&JsValue::from_str(content));
	let options = BlobPropertyBag::new();
	options.set_type(mime);
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let anchor: HtmlAnchorElement = document
		.create_element("a")?
		.dyn_into()
		.map_err(|_| DownloadError::Browser("<a> is not an anchor element".to_string()))?;
	anchor.set_href(&url);
	anchor.set_download(filename);
	// Firefox only follows clicks on attached anchors
	match document.body() {
		Some(body) => {
			body.append_child(&anchor)?;
			anchor.click();
			anchor.remove();
		}
		None => anchor.click(),
	}
	Url::revoke_object_url(&url)?;

	debug!("saved {} ({} bytes, {})", filename, content.len(), mime);
	Ok(())
}

/// Exports `links` as a CSV file.
pub fn download_csv(links: &[FlowLink], filename: &str) -> Result<()> {
	download_text(&links_to_csv(links), filename, CSV_MIME)
}

/// Exports serialized SVG markup as a file.
pub fn download_svg(markup: &str, filename: &str) -> Result<()> {
	download_text(markup, filename, SVG_MIME)
}
