#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-hospital-ui]";

/// Default CSS for the hospital cards along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --hospital-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --hospital-card-bg: #ffffff;
  --hospital-card-border: rgba(148, 163, 184, 0.28);
  --hospital-radius: 14px;
  --hospital-text: #1f2933;
  --hospital-muted: #52606d;
  --hospital-heading: #11181c;
  --hospital-surface: #f8fafc;
  --hospital-accent: #0b5394;
  --hospital-accent-bg: rgba(11, 83, 148, 0.12);
  --hospital-book: #067647;
  --hospital-book-bg: rgba(6, 118, 71, 0.12);
}

.hospital-display {
  font-family: var(--hospital-font-family);
  color: var(--hospital-text);
  display: flex;
  flex-direction: column;
  gap: 16px;
  overflow-y: auto;
}

.hospital-card {
  background: var(--hospital-card-bg);
  border: 1px solid var(--hospital-card-border);
  border-radius: var(--hospital-radius);
  padding: 16px 18px;
  display: flex;
  flex-direction: column;
  gap: 10px;
  box-shadow: 0 12px 24px rgba(15, 23, 42, 0.08);
}

.hospital-name {
  font-size: 1.1rem;
  font-weight: 700;
  color: var(--hospital-heading);
}

.hospital-info {
  display: flex;
  gap: 14px;
  align-items: flex-start;
}

.hospital-image {
  width: 112px;
  height: 84px;
  object-fit: cover;
  border-radius: calc(var(--hospital-radius) - 6px);
  background: var(--hospital-surface);
}

.hospital-details {
  display: flex;
  flex-direction: column;
  gap: 4px;
  font-size: 0.9rem;
  color: var(--hospital-muted);
}

.hospital-website a {
  color: var(--hospital-accent);
  word-break: break-all;
}

.call-icon {
  width: 16px;
  height: 16px;
  vertical-align: middle;
}

.available-beds-toggle,
.book-appointments-toggle {
  appearance: none;
  border: none;
  text-align: left;
  cursor: pointer;
  font: inherit;
  font-weight: 600;
  color: var(--hospital-accent);
  background: var(--hospital-accent-bg);
  border-radius: 999px;
  padding: 6px 14px;
}

.available-beds-toggle[aria-expanded="true"],
.book-appointments-toggle[aria-expanded="true"] {
  background: var(--hospital-accent);
  color: #ffffff;
}

.available-beds-info,
.book-appointments-info {
  display: none;
  padding: 4px 6px;
  font-size: 0.9rem;
}

.available-beds-info.is-expanded,
.book-appointments-info.is-expanded {
  display: block;
}

.available-beds-info p {
  margin: 4px 0;
  font-variant-numeric: tabular-nums;
}

.doctor-info {
  display: flex;
  justify-content: space-between;
  align-items: center;
  gap: 12px;
  padding: 6px 0;
  border-bottom: 1px dashed var(--hospital-card-border);
}

.doctor-info:last-child {
  border-bottom: none;
}

.book-button {
  border: none;
  cursor: pointer;
  font: inherit;
  font-weight: 600;
  color: var(--hospital-book);
  background: var(--hospital-book-bg);
  border-radius: 8px;
  padding: 4px 12px;
}

.appointments-empty {
  color: var(--hospital-muted);
  font-style: italic;
}

@media (max-width: 640px) {
  .hospital-info {
    flex-direction: column;
  }

  .hospital-image {
    width: 100%;
    height: 160px;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-hospital-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.dyn_into::<Node>()?)?;

    Ok(())
}
