//! Extraction of the `window.__PRELOADED_STATE__` blob ShopRite embeds in
//! every server-rendered storefront page.

use std::sync::LazyLock;

use regex::Regex;

static PRELOADED_STATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)window\.__PRELOADED_STATE__\s*=\s*(\{.+?\});?\s*</script>")
        .expect("valid regex")
});

/// Pull the preloaded-state object out of a page and parse it as JSON.
///
/// Returns `None` when the assignment is missing or the captured text is not
/// valid JSON. A parse failure is logged; a missing marker is not, since bot
/// challenges and error pages routinely lack it.
#[must_use]
pub fn extract_preloaded_state(html: &str) -> Option<serde_json::Value> {
    let captured = PRELOADED_STATE_RE.captures(html)?.get(1)?.as_str();

    match serde_json::from_str(captured) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, bytes = captured.len(), "could not parse preloaded state");
            None
        }
    }
}
