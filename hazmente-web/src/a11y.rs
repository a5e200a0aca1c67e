// Accessibility helpers

const HIGH_CONTRAST_KEY: &str = "hazmente.hc";

/// Focus ring and screen-reader utility CSS injected ahead of the views.
///
/// The app targets older learners, so the ring is thick and high contrast.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus-visible{outline:4px solid #1F6FEB;outline-offset:3px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Update the polite live region so screen readers announce `msg`.
pub fn set_status(msg: &str) {
    if let Some(node) = crate::dom::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id("status-live"))
    {
        node.set_text_content(Some(msg));
    }
}

/// Toggle the `hc` class on `<html>` and remember the choice.
pub fn set_high_contrast(enabled: bool) {
    let Some(win) = crate::dom::window() else {
        return;
    };

    if let Some(html) = win.document().and_then(|doc| doc.document_element()) {
        let _ = if enabled {
            html.class_list().add_1("hc")
        } else {
            html.class_list().remove_1("hc")
        };
    }

    if let Ok(storage) = crate::dom::local_storage() {
        let _ = storage.set_item(HIGH_CONTRAST_KEY, if enabled { "1" } else { "0" });
    }
}

/// Saved high-contrast preference; false when nothing is stored.
#[must_use]
pub fn high_contrast_enabled() -> bool {
    crate::dom::local_storage()
        .ok()
        .and_then(|storage| storage.get_item(HIGH_CONTRAST_KEY).ok().flatten())
        .is_some_and(|v| v == "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_defaults_off_without_a_browser() {
        assert!(!high_contrast_enabled());
        set_high_contrast(true);
        set_status("ignored");
        assert!(visible_focus_css().contains(".sr-only"));
    }
}
