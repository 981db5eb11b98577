//! JavaScript evaluation scripts
//!
//! Scripts are built per call because they embed a selector or an index.
//! Selectors are embedded as JSON string literals so quotes inside them
//! (`a[href^='mailto:']`) survive.

use crate::utils::constants::{CANDIDATE_AVATAR_SELECTOR, GHOST_CLASS_FRAGMENT};

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Scroll the `index`-th candidate avatar to the middle of the viewport
pub(crate) fn scroll_candidate_script(index: usize) -> String {
    format!(
        r#"
    (() => {{
        const avatars = document.querySelectorAll({selector});
        const avatar = avatars[{index}];
        if (!avatar) {{
            return false;
        }}
        avatar.scrollIntoView({{ block: 'center', inline: 'nearest' }});
        return true;
    }})()
"#,
        selector = js_string(CANDIDATE_AVATAR_SELECTOR),
    )
}

/// Describe the `index`-th candidate avatar.
///
/// Always returns an object; `present` is false when the index is out of
/// range so the caller never has to deserialize a bare `null`.
pub(crate) fn candidate_probe_script(index: usize) -> String {
    format!(
        r#"
    (() => {{
        const avatars = document.querySelectorAll({selector});
        const avatar = avatars[{index}];
        if (!avatar) {{
            return {{ present: false, ghost: false, target_href: null }};
        }}
        let ghost = false;
        for (let node = avatar.parentElement; node; node = node.parentElement) {{
            if (node.tagName === 'DIV' && (node.getAttribute('class') || '').includes({ghost})) {{
                ghost = true;
                break;
            }}
        }}
        const link = avatar.closest('a');
        return {{
            present: true,
            ghost: ghost,
            target_href: link ? link.getAttribute('href') : null
        }};
    }})()
"#,
        selector = js_string(CANDIDATE_AVATAR_SELECTOR),
        ghost = js_string(GHOST_CLASS_FRAGMENT),
    )
}

/// Call `click()` on the first match of `selector`.
///
/// A DOM-level click reaches the element even when an overlay would intercept
/// a synthesized mouse event.
pub(crate) fn force_click_script(selector: &str) -> String {
    format!(
        r#"
    (() => {{
        const el = document.querySelector({selector});
        if (!el) {{
            return false;
        }}
        el.click();
        return true;
    }})()
"#,
        selector = js_string(selector),
    )
}

/// `textContent` of the first match of `selector`.
///
/// Unlike `innerText` this keeps visually hidden text and does not depend on
/// layout. Wrapped in an object for the same reason as the candidate probe.
pub(crate) fn text_content_script(selector: &str) -> String {
    format!(
        r#"
    (() => {{
        const el = document.querySelector({selector});
        return {{ found: !!el, text: el ? el.textContent : null }};
    }})()
"#,
        selector = js_string(selector),
    )
}
