use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use pandemap_shared::MetricSelector;

/// Query parameter holding the active metric tab.
pub const METRIC_PARAM: &str = "detailed";

/// Extract one parameter from a search string ("?a=b&c=d", leading '?'
/// optional). Values here are fixed tokens, so no percent-decoding.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    let search = search.strip_prefix('?').unwrap_or(search);
    for pair in search.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        if k == key {
            return Some(v.to_string());
        }
    }
    None
}

/// Rebuild a search string with `key` set to `value`, preserving every
/// other parameter and its position.
pub fn with_query_param(search: &str, key: &str, value: &str) -> String {
    let search = search.strip_prefix('?').unwrap_or(search);
    let mut pairs: Vec<String> = Vec::new();
    let mut replaced = false;
    for pair in search.split('&').filter(|p| !p.is_empty()) {
        let (k, _) = pair.split_once('=').unwrap_or((pair, ""));
        if k == key {
            if !replaced {
                pairs.push(format!("{key}={value}"));
                replaced = true;
            }
        } else {
            pairs.push(pair.to_string());
        }
    }
    if !replaced {
        pairs.push(format!("{key}={value}"));
    }
    format!("?{}", pairs.join("&"))
}

/// Initial metric tab from the current URL; absent or malformed values
/// fall back to the default.
pub fn read_metric() -> MetricSelector {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    MetricSelector::from_param(query_param(&search, METRIC_PARAM).as_deref())
}

/// Rewrite the metric parameter in place on the current history frame.
/// Tab flips must not pile up as separate back-button entries.
pub fn write_metric(selector: MetricSelector) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let (Ok(path), Ok(search)) = (location.pathname(), location.search()) else {
        return;
    };
    let url = format!(
        "{path}{}",
        with_query_param(&search, METRIC_PARAM, selector.as_param())
    );
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&url));
    }
}

struct PopstateBinding {
    window: web_sys::Window,
    _handler: Closure<dyn Fn(web_sys::Event)>,
}

thread_local! {
    static POPSTATE_BINDING: RefCell<Option<PopstateBinding>> =
        const { RefCell::new(None) };
}

/// Re-read the metric parameter on browser back/forward so the tab state
/// follows the URL. Replaces any previous binding if the effect re-runs.
pub fn bind_popstate(on_change: impl Fn(MetricSelector) + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };

    POPSTATE_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            let _ = old.window.remove_event_listener_with_callback(
                "popstate",
                old._handler.as_ref().unchecked_ref(),
            );
        }
    });

    let handler = Closure::<dyn Fn(web_sys::Event)>::new(move |_: web_sys::Event| {
        on_change(read_metric());
    });
    if window
        .add_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref())
        .is_ok()
    {
        POPSTATE_BINDING.with(|slot| {
            *slot.borrow_mut() = Some(PopstateBinding {
                window: window.clone(),
                _handler: handler,
            });
        });
    }
}

/// Hand a drill-down route to the page router. This client owns no route
/// table, so the transition is a history push plus a breadcrumb log.
pub fn navigate_to(route: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Ok(history) = window.history() {
        web_sys::console::info_1(&format!("navigate: {route}").into());
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(route));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_finds_key_with_or_without_prefix() {
        assert_eq!(
            query_param("?detailed=death&tab=2", "detailed").as_deref(),
            Some("death")
        );
        assert_eq!(
            query_param("detailed=death", "detailed").as_deref(),
            Some("death")
        );
        assert_eq!(query_param("?tab=2", "detailed"), None);
        assert_eq!(query_param("", "detailed"), None);
    }

    #[test]
    fn query_param_handles_valueless_pairs() {
        assert_eq!(query_param("?detailed", "detailed").as_deref(), Some(""));
    }

    #[test]
    fn with_query_param_replaces_in_place() {
        assert_eq!(
            with_query_param("?detailed=confirmed&tab=2", "detailed", "death"),
            "?detailed=death&tab=2"
        );
    }

    #[test]
    fn with_query_param_appends_when_absent() {
        assert_eq!(
            with_query_param("?tab=2", "detailed", "death"),
            "?tab=2&detailed=death"
        );
        assert_eq!(
            with_query_param("", "detailed", "death"),
            "?detailed=death"
        );
    }

    #[test]
    fn with_query_param_collapses_duplicate_keys() {
        assert_eq!(
            with_query_param("?detailed=a&detailed=b&x=1", "detailed", "death"),
            "?detailed=death&x=1"
        );
    }

    #[test]
    fn url_roundtrip_through_selector() {
        let written = with_query_param("", METRIC_PARAM, MetricSelector::Death.as_param());
        let read = MetricSelector::from_param(query_param(&written, METRIC_PARAM).as_deref());
        assert_eq!(read, MetricSelector::Death);

        let garbage = MetricSelector::from_param(query_param("?detailed=zzz", METRIC_PARAM).as_deref());
        assert_eq!(garbage, MetricSelector::Confirmed);
    }
}
