use dioxus::prelude::*;

use crate::shared::constants::SESSION_STORAGE_KEY;
#[cfg(target_arch = "wasm32")]
use crate::shared::constants::LOGOUT_SYNC_GRACE_MS;

/// Cross-tab logout detection.
///
/// Tabs share a session marker in localStorage. When another tab clears it,
/// a `storage` event fires here; after a grace window the marker is read
/// again, so transient auth-state blips that clear and immediately restore
/// the marker do not log this tab out.
pub fn use_session_sync() -> Signal<bool> {
    let logged_out = use_signal(|| false);

    use_effect(move || {
        #[cfg(target_arch = "wasm32")]
        setup_storage_listener(logged_out);
    });

    logged_out
}

/// A storage event means logout when it targets the session key and the
/// marker was removed or emptied
pub fn is_logout_event(key: Option<&str>, new_value: Option<&str>) -> bool {
    key == Some(SESSION_STORAGE_KEY) && new_value.map_or(true, |v| v.is_empty())
}

#[cfg(target_arch = "wasm32")]
fn setup_storage_listener(mut logged_out: Signal<bool>) {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        return;
    };

    let callback = Closure::wrap(Box::new(move |evt: web_sys::StorageEvent| {
        let key = evt.key();
        let new_value = evt.new_value();
        if !is_logout_event(key.as_deref(), new_value.as_deref()) {
            return;
        }

        // Use spawn_local instead of Dioxus spawn (no runtime context needed)
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(LOGOUT_SYNC_GRACE_MS).await;
            if read_session_marker().is_none() {
                tracing::info!("Session cleared in another tab, logging out");
                logged_out.set(true);
            }
        });
    }) as Box<dyn FnMut(web_sys::StorageEvent)>);

    let _ = window.add_event_listener_with_callback("storage", callback.as_ref().unchecked_ref());
    callback.forget(); // Keep closure alive
}

/// Read the shared session marker
#[cfg(target_arch = "wasm32")]
pub fn read_session_marker() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage
        .get_item(SESSION_STORAGE_KEY)
        .ok()?
        .filter(|v| !v.is_empty())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_session_marker() -> Option<String> {
    None
}

/// Read the session marker, minting an opaque user id on first visit.
/// Sign-in is handled outside this app; the marker is the whole identity.
#[cfg(target_arch = "wasm32")]
pub fn ensure_session_marker() -> String {
    if let Some(existing) = read_session_marker() {
        return existing;
    }
    let user_id = format!("mq-{}", uuid::Uuid::new_v4());
    write_session_marker(&user_id);
    user_id
}

#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_session_marker() -> String {
    String::new()
}

/// Write the shared session marker, visible to other tabs
#[cfg(target_arch = "wasm32")]
pub fn write_session_marker(user_id: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(SESSION_STORAGE_KEY, user_id);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write_session_marker(_user_id: &str) {
    // No-op on server
}

/// Clear the shared session marker, triggering logout in other tabs
#[cfg(target_arch = "wasm32")]
pub fn clear_session_marker() {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(SESSION_STORAGE_KEY);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clear_session_marker() {
    // No-op on server
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removal_of_session_key_is_logout() {
        assert!(is_logout_event(Some(SESSION_STORAGE_KEY), None));
        assert!(is_logout_event(Some(SESSION_STORAGE_KEY), Some("")));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        assert!(!is_logout_event(Some("theme"), None));
        assert!(!is_logout_event(None, None));
    }

    #[test]
    fn test_marker_rewrite_is_not_logout() {
        assert!(!is_logout_event(Some(SESSION_STORAGE_KEY), Some("user-2")));
    }
}
