use gloo::storage::{LocalStorage, Storage};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::ShareData;

/// Types persisted in a fixed local-storage slot.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

impl<T: StorageKey> StorageKey for Option<T> {
    const KEY: &'static str = T::KEY;
}

pub(crate) trait LocalOrDefault {
    fn local_or_default() -> Self;
}

impl<T> LocalOrDefault for T
where
    T: StorageKey + Default + DeserializeOwned,
{
    fn local_or_default() -> Self {
        LocalStorage::get(T::KEY).unwrap_or_default()
    }
}

pub(crate) trait LocalOrElse: Sized {
    /// Loads the persisted value; absence or a parse failure falls back.
    fn local_or_else(fallback: impl FnOnce() -> Self) -> Self;
}

impl<T> LocalOrElse for T
where
    T: StorageKey + DeserializeOwned,
{
    fn local_or_else(fallback: impl FnOnce() -> Self) -> Self {
        LocalStorage::get(T::KEY).unwrap_or_else(|_| fallback())
    }
}

pub(crate) trait LocalSave {
    /// Best-effort write; in-memory state stays authoritative on failure.
    fn local_save(&self);
}

impl<T> LocalSave for T
where
    T: StorageKey + Serialize,
{
    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("could not save to local storage: {:?}", err);
        }
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) async fn copy_to_clipboard(text: &str) -> bool {
    let clipboard = gloo::utils::window().navigator().clipboard();
    JsFuture::from(clipboard.write_text(text)).await.is_ok()
}

/// Hands `text` to the platform share facility. `false` when the API is
/// missing, refuses the payload, or the user dismisses the sheet; the
/// caller falls back to the clipboard.
pub(crate) async fn share_native(text: &str) -> bool {
    let navigator = gloo::utils::window().navigator();

    if !js_sys::Reflect::has(navigator.as_ref(), &JsValue::from_str("share")).unwrap_or(false) {
        return false;
    }

    let data = ShareData::new();
    data.set_text(text);
    if !navigator.can_share_with_data(&data) {
        return false;
    }

    JsFuture::from(navigator.share_with_data(&data)).await.is_ok()
}
