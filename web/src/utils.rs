use twofold_core::{KeyValueStore, StoreError};
use wasm_bindgen::JsValue;

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

fn js_error(err: JsValue) -> StoreError {
    StoreError::Unavailable(format!("{:?}", err))
}

/// `window.localStorage`, raw strings only so values stay readable by other versions of the page.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        gloo::utils::window()
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StoreError::Unavailable("local storage disabled".into()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }
}
