//! Bridges to the hosting page: the `__APP_CONFIG__` object it injects and an
//! optional `__TK_IDENTITY` sign-in hook.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise, Reflect};
use serde::Deserialize;
use serde_json::Value;
use tohu_kaiako_core::identity::{offline_status_for_app, signed_in_status, SIGNED_OUT_STATUS};
use tohu_kaiako_core::{IdentityProvider, OfflineIdentity};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::local_store::js_err;
use crate::AppController;

const CONFIG_GLOBAL: &str = "__APP_CONFIG__";
const IDENTITY_GLOBAL: &str = "__TK_IDENTITY";
const SIGNING_IN_STATUS: &str = "Signing in…";

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct HostConfig {
    firebase_config: Option<Value>,
    firebase_app_id: Option<String>,
    firebase_initial_token: Option<String>,
}

impl HostConfig {
    pub(crate) fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let Ok(value) = Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) else {
            return Self::default();
        };
        if value.is_null() || value.is_undefined() {
            return Self::default();
        }
        let raw = js_sys::JSON::stringify(&value)
            .ok()
            .and_then(|json| json.as_string())
            .unwrap_or_default();
        Self::from_json(&raw)
    }

    pub(crate) fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(err) => {
                gloo::console::warn!("host config unreadable", err.to_string());
                Self::default()
            }
        }
    }

    /// An absent, null or empty `firebaseConfig` means identity is off.
    pub(crate) fn identity_configured(&self) -> bool {
        match &self.firebase_config {
            None | Some(Value::Null) => false,
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::String(text)) => !text.trim().is_empty(),
            Some(_) => true,
        }
    }
}

/// Delegates sign-in to the host page and keeps the resulting status line.
pub(crate) struct HostIdentity {
    config: HostConfig,
    status: RefCell<String>,
}

impl HostIdentity {
    pub(crate) fn new(config: HostConfig) -> Self {
        Self {
            config,
            status: RefCell::new(SIGNING_IN_STATUS.to_string()),
        }
    }

    async fn call_hook(&self) -> Result<Option<String>, String> {
        let window = web_sys::window().ok_or_else(|| "missing window".to_string())?;
        let hook = Reflect::get(&window, &JsValue::from_str(IDENTITY_GLOBAL)).map_err(js_err)?;
        if hook.is_null() || hook.is_undefined() {
            return Err("identity hook missing".to_string());
        }
        let sign_in = Reflect::get(&hook, &JsValue::from_str("signIn"))
            .map_err(js_err)?
            .dyn_into::<Function>()
            .map_err(|_| "identity hook has no signIn".to_string())?;
        let firebase_config = match &self.config.firebase_config {
            Some(config) => js_sys::JSON::parse(&config.to_string()).map_err(js_err)?,
            None => JsValue::NULL,
        };
        let token = self
            .config
            .firebase_initial_token
            .as_deref()
            .map(JsValue::from_str)
            .unwrap_or(JsValue::NULL);
        let promise = sign_in
            .call2(&hook, &firebase_config, &token)
            .map_err(js_err)?
            .dyn_into::<Promise>()
            .map_err(|_| "signIn did not return a promise".to_string())?;
        let user_id = JsFuture::from(promise).await.map_err(js_err)?;
        Ok(user_id
            .as_string()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty()))
    }
}

impl IdentityProvider for HostIdentity {
    async fn sign_in(&self) {
        let status = match self.call_hook().await {
            Ok(Some(user_id)) => signed_in_status(&user_id),
            Ok(None) => SIGNED_OUT_STATUS.to_string(),
            Err(err) => {
                gloo::console::warn!("sign-in failed, continuing offline", err);
                offline_status_for_app(self.config.firebase_app_id.as_deref())
            }
        };
        *self.status.borrow_mut() = status;
    }

    fn current_status(&self) -> String {
        self.status.borrow().clone()
    }
}

/// Publishes the identity status line without holding up the rest of boot.
pub(crate) fn start_identity(config: HostConfig, controller: Rc<AppController>) {
    if !config.identity_configured() {
        controller.set_user_status(OfflineIdentity.current_status());
        return;
    }
    let identity = HostIdentity::new(config);
    controller.set_user_status(identity.current_status());
    spawn_local(async move {
        identity.sign_in().await;
        controller.set_user_status(identity.current_status());
    });
}
