pub const OFFLINE_STATUS: &str = "Offline mode (Firebase not configured)";
pub const SIGNED_OUT_STATUS: &str = "Signed out";

/// Optional sign-in capability. Only its status line reaches the UI.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    /// Best effort. Failures are absorbed into [`IdentityProvider::current_status`].
    async fn sign_in(&self);
    fn current_status(&self) -> String;
}

/// Used when no sign-in backend is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineIdentity;

impl IdentityProvider for OfflineIdentity {
    async fn sign_in(&self) {}

    fn current_status(&self) -> String {
        OFFLINE_STATUS.to_string()
    }
}

pub fn offline_status_for_app(app_id: Option<&str>) -> String {
    let app_id = app_id.map(str::trim).filter(|id| !id.is_empty()).unwrap_or("local");
    format!("Offline mode (app: {app_id})")
}

pub fn signed_in_status(user_id: &str) -> String {
    format!("User ID: {user_id}")
}
