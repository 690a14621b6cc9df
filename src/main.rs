mod download;
mod host;
mod local_store;
mod service;
mod ticker;
mod yew_app;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tohu_kaiako_core::Controller;

use crate::host::HostConfig;
use crate::local_store::BrowserStorage;
use crate::service::HttpGenerationService;

pub(crate) type AppController = Controller<BrowserStorage, HttpGenerationService>;

fn main() {
    console_error_panic_hook::set_once();
    let endpoint = service::generate_endpoint();
    gloo::console::log!("tohu kaiako: boot", endpoint.as_str());
    let controller = Controller::new(
        BrowserStorage,
        HttpGenerationService::new(endpoint),
        SmallRng::seed_from_u64(entropy_seed()),
    );
    host::start_identity(HostConfig::load(), controller.clone());
    yew_app::run(controller);
}

fn entropy_seed() -> u64 {
    let noise = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let now = js_sys::Date::now() as u64;
    (now << 20) ^ noise
}
