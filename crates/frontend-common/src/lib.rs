pub mod auth_guard;
pub mod browser;
pub mod config;
pub mod logging;
pub mod services;

pub use auth_guard::RouteGuard;
pub use browser::{DocumentCookies, WindowGlobal, read_bootstrap_token};
pub use config::load_config;
pub use logging::init_logging;
pub use services::{ConsoleServices, ServicesProvider, SetupError, use_services};
