mod app;
mod views;

use app::{App, AppProps};
use verify_frontend_common::{ConsoleServices, init_logging, load_config};

fn main() {
    console_error_panic_hook::set_once();

    let config = load_config();
    init_logging(&config.log_level);

    match ConsoleServices::new(config) {
        Ok(services) => {
            yew::Renderer::<App>::with_props(AppProps { services }).render();
        }
        Err(error) => tracing::error!(%error, "console failed to start"),
    }
}
