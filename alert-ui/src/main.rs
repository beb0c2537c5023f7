mod app;
mod bridge;

pub mod components {
    pub mod facet_icons;
    pub mod facet_value;
    pub mod push_alert_modal;
}

use leptos::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(app::App);
}
