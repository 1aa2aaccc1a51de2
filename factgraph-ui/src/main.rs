mod app;
mod bridge;
mod config;
mod firestore;
mod router;

pub mod views {
    pub mod not_found;
    pub mod service_page;
    pub mod task_status;
}

use crate::app::App;
use crate::firestore::Firestore;
use leptos::*;
use wasm_bindgen::JsCast;

const MOUNT_ID: &str = "app";

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    // One document-store handle for the whole app, injected through context.
    let firestore = match Firestore::init(config::backend_config()) {
        Ok(db) => {
            log::info!("document store ready (project {})", db.project_id());
            Some(db)
        }
        Err(e) => {
            log::warn!("document store disabled: {e}");
            None
        }
    };

    match mount_point() {
        Some(root) => mount_to(root, move || view! { <App firestore=firestore/> }),
        None => {
            log::error!("#{MOUNT_ID} not found, mounting on <body>");
            mount_to_body(move || view! { <App firestore=firestore/> })
        }
    }
}

fn mount_point() -> Option<web_sys::HtmlElement> {
    document()
        .get_element_by_id(MOUNT_ID)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
}
