//! History-mode router: resolves `location.pathname` against the route
//! table and keeps the result in a signal.

use factgraph_core::{Route, RouteTable};
use leptos::*;
use wasm_bindgen::JsValue;

#[derive(Clone, Copy)]
pub struct Router {
    route: RwSignal<Route>,
    table: StoredValue<RouteTable>,
}

impl Router {
    pub fn route(&self) -> Route {
        self.route.get()
    }

    pub fn navigate(&self, path: &str) {
        match window().history() {
            Ok(history) => {
                if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
                    log::warn!("pushState to {path} failed: {e:?}");
                }
            }
            Err(e) => log::warn!("history unavailable: {e:?}"),
        }
        self.sync(path);
    }

    fn sync(&self, path: &str) {
        let next = self.table.with_value(|t| t.resolve(path));
        log::debug!("route {path} -> {next:?}");
        self.route.set(next);
    }
}

fn current_path() -> String {
    window()
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_string())
}

/// Builds the router from `table`, follows back/forward and provides it to
/// the component tree.
pub fn install(table: RouteTable) -> Router {
    let path = current_path();
    let router = Router {
        route: create_rw_signal(table.resolve(&path)),
        table: store_value(table),
    };

    let listener = window_event_listener(ev::popstate, move |_| router.sync(&current_path()));
    on_cleanup(move || listener.remove());

    provide_context(router);
    router
}

pub fn use_router() -> Router {
    expect_context::<Router>()
}

/// Anchor that navigates in-app on plain left clicks.
#[component]
pub fn Link(#[prop(into)] href: String, children: Children) -> impl IntoView {
    let router = use_router();
    let target = href.clone();
    view! {
      <a
        href=href
        on:click=move |ev: ev::MouseEvent| {
          if ev.button() != 0 || ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.alt_key() {
            return;
          }
          ev.prevent_default();
          router.navigate(&target);
        }
      >
        {children()}
      </a>
    }
}
