use crate::bridge;
use crate::firestore::use_firestore;
use crate::router::Link;
use factgraph_core::backend::Document;
use factgraph_core::TaskStatus as Status;
use leptos::*;
use std::time::Duration;
use wasm_bindgen_futures::spawn_local;

const POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq)]
enum Progress {
    Loading,
    Known(Status),
    Missing,
}

impl Progress {
    fn settled(&self) -> bool {
        match self {
            Progress::Loading => false,
            Progress::Known(s) => s.is_terminal(),
            Progress::Missing => true,
        }
    }
}

/// Live status of one verification task, polled until it settles.
#[component]
pub fn TaskStatus(id: String) -> impl IntoView {
    let progress = create_rw_signal(Progress::Loading);
    let error = create_rw_signal(None::<String>);
    let document = create_rw_signal(None::<Document>);
    let task_id = store_value(id);
    let firestore = use_firestore();

    let poll = move || {
        let id = task_id.get_value();
        spawn_local(async move {
            match bridge::fetch_task(&id).await {
                Ok(Some(out)) => {
                    progress.try_set(Progress::Known(out.status));
                    error.try_set(None);
                }
                Ok(None) => {
                    progress.try_set(Progress::Missing);
                }
                Err(e) => {
                    log::warn!("polling task {id} failed: {e}");
                    error.try_set(Some(e));
                }
            }
        });
    };

    let load_document = move || {
        let Some(db) = firestore.clone() else {
            return;
        };
        let id = task_id.get_value();
        spawn_local(async move {
            match db.get_document(&["tasks", id.as_str()]).await {
                Ok(doc) => {
                    document.try_set(doc);
                }
                Err(e) => log::warn!("reading tasks/{id} failed: {e}"),
            }
        });
    };

    poll();
    load_document();

    match set_interval_with_handle(
        move || {
            if !progress.get_untracked().settled() {
                poll();
            }
        },
        POLL_INTERVAL,
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => log::error!("could not schedule polling: {e:?}"),
    }

    // Results land in the document store once the pipeline finishes.
    create_effect(move |was_done: Option<bool>| {
        let done = progress.get() == Progress::Known(Status::Done);
        if done && was_done == Some(false) {
            load_document();
        }
        done
    });

    view! {
      <section class="panel">
        <h2>"Task " {move || task_id.get_value()}</h2>
        {move || match progress.get() {
          Progress::Loading => view! { <p class="meta">"Loading..."</p> }.into_view(),
          Progress::Missing => view! { <p class="error">"Task not found."</p> }.into_view(),
          Progress::Known(s) => view! {
            <p>"Status: " <span class=format!("status {s}")>{s.to_string()}</span></p>
          }.into_view(),
        }}
        <Show when=move || error.get().is_some() fallback=|| ()>
          <pre class="error">{move || error.get().unwrap_or_default()}</pre>
        </Show>
      </section>

      {move || document.get().map(|doc| view! {
        <section class="panel">
          <h3>"Stored result"</h3>
          <dl>
            {doc
              .fields
              .into_iter()
              .map(|(k, v)| view! { <dt>{k}</dt><dd>{display_value(&v)}</dd> })
              .collect_view()}
          </dl>
        </section>
      })}

      <Link href="/">"Submit another article"</Link>
    }
}

fn display_value(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
