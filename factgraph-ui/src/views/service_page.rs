use crate::bridge;
use crate::router::use_router;
use factgraph_core::task::NEWS_MIN_CHARS;
use factgraph_core::{NewsIn, QIn, Route};
use leptos::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn ServicePage() -> impl IntoView {
    let router = use_router();

    let news_text = create_rw_signal(String::new());
    let submitting = create_rw_signal(false);
    let submit_error = create_rw_signal(None::<String>);

    let question = create_rw_signal(String::new());
    let asking = create_rw_signal(false);
    let answer = create_rw_signal(None::<Result<String, String>>);

    let submit_news = move || {
        let payload = NewsIn {
            text: news_text.get_untracked(),
        };
        if let Err(e) = payload.validate() {
            submit_error.set(Some(e.to_string()));
            return;
        }
        submitting.set(true);
        submit_error.set(None);
        spawn_local(async move {
            match bridge::submit_news(&payload).await {
                Ok(out) => {
                    log::info!("verification task {} queued", out.task_id);
                    submitting.try_set(false);
                    router.navigate(&Route::TaskStatus { id: out.task_id }.path());
                }
                Err(e) => {
                    log::warn!("submit failed: {e}");
                    submitting.try_set(false);
                    submit_error.try_set(Some(e));
                }
            }
        });
    };

    let ask = move || {
        let payload = QIn {
            question: question.get_untracked(),
        };
        if let Err(e) = payload.validate() {
            answer.set(Some(Err(e.to_string())));
            return;
        }
        asking.set(true);
        spawn_local(async move {
            let result = bridge::ask(&payload).await.map(|out| out.answer);
            asking.try_set(false);
            answer.try_set(Some(result));
        });
    };

    let remaining = move || NEWS_MIN_CHARS.saturating_sub(news_text.get().chars().count());

    view! {
      <section class="panel">
        <h2>"Verify a news article"</h2>
        <textarea
          prop:value=move || news_text.get()
          on:input=move |ev| news_text.set(event_target_value(&ev))
          placeholder="Paste the full article text"
        />
        <div class="row">
          <button
            disabled=move || { submitting.get() || remaining() > 0 }
            on:click=move |_| submit_news()
          >
            {move || if submitting.get() { "Submitting..." } else { "Verify" }}
          </button>
          <span class="meta">
            {move || match remaining() {
              0 => String::new(),
              n => format!("{n} more characters needed"),
            }}
          </span>
        </div>
        <Show when=move || submit_error.get().is_some() fallback=|| ()>
          <pre class="error">{move || submit_error.get().unwrap_or_default()}</pre>
        </Show>
      </section>

      <section class="panel">
        <h2>"Ask a question"</h2>
        <input
          prop:value=move || question.get()
          on:input=move |ev| question.set(event_target_value(&ev))
          placeholder="Question"
        />
        <div class="row">
          <button disabled=move || asking.get() on:click=move |_| ask()>"Ask"</button>
        </div>
        {move || match answer.get() {
          Some(Ok(text)) => view! { <p>{text}</p> }.into_view(),
          Some(Err(e)) => view! { <pre class="error">{e}</pre> }.into_view(),
          None => ().into_view(),
        }}
      </section>
    }
}
