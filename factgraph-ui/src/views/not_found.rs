use crate::router::Link;
use leptos::*;

#[component]
pub fn NotFound(path: String) -> impl IntoView {
    view! {
      <section class="panel">
        <h2>"Page not found"</h2>
        <p class="meta">{format!("Nothing lives at {path}.")}</p>
        <Link href="/">"Back to the service page"</Link>
      </section>
    }
}
