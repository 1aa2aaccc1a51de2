use crate::firestore::Firestore;
use crate::router::{self, Link};
use crate::views::not_found::NotFound;
use crate::views::service_page::ServicePage;
use crate::views::task_status::TaskStatus;
use factgraph_core::{Route, RouteTable};
use leptos::*;

#[component]
pub fn App(firestore: Option<Firestore>) -> impl IntoView {
    if let Some(db) = firestore {
        provide_context(db);
    }
    let router = router::install(RouteTable::standard());

    view! {
      <header>
        <Link href="/">"FactGraph"</Link>
      </header>
      <main>
        {move || match router.route() {
          Route::Service => view! { <ServicePage/> }.into_view(),
          Route::TaskStatus { id } => view! { <TaskStatus id=id/> }.into_view(),
          Route::NotFound { path } => view! { <NotFound path=path/> }.into_view(),
        }}
      </main>
    }
}
