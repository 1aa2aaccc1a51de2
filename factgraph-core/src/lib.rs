//! Types shared by the FactGraph front end, its dev server and the `/api`
//! service: the route table, the task wire model, the document-store
//! configuration and the dev proxy rule.

pub mod backend;
pub mod proxy;
pub mod routes;
pub mod task;

pub use backend::{BackendConfig, ConfigError};
pub use proxy::{ProxyError, ProxyRule};
pub use routes::{Route, RouteError, RouteName, RouteTable};
pub use task::{NewsIn, NewsOut, QIn, QOut, TaskStatus, ValidationError};
