pub mod config;
pub mod csrf;
pub mod error;
pub mod guard;
pub mod routes;

pub use crate::config::{ConsoleConfig, RouteSettings};
pub use csrf::{BootstrapGlobal, CookieJar, CsrfSettings, TokenResolver, TokenSource, TokenStore};
pub use error::{Error, Result};
pub use guard::{NavigationDecision, NavigationGuard, SessionProbe, SessionStatus};
pub use routes::{RouteAccess, RouteDescriptor, RouteTable};
