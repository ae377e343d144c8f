//! Page bootstrap token access

/// Read access to the token a server-rendered bootstrap script publishes on
/// the page. It may appear at any time after startup, so it is read afresh
/// on every lookup.
#[cfg_attr(test, mockall::automock)]
pub trait BootstrapGlobal {
    fn published_token(&self) -> Option<String>;
}

impl<G: BootstrapGlobal + ?Sized> BootstrapGlobal for Box<G> {
    fn published_token(&self) -> Option<String> {
        (**self).published_token()
    }
}

/// For environments without a page bootstrap
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBootstrap;

impl BootstrapGlobal for NoBootstrap {
    fn published_token(&self) -> Option<String> {
        None
    }
}
