//! Session-status queries for the navigation guard

use super::ConsoleClient;
use super::error::ClientError;
use async_trait::async_trait;
use reqwest::Method;
use verify_core::{SessionProbe, SessionStatus};

impl ConsoleClient {
    /// Ask the backend whether the current browser session is signed in.
    ///
    /// A non-success status is a definite "signed out". Transport and decode
    /// failures are errors; the guard treats them as signed out as well.
    pub async fn fetch_session_status(&self) -> Result<SessionStatus, ClientError> {
        let request = self.request(Method::GET, &self.inner.session_path);
        let response = self.dispatch(request).await?;
        let status = response.status();

        if !status.is_success() {
            tracing::debug!(%status, "session status query rejected");
            return Ok(SessionStatus::anonymous());
        }

        Ok(response.json().await?)
    }
}

#[async_trait(?Send)]
impl SessionProbe for ConsoleClient {
    async fn session_status(&self) -> verify_core::Result<SessionStatus> {
        Ok(self.fetch_session_status().await?)
    }
}
