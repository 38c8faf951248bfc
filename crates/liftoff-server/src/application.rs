use axum::Router;

/// The service definition handed to `start`
///
/// Routes are only passed through to the native runtime; nothing here
/// inspects them.
pub trait Application: Send + 'static {
    /// Name used in logs and startup errors
    fn name(&self) -> &str {
        "application"
    }

    /// Produce the router to serve
    ///
    /// # Errors
    ///
    /// Returns an error if the definition is invalid; `start` reports it as
    /// `StartupError::Application`
    fn into_router(self) -> anyhow::Result<Router>;
}

impl Application for Router {
    fn into_router(self) -> anyhow::Result<Router> {
        Ok(self)
    }
}
