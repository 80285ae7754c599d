use axum::Router;

/// A service module that contributes HTTP routes.
///
/// The server binary collects every module and merges its routes into the
/// root Router. Routes are mounted as-is; a module owns its full paths
/// (`/api/submit`, not `/{name}/submit`) because clients depend on them.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes, already bound to their state.
    fn routes(&self) -> Router;
}
