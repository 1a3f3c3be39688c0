// Navigation side effect seam.
//
// The request channel redirects to the login entry point on its own when the
// server answers 401, independent of whoever issued the call.

use tracing::debug;

/// Login entry point.
pub const LOGIN_PATH: &str = "/login";

/// Landing page for authenticated users lacking a permission.
pub const HOME_PATH: &str = "/";

/// Receiver of forced navigation requests.
pub trait Navigator: Send + Sync {
    /// Move the user to `target`. Must not block.
    fn redirect(&self, target: &str);
}

/// Navigator that only records the request in the trace log.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn redirect(&self, target: &str) {
        debug!(target, "redirect requested (no navigator attached)");
    }
}
