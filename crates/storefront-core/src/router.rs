// ── In-process router ──
//
// Holds the current location and the pending "return to" path. Acts as
// the request channel's `Navigator`, so a 401 anywhere moves the router to
// the login entry point and fires the session-expiry hooks.

use std::sync::{Mutex, PoisonError};

use storefront_api::{LOGIN_PATH, Navigator};
use tokio::sync::watch;
use tracing::debug;

use crate::guard::{Access, RouteGuard};

type ExpiryHook = Box<dyn Fn() + Send + Sync>;

pub struct Router {
    location: watch::Sender<String>,
    return_to: Mutex<Option<String>>,
    on_expired: Mutex<Vec<ExpiryHook>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Router {
    pub fn new(initial: &str) -> Self {
        let (location, _) = watch::channel(initial.to_owned());
        Self {
            location,
            return_to: Mutex::new(None),
            on_expired: Mutex::new(Vec::new()),
        }
    }

    /// Current location.
    pub fn location(&self) -> String {
        self.location.borrow().clone()
    }

    /// Watch location changes.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.location.subscribe()
    }

    /// Navigate to `destination`, consulting `guard` first.
    ///
    /// On redirect the router moves to the redirect target instead and
    /// remembers the requested path when the guard asks for it.
    pub fn visit(&self, guard: &RouteGuard, destination: &str, required: Option<&str>) -> Access {
        let access = guard.authorize(destination, required);
        match &access {
            Access::Allow => self.go(destination),
            Access::Redirect { to, return_to } => {
                debug!(destination, to, "navigation redirected");
                *self.pending() = return_to.clone();
                self.go(to);
            }
        }
        access
    }

    /// Run `hook` whenever the request channel sends the user to sign in,
    /// i.e. after the server rejected the stored credential.
    pub fn on_session_expired(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.on_expired
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(hook));
    }

    /// Take the path the user asked for before being sent to sign in.
    pub fn take_return_to(&self) -> Option<String> {
        self.pending().take()
    }

    fn go(&self, target: &str) {
        self.location.send_if_modified(|current| {
            if current == target {
                false
            } else {
                target.clone_into(current);
                true
            }
        });
    }

    fn pending(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.return_to.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for Router {
    fn redirect(&self, target: &str) {
        debug!(target, "redirect requested");
        if target == LOGIN_PATH {
            let current = self.location();
            if current != LOGIN_PATH {
                *self.pending() = Some(current);
            }
            for hook in self
                .on_expired
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
            {
                hook();
            }
        }
        self.go(target);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use secrecy::SecretString;
    use storefront_api::{CredentialStore, HOME_PATH, MemoryCredentialStore};

    use super::*;

    #[test]
    fn anonymous_visit_lands_on_login_and_remembers_destination() {
        let router = Router::default();
        let guard = RouteGuard::new(Arc::new(MemoryCredentialStore::new()));

        let access = router.visit(&guard, "/orders", None);
        assert!(!access.is_allowed());
        assert_eq!(router.location(), LOGIN_PATH);
        assert_eq!(router.take_return_to().as_deref(), Some("/orders"));
        assert_eq!(router.take_return_to(), None);
    }

    #[test]
    fn permitted_visit_moves_router() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.set_token(&SecretString::from("t".to_owned())).unwrap();
        store
            .set_permissions(&BTreeSet::from(["brands.manage".to_owned()]))
            .unwrap();
        let router = Router::default();
        let guard = RouteGuard::new(store);

        assert!(router.visit(&guard, "/admin/brands", Some("brands.manage")).is_allowed());
        assert_eq!(router.location(), "/admin/brands");

        router.visit(&guard, "/admin/orders", Some("orders.manage"));
        assert_eq!(router.location(), HOME_PATH);
        assert_eq!(router.take_return_to(), None);
    }

    #[test]
    fn login_redirect_records_where_the_user_was() {
        let router = Router::new("/cart");
        router.redirect(LOGIN_PATH);

        assert_eq!(router.location(), LOGIN_PATH);
        assert_eq!(router.take_return_to().as_deref(), Some("/cart"));
    }

    #[test]
    fn home_redirect_drops_stale_return_path() {
        let store = Arc::new(MemoryCredentialStore::new());
        let router = Router::default();
        let guard = RouteGuard::new(store.clone());

        router.visit(&guard, "/orders", None);
        store.set_token(&SecretString::from("t".to_owned())).unwrap();
        let access = router.visit(&guard, "/admin/brands", Some("brands.manage"));

        assert!(!access.is_allowed());
        assert_eq!(router.location(), HOME_PATH);
        assert_eq!(router.take_return_to(), None);
    }

    #[test]
    fn login_redirect_fires_expiry_hooks() {
        let fired = Arc::new(AtomicUsize::new(0));
        let router = Router::new("/cart");
        let counter = Arc::clone(&fired);
        router.on_session_expired(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        router.redirect("/products");
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        router.redirect(LOGIN_PATH);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn subscribers_observe_moves() {
        let router = Router::default();
        let mut rx = router.subscribe();
        router.redirect("/products");
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "/products");
    }
}
