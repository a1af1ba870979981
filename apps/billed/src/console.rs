//! Console collaborators: router, alert notifier.

use std::sync::Mutex;

use client_core::{Navigator, Notifier, Route};
use tracing::info;

/// Records where the controllers asked to go; `main` renders that view next.
pub struct ConsoleRouter {
    current: Mutex<Route>,
}

impl ConsoleRouter {
    pub fn new(start: Route) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    pub fn current(&self) -> Route {
        match self.current.lock() {
            Ok(route) => *route,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl Navigator for ConsoleRouter {
    fn navigate(&self, route: Route) {
        info!(path = route.path(), "navigate");
        match self.current.lock() {
            Ok(mut current) => *current = route,
            Err(poisoned) => *poisoned.into_inner() = route,
        }
    }
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("Alerte : {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_tracks_last_navigation() {
        let router = ConsoleRouter::new(Route::NewBill);
        router.navigate(Route::Bills);
        assert_eq!(router.current(), Route::Bills);
    }
}
