//! Screen routing between the form and the application's root view.

/// Views the application can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    CreatePost,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::CreatePost => "/create-post",
        }
    }
}

/// Receives navigation requests from the form.
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Navigator that stores the last requested route until the owner takes it.
///
/// The GUI polls this once per frame and switches screens.
#[derive(Debug, Default)]
pub struct PendingNavigation {
    pending: Option<Route>,
}

impl PendingNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Option<Route> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<Route> {
        self.pending
    }
}

impl Navigator for PendingNavigation {
    fn navigate(&mut self, route: Route) {
        tracing::debug!(path = route.path(), "navigation requested");
        self.pending = Some(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_navigation_is_taken_once() {
        let mut nav = PendingNavigation::new();
        nav.navigate(Route::Home);
        assert_eq!(nav.peek(), Some(Route::Home));
        assert_eq!(nav.take(), Some(Route::Home));
        assert_eq!(nav.take(), None);
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::CreatePost.path(), "/create-post");
    }
}
