// SPDX-License-Identifier: GPL-3.0-only

//! Screen navigation with a back stack

use tracing::debug;

/// Screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Permission request screen
    Intro,
    /// Live preview with capture controls
    Camera,
    /// Full-screen photo viewer
    Viewer { start_index: usize },
}

impl Route {
    /// Same screen, ignoring arguments
    pub fn same_screen(&self, other: &Route) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Pop the back stack down to `route` before navigating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopUpTo {
    pub route: Route,
    /// Also remove `route` itself
    pub inclusive: bool,
}

/// Back stack of screens; never empty
#[derive(Debug, Clone)]
pub struct Router {
    stack: Vec<Route>,
}

impl Router {
    pub fn new(start: Route) -> Self {
        Self { stack: vec![start] }
    }

    /// Screen currently shown
    pub fn current(&self) -> Route {
        // The stack always holds the start route or a replacement
        self.stack.last().copied().unwrap_or(Route::Intro)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether `route`'s screen is anywhere on the back stack
    pub fn contains(&self, route: &Route) -> bool {
        self.stack.iter().any(|r| r.same_screen(route))
    }

    /// Push `target`, first popping up to `pop_up_to` when it is on the stack
    pub fn navigate(&mut self, target: Route, pop_up_to: Option<PopUpTo>) {
        if let Some(PopUpTo { route, inclusive }) = pop_up_to {
            if let Some(pos) = self.stack.iter().rposition(|r| r.same_screen(&route)) {
                let keep = if inclusive { pos } else { pos + 1 };
                self.stack.truncate(keep);
            }
        }
        self.stack.push(target);
        debug!(?target, depth = self.stack.len(), "Navigated");
    }

    /// Go back one screen; returns false at the root
    pub fn pop_back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            debug!(current = ?self.current(), "Navigated back");
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_up_to_inclusive_removes_intro() {
        let mut router = Router::new(Route::Intro);
        router.navigate(
            Route::Camera,
            Some(PopUpTo {
                route: Route::Intro,
                inclusive: true,
            }),
        );

        assert_eq!(router.current(), Route::Camera);
        assert_eq!(router.depth(), 1);
        assert!(!router.contains(&Route::Intro));
        assert!(!router.pop_back());
    }

    #[test]
    fn test_viewer_pushes_and_pops() {
        let mut router = Router::new(Route::Camera);
        router.navigate(Route::Viewer { start_index: 3 }, None);
        assert_eq!(router.current(), Route::Viewer { start_index: 3 });

        assert!(router.pop_back());
        assert_eq!(router.current(), Route::Camera);
    }

    #[test]
    fn test_pop_up_to_missing_route_only_pushes() {
        let mut router = Router::new(Route::Camera);
        router.navigate(
            Route::Viewer { start_index: 0 },
            Some(PopUpTo {
                route: Route::Intro,
                inclusive: true,
            }),
        );
        assert_eq!(router.depth(), 2);
    }
}
