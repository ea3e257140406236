use crate::constants;

/// Named destinations the front-end can link to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    LoginPage,
    Home,
}

/// Resolves symbolic routes to link targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    login_route: String,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(constants::ROUTE_LOGIN_PAGE)
    }
}

impl Navigator {
    pub fn new(login_route: impl Into<String>) -> Self {
        Self {
            login_route: login_route.into(),
        }
    }

    pub fn resolve(&self, route: Route) -> &str {
        match route {
            Route::LoginPage => &self.login_route,
            Route::Home => constants::ROUTE_HOME,
        }
    }

    pub fn link(&self, route: Route, text: impl Into<String>) -> Link {
        Link {
            text: text.into(),
            to: self.resolve(route).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub to: String,
}
