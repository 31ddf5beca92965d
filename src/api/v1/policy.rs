use crate::domain_model::{Principal, Role, SessionToken};
use warp::http::Method;

/// Who is making the request, as resolved by the gate before any handler
/// runs.
#[derive(Debug, Clone)]
pub enum Caller {
    Anonymous,
    Authenticated {
        principal: Principal,
        token: SessionToken,
    },
}

impl Caller {
    pub fn role(&self) -> Option<Role> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated { principal, .. } => Some(principal.role),
        }
    }
}

/// What a route requires from the caller.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Access {
    Public,
    Authenticated,
    Role(Role),
}

/// Per-request gate outcome.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Decision {
    Allow,
    RequireAuthentication,
    Forbid,
}

struct PolicyRule {
    /// `None` matches every method.
    methods: Option<&'static [Method]>,
    path_prefix: &'static str,
    access: Access,
}

const WRITE_METHODS: &[Method] = &[Method::POST, Method::PUT, Method::DELETE];

/// Ordered access rules, evaluated top to bottom, first match wins. This
/// is the one place routes and role requirements meet; handlers carry no
/// authorization metadata of their own.
pub struct PolicyTable {
    rules: Vec<PolicyRule>,
    fallback: Access,
}

impl PolicyTable {
    /// The verduleria policy: discovery and login are public, catalog
    /// writes need ADMIN, everything else needs a session.
    pub fn verduleria_default() -> Self {
        PolicyTable {
            rules: vec![
                PolicyRule {
                    methods: None,
                    path_prefix: "/api-docs",
                    access: Access::Public,
                },
                PolicyRule {
                    methods: Some(&[Method::POST]),
                    path_prefix: "/login",
                    access: Access::Public,
                },
                PolicyRule {
                    methods: Some(&[Method::POST]),
                    path_prefix: "/logout",
                    access: Access::Authenticated,
                },
                PolicyRule {
                    methods: Some(WRITE_METHODS),
                    path_prefix: "/verduras",
                    access: Access::Role(Role::Admin),
                },
                PolicyRule {
                    methods: None,
                    path_prefix: "/verduras",
                    access: Access::Authenticated,
                },
            ],
            fallback: Access::Authenticated,
        }
    }

    fn required_access(&self, method: &Method, path: &str) -> Access {
        for rule in &self.rules {
            let method_matches = match rule.methods {
                None => true,
                Some(methods) => methods.contains(method),
            };
            if method_matches && prefix_matches(rule.path_prefix, path) {
                return rule.access;
            }
        }
        self.fallback
    }

    pub fn evaluate(&self, method: &Method, path: &str, caller: &Caller) -> Decision {
        match self.required_access(method, path) {
            Access::Public => Decision::Allow,
            Access::Authenticated => match caller {
                Caller::Anonymous => Decision::RequireAuthentication,
                Caller::Authenticated { .. } => Decision::Allow,
            },
            Access::Role(required) => match caller.role() {
                None => Decision::RequireAuthentication,
                Some(role) if role == required => Decision::Allow,
                Some(_) => Decision::Forbid,
            },
        }
    }
}

/// `/verduras` matches `/verduras` and `/verduras/7`, never
/// `/verdurasx`.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
