//! Per-request identity propagation.
//!
//! Verified [`Claims`] ride in the request's extension map under a private
//! key type, so nothing outside this module can insert or shadow them. Claims
//! attached to one request are invisible to every other request.

use http::Extensions;
use http::request::{Parts, Request};

use crate::claims::Claims;

#[derive(Debug, Clone)]
struct Identity(Claims);

/// Anything that carries a per-request extension map.
pub trait RequestContext {
    fn extensions(&self) -> &Extensions;
    fn extensions_mut(&mut self) -> &mut Extensions;
}

impl<B> RequestContext for Request<B> {
    fn extensions(&self) -> &Extensions {
        Request::extensions(self)
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        Request::extensions_mut(self)
    }
}

impl RequestContext for Parts {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

/// Returns the context with `claims` attached. Any earlier identity is replaced.
pub fn attach<C: RequestContext>(mut ctx: C, claims: Claims) -> C {
    ctx.extensions_mut().insert(Identity(claims));
    ctx
}

/// Returns the claims attached to this context, if any.
pub fn retrieve<C: RequestContext>(ctx: &C) -> Option<&Claims> {
    ctx.extensions().get::<Identity>().map(|identity| &identity.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn claims(sub: &str, role: Role) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: format!("{}@example.com", sub),
            role,
            iat: 0,
            exp: 1,
        }
    }

    #[test]
    fn test_attach_then_retrieve() {
        let request = Request::new(());
        assert!(retrieve(&request).is_none());

        let request = attach(request, claims("alice", Role::User));
        let found = retrieve(&request).unwrap();
        assert_eq!(found.sub, "alice");
        assert_eq!(found.role, Role::User);
    }

    #[test]
    fn test_attach_replaces_previous_identity() {
        let request = attach(Request::new(()), claims("alice", Role::User));
        let request = attach(request, claims("bob", Role::Admin));

        assert_eq!(retrieve(&request).unwrap().sub, "bob");
    }

    #[test]
    fn test_contexts_are_isolated() {
        let first = attach(Request::new(()), claims("alice", Role::User));
        let second = Request::new(());

        assert!(retrieve(&first).is_some());
        assert!(retrieve(&second).is_none());
    }

    #[test]
    fn test_raw_claims_extension_is_not_an_identity() {
        let mut request = Request::new(());
        request.extensions_mut().insert(claims("mallory", Role::Admin));

        assert!(retrieve(&request).is_none());
    }

    #[test]
    fn test_identity_survives_into_parts() {
        let request = attach(Request::new(()), claims("alice", Role::Admin));
        let (parts, _body) = request.into_parts();

        assert_eq!(retrieve(&parts).unwrap().role, Role::Admin);
    }
}
