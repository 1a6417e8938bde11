//! Authorization decisions.
//!
//! Every function here is pure: it looks only at its arguments and returns
//! `Ok(())` to allow or a [`ServiceError`] to deny. Callers fetch whatever
//! state a decision needs (resource owner, admin count) before asking.
//!
//! # Last-admin guard
//!
//! [`ensure_not_last_admin`] decides from an admin count the caller read
//! beforehand. The count and the following write are separate store calls, so
//! two concurrent demotions of two different admins can both observe a count
//! of 2 and both proceed. Making the guard race-free requires an atomic
//! conditional update in the store.

use uuid::Uuid;

use taskgate_core::{AdminRemoval, ServiceError};

use crate::claims::Claims;
use crate::role::Role;

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub id: Uuid,
    pub role: Role,
}

impl Requester {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn from_claims(claims: &Claims) -> Result<Self, ServiceError> {
        Ok(Self {
            id: claims.user_id()?,
            role: claims.role,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Allows admins, or the owner of the resource.
pub fn can_access_own(
    resource_owner_id: Uuid,
    requester_id: Uuid,
    requester_role: Role,
) -> Result<(), ServiceError> {
    if requester_role.is_admin() || resource_owner_id == requester_id {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

pub fn admin_only(requester_role: Role) -> Result<(), ServiceError> {
    if requester_role.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

/// Only admins may set a role, on anyone, to any value.
///
/// Called whenever an update carries a role at all, including when it equals
/// the target's current role.
pub fn can_change_role(requester_role: Role) -> Result<(), ServiceError> {
    admin_only(requester_role)
}

/// True when `requested` takes an admin down to user.
pub fn is_demotion(current: Role, requested: Role) -> bool {
    current.is_admin() && !requested.is_admin()
}

/// Denies removing `target_role` from the admin set when it holds the last seat.
///
/// `admin_count` is the number of admins observed before the mutation. A
/// non-admin target never trips the guard.
pub fn ensure_not_last_admin(
    target_role: Role,
    action: AdminRemoval,
    admin_count: i64,
) -> Result<(), ServiceError> {
    if target_role.is_admin() && admin_count <= 1 {
        return Err(ServiceError::LastAdmin(action));
    }
    Ok(())
}
