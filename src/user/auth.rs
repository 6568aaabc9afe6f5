use tracing::{info, warn};

use crate::error::Error;

use super::{Capabilities, User, UserId, UserPatch};

/// The active identity: a pointer into a fixed roster of demo users. This is
/// impersonation for demonstration, not authentication.
#[derive(Clone, Debug)]
pub struct AuthState {
    roster: Vec<User>,
    current: Option<UserId>,
    // set by `login` for identities that are not part of the roster
    outsider: Option<User>,
}

impl AuthState {
    pub fn new(roster: Vec<User>) -> AuthState {
        AuthState {
            roster,
            current: None,
            outsider: None,
        }
    }

    pub fn roster(&self) -> &[User] {
        &self.roster
    }

    pub fn current_user(&self) -> Option<&User> {
        let id = self.current?;
        match &self.outsider {
            Some(outsider) if outsider.id == id => Some(outsider),
            _ => self.roster.iter().find(|user| user.id == id),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::of(self.current_user())
    }

    pub fn is_admin(&self) -> bool {
        self.capabilities().is_admin
    }

    pub fn is_viewer(&self) -> bool {
        self.capabilities().is_viewer
    }

    pub fn can_edit(&self) -> bool {
        self.capabilities().can_edit
    }

    pub fn can_view(&self) -> bool {
        self.capabilities().can_view
    }

    /// Sets the identity unconditionally. An id already on the roster signs in
    /// as that roster record; the supplied fields are ignored and the roster
    /// is never written.
    #[tracing::instrument(skip(self))]
    pub fn login(&mut self, user: User) {
        info!(user_id = %user.id, "logged in");
        self.current = Some(user.id);
        if self.roster.iter().any(|member| member.id == user.id) {
            self.outsider = None;
        } else {
            self.outsider = Some(user);
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn logout(&mut self) {
        if let Some(user_id) = self.current.take() {
            info!(%user_id, "logged out");
        }
        self.outsider = None;
    }

    /// Makes the roster member with `user_id` current. On a miss the current
    /// identity is left as it was.
    #[tracing::instrument(skip(self))]
    pub fn switch_user(&mut self, user_id: UserId) -> Result<&User, Error> {
        let index = self
            .roster
            .iter()
            .position(|user| user.id == user_id)
            .ok_or(Error::UserNotFound { user_id })?;

        info!(%user_id, "switched user");
        self.current = Some(user_id);
        self.outsider = None;

        Ok(&self.roster[index])
    }

    #[tracing::instrument(skip(self))]
    pub fn update_user(&mut self, patch: UserPatch) -> Result<&User, Error> {
        let user_id = self.current.ok_or(Error::NotLoggedIn)?;

        let user = match &mut self.outsider {
            Some(outsider) if outsider.id == user_id => outsider,
            _ => self
                .roster
                .iter_mut()
                .find(|user| user.id == user_id)
                .ok_or(Error::NotLoggedIn)?,
        };
        patch.apply(user)?;

        Ok(&*user)
    }

    pub fn require_view(&self) -> Result<&User, Error> {
        self.current_user().ok_or(Error::NotLoggedIn)
    }

    /// Returns the current user if it is allowed to modify data.
    pub fn require_edit(&self, action: &'static str) -> Result<&User, Error> {
        let user = self.require_view()?;
        if !Capabilities::of(Some(user)).can_edit {
            warn!(user_id = %user.id, action, "permission denied");
            return Err(Error::PermissionDenied {
                user_id: user.id,
                action,
            });
        }

        Ok(user)
    }
}
