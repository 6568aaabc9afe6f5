use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod auth;
pub mod endpoints;
pub use endpoints::*;

pub type UserId = TypedId<User>;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: Option<String>,
}

impl TypedIdMarker for User {
    fn tag() -> &'static str {
        "USR"
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum Role {
    Admin,
    Viewer,
}

/// What the current identity may do. Always derived from the user, never
/// stored next to it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Capabilities {
    pub is_admin: bool,
    pub is_viewer: bool,
    pub can_edit: bool,
    pub can_view: bool,
}

impl Capabilities {
    pub fn of(user: Option<&User>) -> Capabilities {
        let role = user.map(|user| user.role);
        let is_admin = role == Some(Role::Admin);

        Capabilities {
            is_admin,
            is_viewer: role == Some(Role::Viewer),
            can_edit: is_admin,
            can_view: user.is_some(),
        }
    }
}

/// Fields of the current user that may be changed in place. The role is not
/// among them.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl UserPatch {
    /// A given name or email must not be blank.
    pub fn validate(&self) -> Result<(), Error> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(Error::UserNameRequired);
        }
        if matches!(&self.email, Some(email) if email.trim().is_empty()) {
            return Err(Error::UserEmailRequired);
        }

        Ok(())
    }

    /// Validates first, so a rejected patch leaves `user` untouched.
    pub fn apply(self, user: &mut User) -> Result<(), Error> {
        self.validate()?;

        if let Some(name) = self.name {
            user.name = name.trim().to_owned();
        }
        if let Some(email) = self.email {
            user.email = email.trim().to_owned();
        }
        if let Some(avatar) = self.avatar {
            user.avatar = Some(avatar);
        }

        Ok(())
    }
}
