use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Error;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type MemberId = TypedId<TeamMember>;

/// An entry in the workspace's member directory. Unrelated to the sign-in
/// roster; a member's role here grants nothing.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TeamMember {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    pub status: MemberStatus,
    pub last_login: Option<NaiveDate>,
    pub projects: Vec<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub join_date: NaiveDate,
}

impl TypedIdMarker for TeamMember {
    fn tag() -> &'static str {
        "MBR"
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum MemberRole {
    Admin,
    Manager,
    Analyst,
    Viewer,
}

impl Default for MemberRole {
    fn default() -> MemberRole {
        MemberRole::Viewer
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum MemberStatus {
    Active,
    Inactive,
    Pending,
}

/// The invitation form.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MemberDraft {
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    pub department: Option<String>,
    pub phone: Option<String>,
}

impl MemberDraft {
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::MemberNameRequired);
        }
        if self.email.trim().is_empty() {
            return Err(Error::MemberEmailRequired);
        }

        Ok(())
    }

    /// Invited members are pending until they first sign in.
    pub(crate) fn into_member(self, id: MemberId, today: NaiveDate) -> TeamMember {
        TeamMember {
            id,
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            role: self.role,
            status: MemberStatus::Pending,
            last_login: None,
            projects: Vec::new(),
            phone: self.phone.filter(|phone| !phone.trim().is_empty()),
            department: self.department.filter(|dept| !dept.trim().is_empty()),
            join_date: today,
        }
    }
}

/// Header counts of the member directory.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TeamSummary {
    pub total: usize,
    pub active: usize,
    pub admins: usize,
    pub pending: usize,
}

impl TeamSummary {
    pub fn of<'a>(members: impl IntoIterator<Item = &'a TeamMember>) -> TeamSummary {
        members
            .into_iter()
            .fold(TeamSummary::default(), |mut summary, member| {
                summary.total += 1;
                if member.status == MemberStatus::Active {
                    summary.active += 1;
                }
                if member.status == MemberStatus::Pending {
                    summary.pending += 1;
                }
                if member.role == MemberRole::Admin {
                    summary.admins += 1;
                }
                summary
            })
    }
}

/// The member directory, in the order members were added.
#[derive(Clone, Debug, Default)]
pub struct Team {
    members: Vec<TeamMember>,
}

impl Team {
    pub fn new(members: Vec<TeamMember>) -> Team {
        Team { members }
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn summary(&self) -> TeamSummary {
        TeamSummary::of(&self.members)
    }

    #[tracing::instrument(skip(self))]
    pub fn invite(&mut self, draft: MemberDraft) -> Result<&TeamMember, Error> {
        draft.validate()?;

        let member = draft.into_member(MemberId::new(), Utc::now().date_naive());
        info!(member_id = %member.id, "invited member");
        self.members.push(member);

        Ok(&self.members[self.members.len() - 1])
    }

    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, member_id: MemberId) -> Result<TeamMember, Error> {
        let index = self
            .members
            .iter()
            .position(|member| member.id == member_id)
            .ok_or(Error::MemberNotFound { member_id })?;

        Ok(self.members.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn draft(name: &str, email: &str) -> MemberDraft {
        MemberDraft {
            name: name.into(),
            email: email.into(),
            ..MemberDraft::default()
        }
    }

    #[test]
    fn seeded_summary() {
        let team = Team::new(seed::team_members());

        let summary = team.summary();

        assert_eq!(
            summary,
            TeamSummary {
                total: 3,
                active: 3,
                admins: 1,
                pending: 0,
            }
        );
    }

    #[test]
    fn invited_members_start_pending() {
        let mut team = Team::new(seed::team_members());

        let member = team
            .invite(MemberDraft {
                department: Some(String::new()),
                ..draft(" Dana Lee ", "dana.lee@company.com")
            })
            .unwrap()
            .clone();

        assert_eq!(member.name, "Dana Lee");
        assert_eq!(member.status, MemberStatus::Pending);
        assert_eq!(member.role, MemberRole::Viewer);
        assert_eq!(member.last_login, None);
        assert_eq!(member.department, None);
        assert!(member.projects.is_empty());
        assert_eq!(team.summary().pending, 1);
        assert_eq!(team.members().last(), Some(&member));
    }

    #[test]
    fn invite_requires_name_and_email() {
        let mut team = Team::default();

        let no_name = team.invite(draft("  ", "x@company.com")).cloned();
        let no_email = team.invite(draft("X", "")).cloned();

        assert_eq!(no_name.unwrap_err(), Error::MemberNameRequired);
        assert_eq!(no_email.unwrap_err(), Error::MemberEmailRequired);
        assert!(team.members().is_empty());
    }

    #[test]
    fn remove_by_id() {
        let mut team = Team::new(seed::team_members());
        let member_id = team.members()[1].id;

        let removed = team.remove(member_id).unwrap();
        let again = team.remove(member_id);

        assert_eq!(removed.name, "Sarah Johnson");
        assert_eq!(again.unwrap_err(), Error::MemberNotFound { member_id });
        assert_eq!(team.summary().total, 2);
    }
}
