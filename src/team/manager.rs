use tracing::info;

use crate::error::Error;
use crate::user::auth::AuthState;

use super::{MemberDraft, MemberId, Team, TeamMember, TeamSummary};

#[tracing::instrument(skip(auth, team))]
pub fn get_members(
    auth: &AuthState,
    team: &Team,
) -> Result<(Vec<TeamMember>, TeamSummary), Error> {
    auth.require_edit("view team")?;

    Ok((team.members().to_vec(), team.summary()))
}

#[tracing::instrument(skip(auth, team))]
pub fn invite_member(
    auth: &AuthState,
    team: &mut Team,
    draft: MemberDraft,
) -> Result<TeamMember, Error> {
    let user = auth.require_edit("invite member")?;

    let member = team.invite(draft)?.clone();
    info!(user_id = %user.id, member_id = %member.id, "added member");

    Ok(member)
}

#[tracing::instrument(skip(auth, team))]
pub fn remove_member(
    auth: &AuthState,
    team: &mut Team,
    member_id: MemberId,
) -> Result<TeamMember, Error> {
    let user = auth.require_edit("remove member")?;

    let member = team.remove(member_id)?;
    info!(user_id = %user.id, %member_id, "removed member");

    Ok(member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn signed_in_as(user_index: usize) -> AuthState {
        let roster = seed::users();
        let mut auth = AuthState::new(roster.clone());
        auth.login(roster[user_index].clone());
        auth
    }

    #[test]
    fn admin_manages_team() {
        let auth = signed_in_as(0);
        let mut team = Team::new(seed::team_members());

        let invited = invite_member(
            &auth,
            &mut team,
            MemberDraft {
                name: "Dana Lee".into(),
                email: "dana.lee@company.com".into(),
                ..MemberDraft::default()
            },
        )
        .unwrap();
        let (members, summary) = get_members(&auth, &team).unwrap();

        assert_eq!(members.len(), 4);
        assert_eq!(summary.pending, 1);

        remove_member(&auth, &mut team, invited.id).unwrap();
        let (_, summary) = get_members(&auth, &team).unwrap();
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn viewer_cannot_see_or_change_team() {
        let auth = signed_in_as(1);
        let viewer_id = auth.current_user().unwrap().id;
        let mut team = Team::new(seed::team_members());
        let member_id = team.members()[0].id;

        let listed = get_members(&auth, &team);
        let removed = remove_member(&auth, &mut team, member_id);

        assert_eq!(
            listed.unwrap_err(),
            Error::PermissionDenied {
                user_id: viewer_id,
                action: "view team"
            }
        );
        assert!(matches!(removed, Err(Error::PermissionDenied { .. })));
        assert_eq!(team.members().len(), 3);
    }

    #[test]
    fn nobody_cannot_invite() {
        let auth = AuthState::new(seed::users());
        let mut team = Team::default();

        let result = invite_member(&auth, &mut team, MemberDraft::default());

        assert_eq!(result.unwrap_err(), Error::NotLoggedIn);
    }
}
