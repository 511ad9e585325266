//! Writing a candidate back onto the roster.

use std::collections::HashSet;

use tracing::debug;

use super::types::Candidate;
use crate::error::IntegrityError;
use crate::model::Roster;

impl Candidate {
    /// Replaces the roster's membership with this candidate's assignment.
    ///
    /// Every candidate team must name a roster team and every member id
    /// must be known to the roster, with no id appearing twice. All checks
    /// run before the roster is touched, so on error it is left exactly
    /// as it was.
    ///
    /// Roster teams absent from the candidate end up empty.
    pub fn materialize(&self, roster: &mut Roster) -> Result<(), IntegrityError> {
        let mut seen = HashSet::with_capacity(self.member_count());
        for team in self.teams() {
            if !roster.contains_team(team.team_id()) {
                return Err(IntegrityError::UnknownTeam(team.team_id()));
            }
            for &member in team.members() {
                if !roster.contains_member(member) {
                    return Err(IntegrityError::UnknownMember(member));
                }
                if !seen.insert(member) {
                    return Err(IntegrityError::DuplicateMember(member));
                }
            }
        }

        let team_ids: Vec<_> = roster.teams().iter().map(|t| t.id).collect();
        for team_id in team_ids {
            roster.clear_team(team_id)?;
        }
        for team in self.teams() {
            for &member in team.members() {
                roster.assign(member, team.team_id())?;
            }
        }

        debug!(
            teams = self.team_count(),
            members = self.member_count(),
            "materialized candidate into roster"
        );
        Ok(())
    }
}
