//! Member/team arena and the membership relation.
//!
//! Members and teams live in flat vectors keyed by id. Which member sits
//! in which team is recorded only in the roster's private membership
//! relation, which keeps both directions and updates them together.
//! Entities never point at each other. Reads go through
//! [`Roster::members_of`] and [`Roster::team_of`].

use std::collections::HashMap;

use super::types::{Member, MemberId, Team, TeamId};
use crate::error::IntegrityError;

/// The member ↔ team relation.
///
/// `by_team[i]` holds the ordered member ids of the i-th team of the
/// owning roster; `by_member` maps each assigned member back to its team.
#[derive(Debug, Clone, Default, PartialEq)]
struct Membership {
    by_team: Vec<Vec<MemberId>>,
    by_member: HashMap<MemberId, usize>,
}

impl Membership {
    fn with_teams(team_count: usize) -> Self {
        Self {
            by_team: vec![Vec::new(); team_count],
            by_member: HashMap::new(),
        }
    }

    fn insert(&mut self, member: MemberId, team_idx: usize) {
        self.by_team[team_idx].push(member);
        self.by_member.insert(member, team_idx);
    }

    fn remove(&mut self, member: MemberId) -> Option<usize> {
        let team_idx = self.by_member.remove(&member)?;
        self.by_team[team_idx].retain(|&m| m != member);
        Some(team_idx)
    }

    fn clear_team(&mut self, team_idx: usize) {
        for member in self.by_team[team_idx].drain(..) {
            self.by_member.remove(&member);
        }
    }

    fn members(&self, team_idx: usize) -> &[MemberId] {
        &self.by_team[team_idx]
    }

    fn team_of(&self, member: MemberId) -> Option<usize> {
        self.by_member.get(&member).copied()
    }

    fn assigned_count(&self) -> usize {
        self.by_member.len()
    }
}

/// Arena of members and teams with their current assignment.
///
/// This is the member lookup table the optimizer borrows. It is built
/// once by the caller; the seeding step fills the membership through
/// [`assign`](Self::assign), and [`Candidate::materialize`](crate::candidate::Candidate::materialize)
/// rewrites it with the optimized assignment.
///
/// # Examples
///
/// ```
/// use u_teamform::model::{Member, MemberId, Roster, Team, TeamId};
///
/// let members = vec![Member::new(MemberId(1)), Member::new(MemberId(2))];
/// let teams = vec![Team::new(TeamId(10))];
/// let mut roster = Roster::new(members, teams).unwrap();
///
/// roster.assign(MemberId(1), TeamId(10)).unwrap();
/// assert_eq!(roster.members_of(TeamId(10)), Some(&[MemberId(1)][..]));
/// assert_eq!(roster.team_of(MemberId(2)), None);
/// ```
#[derive(Debug, Clone)]
pub struct Roster {
    members: Vec<Member>,
    teams: Vec<Team>,
    member_index: HashMap<MemberId, usize>,
    team_index: HashMap<TeamId, usize>,
    membership: Membership,
}

impl Roster {
    /// Creates a roster with nobody assigned.
    ///
    /// Fails if two members or two teams share an id.
    pub fn new(members: Vec<Member>, teams: Vec<Team>) -> Result<Self, IntegrityError> {
        let mut member_index = HashMap::with_capacity(members.len());
        for (idx, member) in members.iter().enumerate() {
            if member_index.insert(member.id, idx).is_some() {
                return Err(IntegrityError::DuplicateMember(member.id));
            }
        }

        let mut team_index = HashMap::with_capacity(teams.len());
        for (idx, team) in teams.iter().enumerate() {
            if team_index.insert(team.id, idx).is_some() {
                return Err(IntegrityError::DuplicateTeam(team.id));
            }
        }

        let membership = Membership::with_teams(teams.len());
        Ok(Self {
            members,
            teams,
            member_index,
            team_index,
            membership,
        })
    }

    /// All members in insertion order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// All teams in insertion order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Looks up a member.
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.member_index.get(&id).map(|&idx| &self.members[idx])
    }

    /// Looks up a team.
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.team_index.get(&id).map(|&idx| &self.teams[idx])
    }

    /// Whether the roster knows `id`.
    pub fn contains_member(&self, id: MemberId) -> bool {
        self.member_index.contains_key(&id)
    }

    /// Whether the roster knows `id`.
    pub fn contains_team(&self, id: TeamId) -> bool {
        self.team_index.contains_key(&id)
    }

    /// Number of members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Number of teams.
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Number of members currently assigned to some team.
    pub fn assigned_count(&self) -> usize {
        self.membership.assigned_count()
    }

    /// Ordered member ids of a team, or `None` for an unknown team.
    pub fn members_of(&self, team: TeamId) -> Option<&[MemberId]> {
        self.team_index
            .get(&team)
            .map(|&idx| self.membership.members(idx))
    }

    /// Team currently holding `member`.
    pub fn team_of(&self, member: MemberId) -> Option<TeamId> {
        self.membership
            .team_of(member)
            .map(|idx| self.teams[idx].id)
    }

    /// Assigns an unassigned member to a team.
    ///
    /// Capacity and lock flags are not enforced here: the roster records
    /// whatever assignment the seeding step produced.
    pub fn assign(&mut self, member: MemberId, team: TeamId) -> Result<(), IntegrityError> {
        if !self.contains_member(member) {
            return Err(IntegrityError::UnknownMember(member));
        }
        let team_idx = *self
            .team_index
            .get(&team)
            .ok_or(IntegrityError::UnknownTeam(team))?;
        if let Some(current) = self.membership.team_of(member) {
            return Err(IntegrityError::AlreadyAssigned {
                member,
                team: self.teams[current].id,
            });
        }
        self.membership.insert(member, team_idx);
        Ok(())
    }

    /// Removes a member from its team, returning the team it left.
    pub fn unassign(&mut self, member: MemberId) -> Option<TeamId> {
        self.membership
            .remove(member)
            .map(|idx| self.teams[idx].id)
    }

    /// Empties a team.
    pub fn clear_team(&mut self, team: TeamId) -> Result<(), IntegrityError> {
        let team_idx = *self
            .team_index
            .get(&team)
            .ok_or(IntegrityError::UnknownTeam(team))?;
        self.membership.clear_team(team_idx);
        Ok(())
    }
}
