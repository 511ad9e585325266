//! Candidate and candidate-team types.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::IntegrityError;
use crate::model::{MemberId, Roster, TeamId};

/// Read-only team data shared by all clones of a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSlot {
    /// The real team this slot stands for.
    pub team_id: TeamId,
    /// Locked slots are never touched by mutation operators.
    pub locked: bool,
    /// Maximum number of members, `None` for unbounded.
    pub capacity: Option<usize>,
}

/// One team inside a [`Candidate`].
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTeam {
    slot: Arc<TeamSlot>,
    members: Vec<MemberId>,
}

impl CandidateTeam {
    /// Creates a candidate team.
    pub fn new(slot: TeamSlot, members: Vec<MemberId>) -> Self {
        Self {
            slot: Arc::new(slot),
            members,
        }
    }

    /// The shared slot.
    pub fn slot(&self) -> &TeamSlot {
        &self.slot
    }

    /// Id of the real team.
    pub fn team_id(&self) -> TeamId {
        self.slot.team_id
    }

    /// Whether this team is locked.
    pub fn is_locked(&self) -> bool {
        self.slot.locked
    }

    /// Current members, in order.
    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the team has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether one more member would exceed the capacity.
    pub fn is_full(&self) -> bool {
        self.slot
            .capacity
            .is_some_and(|capacity| self.members.len() >= capacity)
    }

    /// Whether mutation operators may work on this team.
    ///
    /// Empty teams are excluded as well, since no member can be picked
    /// from them.
    pub fn is_eligible(&self) -> bool {
        !self.slot.locked && !self.members.is_empty()
    }

    fn position(&self, member: MemberId) -> Option<usize> {
        self.members.iter().position(|&m| m == member)
    }
}

/// One complete assignment of members to teams.
///
/// # Examples
///
/// ```
/// use u_teamform::candidate::{Candidate, CandidateTeam, TeamSlot};
/// use u_teamform::model::{MemberId, TeamId};
///
/// let slot = |id, locked| TeamSlot { team_id: TeamId(id), locked, capacity: None };
/// let mut candidate = Candidate::new(vec![
///     CandidateTeam::new(slot(1, false), vec![MemberId(1), MemberId(2)]),
///     CandidateTeam::new(slot(2, false), vec![MemberId(3)]),
///     CandidateTeam::new(slot(3, true), vec![MemberId(4)]),
/// ]);
///
/// assert!(candidate.move_member(MemberId(1), TeamId(1), TeamId(2)));
/// assert_eq!(candidate.member_ids_of(TeamId(2)), Some(&[MemberId(3), MemberId(1)][..]));
///
/// // Locked destination: refused, nothing changes.
/// assert!(!candidate.move_member(MemberId(2), TeamId(1), TeamId(3)));
/// assert_eq!(candidate.member_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    teams: Vec<CandidateTeam>,
}

impl Candidate {
    /// Creates a candidate from its teams.
    pub fn new(teams: Vec<CandidateTeam>) -> Self {
        Self { teams }
    }

    /// Builds the seed candidate from a roster's current membership.
    ///
    /// Teams keep the roster's order. Fails with
    /// [`IntegrityError::UnassignedMember`] if some member has no team,
    /// because the search requires a complete assignment.
    pub fn from_roster(roster: &Roster) -> Result<Self, IntegrityError> {
        if let Some(member) = roster
            .members()
            .iter()
            .find(|m| roster.team_of(m.id).is_none())
        {
            return Err(IntegrityError::UnassignedMember(member.id));
        }

        let teams = roster
            .teams()
            .iter()
            .map(|team| {
                let slot = TeamSlot {
                    team_id: team.id,
                    locked: team.locked,
                    capacity: team.capacity,
                };
                let members = roster.members_of(team.id).unwrap_or(&[]).to_vec();
                CandidateTeam::new(slot, members)
            })
            .collect();
        Ok(Self { teams })
    }

    /// All teams, in their fixed order.
    pub fn teams(&self) -> &[CandidateTeam] {
        &self.teams
    }

    /// Team at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.team_count()`. Use [`Candidate::teams`] for
    /// checked access.
    pub fn team(&self, idx: usize) -> &CandidateTeam {
        &self.teams[idx]
    }

    /// Number of teams.
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Total number of members across all teams.
    pub fn member_count(&self) -> usize {
        self.teams.iter().map(CandidateTeam::len).sum()
    }

    /// Index of the team with id `team`.
    pub fn index_of(&self, team: TeamId) -> Option<usize> {
        self.teams.iter().position(|t| t.team_id() == team)
    }

    /// Member ids of `team`, in order.
    pub fn member_ids_of(&self, team: TeamId) -> Option<&[MemberId]> {
        self.index_of(team).map(|idx| self.teams[idx].members())
    }

    /// Indices of the teams mutation operators may touch.
    pub fn eligible_indices(&self) -> Vec<usize> {
        self.teams
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_eligible())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Every member id, team by team.
    pub fn all_member_ids(&self) -> Vec<MemberId> {
        self.teams
            .iter()
            .flat_map(|t| t.members.iter().copied())
            .collect()
    }

    /// Whether no member id appears twice.
    pub fn has_unique_members(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.member_count());
        self.teams
            .iter()
            .flat_map(|t| t.members.iter())
            .all(|m| seen.insert(*m))
    }

    /// Moves `member` from team `from` to team `to`.
    ///
    /// Returns `false` and leaves the candidate unchanged if either team
    /// is locked or unknown, if `from == to`, if `member` is not in
    /// `from`, or if `to` is already at capacity.
    pub fn move_member(&mut self, member: MemberId, from: TeamId, to: TeamId) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(from_idx), Some(to_idx)) => self.move_at(member, from_idx, to_idx),
            _ => false,
        }
    }

    /// Index-based [`move_member`](Self::move_member).
    pub fn move_at(&mut self, member: MemberId, from_idx: usize, to_idx: usize) -> bool {
        if from_idx == to_idx || from_idx >= self.teams.len() || to_idx >= self.teams.len() {
            return false;
        }
        let (from, to) = (&self.teams[from_idx], &self.teams[to_idx]);
        if from.is_locked() || to.is_locked() || to.is_full() {
            return false;
        }
        let Some(pos) = from.position(member) else {
            return false;
        };
        let moved = self.teams[from_idx].members.remove(pos);
        self.teams[to_idx].members.push(moved);
        true
    }

    /// Exchanges `member_a` of team `team_a` with `member_b` of team `team_b`.
    ///
    /// Both members keep the position of the member they replace, so team
    /// sizes never change. Same refusal rules as
    /// [`move_member`](Self::move_member), except capacity.
    pub fn swap_members(
        &mut self,
        team_a: TeamId,
        member_a: MemberId,
        team_b: TeamId,
        member_b: MemberId,
    ) -> bool {
        match (self.index_of(team_a), self.index_of(team_b)) {
            (Some(a), Some(b)) => self.swap_at(a, member_a, b, member_b),
            _ => false,
        }
    }

    /// Index-based [`swap_members`](Self::swap_members).
    pub fn swap_at(
        &mut self,
        idx_a: usize,
        member_a: MemberId,
        idx_b: usize,
        member_b: MemberId,
    ) -> bool {
        if idx_a == idx_b || idx_a >= self.teams.len() || idx_b >= self.teams.len() {
            return false;
        }
        let (a, b) = (&self.teams[idx_a], &self.teams[idx_b]);
        if a.is_locked() || b.is_locked() {
            return false;
        }
        let (Some(pos_a), Some(pos_b)) = (a.position(member_a), b.position(member_b)) else {
            return false;
        };
        self.teams[idx_a].members[pos_a] = member_b;
        self.teams[idx_b].members[pos_b] = member_a;
        true
    }

    /// Replaces the members of two unlocked teams with a new partition of
    /// their union.
    ///
    /// Returns `false` without changes if either team is locked, or if the
    /// new lists are not a permutation of the old union.
    pub fn repartition(
        &mut self,
        idx_a: usize,
        members_a: Vec<MemberId>,
        idx_b: usize,
        members_b: Vec<MemberId>,
    ) -> bool {
        if idx_a == idx_b || idx_a >= self.teams.len() || idx_b >= self.teams.len() {
            return false;
        }
        let (a, b) = (&self.teams[idx_a], &self.teams[idx_b]);
        if a.is_locked() || b.is_locked() {
            return false;
        }
        let mut before: Vec<MemberId> = a.members.iter().chain(&b.members).copied().collect();
        let mut after: Vec<MemberId> = members_a.iter().chain(&members_b).copied().collect();
        before.sort_unstable();
        after.sort_unstable();
        if before != after {
            return false;
        }
        self.teams[idx_a].members = members_a;
        self.teams[idx_b].members = members_b;
        true
    }

    /// Overwrites the members of several unlocked teams at once.
    ///
    /// `assignment` pairs team indices with their new member lists. The
    /// union of the new lists must equal the union of the old ones;
    /// otherwise nothing changes and `false` is returned.
    pub fn redistribute(&mut self, assignment: Vec<(usize, Vec<MemberId>)>) -> bool {
        let mut seen = HashSet::with_capacity(assignment.len());
        for (idx, _) in &assignment {
            if *idx >= self.teams.len() || self.teams[*idx].is_locked() || !seen.insert(*idx) {
                return false;
            }
        }
        let mut before: Vec<MemberId> = assignment
            .iter()
            .flat_map(|(idx, _)| self.teams[*idx].members.iter().copied())
            .collect();
        let mut after: Vec<MemberId> = assignment
            .iter()
            .flat_map(|(_, members)| members.iter().copied())
            .collect();
        before.sort_unstable();
        after.sort_unstable();
        if before != after {
            return false;
        }
        for (idx, members) in assignment {
            self.teams[idx].members = members;
        }
        true
    }
}
