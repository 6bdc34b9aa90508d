//! The election registry: the single source of truth for voters,
//! candidates, admins and elections.
//!
//! Cross-record invariants live here and nowhere else: at most one
//! election is active at a time, and activating one starts a fresh
//! voting cycle. Casting a ballot updates voter and candidate together
//! or not at all. Field-level validation happens earlier, in the API
//! conversions; the registry re-checks only what it alone can see
//! (duplicates and cross-record references).

use chrono::Utc;

use crate::{
    error::{Error, Rejection, Result},
    model::{
        api::{auth::AnyUser, ballot::VoteReceipt, election::ElectionPatch, stats::Stats},
        common::{Id, Position},
        db::{
            Admin, AdminCore, Candidate, Election, NewCandidate, NewElection, NewVoter, Voter,
        },
        store::{Store, StoreData},
    },
};

/// The registry component. All state lives behind the store's lock, so a
/// shared reference is all any caller needs.
#[derive(Debug)]
pub struct Ledger {
    store: Store,
}

impl Ledger {
    /// Wrap the given store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Seed the default admin if no admin account exists.
    pub fn ensure_admin_exists(&self) -> Result<()> {
        let mut txn = self.store.write();
        if txn.admins.is_empty() {
            warn!("no admin accounts found, seeding the default admin");
            txn.insert(Admin {
                id: Id::new(),
                admin: AdminCore::default_admin(),
            });
            txn.commit()?;
        }
        Ok(())
    }

    /// All registered voters.
    pub fn voters(&self) -> Vec<Voter> {
        self.store.read().voters.clone()
    }

    /// A single voter.
    pub fn voter(&self, voter_id: Id) -> Option<Voter> {
        self.store.read().get::<Voter>(voter_id).cloned()
    }

    /// All candidates, optionally filtered to one position.
    pub fn candidates(&self, position: Option<Position>) -> Vec<Candidate> {
        self.store
            .read()
            .candidates
            .iter()
            .filter(|candidate| position.map_or(true, |p| candidate.position == p))
            .cloned()
            .collect()
    }

    /// A single candidate.
    pub fn candidate(&self, candidate_id: Id) -> Option<Candidate> {
        self.store.read().get::<Candidate>(candidate_id).cloned()
    }

    /// A single admin.
    pub fn admin(&self, admin_id: Id) -> Option<Admin> {
        self.store.read().get::<Admin>(admin_id).cloned()
    }

    /// All elections, active or not.
    pub fn elections(&self) -> Vec<Election> {
        self.store.read().elections.clone()
    }

    /// A single election.
    pub fn election(&self, election_id: Id) -> Option<Election> {
        self.store.read().get::<Election>(election_id).cloned()
    }

    /// The at-most-one active election.
    pub fn active_election(&self) -> Option<Election> {
        self.store
            .read()
            .elections
            .iter()
            .find(|election| election.is_active)
            .cloned()
    }

    /// Unified login lookup across admins, voters and candidates, in that
    /// precedence order.
    pub fn user_by_email(&self, email: &str) -> Option<AnyUser> {
        let data = self.store.read();
        if let Some(admin) = data.admins.iter().find(|a| a.email.as_str() == email) {
            return Some(AnyUser::Admin(admin.clone()));
        }
        if let Some(voter) = data.voters.iter().find(|v| v.email.as_str() == email) {
            return Some(AnyUser::Voter(voter.clone()));
        }
        data.candidates
            .iter()
            .find(|c| c.email.as_str() == email)
            .map(|candidate| AnyUser::Candidate(candidate.clone()))
    }

    /// Dashboard statistics, computed from live records in one snapshot.
    pub fn stats(&self) -> Stats {
        let data = self.store.read();
        Stats {
            total_voters: data.voters.len() as u64,
            total_candidates: data.candidates.len() as u64,
            voters_voted: data.voters.iter().filter(|v| v.has_voted).count() as u64,
            active_election: data.elections.iter().find(|e| e.is_active).cloned(),
        }
    }

    /// Register a voter. The email and national ID must both be unused.
    pub fn register_voter(&self, new_voter: NewVoter) -> Result<Voter> {
        let mut txn = self.store.write();
        if txn.voters.iter().any(|v| v.email == new_voter.email) {
            return Err(Rejection::DuplicateEmail.into());
        }
        if txn
            .voters
            .iter()
            .any(|v| v.national_id == new_voter.national_id)
        {
            return Err(Rejection::DuplicateNationalId.into());
        }
        let voter = Voter {
            id: Id::new(),
            voter: new_voter,
        };
        txn.insert(voter.clone());
        txn.commit()?;
        info!("registered voter {}", voter.id);
        Ok(voter)
    }

    /// Register a candidate. The email must be unused.
    pub fn register_candidate(&self, new_candidate: NewCandidate) -> Result<Candidate> {
        let mut txn = self.store.write();
        if txn
            .candidates
            .iter()
            .any(|c| c.email == new_candidate.email)
        {
            return Err(Rejection::DuplicateEmail.into());
        }
        let candidate = Candidate {
            id: Id::new(),
            candidate: new_candidate,
        };
        txn.insert(candidate.clone());
        txn.commit()?;
        info!(
            "registered candidate {} for {}",
            candidate.id, candidate.position
        );
        Ok(candidate)
    }

    /// Remove a voter. Removing an unknown ID is a no-op. Past ballots
    /// are unaffected: tallies live on the candidates.
    pub fn delete_voter(&self, voter_id: Id) -> Result<bool> {
        let mut txn = self.store.write();
        let removed = txn.remove::<Voter>(voter_id);
        if removed {
            txn.commit()?;
            info!("deleted voter {voter_id}");
        }
        Ok(removed)
    }

    /// Remove a candidate. Removing an unknown ID is a no-op. The
    /// candidate's tally vanishes with the record.
    pub fn delete_candidate(&self, candidate_id: Id) -> Result<bool> {
        let mut txn = self.store.write();
        let removed = txn.remove::<Candidate>(candidate_id);
        if removed {
            txn.commit()?;
            info!("deleted candidate {candidate_id}");
        }
        Ok(removed)
    }

    /// Create an election. Creating it active deactivates every other
    /// election and starts a fresh voting cycle.
    pub fn create_election(&self, new_election: NewElection) -> Result<Election> {
        let mut txn = self.store.write();
        if new_election.is_active {
            start_new_cycle(&mut txn);
        }
        let election = Election {
            id: Id::new(),
            election: new_election,
        };
        txn.insert(election.clone());
        txn.commit()?;
        info!("created election {} ({})", election.id, election.title);
        Ok(election)
    }

    /// Apply a partial update to an election. A patch that sets the
    /// election active starts a fresh voting cycle, even if it was
    /// already active.
    pub fn update_election(&self, election_id: Id, patch: ElectionPatch) -> Result<Election> {
        let mut txn = self.store.write();
        let mut updated = txn
            .get::<Election>(election_id)
            .ok_or_else(|| Error::not_found(format!("election {election_id}")))?
            .election
            .clone();
        let activating = patch.activates();
        patch.apply(&mut updated)?;
        if activating {
            start_new_cycle(&mut txn);
        }
        let election = txn
            .get_mut::<Election>(election_id)
            .ok_or_else(|| Error::not_found(format!("election {election_id}")))?;
        election.election = updated;
        let election = election.clone();
        txn.commit()?;
        info!("updated election {election_id}");
        Ok(election)
    }

    /// Remove an election. Removing an unknown ID is a no-op. Unlike
    /// activation, deletion never touches voting state, even when the
    /// deleted election was the active one.
    pub fn delete_election(&self, election_id: Id) -> Result<bool> {
        let mut txn = self.store.write();
        let removed = txn.remove::<Election>(election_id);
        if removed {
            txn.commit()?;
            info!("deleted election {election_id}");
        }
        Ok(removed)
    }

    /// Record a ballot: mark the voter as having voted and increment the
    /// candidate's tally, both or neither.
    pub fn cast_vote(&self, voter_id: Id, candidate_id: Id) -> Result<VoteReceipt> {
        let mut txn = self.store.write();

        let election = txn
            .elections
            .iter()
            .find(|e| e.is_active)
            .cloned()
            .ok_or(Rejection::NoActiveElection)?;

        let voter = txn
            .get::<Voter>(voter_id)
            .ok_or_else(|| Error::not_found(format!("voter {voter_id}")))?;
        if voter.has_voted {
            return Err(Rejection::AlreadyVoted.into());
        }

        let candidate = txn
            .get::<Candidate>(candidate_id)
            .ok_or_else(|| Error::not_found(format!("candidate {candidate_id}")))?;
        let position = candidate.position;
        if !election.positions.contains(&position) {
            return Err(Rejection::InvalidCandidate.into());
        }

        // Both updates go to the draft; the commit publishes them as one.
        txn.get_mut::<Voter>(voter_id)
            .ok_or_else(|| Error::not_found(format!("voter {voter_id}")))?
            .has_voted = true;
        txn.get_mut::<Candidate>(candidate_id)
            .ok_or_else(|| Error::not_found(format!("candidate {candidate_id}")))?
            .votes += 1;
        txn.commit()?;

        // Ballot secrecy: never log the candidate.
        info!(
            "ballot recorded for position {} in election {}",
            position, election.id
        );
        Ok(VoteReceipt {
            election_id: election.id,
            voter_id,
            candidate_id,
            position,
            cast_at: Utc::now(),
        })
    }
}

/// Deactivate every election and clear all voting state: activating an
/// election always starts a fresh cycle.
fn start_new_cycle(data: &mut StoreData) {
    for election in &mut data.elections {
        election.is_active = false;
    }
    for voter in &mut data.voters {
        voter.has_voted = false;
    }
    for candidate in &mut data.candidates {
        candidate.votes = 0;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::model::{
        api::{
            candidate::CandidateRegistration,
            election::{ElectionPatch, ElectionSpec},
            voter::VoterRegistration,
        },
        db::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD},
    };

    fn ledger() -> Ledger {
        Ledger::new(Store::in_memory())
    }

    fn new_voter() -> NewVoter {
        VoterRegistration::example().try_into().unwrap()
    }

    fn new_voter2() -> NewVoter {
        VoterRegistration::example2().try_into().unwrap()
    }

    /// A Mayor candidate.
    fn new_candidate() -> NewCandidate {
        CandidateRegistration::example().try_into().unwrap()
    }

    /// An MLA candidate.
    fn new_candidate2() -> NewCandidate {
        CandidateRegistration::example2().try_into().unwrap()
    }

    fn active_election() -> NewElection {
        ElectionSpec::active_example().try_into().unwrap()
    }

    fn future_election() -> NewElection {
        ElectionSpec::future_example().try_into().unwrap()
    }

    fn unwrap_rejection<T: std::fmt::Debug>(result: Result<T>) -> Rejection {
        match result {
            Err(Error::Rejected(rejection)) => rejection,
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[test]
    fn seeds_default_admin_once() {
        let ledger = ledger();
        ledger.ensure_admin_exists().unwrap();
        ledger.ensure_admin_exists().unwrap();

        let user = ledger.user_by_email(DEFAULT_ADMIN_EMAIL).unwrap();
        assert!(matches!(user, AnyUser::Admin(_)));
        assert!(user.verify_password(DEFAULT_ADMIN_PASSWORD));
        assert_eq!(ledger.store.read().admins.len(), 1);
    }

    #[test]
    fn registers_and_finds_voters() {
        let ledger = ledger();
        let voter = ledger.register_voter(new_voter()).unwrap();

        assert_eq!(ledger.voter(voter.id), Some(voter.clone()));
        assert_eq!(ledger.voters(), vec![voter.clone()]);
        let user = ledger.user_by_email(voter.email.as_str()).unwrap();
        assert!(matches!(user, AnyUser::Voter(v) if v.id == voter.id));
    }

    #[test]
    fn rejects_duplicate_voter_email() {
        let ledger = ledger();
        let first = ledger.register_voter(new_voter()).unwrap();

        let mut duplicate = new_voter();
        duplicate.national_id = "999999999999".parse().unwrap();
        let rejection = unwrap_rejection(ledger.register_voter(duplicate));
        assert_eq!(rejection, Rejection::DuplicateEmail);

        // The original record is untouched.
        assert_eq!(ledger.voters(), vec![first]);
    }

    #[test]
    fn rejects_duplicate_national_id() {
        let ledger = ledger();
        ledger.register_voter(new_voter()).unwrap();

        let mut duplicate = new_voter();
        duplicate.email = "someone.else@example.com".parse().unwrap();
        let rejection = unwrap_rejection(ledger.register_voter(duplicate));
        assert_eq!(rejection, Rejection::DuplicateNationalId);
        assert_eq!(ledger.voters().len(), 1);
    }

    #[test]
    fn rejects_duplicate_candidate_email() {
        let ledger = ledger();
        ledger.register_candidate(new_candidate()).unwrap();

        let rejection = unwrap_rejection(ledger.register_candidate(new_candidate()));
        assert_eq!(rejection, Rejection::DuplicateEmail);
        assert_eq!(ledger.candidates(None).len(), 1);
    }

    #[test]
    fn filters_candidates_by_position() {
        let ledger = ledger();
        let mayor = ledger.register_candidate(new_candidate()).unwrap();
        let mla = ledger.register_candidate(new_candidate2()).unwrap();

        assert_eq!(ledger.candidates(None).len(), 2);
        assert_eq!(ledger.candidates(Some(Position::Mayor)), vec![mayor]);
        assert_eq!(ledger.candidates(Some(Position::Mla)), vec![mla]);
        assert!(ledger.candidates(Some(Position::Mp)).is_empty());
    }

    #[test]
    fn at_most_one_active_election() {
        let ledger = ledger();
        let first = ledger.create_election(active_election()).unwrap();
        assert_eq!(ledger.active_election().unwrap().id, first.id);

        let mut second_spec = active_election();
        second_spec.title = "Second Election".to_string();
        let second = ledger.create_election(second_spec).unwrap();

        assert_eq!(ledger.active_election().unwrap().id, second.id);
        assert!(!ledger.election(first.id).unwrap().is_active);
        assert_eq!(ledger.elections().len(), 2);
    }

    #[test]
    fn creating_inactive_election_changes_nothing() {
        let ledger = ledger();
        let active = ledger.create_election(active_election()).unwrap();
        let voter = ledger.register_voter(new_voter()).unwrap();
        let candidate = ledger.register_candidate(new_candidate()).unwrap();
        ledger.cast_vote(voter.id, candidate.id).unwrap();

        ledger.create_election(future_election()).unwrap();

        assert_eq!(ledger.active_election().unwrap().id, active.id);
        assert!(ledger.voter(voter.id).unwrap().has_voted);
        assert_eq!(ledger.candidate(candidate.id).unwrap().votes, 1);
    }

    #[test]
    fn activation_starts_a_fresh_cycle() {
        let ledger = ledger();
        ledger.create_election(active_election()).unwrap();
        let voter = ledger.register_voter(new_voter()).unwrap();
        let candidate = ledger.register_candidate(new_candidate()).unwrap();
        ledger.cast_vote(voter.id, candidate.id).unwrap();

        let mut second_spec = active_election();
        second_spec.title = "Second Election".to_string();
        ledger.create_election(second_spec).unwrap();

        assert!(!ledger.voter(voter.id).unwrap().has_voted);
        assert_eq!(ledger.candidate(candidate.id).unwrap().votes, 0);
    }

    #[test]
    fn activation_via_update_starts_a_fresh_cycle() {
        let ledger = ledger();
        let first = ledger.create_election(active_election()).unwrap();
        let second = ledger.create_election(future_election()).unwrap();
        let voter = ledger.register_voter(new_voter()).unwrap();
        let candidate = ledger.register_candidate(new_candidate()).unwrap();
        ledger.cast_vote(voter.id, candidate.id).unwrap();

        let updated = ledger
            .update_election(second.id, ElectionPatch::activate_example())
            .unwrap();

        assert!(updated.is_active);
        assert_eq!(ledger.active_election().unwrap().id, second.id);
        assert!(!ledger.election(first.id).unwrap().is_active);
        assert!(!ledger.voter(voter.id).unwrap().has_voted);
        assert_eq!(ledger.candidate(candidate.id).unwrap().votes, 0);
    }

    #[test]
    fn reactivating_the_active_election_still_resets() {
        let ledger = ledger();
        let election = ledger.create_election(active_election()).unwrap();
        let voter = ledger.register_voter(new_voter()).unwrap();
        let candidate = ledger.register_candidate(new_candidate()).unwrap();
        ledger.cast_vote(voter.id, candidate.id).unwrap();

        ledger
            .update_election(election.id, ElectionPatch::activate_example())
            .unwrap();

        assert!(ledger.election(election.id).unwrap().is_active);
        assert!(!ledger.voter(voter.id).unwrap().has_voted);
        assert_eq!(ledger.candidate(candidate.id).unwrap().votes, 0);
    }

    #[test]
    fn deactivation_never_resets() {
        let ledger = ledger();
        let election = ledger.create_election(active_election()).unwrap();
        let voter = ledger.register_voter(new_voter()).unwrap();
        let candidate = ledger.register_candidate(new_candidate()).unwrap();
        ledger.cast_vote(voter.id, candidate.id).unwrap();

        let patch = ElectionPatch {
            is_active: Some(false),
            ..ElectionPatch::default()
        };
        ledger.update_election(election.id, patch).unwrap();

        assert!(ledger.active_election().is_none());
        assert!(ledger.voter(voter.id).unwrap().has_voted);
        assert_eq!(ledger.candidate(candidate.id).unwrap().votes, 1);
    }

    #[test]
    fn update_rejects_invalid_window() {
        let ledger = ledger();
        let election = ledger.create_election(future_election()).unwrap();

        let patch = ElectionPatch {
            end_date: Some(election.start_date - Duration::days(1)),
            ..ElectionPatch::default()
        };
        let rejection = unwrap_rejection(ledger.update_election(election.id, patch));
        assert_eq!(rejection, Rejection::InvalidElectionWindow);

        // Nothing was persisted.
        assert_eq!(
            ledger.election(election.id).unwrap().end_date,
            election.end_date
        );
    }

    #[test]
    fn update_unknown_election() {
        let ledger = ledger();
        let rejection =
            unwrap_rejection(ledger.update_election(Id::new(), ElectionPatch::default()));
        assert!(matches!(rejection, Rejection::NotFound(_)));
    }

    #[test]
    fn deleting_the_active_election_keeps_voting_state() {
        let ledger = ledger();
        let election = ledger.create_election(active_election()).unwrap();
        let voter = ledger.register_voter(new_voter()).unwrap();
        let candidate = ledger.register_candidate(new_candidate()).unwrap();
        ledger.cast_vote(voter.id, candidate.id).unwrap();

        assert!(ledger.delete_election(election.id).unwrap());

        assert!(ledger.active_election().is_none());
        assert!(ledger.voter(voter.id).unwrap().has_voted);
        assert_eq!(ledger.candidate(candidate.id).unwrap().votes, 1);
    }

    #[test]
    fn deletes_are_idempotent() {
        let ledger = ledger();
        let voter = ledger.register_voter(new_voter()).unwrap();
        let candidate = ledger.register_candidate(new_candidate()).unwrap();
        let election = ledger.create_election(future_election()).unwrap();

        assert!(ledger.delete_voter(voter.id).unwrap());
        assert!(!ledger.delete_voter(voter.id).unwrap());
        assert!(ledger.delete_candidate(candidate.id).unwrap());
        assert!(!ledger.delete_candidate(candidate.id).unwrap());
        assert!(ledger.delete_election(election.id).unwrap());
        assert!(!ledger.delete_election(election.id).unwrap());

        assert!(!ledger.delete_voter(Id::new()).unwrap());
    }

    #[test]
    fn vote_requires_an_active_election() {
        let ledger = ledger();
        let voter = ledger.register_voter(new_voter()).unwrap();
        let candidate = ledger.register_candidate(new_candidate()).unwrap();

        let rejection = unwrap_rejection(ledger.cast_vote(voter.id, candidate.id));
        assert_eq!(rejection, Rejection::NoActiveElection);

        // An inactive election does not count.
        ledger.create_election(future_election()).unwrap();
        let rejection = unwrap_rejection(ledger.cast_vote(voter.id, candidate.id));
        assert_eq!(rejection, Rejection::NoActiveElection);
    }

    #[test]
    fn vote_requires_known_voter_and_candidate() {
        let ledger = ledger();
        ledger.create_election(active_election()).unwrap();
        let voter = ledger.register_voter(new_voter()).unwrap();
        let candidate = ledger.register_candidate(new_candidate()).unwrap();

        let rejection = unwrap_rejection(ledger.cast_vote(Id::new(), candidate.id));
        assert!(matches!(rejection, Rejection::NotFound(_)));
        assert_eq!(ledger.candidate(candidate.id).unwrap().votes, 0);

        let rejection = unwrap_rejection(ledger.cast_vote(voter.id, Id::new()));
        assert!(matches!(rejection, Rejection::NotFound(_)));
        assert!(!ledger.voter(voter.id).unwrap().has_voted);
    }

    #[test]
    fn vote_requires_a_contested_position() {
        let ledger = ledger();
        // Contests Mayor and Councilor only.
        ledger.create_election(active_election()).unwrap();
        let voter = ledger.register_voter(new_voter()).unwrap();
        let mla_candidate = ledger.register_candidate(new_candidate2()).unwrap();

        let rejection = unwrap_rejection(ledger.cast_vote(voter.id, mla_candidate.id));
        assert_eq!(rejection, Rejection::InvalidCandidate);
        assert!(!ledger.voter(voter.id).unwrap().has_voted);
        assert_eq!(ledger.candidate(mla_candidate.id).unwrap().votes, 0);
    }

    #[test]
    fn vote_is_atomic_and_single_use() {
        let ledger = ledger();
        let election = ledger.create_election(active_election()).unwrap();
        let voter = ledger.register_voter(new_voter()).unwrap();
        let candidate = ledger.register_candidate(new_candidate()).unwrap();

        let receipt = ledger.cast_vote(voter.id, candidate.id).unwrap();
        assert_eq!(receipt.election_id, election.id);
        assert_eq!(receipt.voter_id, voter.id);
        assert_eq!(receipt.candidate_id, candidate.id);
        assert_eq!(receipt.position, Position::Mayor);

        assert!(ledger.voter(voter.id).unwrap().has_voted);
        assert_eq!(ledger.candidate(candidate.id).unwrap().votes, 1);

        let rejection = unwrap_rejection(ledger.cast_vote(voter.id, candidate.id));
        assert_eq!(rejection, Rejection::AlreadyVoted);
        assert_eq!(ledger.candidate(candidate.id).unwrap().votes, 1);
    }

    #[test]
    fn second_voter_can_still_vote() {
        let ledger = ledger();
        ledger.create_election(active_election()).unwrap();
        let first = ledger.register_voter(new_voter()).unwrap();
        let second = ledger.register_voter(new_voter2()).unwrap();
        let candidate = ledger.register_candidate(new_candidate()).unwrap();

        ledger.cast_vote(first.id, candidate.id).unwrap();
        ledger.cast_vote(second.id, candidate.id).unwrap();

        assert_eq!(ledger.candidate(candidate.id).unwrap().votes, 2);
        assert_eq!(ledger.stats().voters_voted, 2);
    }

    #[test]
    fn deleting_a_voter_keeps_tallies() {
        let ledger = ledger();
        ledger.create_election(active_election()).unwrap();
        let voter = ledger.register_voter(new_voter()).unwrap();
        let candidate = ledger.register_candidate(new_candidate()).unwrap();
        ledger.cast_vote(voter.id, candidate.id).unwrap();

        ledger.delete_voter(voter.id).unwrap();

        assert_eq!(ledger.candidate(candidate.id).unwrap().votes, 1);
        assert_eq!(ledger.stats().voters_voted, 0);
    }

    #[test]
    fn stats_reflect_live_records() {
        let ledger = ledger();
        assert_eq!(
            ledger.stats(),
            Stats {
                total_voters: 0,
                total_candidates: 0,
                voters_voted: 0,
                active_election: None,
            }
        );

        let election = ledger.create_election(active_election()).unwrap();
        let voter = ledger.register_voter(new_voter()).unwrap();
        ledger.register_voter(new_voter2()).unwrap();
        let candidate = ledger.register_candidate(new_candidate()).unwrap();
        ledger.cast_vote(voter.id, candidate.id).unwrap();

        let stats = ledger.stats();
        assert_eq!(stats.total_voters, 2);
        assert_eq!(stats.total_candidates, 1);
        assert_eq!(stats.voters_voted, 1);
        assert_eq!(stats.active_election.unwrap().id, election.id);

        // Deleting the candidate removes its tally from view.
        ledger.delete_candidate(candidate.id).unwrap();
        assert_eq!(ledger.stats().total_candidates, 0);
    }

    #[test]
    fn login_lookup_prefers_admin() {
        let ledger = ledger();
        ledger.ensure_admin_exists().unwrap();

        // A voter who registered with the admin's email address.
        let mut clash = new_voter();
        clash.email = DEFAULT_ADMIN_EMAIL.parse().unwrap();
        ledger.register_voter(clash).unwrap();

        let user = ledger.user_by_email(DEFAULT_ADMIN_EMAIL).unwrap();
        assert!(matches!(user, AnyUser::Admin(_)));
    }

    #[test]
    fn unknown_email_finds_no_user() {
        let ledger = ledger();
        ledger.ensure_admin_exists().unwrap();
        assert!(ledger.user_by_email("nobody@example.com").is_none());
    }

    /// Full single-election walkthrough: register, vote, check stats,
    /// and fail the second ballot.
    #[test]
    fn single_election_walkthrough() {
        // This test runs the whole registry, so enable logging.
        log4rs_test_utils::test_logging::init_logging_once_for(["evote_backend"], None, None);

        let ledger = ledger();
        ledger.ensure_admin_exists().unwrap();

        let mut registration = VoterRegistration::example();
        registration.dob = Utc::now().date_naive() - Duration::days(365 * 20 + 10);
        let voter = ledger
            .register_voter(registration.try_into().unwrap())
            .unwrap();
        assert_eq!(voter.national_id.as_str(), "123456789012");

        let candidate = ledger.register_candidate(new_candidate()).unwrap();

        let now = Utc::now();
        let spec = ElectionSpec {
            title: "Mayoral Race".to_string(),
            description: "Single-seat walkthrough.".to_string(),
            start_date: now - Duration::days(1),
            end_date: now + Duration::days(1),
            positions: vec![Position::Mayor],
            is_active: true,
        };
        let election = ledger.create_election(spec.try_into().unwrap()).unwrap();

        let receipt = ledger.cast_vote(voter.id, candidate.id).unwrap();
        assert_eq!(receipt.election_id, election.id);

        let stats = ledger.stats();
        assert_eq!(stats.total_voters, 1);
        assert_eq!(stats.total_candidates, 1);
        assert_eq!(stats.voters_voted, 1);
        assert_eq!(ledger.candidate(candidate.id).unwrap().votes, 1);

        let rejection = unwrap_rejection(ledger.cast_vote(voter.id, candidate.id));
        assert_eq!(rejection, Rejection::AlreadyVoted);
    }

    /// Two elections in sequence: activating the second lets the voter
    /// who voted in the first vote again.
    #[test]
    fn sequential_elections_walkthrough() {
        let ledger = ledger();
        ledger.create_election(active_election()).unwrap();
        let voter = ledger.register_voter(new_voter()).unwrap();
        let candidate = ledger.register_candidate(new_candidate()).unwrap();
        ledger.cast_vote(voter.id, candidate.id).unwrap();

        let mut second_spec = active_election();
        second_spec.title = "Follow-up Election".to_string();
        let second = ledger.create_election(second_spec).unwrap();

        // The old ballot state is gone...
        assert!(!ledger.voter(voter.id).unwrap().has_voted);
        assert_eq!(ledger.candidate(candidate.id).unwrap().votes, 0);

        // ...and the same voter may vote again in the new cycle.
        let receipt = ledger.cast_vote(voter.id, candidate.id).unwrap();
        assert_eq!(receipt.election_id, second.id);
        assert_eq!(ledger.candidate(candidate.id).unwrap().votes, 1);
        assert_eq!(ledger.stats().voters_voted, 1);
    }
}
