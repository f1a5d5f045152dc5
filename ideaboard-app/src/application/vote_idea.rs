use super::Notice;
use crate::domain::Idea;
use crate::infrastructure::api::VoteBackend;
use crate::infrastructure::ledger::VoteLedger;
use crate::infrastructure::session::SessionManager;
use ideaboard_errors::{AppError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotePhase {
    Idle,
    Pending,
    Committed,
    RolledBack,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VoteOutcome {
    /// Not authenticated; nothing was sent.
    LoginRequired,
    /// The ledger already holds a vote for this idea; nothing was sent.
    AlreadyVoted,
    /// A request for this idea is still in flight; the click is dropped.
    Ignored,
    Recorded { votes: i32 },
    /// The server answered 409. The ledger is updated as if the vote succeeded.
    AlreadyVotedOnServer { votes: i32 },
    Failed { error: AppError, needs_refresh: bool },
}

impl VoteOutcome {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::LoginRequired => Some(Notice::info("Log in to vote.")),
            Self::AlreadyVoted | Self::AlreadyVotedOnServer { .. } => {
                Some(Notice::from(&AppError::AlreadyVoted))
            }
            Self::Ignored => None,
            Self::Recorded { .. } => Some(Notice::success("Vote recorded!")),
            Self::Failed { error, .. } => Some(Notice::from(error)),
        }
    }
}

/// Optimistic vote state for one idea as a single view shows it.
///
/// `begin` applies the optimistic increment and moves to `Pending`; `resolve`
/// settles on the server's answer. While `Pending`, further `begin` calls are
/// rejected, and every `resolve` leaves `Pending`, so the vote button is
/// never stuck.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteAttempt {
    idea_id: String,
    votes: i32,
    has_voted: bool,
    phase: VotePhase,
    snapshot: Option<(i32, bool)>,
}

impl VoteAttempt {
    pub fn new(idea_id: impl Into<String>, votes: i32, has_voted: bool) -> Self {
        Self {
            idea_id: idea_id.into(),
            votes,
            has_voted,
            phase: VotePhase::Idle,
            snapshot: None,
        }
    }

    pub fn for_idea(idea: &Idea, ledger: &VoteLedger) -> Self {
        Self::new(idea.id.clone(), idea.votes, ledger.has_voted(&idea.id))
    }

    pub fn idea_id(&self) -> &str {
        &self.idea_id
    }

    pub fn votes(&self) -> i32 {
        self.votes
    }

    pub fn has_voted(&self) -> bool {
        self.has_voted
    }

    pub fn phase(&self) -> VotePhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == VotePhase::Pending
    }

    /// Gates the attempt and applies the optimistic update. `Err` carries the
    /// outcome to report when no request should be sent.
    pub fn begin(&mut self, session: &SessionManager) -> Result<(), VoteOutcome> {
        if self.is_pending() {
            return Err(VoteOutcome::Ignored);
        }

        if !session.is_authenticated() {
            return Err(VoteOutcome::LoginRequired);
        }

        if self.has_voted || session.ledger().has_voted(&self.idea_id) {
            self.has_voted = true;
            return Err(VoteOutcome::AlreadyVoted);
        }

        self.snapshot = Some((self.votes, self.has_voted));
        self.votes = self.votes.saturating_add(1);
        self.has_voted = true;
        self.phase = VotePhase::Pending;
        Ok(())
    }

    pub fn resolve(&mut self, result: Result<Idea, AppError>, ledger: &VoteLedger) -> VoteOutcome {
        let Some((previous_votes, previous_has_voted)) = self.snapshot.take() else {
            tracing::warn!("Vote result for idea {} arrived without a pending attempt", self.idea_id);
            return VoteOutcome::Ignored;
        };

        match result {
            Ok(idea) => {
                ledger.add_vote(&self.idea_id);
                if idea.id == self.idea_id {
                    self.votes = idea.votes;
                }
                self.phase = VotePhase::Committed;
                VoteOutcome::Recorded { votes: self.votes }
            }
            Err(AppError::AlreadyVoted) => {
                ledger.add_vote(&self.idea_id);
                self.votes = previous_votes;
                self.has_voted = true;
                self.phase = VotePhase::Committed;
                VoteOutcome::AlreadyVotedOnServer { votes: self.votes }
            }
            Err(error) => {
                self.votes = previous_votes;
                self.has_voted = previous_has_voted;
                self.phase = VotePhase::RolledBack;
                let needs_refresh = error.kind() == ErrorKind::NotFound;
                VoteOutcome::Failed {
                    error,
                    needs_refresh,
                }
            }
        }
    }

    /// Adopts a freshly fetched copy of the idea unless a request is in flight.
    /// The voted flag follows the ledger, so it drops when the session changes hands.
    pub fn refresh(&mut self, idea: &Idea, ledger: &VoteLedger) {
        if self.is_pending() || idea.id != self.idea_id {
            return;
        }
        self.votes = idea.votes;
        self.has_voted = ledger.has_voted(&idea.id);
        self.phase = VotePhase::Idle;
    }
}

/// Runs one vote attempt end to end against the API.
#[derive(Clone)]
pub struct VoteIdea<B> {
    backend: B,
    session: SessionManager,
}

impl<B: VoteBackend> VoteIdea<B> {
    pub fn new(backend: B, session: SessionManager) -> Self {
        Self { backend, session }
    }

    pub async fn execute(&self, attempt: &mut VoteAttempt) -> VoteOutcome {
        if let Err(outcome) = attempt.begin(&self.session) {
            return outcome;
        }

        let result = self.backend.vote(attempt.idea_id()).await;
        if let Err(e) = &result {
            tracing::info!("Vote for idea {} failed: {}", attempt.idea_id(), e);
        }
        attempt.resolve(result, self.session.ledger())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::NoticeLevel;
    use crate::domain::{Role, User};
    use crate::infrastructure::storage::{KeyValueStore, MemoryStore};
    use crate::test_support::{token_for, FUTURE, PAST};
    use std::cell::Cell;
    use std::sync::Arc;

    struct ScriptedVote {
        result: Result<i32, AppError>,
        calls: Cell<usize>,
    }

    impl ScriptedVote {
        fn answering(result: Result<i32, AppError>) -> Self {
            Self {
                result,
                calls: Cell::new(0),
            }
        }
    }

    impl VoteBackend for &ScriptedVote {
        async fn vote(&self, idea_id: &str) -> Result<Idea, AppError> {
            self.calls.set(self.calls.get() + 1);
            self.result
                .clone()
                .map(|votes| idea(idea_id, votes))
        }
    }

    fn idea(id: &str, votes: i32) -> Idea {
        Idea::new(id, "Dark mode", votes, User::new("1", "ana", Role::User))
    }

    fn session(logged_in: bool) -> SessionManager {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let session = SessionManager::new(store.clone(), VoteLedger::new(store));
        if logged_in {
            session
                .set_credential(&token_for("7", "bia", "user", FUTURE))
                .unwrap();
        }
        session
    }

    #[tokio::test]
    async fn test_unauthenticated_vote_sends_nothing() {
        let session = session(false);
        let backend = ScriptedVote::answering(Ok(11));
        let mut attempt = VoteAttempt::for_idea(&idea("42", 10), session.ledger());

        let outcome = VoteIdea::new(&backend, session.clone())
            .execute(&mut attempt)
            .await;

        assert_eq!(outcome, VoteOutcome::LoginRequired);
        assert_eq!(backend.calls.get(), 0);
        assert_eq!(attempt.votes(), 10);
        assert_eq!(attempt.phase(), VotePhase::Idle);
    }

    #[tokio::test]
    async fn test_expired_session_counts_as_logged_out() {
        let session = session(false);
        session
            .set_credential(&token_for("7", "bia", "user", PAST))
            .unwrap();
        let backend = ScriptedVote::answering(Ok(11));
        let mut attempt = VoteAttempt::new("42", 10, false);

        let outcome = VoteIdea::new(&backend, session).execute(&mut attempt).await;
        assert_eq!(outcome, VoteOutcome::LoginRequired);
        assert_eq!(backend.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_successful_vote() {
        let session = session(true);
        let backend = ScriptedVote::answering(Ok(11));
        let mut attempt = VoteAttempt::for_idea(&idea("42", 10), session.ledger());

        attempt.begin(&session).unwrap();
        assert_eq!(attempt.votes(), 11);
        assert!(attempt.has_voted());
        assert!(attempt.is_pending());
        assert!(!session.ledger().has_voted("42"));

        let result = (&backend).vote("42").await;
        let outcome = attempt.resolve(result, session.ledger());

        assert_eq!(outcome, VoteOutcome::Recorded { votes: 11 });
        assert_eq!(attempt.phase(), VotePhase::Committed);
        assert!(session.ledger().has_voted("42"));
    }

    #[tokio::test]
    async fn test_adopts_server_count() {
        let session = session(true);
        let backend = ScriptedVote::answering(Ok(15));
        let mut attempt = VoteAttempt::new("42", 10, false);

        let outcome = VoteIdea::new(&backend, session).execute(&mut attempt).await;
        assert_eq!(outcome, VoteOutcome::Recorded { votes: 15 });
        assert_eq!(attempt.votes(), 15);
    }

    #[tokio::test]
    async fn test_server_conflict_marks_voted() {
        let session = session(true);
        let backend = ScriptedVote::answering(Err(AppError::AlreadyVoted));
        let mut attempt = VoteAttempt::for_idea(&idea("42", 10), session.ledger());

        let outcome = VoteIdea::new(&backend, session.clone())
            .execute(&mut attempt)
            .await;

        assert_eq!(outcome, VoteOutcome::AlreadyVotedOnServer { votes: 10 });
        assert_eq!(attempt.votes(), 10);
        assert!(attempt.has_voted());
        assert!(session.ledger().has_voted("42"));

        let notice = outcome.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.message, AppError::AlreadyVoted.user_message());
    }

    #[tokio::test]
    async fn test_network_failure_rolls_back_and_allows_retry() {
        let session = session(true);
        let failing = ScriptedVote::answering(Err(AppError::Network("offline".into())));
        let mut attempt = VoteAttempt::for_idea(&idea("42", 10), session.ledger());

        let outcome = VoteIdea::new(&failing, session.clone())
            .execute(&mut attempt)
            .await;

        assert!(matches!(
            outcome,
            VoteOutcome::Failed { ref error, needs_refresh: false } if error.is_retryable()
        ));
        assert_eq!(attempt.votes(), 10);
        assert!(!attempt.has_voted());
        assert_eq!(attempt.phase(), VotePhase::RolledBack);
        assert!(!session.ledger().has_voted("42"));

        let working = ScriptedVote::answering(Ok(11));
        let outcome = VoteIdea::new(&working, session.clone())
            .execute(&mut attempt)
            .await;
        assert_eq!(outcome, VoteOutcome::Recorded { votes: 11 });
        assert_eq!(working.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_missing_idea_requests_refresh() {
        let session = session(true);
        let backend = ScriptedVote::answering(Err(AppError::NotFound));
        let mut attempt = VoteAttempt::new("gone", 3, false);

        let outcome = VoteIdea::new(&backend, session).execute(&mut attempt).await;
        assert!(matches!(
            outcome,
            VoteOutcome::Failed {
                error: AppError::NotFound,
                needs_refresh: true
            }
        ));
        assert_eq!(attempt.votes(), 3);
    }

    #[tokio::test]
    async fn test_ledger_hit_skips_request() {
        let session = session(true);
        session.ledger().add_vote("42");
        let backend = ScriptedVote::answering(Ok(11));
        let mut attempt = VoteAttempt::new("42", 10, false);

        let outcome = VoteIdea::new(&backend, session).execute(&mut attempt).await;
        assert_eq!(outcome, VoteOutcome::AlreadyVoted);
        assert!(attempt.has_voted());
        assert_eq!(attempt.votes(), 10);
        assert_eq!(backend.calls.get(), 0);
    }

    #[test]
    fn test_second_click_while_pending_is_ignored() {
        let session = session(true);
        let mut attempt = VoteAttempt::new("42", 10, false);

        attempt.begin(&session).unwrap();
        assert_eq!(attempt.begin(&session), Err(VoteOutcome::Ignored));
        assert_eq!(attempt.votes(), 11);

        attempt.resolve(Err(AppError::Timeout), session.ledger());
        assert!(!attempt.is_pending());
        assert!(attempt.begin(&session).is_ok());
    }

    #[test]
    fn test_resolve_without_begin_is_ignored() {
        let session = session(true);
        let mut attempt = VoteAttempt::new("42", 10, false);
        let outcome = attempt.resolve(Ok(idea("42", 11)), session.ledger());

        assert_eq!(outcome, VoteOutcome::Ignored);
        assert_eq!(attempt.phase(), VotePhase::Idle);
        assert!(!session.ledger().has_voted("42"));
    }

    #[test]
    fn test_refresh_skipped_while_pending() {
        let session = session(true);
        let mut attempt = VoteAttempt::new("42", 10, false);

        attempt.refresh(&idea("42", 12), session.ledger());
        assert_eq!(attempt.votes(), 12);

        attempt.begin(&session).unwrap();
        attempt.refresh(&idea("42", 20), session.ledger());
        assert_eq!(attempt.votes(), 13);
    }

    #[tokio::test]
    async fn test_next_user_can_vote_after_logout() {
        let session = session(true);
        let backend = ScriptedVote::answering(Ok(11));
        let mut attempt = VoteAttempt::for_idea(&idea("42", 10), session.ledger());

        let outcome = VoteIdea::new(&backend, session.clone())
            .execute(&mut attempt)
            .await;
        assert_eq!(outcome, VoteOutcome::Recorded { votes: 11 });
        assert!(attempt.has_voted());

        session.clear_credential();
        session
            .set_credential(&token_for("8", "caio", "user", FUTURE))
            .unwrap();
        attempt.refresh(&idea("42", 11), session.ledger());

        assert!(!session.ledger().has_voted("42"));
        assert!(!attempt.has_voted());
        assert_eq!(attempt.phase(), VotePhase::Idle);

        let backend = ScriptedVote::answering(Ok(12));
        let outcome = VoteIdea::new(&backend, session.clone())
            .execute(&mut attempt)
            .await;
        assert_eq!(outcome, VoteOutcome::Recorded { votes: 12 });
        assert_eq!(backend.calls.get(), 1);
    }

    #[test]
    fn test_refresh_keeps_ledger_votes() {
        let session = session(true);
        session.ledger().add_vote("42");
        let mut attempt = VoteAttempt::new("42", 10, false);

        attempt.refresh(&idea("42", 10), session.ledger());
        assert!(attempt.has_voted());
    }

    #[test]
    fn test_optimistic_count_saturates() {
        let session = session(true);
        let mut attempt = VoteAttempt::new("42", i32::MAX, false);

        attempt.begin(&session).unwrap();
        assert_eq!(attempt.votes(), i32::MAX);
        attempt.resolve(Err(AppError::Timeout), session.ledger());
        assert_eq!(attempt.votes(), i32::MAX);
    }

    #[test]
    fn test_outcome_notices() {
        assert!(VoteOutcome::Ignored.notice().is_none());
        assert_eq!(
            VoteOutcome::Recorded { votes: 1 }.notice().unwrap().level,
            NoticeLevel::Success
        );
        assert_eq!(
            VoteOutcome::Failed {
                error: AppError::Server("boom".into()),
                needs_refresh: false
            }
            .notice()
            .unwrap()
            .level,
            NoticeLevel::Error
        );
    }
}
