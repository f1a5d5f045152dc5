use crate::domain::{Identity, Idea, IdeaReport};
use crate::infrastructure::api::IdeaBackend;
use crate::infrastructure::session::SessionManager;
use ideaboard_errors::AppError;

pub const MAX_IDEA_TITLE: usize = 500;
pub const MAX_EDITED_TITLE: usize = 255;

#[derive(Clone)]
pub struct ManageIdeas<B> {
    backend: B,
    session: SessionManager,
}

impl<B: IdeaBackend> ManageIdeas<B> {
    pub fn new(backend: B, session: SessionManager) -> Self {
        Self { backend, session }
    }

    pub async fn list(&self) -> Result<Vec<Idea>, AppError> {
        self.backend.list_ideas().await
    }

    pub async fn trending(&self, limit: usize) -> Result<Vec<Idea>, AppError> {
        let ideas = self.backend.list_ideas().await?;
        Ok(top_voted(ideas, limit))
    }

    pub async fn create(&self, title: &str) -> Result<Idea, AppError> {
        self.require_identity()?;
        let title = validate_title(title, MAX_IDEA_TITLE)?;
        let idea = self.backend.create_idea(title).await?;
        tracing::info!("Created idea {}", idea.id);
        Ok(idea)
    }

    pub async fn rename(&self, idea: &Idea, new_title: &str) -> Result<Idea, AppError> {
        self.require_modify(idea)?;
        let new_title = validate_title(new_title, MAX_EDITED_TITLE)?;
        if new_title == idea.title {
            return Err(AppError::Validation("title is unchanged".to_string()));
        }
        self.backend.rename_idea(&idea.id, new_title).await
    }

    pub async fn delete(&self, idea: &Idea) -> Result<(), AppError> {
        self.require_modify(idea)?;
        self.backend.delete_idea(&idea.id).await?;
        tracing::info!("Deleted idea {}", idea.id);
        Ok(())
    }

    pub async fn report(&self, idea_id: &str) -> Result<IdeaReport, AppError> {
        self.backend.idea_report(idea_id).await
    }

    /// The caller's voted ideas. The server list is authoritative, so the
    /// ledger is replaced with it.
    pub async fn my_votes(&self) -> Result<Vec<Idea>, AppError> {
        self.require_identity()?;
        let ideas = self.backend.my_voted_ideas().await?;
        self.session
            .ledger()
            .replace_all(ideas.iter().map(|idea| idea.id.clone()));
        Ok(ideas)
    }

    fn require_identity(&self) -> Result<Identity, AppError> {
        if !self.session.is_authenticated() {
            return Err(AppError::Unauthorized);
        }
        self.session.current_identity().ok_or(AppError::Unauthorized)
    }

    fn require_modify(&self, idea: &Idea) -> Result<Identity, AppError> {
        let identity = self.require_identity()?;
        if !identity.can_modify(&idea.creator.id) {
            return Err(AppError::Forbidden);
        }
        Ok(identity)
    }
}

/// Most-voted ideas first; ties keep their input order.
pub fn top_voted(mut ideas: Vec<Idea>, limit: usize) -> Vec<Idea> {
    ideas.sort_by(|a, b| b.votes.cmp(&a.votes));
    ideas.truncate(limit);
    ideas
}

/// Case-insensitive filter on title and creator name. A blank term keeps everything.
pub fn search<'a>(ideas: &'a [Idea], term: &str) -> Vec<&'a Idea> {
    let term = term.trim();
    if term.is_empty() {
        return ideas.iter().collect();
    }
    ideas.iter().filter(|idea| idea.matches(term)).collect()
}

fn validate_title(title: &str, max_chars: usize) -> Result<&str, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    if title.chars().count() > max_chars {
        return Err(AppError::Validation(format!(
            "title must be at most {} characters",
            max_chars
        )));
    }
    Ok(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, User};
    use crate::infrastructure::ledger::VoteLedger;
    use crate::infrastructure::storage::{KeyValueStore, MemoryStore};
    use crate::test_support::{token_for, FUTURE, PAST};
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeIdeas {
        ideas: Vec<Idea>,
        fail_with: Option<AppError>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeIdeas {
        fn record(&self, call: String) -> Result<(), AppError> {
            self.calls.borrow_mut().push(call);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    impl IdeaBackend for &FakeIdeas {
        async fn list_ideas(&self) -> Result<Vec<Idea>, AppError> {
            self.record("list".into())?;
            Ok(self.ideas.clone())
        }

        async fn create_idea(&self, title: &str) -> Result<Idea, AppError> {
            self.record(format!("create:{}", title))?;
            Ok(idea("new", title, 0, "7"))
        }

        async fn rename_idea(&self, idea_id: &str, new_title: &str) -> Result<Idea, AppError> {
            self.record(format!("rename:{}:{}", idea_id, new_title))?;
            Ok(idea(idea_id, new_title, 0, "7"))
        }

        async fn delete_idea(&self, idea_id: &str) -> Result<(), AppError> {
            self.record(format!("delete:{}", idea_id))
        }

        async fn idea_report(&self, idea_id: &str) -> Result<IdeaReport, AppError> {
            self.record(format!("report:{}", idea_id))?;
            Ok(IdeaReport {
                id: idea_id.into(),
                title: "t".into(),
                creator: "ana".into(),
                votes_count: 2,
                voters: vec!["bia".into(), "caio".into()],
            })
        }

        async fn my_voted_ideas(&self) -> Result<Vec<Idea>, AppError> {
            self.record("my_votes".into())?;
            Ok(self.ideas.clone())
        }
    }

    fn idea(id: &str, title: &str, votes: i32, creator: &str) -> Idea {
        Idea::new(id, title, votes, User::new(creator, "someone", Role::User))
    }

    fn session_as(sub: Option<(&str, &str)>, exp: i64) -> SessionManager {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let session = SessionManager::new(store.clone(), VoteLedger::new(store));
        if let Some((sub, role)) = sub {
            session.set_credential(&token_for(sub, "ana", role, exp)).unwrap();
        }
        session
    }

    #[tokio::test]
    async fn test_trending_sorts_and_limits() {
        let backend = FakeIdeas {
            ideas: vec![
                idea("a", "A", 1, "1"),
                idea("b", "B", 5, "1"),
                idea("c", "C", 3, "1"),
                idea("d", "D", 5, "1"),
            ],
            ..Default::default()
        };
        let trending = ManageIdeas::new(&backend, session_as(None, FUTURE))
            .trending(3)
            .await
            .unwrap();

        let order: Vec<&str> = trending.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "c"]);
    }

    #[tokio::test]
    async fn test_create_requires_login() {
        let backend = FakeIdeas::default();
        let err = ManageIdeas::new(&backend, session_as(None, FUTURE))
            .create("Bike lanes")
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Unauthorized);

        let err = ManageIdeas::new(&backend, session_as(Some(("7", "user")), PAST))
            .create("Bike lanes")
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Unauthorized);
        assert!(backend.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_create_trims_and_limits_title() {
        let backend = FakeIdeas::default();
        let ideas = ManageIdeas::new(&backend, session_as(Some(("7", "user")), FUTURE));

        ideas.create("  Bike lanes  ").await.unwrap();
        assert!(matches!(ideas.create("   ").await, Err(AppError::Validation(_))));
        let long = "x".repeat(MAX_IDEA_TITLE + 1);
        assert!(matches!(ideas.create(&long).await, Err(AppError::Validation(_))));

        assert_eq!(*backend.calls.borrow(), vec!["create:Bike lanes".to_string()]);
    }

    #[tokio::test]
    async fn test_rename_and_delete_need_owner_or_admin() {
        let backend = FakeIdeas::default();
        let theirs = idea("1", "Old", 0, "99");
        let mine = idea("2", "Old", 0, "7");

        let as_user = ManageIdeas::new(&backend, session_as(Some(("7", "user")), FUTURE));
        assert_eq!(as_user.rename(&theirs, "New").await.unwrap_err(), AppError::Forbidden);
        assert_eq!(as_user.delete(&theirs).await.unwrap_err(), AppError::Forbidden);
        as_user.rename(&mine, "New").await.unwrap();
        as_user.delete(&mine).await.unwrap();

        let as_admin = ManageIdeas::new(&backend, session_as(Some(("1", "admin")), FUTURE));
        as_admin.delete(&theirs).await.unwrap();

        assert_eq!(
            *backend.calls.borrow(),
            vec!["rename:2:New".to_string(), "delete:2".into(), "delete:1".into()]
        );
    }

    #[tokio::test]
    async fn test_rename_validation() {
        let backend = FakeIdeas::default();
        let ideas = ManageIdeas::new(&backend, session_as(Some(("7", "user")), FUTURE));
        let mine = idea("2", "Same", 0, "7");

        assert!(matches!(ideas.rename(&mine, " Same ").await, Err(AppError::Validation(_))));
        let long = "y".repeat(MAX_EDITED_TITLE + 1);
        assert!(matches!(ideas.rename(&mine, &long).await, Err(AppError::Validation(_))));
        assert!(backend.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_server_denial_passes_through() {
        let backend = FakeIdeas {
            fail_with: Some(AppError::Forbidden),
            ..Default::default()
        };
        let ideas = ManageIdeas::new(&backend, session_as(Some(("7", "user")), FUTURE));
        let mine = idea("2", "Old", 0, "7");
        assert_eq!(ideas.delete(&mine).await.unwrap_err(), AppError::Forbidden);
    }

    #[tokio::test]
    async fn test_my_votes_replaces_ledger() {
        let backend = FakeIdeas {
            ideas: vec![idea("3", "C", 1, "1"), idea("4", "D", 2, "1")],
            ..Default::default()
        };
        let session = session_as(Some(("7", "user")), FUTURE);
        session.ledger().add_vote("1");

        let voted = ManageIdeas::new(&backend, session.clone())
            .my_votes()
            .await
            .unwrap();

        assert_eq!(voted.len(), 2);
        let expected: BTreeSet<String> = ["3", "4"].iter().map(|s| s.to_string()).collect();
        assert_eq!(session.ledger().voted_ideas(), expected);
    }

    #[tokio::test]
    async fn test_report() {
        let backend = FakeIdeas::default();
        let report = ManageIdeas::new(&backend, session_as(None, FUTURE))
            .report("42")
            .await
            .unwrap();
        assert_eq!(report.votes_count, 2);
        assert_eq!(report.voters.len(), 2);
    }

    #[test]
    fn test_search() {
        let ideas = vec![idea("1", "Bike lanes", 0, "1"), idea("2", "More parks", 0, "1")];
        assert_eq!(search(&ideas, "BIKE").len(), 1);
        assert_eq!(search(&ideas, "someone").len(), 2);
        assert_eq!(search(&ideas, "  ").len(), 2);
        assert!(search(&ideas, "trains").is_empty());
    }
}
