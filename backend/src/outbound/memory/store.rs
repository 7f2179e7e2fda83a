//! Mutex-guarded collections implementing the repository ports.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    ProjectRepository, TagRepository, TaskRepository, TeamRepository, UserPersistenceError,
    UserRepository, WorkspacePersistenceError,
};
use crate::domain::{
    EmailAddress, NewProject, NewTag, NewTask, NewTeam, Project, ProjectId, Tag, TagId, Task,
    TaskId, Team, TeamId, User, UserAccount, UserId,
};

struct StoredTask {
    id: TaskId,
    fields: NewTask,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    accounts: Vec<UserAccount>,
    projects: Vec<Project>,
    teams: Vec<Team>,
    tags: Vec<Tag>,
    tasks: Vec<StoredTask>,
}

impl State {
    fn user(&self, id: &UserId) -> Option<&User> {
        self.accounts
            .iter()
            .map(UserAccount::user)
            .find(|user| user.id() == id)
    }

    fn hydrate(&self, stored: &StoredTask) -> Task {
        Task {
            id: stored.id,
            name: stored.fields.name.clone(),
            project: stored.fields.project,
            team: stored.fields.team,
            owners: stored
                .fields
                .owners
                .iter()
                .filter_map(|id| self.user(id).cloned())
                .collect(),
            tags: stored.fields.tags.clone(),
            time_to_complete: stored.fields.time_to_complete,
            status: stored.fields.status,
            created_at: stored.created_at,
            updated_at: stored.created_at,
        }
    }
}

/// Shared in-memory store. Clones share the same collections.
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryStore {
    /// Empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, account: &UserAccount) -> Result<User, UserPersistenceError> {
        let mut state = self.lock();
        let email = account.user().email();
        if state
            .accounts
            .iter()
            .any(|existing| existing.user().email() == email)
        {
            return Err(UserPersistenceError::duplicate_email(email.as_ref()));
        }
        state.accounts.push(account.clone());
        Ok(account.user().clone())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self
            .lock()
            .accounts
            .iter()
            .find(|account| account.user().email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().user(id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .accounts
            .iter()
            .map(|account| account.user().clone())
            .collect())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Project>, WorkspacePersistenceError> {
        Ok(self.lock().projects.clone())
    }

    async fn create(&self, project: &NewProject) -> Result<Project, WorkspacePersistenceError> {
        let mut state = self.lock();
        if state.projects.iter().any(|p| p.name == project.name) {
            return Err(WorkspacePersistenceError::duplicate("name"));
        }
        let record = Project {
            id: ProjectId::random(),
            name: project.name.clone(),
            description: project.description.clone(),
            status: project.status,
            created_at: self.clock.utc(),
        };
        state.projects.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Team>, WorkspacePersistenceError> {
        Ok(self.lock().teams.clone())
    }

    async fn create(&self, team: &NewTeam) -> Result<Team, WorkspacePersistenceError> {
        let mut state = self.lock();
        if state.teams.iter().any(|t| t.name == team.name) {
            return Err(WorkspacePersistenceError::duplicate("name"));
        }
        let record = Team {
            id: TeamId::random(),
            name: team.name.clone(),
            description: team.description.clone(),
            created_at: self.clock.utc(),
        };
        state.teams.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Tag>, WorkspacePersistenceError> {
        Ok(self.lock().tags.clone())
    }

    async fn create(&self, tag: &NewTag) -> Result<Tag, WorkspacePersistenceError> {
        let mut state = self.lock();
        if state.tags.iter().any(|t| t.name == tag.name) {
            return Err(WorkspacePersistenceError::duplicate("name"));
        }
        let record = Tag {
            id: TagId::random(),
            name: tag.name.clone(),
            created_at: self.clock.utc(),
        };
        state.tags.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Task>, WorkspacePersistenceError> {
        let state = self.lock();
        Ok(state.tasks.iter().map(|task| state.hydrate(task)).collect())
    }

    async fn create(&self, task: &NewTask) -> Result<Task, WorkspacePersistenceError> {
        let mut state = self.lock();
        if !state.projects.iter().any(|p| p.id == task.project) {
            return Err(WorkspacePersistenceError::invalid_reference("project"));
        }
        if !state.teams.iter().any(|t| t.id == task.team) {
            return Err(WorkspacePersistenceError::invalid_reference("team"));
        }
        if task.owners.iter().any(|owner| state.user(owner).is_none()) {
            return Err(WorkspacePersistenceError::invalid_reference("owners"));
        }
        let stored = StoredTask {
            id: TaskId::random(),
            fields: task.clone(),
            created_at: self.clock.utc(),
        };
        let hydrated = state.hydrate(&stored);
        state.tasks.push(stored);
        Ok(hydrated)
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural parity with the PostgreSQL adapters.
    use super::*;
    use crate::domain::{PasswordDigest, TaskDraft};
    use rstest::{fixture, rstest};

    fn account(name: &str, email: &str) -> UserAccount {
        let user = User::try_from_strings(UserId::random().to_string(), name, email)
            .expect("valid user");
        UserAccount::new(user, PasswordDigest::new("$argon2id$stub"))
    }

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::default()
    }

    async fn seed_refs(store: &InMemoryStore) -> (User, Project, Team) {
        let owner = UserRepository::create(store, &account("Ada", "ada@x.com"))
            .await
            .expect("user created");
        let project = ProjectRepository::create(
            store,
            &NewProject::try_new("Website", None, None).expect("valid"),
        )
        .await
        .expect("project created");
        let team = TeamRepository::create(store, &NewTeam::try_new("Design", None).expect("valid"))
            .await
            .expect("team created");
        (owner, project, team)
    }

    fn new_task(owner: &User, project: &Project, team: &Team) -> NewTask {
        NewTask::try_from_draft(TaskDraft {
            name: "Draft wireframes",
            project: Some(project.id),
            team: Some(team.id),
            owners: vec![owner.id().clone()],
            tags: vec!["ux".to_owned()],
            time_to_complete: Some(2),
            status: None,
        })
        .expect("valid task")
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(store: InMemoryStore) {
        UserRepository::create(&store, &account("Ada", "ada@x.com"))
            .await
            .expect("first signup");
        let err = UserRepository::create(&store, &account("Other", "ada@x.com"))
            .await
            .expect_err("second signup conflicts");
        assert_eq!(err, UserPersistenceError::duplicate_email("ada@x.com"));
        assert_eq!(UserRepository::list(&store).await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_email_returns_digest(store: InMemoryStore) {
        let created = UserRepository::create(&store, &account("Ada", "ada@x.com"))
            .await
            .expect("created");
        let email = EmailAddress::new("ada@x.com").expect("valid email");
        let found = store
            .find_by_email(&email)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(found.user(), &created);
        assert_eq!(found.password_digest().as_str(), "$argon2id$stub");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_names_are_rejected(store: InMemoryStore) {
        let tag = NewTag::try_new("Urgent").expect("valid");
        TagRepository::create(&store, &tag).await.expect("first tag");
        let err = TagRepository::create(&store, &tag)
            .await
            .expect_err("duplicate tag");
        assert_eq!(err, WorkspacePersistenceError::duplicate("name"));
    }

    #[rstest]
    #[tokio::test]
    async fn task_create_hydrates_owners(store: InMemoryStore) {
        let (owner, project, team) = seed_refs(&store).await;
        let task = TaskRepository::create(&store, &new_task(&owner, &project, &team))
            .await
            .expect("task created");
        assert_eq!(task.owners, vec![owner.clone()]);

        let listed = TaskRepository::list(&store).await.expect("list");
        assert_eq!(listed, vec![task]);
    }

    #[rstest]
    #[tokio::test]
    async fn task_with_unknown_references_is_rejected(store: InMemoryStore) {
        let (owner, project, team) = seed_refs(&store).await;

        let mut missing_project = new_task(&owner, &project, &team);
        missing_project.project = ProjectId::random();
        let err = TaskRepository::create(&store, &missing_project)
            .await
            .expect_err("unknown project");
        assert_eq!(err, WorkspacePersistenceError::invalid_reference("project"));

        let mut missing_owner = new_task(&owner, &project, &team);
        missing_owner.owners.push(UserId::random());
        let err = TaskRepository::create(&store, &missing_owner)
            .await
            .expect_err("unknown owner");
        assert_eq!(err, WorkspacePersistenceError::invalid_reference("owners"));
        assert!(TaskRepository::list(&store).await.expect("list").is_empty());
    }
}
