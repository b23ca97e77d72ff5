use models::User;

use crate::api::DirectoryApi;
use crate::error::ClientError;

/// Current contents of the name/email inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub name: String,
    pub email: String,
}

/// Client-side state of the directory screen.
///
/// The displayed list is reconciled from each response rather than by
/// re-fetching. At most one error message is held; the next failure replaces
/// it and the next success clears it.
pub struct DirectoryView<A> {
    api: A,
    users: Vec<User>,
    form: Form,
    // record being edited; `None` means the form creates
    editing: Option<User>,
    error: Option<String>,
}

impl<A: DirectoryApi> DirectoryView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            users: Vec::new(),
            form: Form::default(),
            editing: None,
            error: None,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Identifier of the record being edited, if any.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().map(|u| u.id.as_str())
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    /// Initial fetch of the whole list.
    pub async fn load(&mut self) {
        match self.api.list().await {
            Ok(users) => self.users = users,
            Err(error) => self.fail(error),
        }
    }

    /// Create or update depending on the mode.
    pub async fn submit(&mut self) {
        match self.editing.clone() {
            None => self.create().await,
            Some(original) => self.update(original).await,
        }
    }

    async fn create(&mut self) {
        let user = User::new(next_id(), self.form.name.clone(), self.form.email.clone());
        match self.api.create(&user).await {
            Ok(created) => {
                self.users.push(created);
                self.form = Form::default();
                self.error = None;
            }
            Err(error) => self.fail(error),
        }
    }

    async fn update(&mut self, original: User) {
        let user = User {
            name: self.form.name.clone(),
            email: self.form.email.clone(),
            ..original
        };
        match self.api.update(&user.id, &user).await {
            Ok(updated) => {
                for entry in self.users.iter_mut().filter(|u| u.id == user.id) {
                    *entry = updated.clone();
                }
                self.form = Form::default();
                self.editing = None;
                self.error = None;
            }
            Err(error) => self.fail(error),
        }
    }

    /// Switch to edit mode for the record at `index`. Returns false if there is none.
    pub fn begin_edit(&mut self, index: usize) -> bool {
        let Some(user) = self.users.get(index) else {
            return false;
        };
        self.form = Form {
            name: user.name.clone(),
            email: user.email.clone(),
        };
        self.editing = Some(user.clone());
        true
    }

    pub fn cancel_edit(&mut self) {
        self.form = Form::default();
        self.editing = None;
    }

    /// Delete the record at `index`. Returns false if there is none.
    pub async fn delete(&mut self, index: usize) -> bool {
        let Some(id) = self.users.get(index).map(|u| u.id.clone()) else {
            return false;
        };
        match self.api.delete(&id).await {
            Ok(()) => {
                self.users.retain(|u| u.id != id);
                self.error = None;
            }
            Err(error) => self.fail(error),
        }
        true
    }

    fn fail(&mut self, error: ClientError) {
        tracing::debug!(?error, "directory request failed");
        self.error = Some(error.to_string());
    }
}

/// Millisecond timestamp; not unique across fast repeated submits.
fn next_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}
