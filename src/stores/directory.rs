use crate::models::user::User;
use uuid::Uuid;

/// Ordered in-memory sequence of user records.
/// Insertion order is the order `window` pages over.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self { users: Vec::new() }
    }

    pub fn from_users(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Get a user by id. Linear scan.
    pub fn get(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.id == id)
    }

    /// Get a user by login. Linear scan.
    pub fn get_by_login(&self, login: &str) -> Option<&User> {
        self.users.iter().find(|user| user.login == login)
    }

    /// Whether `login` is held by a record other than `except`
    pub fn login_taken(&self, login: &str, except: Option<Uuid>) -> bool {
        self.users
            .iter()
            .any(|user| user.login == login && Some(user.id) != except)
    }

    /// Append a user at the end of the sequence
    pub fn push(&mut self, user: User) {
        self.users.push(user);
    }

    /// Remove a user by id, returning it if it existed
    pub fn remove(&mut self, id: Uuid) -> Option<User> {
        let index = self.users.iter().position(|user| user.id == id)?;
        Some(self.users.remove(index))
    }

    /// Records in `[offset, offset + limit)`, clamped to the sequence
    pub fn window(&self, offset: usize, limit: usize) -> &[User] {
        let start = offset.min(self.users.len());
        let end = start.saturating_add(limit).min(self.users.len());
        &self.users[start..end]
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
