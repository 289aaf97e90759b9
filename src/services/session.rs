use std::collections::HashMap;

use uuid::Uuid;

use crate::models::User;

/// Logged-in visitors keyed by an opaque bearer token.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, User>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, user: User) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), user);
        token
    }

    pub fn get(&self, token: &str) -> Option<&User> {
        self.sessions.get(token)
    }

    pub fn remove(&mut self, token: &str) -> Option<User> {
        self.sessions.remove(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            name: "Asha".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn test_create_get_remove() {
        let mut sessions = SessionStore::new();
        let token = sessions.create(user("asha@example.com"));

        assert_eq!(sessions.get(&token).map(|u| u.id.as_str()), Some("asha@example.com"));
        assert!(sessions.remove(&token).is_some());
        assert!(sessions.get(&token).is_none());
        assert!(sessions.remove(&token).is_none());
    }

    #[test]
    fn test_tokens_are_distinct() {
        let mut sessions = SessionStore::new();
        let a = sessions.create(user("a@example.com"));
        let b = sessions.create(user("a@example.com"));
        assert_ne!(a, b);
    }
}
