use crate::errors::AppError;
use crate::models::{Role, User};
use crate::services::backend::{BookingBackend, Registration};

/// Forwards credentials to the backend and builds the session user. The
/// email the visitor typed becomes the owning user id for their bookings.
pub async fn login(
    backend: &dyn BookingBackend,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation("Please fill in all fields".to_string()));
    }

    let reply = backend.login(email, password).await.map_err(|e| {
        tracing::error!(error = %e, "login call failed");
        AppError::RemoteService("Network error. Please try again later.".to_string())
    })?;

    if !reply.success {
        let reason = reply.message.unwrap_or_else(|| "Unknown error".to_string());
        tracing::info!(email, reason = %reason, "login rejected");
        return Err(AppError::RemoteService(reason));
    }

    let remote = reply.user.unwrap_or_default();
    let name = remote
        .username
        .or(remote.email)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| email.to_string());
    let role = Role::parse(remote.role.as_deref().unwrap_or("user"));

    tracing::info!(email, role = role.as_str(), "visitor logged in");
    Ok(User {
        id: email.to_string(),
        name,
        role,
    })
}

pub async fn register(
    backend: &dyn BookingBackend,
    name: &str,
    email: &str,
    password: &str,
    role: Option<&str>,
) -> Result<(), AppError> {
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::Validation("Please fill in all fields".to_string()));
    }
    if !is_valid_email(email) {
        return Err(AppError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }

    let registration = Registration {
        username: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role: Role::parse(role.unwrap_or("user")).as_str().to_string(),
    };

    let reply = backend.register(&registration).await.map_err(|e| {
        tracing::error!(error = %e, "register call failed");
        AppError::RemoteService("Network error. Please try again later.".to_string())
    })?;

    if !reply.success {
        let reason = reply.reason().unwrap_or("Unknown error").to_string();
        return Err(AppError::RemoteService(reason));
    }

    tracing::info!(email, "account registered");
    Ok(())
}

/// `local@domain.tld` with no whitespace and a single `@`.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::services::backend::{
        BackendReply, LoginReply, ProposedBooking, RemoteStudio, RemoteUser,
    };

    struct ScriptedBackend {
        login: LoginReply,
        registered: Mutex<Vec<Registration>>,
    }

    impl ScriptedBackend {
        fn accepting(role: &str) -> Self {
            Self {
                login: LoginReply {
                    success: true,
                    user: Some(RemoteUser {
                        username: Some("Asha".to_string()),
                        email: None,
                        role: Some(role.to_string()),
                    }),
                    message: None,
                },
                registered: Mutex::new(vec![]),
            }
        }

        fn rejecting(message: &str) -> Self {
            Self {
                login: LoginReply {
                    success: false,
                    user: None,
                    message: Some(message.to_string()),
                },
                registered: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl BookingBackend for ScriptedBackend {
        async fn submit_booking(&self, _p: &ProposedBooking) -> anyhow::Result<BackendReply> {
            anyhow::bail!("not scripted")
        }

        async fn login(&self, _u: &str, _p: &str) -> anyhow::Result<LoginReply> {
            Ok(self.login.clone())
        }

        async fn register(&self, r: &Registration) -> anyhow::Result<BackendReply> {
            self.registered.lock().unwrap().push(r.clone());
            Ok(BackendReply {
                success: self.login.success,
                error: None,
                message: self.login.message.clone(),
            })
        }

        async fn list_studios(&self) -> anyhow::Result<Vec<RemoteStudio>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_login_builds_user_from_reply() {
        let backend = ScriptedBackend::accepting("admin");
        let user = login(&backend, " asha@example.com ", "secret").await.unwrap();
        assert_eq!(user.id, "asha@example.com");
        assert_eq!(user.name, "Asha");
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_login_requires_fields() {
        let backend = ScriptedBackend::accepting("user");
        let err = login(&backend, "", "secret").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_rejection_carries_backend_message() {
        let backend = ScriptedBackend::rejecting("Invalid credentials");
        let err = login(&backend, "asha@example.com", "nope").await.unwrap_err();
        assert!(matches!(err, AppError::RemoteService(msg) if msg == "Invalid credentials"));
    }

    #[tokio::test]
    async fn test_register_validates_email() {
        let backend = ScriptedBackend::accepting("user");
        let err = register(&backend, "Asha", "not-an-email", "pw", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(backend.registered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_forwards_normalised_role() {
        let backend = ScriptedBackend::accepting("user");
        register(&backend, "Asha", "asha@example.com", "pw", Some("superuser"))
            .await
            .unwrap();
        let sent = backend.registered.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].role, "user");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("asha@example.com"));
        assert!(is_valid_email("a.b@studio.co.in"));
        assert!(!is_valid_email("asha@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("asha@@example.com"));
        assert!(!is_valid_email("asha @example.com"));
        assert!(!is_valid_email("asha@.com"));
    }
}
