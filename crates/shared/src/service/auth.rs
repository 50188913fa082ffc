use crate::{
    abstract_trait::{
        AuthServiceTrait, DynIdentityProvider, DynSessionStore, DynUserCommandRepository,
        DynUserQueryRepository, NewUser,
    },
    domain::{
        requests::{LoginRequest, RegisterRequest},
        responses::{ApiResponse, UserResponse},
        session::UserSession,
    },
    errors::ServiceError,
    service::email::Notifier,
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

pub struct AuthService {
    identity: DynIdentityProvider,
    user_query: DynUserQueryRepository,
    user_command: DynUserCommandRepository,
    session_store: DynSessionStore,
    notifier: Notifier,
}

pub struct AuthServiceDeps {
    pub identity: DynIdentityProvider,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub session_store: DynSessionStore,
    pub notifier: Notifier,
}

impl AuthService {
    pub fn new(deps: AuthServiceDeps) -> Self {
        let AuthServiceDeps {
            identity,
            user_query,
            user_command,
            session_store,
            notifier,
        } = deps;

        Self {
            identity,
            user_query,
            user_command,
            session_store,
            notifier,
        }
    }
}

fn name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        if req.password != req.confirm_password {
            return Err(ServiceError::Validation(vec![
                "Passwords do not match".to_string(),
            ]));
        }

        let provider_user = self.identity.sign_up(&req.email, &req.password).await?;

        let name = name_from_email(&req.email);
        let user = self
            .user_command
            .create_user(&NewUser {
                provider_user_id: provider_user.id,
                name: name.clone(),
                email: req.email.clone(),
                role: "user".to_string(),
                provider: "email".to_string(),
            })
            .await?;

        self.notifier.send_welcome(&user.email, &name);

        info!("✅ Registered user ID {} ({})", user.user_id, user.email);

        Ok(ApiResponse::success(
            "Registration successful. Please login.",
            UserResponse::from(user),
        ))
    }

    async fn login(
        &self,
        session_id: &str,
        req: &LoginRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let provider_user = self.identity.sign_in(&req.email, &req.password).await?;

        let user = self
            .user_query
            .find_by_provider_id(&provider_user.id)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Account not found".to_string()))?;

        let mut session = self.session_store.load(session_id).await?;
        session.user = Some(UserSession {
            id: user.user_id,
            provider_user_id: user.provider_user_id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            login_time: Utc::now(),
        });
        self.session_store.save(session_id, &session).await?;

        self.notifier.send_login_notice(&user.email, &user.name);

        info!("✅ User ID {} logged in", user.user_id);

        Ok(ApiResponse::success(
            "Login successful",
            UserResponse::from(user),
        ))
    }

    async fn logout(&self, session_id: &str) -> Result<ApiResponse<()>, ServiceError> {
        let mut session = self.session_store.load(session_id).await?;

        // Only the user summary goes; the cart deliberately survives logout.
        session.user = None;
        self.session_store.save(session_id, &session).await?;

        Ok(ApiResponse::success("Logged out", ()))
    }

    async fn me(&self, session_id: &str) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let session = self.session_store.load(session_id).await?;

        let user = session
            .user
            .as_ref()
            .ok_or_else(|| ServiceError::Unauthorized("Not logged in".to_string()))?;

        Ok(ApiResponse::success(
            "Session user fetched successfully",
            UserResponse::from(user),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{
            DynEmailService, EmailServiceTrait, IdentityProviderTrait, SessionStoreTrait,
            UserCommandRepositoryTrait, UserQueryRepositoryTrait,
        },
        domain::{requests::EmailRequest, responses::ProviderUser, session::SessionData},
        errors::RepositoryError,
        model::User,
    };
    use std::{collections::HashMap, sync::Arc};
    use tokio::sync::Mutex;

    struct InMemorySessionStore {
        sessions: Mutex<HashMap<String, SessionData>>,
    }

    impl InMemorySessionStore {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sessions: Mutex::new(HashMap::new()),
            })
        }
    }

    #[async_trait]
    impl SessionStoreTrait for InMemorySessionStore {
        async fn load(&self, session_id: &str) -> Result<SessionData, ServiceError> {
            Ok(self
                .sessions
                .lock()
                .await
                .get(session_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn save(&self, session_id: &str, data: &SessionData) -> Result<(), ServiceError> {
            self.sessions
                .lock()
                .await
                .insert(session_id.to_string(), data.clone());
            Ok(())
        }

        async fn delete(&self, session_id: &str) -> Result<(), ServiceError> {
            self.sessions.lock().await.remove(session_id);
            Ok(())
        }
    }

    struct FakeIdentity;

    #[async_trait]
    impl IdentityProviderTrait for FakeIdentity {
        async fn sign_up(
            &self,
            email: &str,
            _password: &str,
        ) -> Result<ProviderUser, ServiceError> {
            Ok(ProviderUser {
                id: format!("prov-{email}"),
                email: email.to_string(),
            })
        }

        async fn sign_in(
            &self,
            email: &str,
            password: &str,
        ) -> Result<ProviderUser, ServiceError> {
            if password == "secret123" {
                Ok(ProviderUser {
                    id: format!("prov-{email}"),
                    email: email.to_string(),
                })
            } else {
                Err(ServiceError::InvalidCredentials)
            }
        }
    }

    #[derive(Default)]
    struct FakeUsers {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserQueryRepositoryTrait for FakeUsers {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
            Ok(self
                .users
                .lock()
                .await
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn find_by_provider_id(
            &self,
            provider_user_id: &str,
        ) -> Result<Option<User>, RepositoryError> {
            Ok(self
                .users
                .lock()
                .await
                .iter()
                .find(|u| u.provider_user_id == provider_user_id)
                .cloned())
        }
    }

    #[async_trait]
    impl UserCommandRepositoryTrait for FakeUsers {
        async fn create_user(&self, user: &NewUser) -> Result<User, RepositoryError> {
            let mut users = self.users.lock().await;
            let model = User {
                user_id: users.len() as i32 + 1,
                provider_user_id: user.provider_user_id.clone(),
                name: user.name.clone(),
                email: user.email.clone(),
                role: user.role.clone(),
                provider: user.provider.clone(),
                created_at: None,
                updated_at: None,
            };
            users.push(model.clone());
            Ok(model)
        }
    }

    struct NullMailer;

    #[async_trait]
    impl EmailServiceTrait for NullMailer {
        async fn send(&self, _req: &EmailRequest) -> Result<(), ServiceError> {
            Ok(())
        }
    }

    fn service(
        users: Arc<FakeUsers>,
        sessions: Arc<InMemorySessionStore>,
    ) -> AuthService {
        AuthService::new(AuthServiceDeps {
            identity: Arc::new(FakeIdentity),
            user_query: users.clone() as DynUserQueryRepository,
            user_command: users as DynUserCommandRepository,
            session_store: sessions as DynSessionStore,
            notifier: Notifier::new(
                Arc::new(NullMailer) as DynEmailService,
                "http://localhost:8080".to_string(),
            ),
        })
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            email: "jane@example.com".to_string(),
            password: "secret123".to_string(),
            confirm_password: "secret123".to_string(),
        }
    }

    #[tokio::test]
    async fn register_creates_a_local_user_row() {
        let users = Arc::new(FakeUsers::default());
        let svc = service(users.clone(), InMemorySessionStore::new());

        let response = svc.register(&register_request()).await.unwrap();

        assert_eq!(response.data.name, "jane");
        assert_eq!(response.data.role, "user");
        assert_eq!(users.users.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn register_rejects_mismatched_passwords() {
        let svc = service(Arc::new(FakeUsers::default()), InMemorySessionStore::new());

        let err = svc
            .register(&RegisterRequest {
                confirm_password: "different".to_string(),
                ..register_request()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn login_stores_the_user_summary_in_the_session() {
        let users = Arc::new(FakeUsers::default());
        let sessions = InMemorySessionStore::new();
        let svc = service(users.clone(), sessions.clone());
        svc.register(&register_request()).await.unwrap();

        svc.login(
            "sid",
            &LoginRequest {
                email: "jane@example.com".to_string(),
                password: "secret123".to_string(),
            },
        )
        .await
        .unwrap();

        let session = sessions.load("sid").await.unwrap();
        let user = session.user.unwrap();
        assert_eq!(user.email, "jane@example.com");
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn logout_keeps_the_cart() {
        let users = Arc::new(FakeUsers::default());
        let sessions = InMemorySessionStore::new();
        let svc = service(users.clone(), sessions.clone());
        svc.register(&register_request()).await.unwrap();
        svc.login(
            "sid",
            &LoginRequest {
                email: "jane@example.com".to_string(),
                password: "secret123".to_string(),
            },
        )
        .await
        .unwrap();

        let mut session = sessions.load("sid").await.unwrap();
        session.cart.insert(
            1,
            crate::domain::session::CartLine {
                name: "Runner".into(),
                description: String::new(),
                price: 100000,
                quantity: 1,
                image_url: String::new(),
                stock: 5,
            },
        );
        sessions.save("sid", &session).await.unwrap();

        svc.logout("sid").await.unwrap();

        let session = sessions.load("sid").await.unwrap();
        assert!(session.user.is_none());
        assert_eq!(session.cart.len(), 1);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let users = Arc::new(FakeUsers::default());
        let svc = service(users, InMemorySessionStore::new());
        svc.register(&register_request()).await.unwrap();

        let err = svc
            .login(
                "sid",
                &LoginRequest {
                    email: "jane@example.com".to_string(),
                    password: "nope".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidCredentials));
    }
}
