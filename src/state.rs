//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the two lazily built remote-client handles and the per-visitor
//! session store. Nothing in it is a visitor's session directly: handlers
//! resolve the visitor's own context from the request cookie.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::genai::{self, GenAiHandle};
use crate::session::store::SessionStore;
use crate::supabase::{self, AuthHandle};

/// Per-deployment settings the handlers read.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub oauth_redirect_to: Option<String>,
}

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthHandle>,
    pub genai: Arc<GenAiHandle>,
    pub sessions: SessionStore,
    pub settings: Arc<Settings>,
}

impl AppState {
    #[must_use]
    pub fn new(auth: AuthHandle, genai: GenAiHandle, sessions: SessionStore, settings: Settings) -> Self {
        Self { auth: Arc::new(auth), genai: Arc::new(genai), sessions, settings: Arc::new(settings) }
    }

    /// Production wiring: lazy remote clients built from `config`.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let server = &config.server;
        Self::new(
            supabase::auth_handle(config.credentials.clone(), server.auth_timeouts),
            genai::genai_handle(),
            SessionStore::new(Duration::from_secs(server.session_idle_ttl_secs), server.cookie_secure),
            Settings { oauth_redirect_to: server.oauth_redirect_to.clone() },
        )
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::genai::types::{Candidate, CandidateContent, Part};
    use crate::genai::{GenAiError, GenerateContent, GeneratedContent};
    use crate::supabase::{
        AuthBackend, AuthError, AuthResponse, AuthSession, AuthUser, OAuthProvider, OAuthResponse, SignUpResponse,
    };

    // =========================================================================
    // MockAuth
    // =========================================================================

    /// Scripted auth backend that counts calls.
    pub struct MockAuth {
        pub sign_in: Mutex<Option<Result<AuthResponse, AuthError>>>,
        pub sign_up: Mutex<Option<Result<SignUpResponse, AuthError>>>,
        pub oauth_error: Mutex<Option<AuthError>>,
        pub user_for_token: Mutex<Option<Result<AuthUser, AuthError>>>,
        pub calls: AtomicUsize,
        pub last_redirect_to: Mutex<Option<String>>,
    }

    impl Default for MockAuth {
        fn default() -> Self {
            Self {
                sign_in: Mutex::new(None),
                sign_up: Mutex::new(None),
                oauth_error: Mutex::new(None),
                user_for_token: Mutex::new(None),
                calls: AtomicUsize::new(0),
                last_redirect_to: Mutex::new(None),
            }
        }
    }

    impl MockAuth {
        #[must_use]
        pub fn signing_in(response: Result<AuthResponse, AuthError>) -> Self {
            let mock = Self::default();
            *mock.sign_in.lock().unwrap() = Some(response);
            mock
        }

        #[must_use]
        pub fn signing_up(response: Result<SignUpResponse, AuthError>) -> Self {
            let mock = Self::default();
            *mock.sign_up.lock().unwrap() = Some(response);
            mock
        }

        #[must_use]
        pub fn resolving_token(response: Result<AuthUser, AuthError>) -> Self {
            let mock = Self::default();
            *mock.user_for_token.lock().unwrap() = Some(response);
            mock
        }

        #[must_use]
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn unscripted() -> AuthError {
        AuthError::Request("unscripted mock call".into())
    }

    #[async_trait::async_trait]
    impl AuthBackend for MockAuth {
        async fn sign_in_with_password(&self, _email: &str, _password: &str) -> Result<AuthResponse, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sign_in.lock().unwrap().take().unwrap_or_else(|| Err(unscripted()))
        }

        async fn sign_up(&self, _email: &str, _password: &str) -> Result<SignUpResponse, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sign_up.lock().unwrap().take().unwrap_or_else(|| Err(unscripted()))
        }

        async fn sign_in_with_oauth(
            &self,
            provider: OAuthProvider,
            redirect_to: Option<&str>,
        ) -> Result<OAuthResponse, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_redirect_to.lock().unwrap() = redirect_to.map(str::to_owned);
            if let Some(err) = self.oauth_error.lock().unwrap().take() {
                return Err(err);
            }
            Ok(OAuthResponse {
                provider,
                url: format!("https://auth.test/auth/v1/authorize?provider={}", provider.as_str()),
            })
        }

        async fn get_user(&self, _access_token: &str) -> Result<AuthUser, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.user_for_token.lock().unwrap().take().unwrap_or_else(|| Err(unscripted()))
        }
    }

    /// `{user: {id: "u1", email: "a@b.com"}, session: {access_token: "tok"}}`.
    #[must_use]
    pub fn valid_sign_in() -> AuthResponse {
        AuthResponse {
            user: Some(AuthUser { id: Some("u1".into()), email: Some("a@b.com".into()) }),
            session: Some(AuthSession { access_token: "tok".into() }),
        }
    }

    // =========================================================================
    // MockGenAi
    // =========================================================================

    /// Scripted text generator that counts calls.
    pub struct MockGenAi {
        pub response: Mutex<Option<Result<GeneratedContent, GenAiError>>>,
        pub calls: AtomicUsize,
        pub last_request: Mutex<Option<(String, String)>>,
    }

    impl MockGenAi {
        #[must_use]
        pub fn replying(text: &str) -> Self {
            Self::with_response(Ok(candidate_text(text)))
        }

        #[must_use]
        pub fn with_response(response: Result<GeneratedContent, GenAiError>) -> Self {
            Self { response: Mutex::new(Some(response)), calls: AtomicUsize::new(0), last_request: Mutex::new(None) }
        }

        #[must_use]
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    /// A response carrying `text` only in the nested candidate location.
    #[must_use]
    pub fn candidate_text(text: &str) -> GeneratedContent {
        GeneratedContent {
            text: None,
            candidates: vec![Candidate {
                content: Some(CandidateContent { parts: vec![Part { text: Some(text.to_owned()) }] }),
            }],
        }
    }

    #[async_trait::async_trait]
    impl GenerateContent for MockGenAi {
        fn default_model(&self) -> &str {
            "mock-model"
        }

        async fn generate_content(&self, model: &str, prompt: &str) -> Result<GeneratedContent, GenAiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some((model.to_owned(), prompt.to_owned()));
            self.response
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(GenAiError::ApiRequest("unscripted mock call".into())))
        }
    }

    // =========================================================================
    // STATE
    // =========================================================================

    #[must_use]
    pub fn auth_handle(mock: &Arc<MockAuth>) -> AuthHandle {
        AuthHandle::ready(Arc::clone(mock) as Arc<dyn AuthBackend>)
    }

    #[must_use]
    pub fn genai_handle(mock: &Arc<MockGenAi>) -> GenAiHandle {
        GenAiHandle::ready(Arc::clone(mock) as Arc<dyn GenerateContent>)
    }

    /// A generative-AI handle whose key is never configured.
    #[must_use]
    pub fn missing_key_genai() -> GenAiHandle {
        GenAiHandle::new(|| Err(GenAiError::MissingApiKey { var: "GOOGLE_API_KEY".into() }))
    }

    /// Create a test `AppState` around the given mocks.
    #[must_use]
    pub fn test_app_state(auth: &Arc<MockAuth>, genai: GenAiHandle) -> AppState {
        AppState::new(
            auth_handle(auth),
            genai,
            SessionStore::new(Duration::from_secs(3600), false),
            Settings { oauth_redirect_to: Some("http://localhost:3000/auth/callback".into()) },
        )
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
