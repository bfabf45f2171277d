//! Scenario tests for the identity crate
//! In-memory store, scripted VK introspection, real token codec.

#[cfg(test)]
mod support {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::application::{AuthConfig, LaunchParamsVerifier, TokenCodec, VkConfig};
    use crate::domain::provider::{TokenCheck, TokenInfo, TokenIntrospector};
    use crate::error::AuthResult;

    pub const LAUNCH_SECRET: &str = "wvl68m4dR1UpLrVRli";

    /// Signed for `vk_user_id=494075` with `LAUNCH_SECRET`
    pub const LAUNCH_PAYLOAD: &str = "vk_access_token_settings=notify&vk_app_id=6736218\
        &vk_are_notifications_enabled=0&vk_is_app_user=1&vk_is_favorite=0&vk_language=ru\
        &vk_platform=desktop_web&vk_ref=other&vk_ts=1700000000&vk_user_id=494075\
        &sign=N3NBJA3OkOfuYu_Mm85APIEhe6Q8AYfkkAt1JmqgnO4";

    /// Introspection double that answers every call with the same envelope
    pub struct ScriptedVk(pub TokenCheck);

    impl ScriptedVk {
        pub fn valid(vk_user_id: i64) -> Self {
            Self(TokenCheck {
                response: Some(TokenInfo {
                    success: 1,
                    date: 1_700_000_000,
                    expire: 0,
                    user_id: vk_user_id,
                }),
                error: None,
            })
        }
    }

    impl TokenIntrospector for ScriptedVk {
        async fn check_token(&self, _access_token: &str) -> AuthResult<TokenCheck> {
            Ok(self.0.clone())
        }
    }

    pub fn config() -> AuthConfig {
        AuthConfig {
            token_secret: b"scenario-token-secret".to_vec(),
            token_ttl: Duration::from_secs(3600),
            password_pepper: Some(b"scenario-pepper".to_vec()),
            vk: VkConfig {
                launch_params_secret: LAUNCH_SECRET.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn tokens(config: &AuthConfig) -> Arc<TokenCodec> {
        Arc::new(TokenCodec::from_config(config))
    }

    pub fn launch_params(config: &AuthConfig) -> Arc<LaunchParamsVerifier> {
        Arc::new(LaunchParamsVerifier::from_config(&config.vk))
    }
}

#[cfg(test)]
mod credential_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::{RegisterInput, RegisterUseCase, SignInInput, SignInUseCase};
    use crate::domain::value_object::user_role::UserRole;
    use crate::error::AuthError;
    use crate::infra::MemoryIdentityStore;

    fn register_input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn sign_in_input(email: &str, password: &str) -> SignInInput {
        SignInInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login_token_carries_user_id() {
        let config = Arc::new(config());
        let store = Arc::new(MemoryIdentityStore::new());
        let tokens = tokens(&config);

        let user = RegisterUseCase::new(store.clone(), config.clone())
            .execute(register_input("alice@example.com", "correct horse"))
            .await
            .unwrap();
        assert_eq!(user.user_role, UserRole::User);
        assert!(user.password_hash.is_some());

        let signed_in = SignInUseCase::new(store, tokens.clone(), config)
            .execute(sign_in_input("Alice@Example.com", "correct horse"))
            .await
            .unwrap();

        let claims = tokens.verify(&signed_in.token).unwrap();
        assert_eq!(claims.user_id(), user.user_id);
        assert_eq!(claims.role, UserRole::User);
        assert_eq!(signed_in.user.user_id, user.user_id);
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let config = Arc::new(config());
        let use_case = RegisterUseCase::new(Arc::new(MemoryIdentityStore::new()), config);

        use_case
            .execute(register_input("bob@example.com", "first password"))
            .await
            .unwrap();
        let again = use_case
            .execute(register_input("BOB@example.com", "second password"))
            .await;

        assert!(matches!(again, Err(AuthError::UserExists)));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let use_case =
            RegisterUseCase::new(Arc::new(MemoryIdentityStore::new()), Arc::new(config()));

        assert!(matches!(
            use_case.execute(register_input("not-an-email", "password")).await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            use_case.execute(register_input("c@example.com", "   ")).await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_login_outcomes_stay_distinct() {
        let config = Arc::new(config());
        let store = Arc::new(MemoryIdentityStore::new());
        RegisterUseCase::new(store.clone(), config.clone())
            .execute(register_input("carol@example.com", "right password"))
            .await
            .unwrap();

        let sign_in = SignInUseCase::new(store, tokens(&config), config);

        assert!(matches!(
            sign_in
                .execute(sign_in_input("nobody@example.com", "right password"))
                .await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            sign_in
                .execute(sign_in_input("carol@example.com", "wrong password"))
                .await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}

#[cfg(test)]
mod social_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::social::access_token::{EXPIRED_TOKEN_MSG, INVALID_TOKEN_MSG};
    use crate::application::{SocialSignInUseCase, VkProfileUseCase};
    use crate::domain::provider::{ProviderApiError, TokenCheck};
    use crate::domain::value_object::social_identity::SocialProvider;
    use crate::domain::value_object::user_role::UserRole;
    use crate::error::AuthError;
    use crate::infra::MemoryIdentityStore;

    fn use_case(
        store: Arc<MemoryIdentityStore>,
        vk: ScriptedVk,
    ) -> SocialSignInUseCase<MemoryIdentityStore, ScriptedVk> {
        let config = config();
        SocialSignInUseCase::new(store, Arc::new(vk), launch_params(&config), tokens(&config))
    }

    fn failing(msg: &str) -> ScriptedVk {
        ScriptedVk(TokenCheck {
            response: None,
            error: Some(ProviderApiError {
                error_code: 15,
                error_msg: msg.to_string(),
            }),
        })
    }

    #[tokio::test]
    async fn test_access_token_login_creates_then_reuses_user() {
        let store = Arc::new(MemoryIdentityStore::new());
        let social = use_case(store.clone(), ScriptedVk::valid(494075));

        let first = social.with_access_token("vk-user-token").await.unwrap();
        let second = social.with_access_token("vk-user-token").await.unwrap();

        assert_eq!(first.user.user_id, second.user.user_id);
        assert_eq!(first.user.user_role, UserRole::User);
        assert!(first.user.email.is_none());

        let users = store.users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].social_logins.len(), 1);
    }

    #[tokio::test]
    async fn test_both_flows_link_the_same_identity() {
        let store = Arc::new(MemoryIdentityStore::new());
        let social = use_case(store.clone(), ScriptedVk::valid(494075));

        let by_token = social.with_access_token("vk-user-token").await.unwrap();
        let by_params = social.with_launch_params(LAUNCH_PAYLOAD).await.unwrap();

        assert_eq!(by_token.user.user_id, by_params.user.user_id);
        assert_eq!(store.users().unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_first_logins_yield_one_user() {
        let store = Arc::new(MemoryIdentityStore::new());
        let social = Arc::new(use_case(store.clone(), ScriptedVk::valid(777)));

        let a = tokio::spawn({
            let social = social.clone();
            async move { social.with_access_token("token-a").await }
        });
        let b = tokio::spawn({
            let social = social.clone();
            async move { social.with_access_token("token-b").await }
        });
        let (a, b) = tokio::join!(a, b);
        let (a, b) = (a.unwrap().unwrap(), b.unwrap().unwrap());

        assert_eq!(a.user.user_id, b.user.user_id);
        let users = store.users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].social_logins.len(), 1);

        let codec = tokens(&config());
        assert_eq!(codec.verify(&a.token).unwrap().user_id(), a.user.user_id);
        assert_eq!(codec.verify(&b.token).unwrap().user_id(), a.user.user_id);
    }

    #[tokio::test]
    async fn test_provider_rejections_create_nothing() {
        let store = Arc::new(MemoryIdentityStore::new());

        let invalid = use_case(store.clone(), failing(INVALID_TOKEN_MSG));
        assert!(matches!(
            invalid.with_access_token("t").await,
            Err(AuthError::BadProviderToken)
        ));

        let expired = use_case(store.clone(), failing(EXPIRED_TOKEN_MSG));
        assert!(matches!(
            expired.with_access_token("t").await,
            Err(AuthError::ProviderTokenExpired)
        ));

        let broken = use_case(store.clone(), failing("Internal server error"));
        assert!(matches!(
            broken.with_access_token("t").await,
            Err(AuthError::Provider(_))
        ));

        assert!(store.users().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tampered_launch_params() {
        let store = Arc::new(MemoryIdentityStore::new());
        let social = use_case(store.clone(), ScriptedVk::valid(1));

        let tampered = LAUNCH_PAYLOAD.replace("vk_ts=1700000000", "vk_ts=1700000001");
        assert!(matches!(
            social.with_launch_params(&tampered).await,
            Err(AuthError::BadLaunchParams)
        ));
        assert!(store.users().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_vk_profile_lookup() {
        let store = Arc::new(MemoryIdentityStore::new());
        let signed_in = use_case(store.clone(), ScriptedVk::valid(1))
            .with_launch_params(LAUNCH_PAYLOAD)
            .await
            .unwrap();

        let profile = VkProfileUseCase::new(store.clone())
            .execute(signed_in.user.user_id)
            .await
            .unwrap();
        assert_eq!(profile.vk_id, 494075);
        assert_eq!(
            signed_in.user.social_login(SocialProvider::Vk).map(|s| s.subject_id.as_str()),
            Some("494075")
        );

        let unknown = crate::domain::value_object::user_id::UserId::from_i64(9999);
        assert!(matches!(
            VkProfileUseCase::new(store).execute(unknown).await,
            Err(AuthError::UserNotFound)
        ));
    }
}

#[cfg(test)]
mod admin_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::{
        AdminUseCase, CreateAdminInput, SignInInput, SignInUseCase, SuperAdminConfig,
        bootstrap_superadmin,
    };
    use crate::domain::value_object::user_role::UserRole;
    use crate::error::AuthError;
    use crate::infra::MemoryIdentityStore;

    #[tokio::test]
    async fn test_bootstrap_twice_keeps_one_superadmin_with_latest_password() {
        let config = Arc::new(config());
        let store = Arc::new(MemoryIdentityStore::new());

        for password in ["first-root-password", "second-root-password"] {
            bootstrap_superadmin(
                store.as_ref(),
                &SuperAdminConfig {
                    email: "root@example.com".to_string(),
                    password: password.to_string(),
                },
                config.pepper(),
            )
            .await
            .unwrap();
        }

        let supers: Vec<_> = store
            .users()
            .unwrap()
            .into_iter()
            .filter(|u| u.user_role == UserRole::SuperAdmin)
            .collect();
        assert_eq!(supers.len(), 1);

        let sign_in = SignInUseCase::new(store, tokens(&config), config);
        let login = |password: &str| SignInInput {
            email: "root@example.com".to_string(),
            password: password.to_string(),
        };

        assert!(matches!(
            sign_in.execute(login("first-root-password")).await,
            Err(AuthError::InvalidCredentials)
        ));
        let signed_in = sign_in.execute(login("second-root-password")).await.unwrap();
        assert_eq!(signed_in.user.user_role, UserRole::SuperAdmin);
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_bad_operator_input() {
        let store = MemoryIdentityStore::new();
        let result = bootstrap_superadmin(
            &store,
            &SuperAdminConfig {
                email: "not an email".to_string(),
                password: "whatever".to_string(),
            },
            None,
        )
        .await;

        assert!(matches!(result, Err(AuthError::Validation(_))));
        assert!(store.users().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_admin_lifecycle() {
        let config = Arc::new(config());
        let admins = AdminUseCase::new(Arc::new(MemoryIdentityStore::new()), config);

        let admin = admins
            .create(CreateAdminInput {
                email: "admin@example.com".to_string(),
                password: "admin password".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(admin.user_role, UserRole::Admin);

        assert!(matches!(
            admins
                .create(CreateAdminInput {
                    email: "admin@example.com".to_string(),
                    password: "other password".to_string(),
                })
                .await,
            Err(AuthError::UserExists)
        ));

        let listed = admins.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_id, admin.user_id);

        admins.delete(admin.user_id).await.unwrap();
        // Deleting again is not an error
        admins.delete(admin.user_id).await.unwrap();
        assert!(admins.list().await.unwrap().is_empty());
    }
}

#[cfg(test)]
mod http_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::support::*;
    use crate::application::{SuperAdminConfig, bootstrap_superadmin};
    use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
    use crate::infra::MemoryIdentityStore;
    use crate::presentation::{IdentityState, identity_router};

    fn state() -> IdentityState<MemoryIdentityStore, ScriptedVk> {
        IdentityState::new(MemoryIdentityStore::new(), ScriptedVk::valid(494075), config())
    }

    fn bearer(state: &IdentityState<MemoryIdentityStore, ScriptedVk>, role: UserRole) -> String {
        let token = state.tokens.issue(UserId::from_i64(1), role).unwrap();
        format!("Bearer {token}")
    }

    async fn send(router: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn get(uri: &str, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_no_token_is_rejected_before_role_check() {
        let (status, body) = send(identity_router(state()), get("/admin", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Access denied. No token provided");
    }

    #[tokio::test]
    async fn test_bad_scheme_is_rejected() {
        let (status, body) =
            send(identity_router(state()), get("/admin", Some("Token abc"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Invalid token format");
    }

    #[tokio::test]
    async fn test_wrong_role_is_forbidden() {
        let state = state();
        let auth = bearer(&state, UserRole::Admin);
        let (status, _) = send(identity_router(state), get("/admin", Some(&auth))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_superadmin_lists_admins() {
        let state = state();
        let auth = bearer(&state, UserRole::SuperAdmin);
        let (status, body) = send(identity_router(state), get("/admin", Some(&auth))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_delete_unknown_admin_is_not_an_error() {
        let state = state();
        let auth = bearer(&state, UserRole::SuperAdmin);
        let req = Request::builder()
            .method("DELETE")
            .uri("/admin/4242")
            .header(header::AUTHORIZATION, auth)
            .body(Body::empty())
            .unwrap();

        let (status, _) = send(identity_router(state), req).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_garbled_body_renders_problem_details() {
        let req = Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"email\": "))
            .unwrap();

        let (status, body) = send(identity_router(state()), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert!(body["detail"].as_str().unwrap().starts_with("Validation failed"));
    }

    #[tokio::test]
    async fn test_body_without_content_type_renders_problem_details() {
        let req = Request::builder()
            .method("POST")
            .uri("/register")
            .body(Body::from(r#"{"email":"a@example.com","password":"pw"}"#))
            .unwrap();

        let (status, body) = send(identity_router(state()), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["title"], "Bad Request");
    }

    #[tokio::test]
    async fn test_missing_field_renders_problem_details() {
        let (status, body) = send(
            identity_router(state()),
            post_json("/login/vk", serde_json::json!({ "token": "abc" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("vkAccessToken"));
    }

    #[tokio::test]
    async fn test_register_and_login_over_http() {
        let router = identity_router(state());
        let credentials = serde_json::json!({
            "email": "dave@example.com",
            "password": "dave password",
        });

        let (status, body) = send(router.clone(), post_json("/register", credentials.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["role"], "user");
        assert!(body.get("pass_hash").is_none());

        let (status, _) = send(router.clone(), post_json("/register", credentials.clone())).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(router, post_json("/login", credentials)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn test_vk_flows_over_http() {
        let state = state();
        let tokens = state.tokens.clone();
        let router = identity_router(state);

        let (status, body) = send(
            router.clone(),
            post_json("/login/vk", serde_json::json!({ "vkAccessToken": "abc" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();
        let uid = tokens.verify(&token).unwrap().uid;

        let (status, body) = send(
            router.clone(),
            post_json(
                "/login/vk/launch",
                serde_json::json!({ "launchParams": LAUNCH_PAYLOAD }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let same = tokens.verify(body["token"].as_str().unwrap()).unwrap().uid;
        assert_eq!(uid, same);

        let auth = format!("Bearer {token}");
        let (status, body) = send(
            router,
            get(&format!("/profile/{uid}/vk"), Some(&auth)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vk_id"], 494075);
        assert_eq!(body["user_id"], uid);
    }

    #[tokio::test]
    async fn test_bootstrapped_superadmin_can_manage_admins() {
        let state = state();
        bootstrap_superadmin(
            state.store.as_ref(),
            &SuperAdminConfig {
                email: "root@example.com".to_string(),
                password: "root password".to_string(),
            },
            state.config.pepper(),
        )
        .await
        .unwrap();
        let router = identity_router(state);

        let (_, body) = send(
            router.clone(),
            post_json(
                "/login",
                serde_json::json!({ "email": "root@example.com", "password": "root password" }),
            ),
        )
        .await;
        let auth = format!("Bearer {}", body["token"].as_str().unwrap());

        let req = Request::builder()
            .method("POST")
            .uri("/admin")
            .header(header::AUTHORIZATION, &auth)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({ "email": "ops@example.com", "password": "ops password" })
                    .to_string(),
            ))
            .unwrap();
        let (status, body) = send(router.clone(), req).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["role"], "admin");

        let (status, body) = send(router, get("/admin", Some(&auth))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }
}
