//! End-to-end issuance against the in-memory stores and a real JWT signer.

use std::collections::HashSet;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use time::OffsetDateTime;
use tokenward_issuance::token::{AccessTokenClaims, IdTokenClaims};
use tokenward_issuance::{
    AccessTokenType, AuthorizationCode, Client, DefaultTokenService, IssuanceConfig,
    IssuanceError, RandomHandleGenerator, RefreshTokenStorage, RequestParameters, SystemClock,
    TokenHandleStorage, TokenResponseGenerator, ValidatedScopes, ValidatedTokenRequest,
};
use tokenward_memory::{InMemoryRefreshTokenStorage, InMemoryTokenHandleStorage};

const CONFIG: &str = r#"
issuer = "https://idp.example.com"
identity_token_lifetime = "10m"

[signing]
algorithm = "HS256"
key_id = "test-key"
secret = "integration-test-secret"
"#;

const SECRET: &[u8] = b"integration-test-secret";

struct Fixture {
    generator: Arc<TokenResponseGenerator>,
    refresh_tokens: Arc<InMemoryRefreshTokenStorage>,
    token_handles: Arc<InMemoryTokenHandleStorage>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn fixture() -> Fixture {
    init_tracing();

    let config = IssuanceConfig::from_toml_str(CONFIG).expect("valid config");

    let refresh_tokens = Arc::new(InMemoryRefreshTokenStorage::new());
    let token_handles = Arc::new(InMemoryTokenHandleStorage::new());
    let token_service = DefaultTokenService::from_config(
        &config,
        token_handles.clone(),
        Arc::new(RandomHandleGenerator),
        Arc::new(SystemClock),
    )
    .expect("token service");

    let generator =
        TokenResponseGenerator::builder(Arc::new(token_service), refresh_tokens.clone()).build();

    Fixture {
        generator: Arc::new(generator),
        refresh_tokens,
        token_handles,
    }
}

fn decode_access_token(jwt: &str) -> AccessTokenClaims {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&["https://idp.example.com/resources"]);
    decode::<AccessTokenClaims>(jwt, &DecodingKey::from_secret(SECRET), &validation)
        .expect("valid access token")
        .claims
}

fn decode_identity_token(jwt: &str, client_id: &str) -> IdTokenClaims {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[client_id]);
    decode::<IdTokenClaims>(jwt, &DecodingKey::from_secret(SECRET), &validation)
        .expect("valid identity token")
        .claims
}

fn client() -> Client {
    Client::new("web-app")
        .with_access_token_lifetime(3600)
        .with_refresh_token_lifetime(1_209_600)
}

#[tokio::test]
async fn code_exchange_with_openid_and_offline_access() {
    let fx = fixture();
    let mut token_request = RequestParameters::new();
    token_request.insert("code".to_string(), "SplxlOBeZQQYbYS6WxSbIA".to_string());
    token_request.insert("nonce".to_string(), "n-0S6_WzA2Mj".to_string());
    let code = AuthorizationCode::new("alice", client(), ["openid", "profile", "offline_access"]);
    let request = ValidatedTokenRequest::authorization_code(
        code,
        ValidatedScopes::new(["openid", "profile", "offline_access"]),
    )
    .with_raw(token_request);

    let response = fx.generator.process(&request).await.unwrap();

    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.expires_in, 3600);

    let access = decode_access_token(&response.access_token);
    assert_eq!(access.iss, "https://idp.example.com");
    assert_eq!(access.sub.as_deref(), Some("alice"));
    assert_eq!(access.client_id, "web-app");
    assert_eq!(access.scope, "openid profile offline_access");
    assert_eq!(access.exp - access.iat, 3600);

    let identity = decode_identity_token(response.id_token.as_deref().unwrap(), "web-app");
    assert_eq!(identity.sub, "alice");
    assert_eq!(identity.exp - identity.iat, 600);
    assert_eq!(identity.extra["nonce"], "n-0S6_WzA2Mj");

    let handle = response.refresh_token.unwrap();
    assert_eq!(handle.len(), 43);
    let record = fx.refresh_tokens.get(&handle).await.unwrap().unwrap();
    assert_eq!(record.client_id, "web-app");
    assert_eq!(record.lifetime, 1_209_600);
    assert_eq!(record.subject(), Some("alice"));
    assert!(!record.is_expired(OffsetDateTime::now_utc()));
}

#[tokio::test]
async fn identity_token_ignores_authorization_request_parameters() {
    let fx = fixture();
    let mut authorize = RequestParameters::new();
    authorize.insert("nonce".to_string(), "from-authorize".to_string());
    let code = AuthorizationCode::new("alice", client(), ["openid"]).with_raw(authorize);
    let mut token_request = RequestParameters::new();
    token_request.insert("nonce".to_string(), "from-token-request".to_string());
    let request = ValidatedTokenRequest::authorization_code(code, ValidatedScopes::new(["openid"]))
        .with_raw(token_request);

    let response = fx.generator.process(&request).await.unwrap();

    let identity = decode_identity_token(response.id_token.as_deref().unwrap(), "web-app");
    assert_eq!(identity.extra["nonce"], "from-token-request");
}

#[tokio::test]
async fn code_exchange_without_openid() {
    let fx = fixture();
    let code = AuthorizationCode::new("alice", client(), ["api1"]);
    let request = ValidatedTokenRequest::authorization_code(code, ValidatedScopes::new(["api1"]));

    let response = fx.generator.process(&request).await.unwrap();

    assert!(response.id_token.is_none());
    assert!(response.refresh_token.is_none());
    assert!(fx.refresh_tokens.is_empty());

    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("id_token").is_none());
    assert!(json.get("refresh_token").is_none());
}

#[tokio::test]
async fn client_credentials_with_offline_access() {
    let fx = fixture();
    let request = ValidatedTokenRequest::client_credentials(
        client(),
        ValidatedScopes::from_scope_string("api1 offline_access"),
    );

    let response = fx.generator.process(&request).await.unwrap();

    let access = decode_access_token(&response.access_token);
    assert_eq!(access.sub, None);
    assert!(response.id_token.is_none());
    assert_eq!(fx.refresh_tokens.len(), 1);
}

#[tokio::test]
async fn extension_grant_with_assertion() {
    let fx = fixture();
    let request = ValidatedTokenRequest::assertion(
        "urn:ietf:params:oauth:grant-type:jwt-bearer",
        "eyJhbGciOiJSUzI1NiJ9.e30.c2ln",
        Some("svc-account".to_string()),
        client(),
        ValidatedScopes::new(["openid", "api1"]),
    );

    let response = fx.generator.process(&request).await.unwrap();

    let access = decode_access_token(&response.access_token);
    assert_eq!(access.sub.as_deref(), Some("svc-account"));
    assert!(response.id_token.is_none());
}

#[tokio::test]
async fn unsupported_grant_writes_nothing() {
    let fx = fixture();
    let request = ValidatedTokenRequest::direct(
        "refresh_token",
        Some("alice".to_string()),
        client(),
        ValidatedScopes::new(["offline_access"]),
    );

    let err = fx.generator.process(&request).await.unwrap_err();

    assert!(matches!(
        err,
        IssuanceError::UnsupportedGrantType { ref grant_type } if grant_type == "refresh_token"
    ));
    assert!(fx.refresh_tokens.is_empty());
    assert!(fx.token_handles.is_empty());
}

#[tokio::test]
async fn reference_access_token_is_stored_by_handle() {
    let fx = fixture();
    let client = client().with_access_token_type(AccessTokenType::Reference);
    let request = ValidatedTokenRequest::password("bob", client, ValidatedScopes::new(["api1"]));

    let response = fx.generator.process(&request).await.unwrap();

    let token = fx
        .token_handles
        .get(&response.access_token)
        .await
        .unwrap()
        .expect("reference token stored");
    assert_eq!(token.subject.as_deref(), Some("bob"));
    assert_eq!(token.scopes, ["api1"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_issuance_yields_unique_handles() {
    const ISSUANCES: usize = 10_000;

    let fx = fixture();
    let request = ValidatedTokenRequest::client_credentials(
        client(),
        ValidatedScopes::new(["api1", "offline_access"]),
    );

    let mut tasks = Vec::with_capacity(ISSUANCES);
    for _ in 0..ISSUANCES {
        let generator = fx.generator.clone();
        let request = request.clone();
        tasks.push(tokio::spawn(async move { generator.process(&request).await }));
    }

    let mut handles = HashSet::with_capacity(ISSUANCES);
    for task in tasks {
        let response = task.await.unwrap().unwrap();
        handles.insert(response.refresh_token.unwrap());
    }

    assert_eq!(handles.len(), ISSUANCES);
    assert_eq!(fx.refresh_tokens.len(), ISSUANCES);
}
