mod common;

use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use jobboard::application::user::{
  ForgotPasswordCommand, ForgotPasswordUseCase, RegisterUserCommand, RegisterUserUseCase,
  ResetPasswordCommand, ResetPasswordUseCase, UpdateProfileCommand, UpdateProfileUseCase,
};
use jobboard::domain::user::{
  Email, ResetToken, SecurityPolicy, UserError, UserRepository, UserService,
  value_objects::ValueObjectError,
};
use jobboard::infrastructure::persistence::memory::InMemoryUserRepository;
use jobboard::infrastructure::security::{Argon2PasswordHasher, SecureTokenGenerator};

struct Accounts {
  repo: Arc<InMemoryUserRepository>,
  service: Arc<UserService>,
}

fn accounts(policy: SecurityPolicy) -> Accounts {
  let repo = Arc::new(InMemoryUserRepository::new());
  let service = Arc::new(UserService::new(
    repo.clone(),
    Arc::new(Argon2PasswordHasher::new().unwrap()),
    Arc::new(SecureTokenGenerator::new()),
    policy,
  ));
  Accounts { repo, service }
}

fn register(email: &str, password: &str, role: Option<&str>) -> RegisterUserCommand {
  RegisterUserCommand {
    name: "Jane Doe".to_string(),
    email: email.to_string(),
    password: password.to_string(),
    role: role.map(str::to_string),
    avatar: None,
  }
}

#[tokio::test]
async fn test_register_defaults_to_user_role_and_hashes_password() {
  let accounts = accounts(SecurityPolicy::default());
  let use_case = RegisterUserUseCase::new(accounts.service.clone());

  let dto = use_case
    .execute(register("Jane@Example.com", "correct horse", None))
    .await
    .unwrap();

  assert_eq!(dto.role, "user");
  assert_eq!(dto.email, "jane@example.com");

  let stored = accounts.repo.find_by_id(dto.id).await.unwrap().unwrap();
  assert!(stored.password_hash.as_str().starts_with("$argon2id$"));
  assert!(!stored.password_hash.as_str().contains("correct horse"));
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_short_passwords() {
  let accounts = accounts(SecurityPolicy::default());
  let use_case = RegisterUserUseCase::new(accounts.service.clone());

  use_case
    .execute(register("jane@example.com", "correct horse", Some("employer")))
    .await
    .unwrap();

  let duplicate = use_case
    .execute(register("JANE@example.com", "another password", None))
    .await;
  assert!(matches!(duplicate, Err(UserError::EmailAlreadyExists)));

  let short = use_case
    .execute(register("john@example.com", "short", None))
    .await;
  assert!(matches!(
    short,
    Err(UserError::Validation(ValueObjectError::PasswordTooShort { min: 8 }))
  ));

  let bad_role = use_case
    .execute(register("john@example.com", "long enough", Some("admin")))
    .await;
  assert!(matches!(
    bad_role,
    Err(UserError::Validation(ValueObjectError::InvalidRole(_)))
  ));
}

#[tokio::test]
async fn test_update_profile_checks_authorization_before_existence() {
  let accounts = accounts(SecurityPolicy::default());
  let user = RegisterUserUseCase::new(accounts.service.clone())
    .execute(register("jane@example.com", "correct horse", None))
    .await
    .unwrap();
  let use_case = UpdateProfileUseCase::new(accounts.service.clone());

  let update = |user_id: Uuid, requester_id: Uuid| UpdateProfileCommand {
    user_id,
    requester_id,
    name: "Jane Q. Doe".to_string(),
    headline: Some("Rustacean".to_string()),
    address: None,
    bio: None,
  };

  let unknown = Uuid::new_v4();
  let forbidden = use_case.execute(update(unknown, user.id)).await;
  assert!(matches!(forbidden, Err(UserError::Forbidden(_))));

  let missing = use_case.execute(update(unknown, unknown)).await;
  assert!(matches!(missing, Err(UserError::UserNotFound(id)) if id == unknown));

  let updated = use_case.execute(update(user.id, user.id)).await.unwrap();
  assert_eq!(updated.name, "Jane Q. Doe");
  assert_eq!(updated.headline.as_deref(), Some("Rustacean"));
}

#[tokio::test]
async fn test_forgot_and_reset_password() {
  let accounts = accounts(SecurityPolicy::default());
  let user = RegisterUserUseCase::new(accounts.service.clone())
    .execute(register("jane@example.com", "correct horse", None))
    .await
    .unwrap();
  let before = accounts.repo.find_by_id(user.id).await.unwrap().unwrap();

  let forgot = ForgotPasswordUseCase::new(accounts.service.clone());
  let unknown = forgot
    .execute(ForgotPasswordCommand {
      email: "nobody@example.com".to_string(),
    })
    .await;
  assert!(matches!(unknown, Err(UserError::EmailNotFound(_))));

  let issued = forgot
    .execute(ForgotPasswordCommand {
      email: "jane@example.com".to_string(),
    })
    .await
    .unwrap();

  // Only the hash is stored
  let pending = accounts.repo.find_by_id(user.id).await.unwrap().unwrap();
  let stored_hash = pending.reset_token_hash.clone().unwrap();
  assert_ne!(stored_hash.as_str(), issued.token);
  assert_eq!(stored_hash, ResetToken::new(issued.token.clone()).hash());

  let reset = ResetPasswordUseCase::new(accounts.service.clone());
  let mismatch = reset
    .execute(ResetPasswordCommand {
      token: issued.token.clone(),
      password: "battery staple".to_string(),
      confirm_password: "battery stapler".to_string(),
    })
    .await;
  assert!(matches!(
    mismatch,
    Err(UserError::Validation(ValueObjectError::PasswordMismatch))
  ));

  reset
    .execute(ResetPasswordCommand {
      token: issued.token.clone(),
      password: "battery staple".to_string(),
      confirm_password: "battery staple".to_string(),
    })
    .await
    .unwrap();

  let after = accounts.repo.find_by_id(user.id).await.unwrap().unwrap();
  assert_ne!(after.password_hash, before.password_hash);
  assert!(after.reset_token_hash.is_none());

  // Tokens are single use
  let reused = reset
    .execute(ResetPasswordCommand {
      token: issued.token,
      password: "another secret".to_string(),
      confirm_password: "another secret".to_string(),
    })
    .await;
  assert!(matches!(reused, Err(UserError::InvalidResetToken)));
}

#[tokio::test]
async fn test_expired_reset_token_is_rejected() {
  let accounts = accounts(SecurityPolicy {
    reset_token_ttl: Duration::milliseconds(-1),
    ..SecurityPolicy::default()
  });
  RegisterUserUseCase::new(accounts.service.clone())
    .execute(register("jane@example.com", "correct horse", None))
    .await
    .unwrap();

  let token = accounts
    .service
    .forgot_password(&Email::new("jane@example.com").unwrap())
    .await
    .unwrap();

  let result = accounts
    .service
    .reset_password(&token, "battery staple".to_string(), "battery staple")
    .await;
  assert!(matches!(result, Err(UserError::InvalidResetToken)));
}
