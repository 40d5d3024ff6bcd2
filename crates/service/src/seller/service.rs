use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{LoginInput, LoginResult, SellerAccount, SellerContext, SignupInput};
use super::errors::AuthError;
use super::repository::SellerRepository;
use super::token::TokenIssuer;

pub const PASSWORD_ALGORITHM: &str = "argon2id";
pub const MIN_PASSWORD_LEN: usize = 8;

/// Seller signup/login independent of the web framework
#[derive(Clone)]
pub struct SellerService {
    repo: Arc<dyn SellerRepository>,
    tokens: TokenIssuer,
}

impl SellerService {
    pub fn new(repo: Arc<dyn SellerRepository>, tokens: TokenIssuer) -> Self { Self { repo, tokens } }

    /// Create a seller account with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::seller::{repository::mock::MockSellerRepository, SellerService, SignupInput, TokenIssuer};
    /// use std::sync::Arc;
    /// let svc = SellerService::new(Arc::new(MockSellerRepository::default()), TokenIssuer::new("secret", 12));
    /// let input = SignupInput { account: "maison".into(), password: "Secret123".into(), brand_name: "Maison".into() };
    /// let seller = tokio_test::block_on(svc.signup(input)).unwrap();
    /// assert_eq!(seller.brand_name, "Maison");
    /// ```
    #[instrument(skip(self, input), fields(account = %input.account))]
    pub async fn signup(&self, input: SignupInput) -> Result<SellerAccount, AuthError> {
        models::seller::validate_account(&input.account)?;
        models::seller::validate_brand_name(&input.brand_name)?;
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }
        if let Some(existing) = self.repo.find_by_account(&input.account).await? {
            debug!(seller_id = %existing.id, "account taken");
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let seller = self.repo.create(&input.account, &input.brand_name, hash, PASSWORD_ALGORITHM).await?;
        info!(seller_id = %seller.id, account = %seller.account, "seller_registered");
        Ok(seller)
    }

    /// Check the password and issue an access token.
    ///
    /// # Examples
    /// ```
    /// use service::seller::{repository::mock::MockSellerRepository, LoginInput, SellerService, SignupInput, TokenIssuer};
    /// use std::sync::Arc;
    /// let svc = SellerService::new(Arc::new(MockSellerRepository::default()), TokenIssuer::new("secret", 12));
    /// let _ = tokio_test::block_on(svc.signup(SignupInput { account: "maison".into(), password: "Passw0rd".into(), brand_name: "Maison".into() }));
    /// let login = tokio_test::block_on(svc.login(LoginInput { account: "maison".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(svc.authenticate(&login.token).unwrap().seller_id, login.seller.id);
    /// ```
    #[instrument(skip(self, input), fields(account = %input.account))]
    pub async fn login(&self, input: LoginInput) -> Result<LoginResult, AuthError> {
        let seller = self.repo.find_by_account(&input.account).await?.ok_or(AuthError::Unauthorized)?;
        let cred = self.repo.get_credentials(seller.id).await?.ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let (token, expires_at) = self.tokens.issue(&seller)?;
        info!(seller_id = %seller.id, "seller_logged_in");
        Ok(LoginResult { seller, token, expires_at })
    }

    /// Resolve a bearer token to the seller it was issued for.
    pub fn authenticate(&self, token: &str) -> Result<SellerContext, AuthError> { self.tokens.verify(token) }

    pub fn token_ttl_secs(&self) -> i64 { self.tokens.ttl().num_seconds() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seller::repository::mock::MockSellerRepository;

    fn svc() -> SellerService {
        SellerService::new(Arc::new(MockSellerRepository::default()), TokenIssuer::new("test-secret", 12))
    }

    fn signup(account: &str, password: &str) -> SignupInput {
        SignupInput { account: account.into(), password: password.into(), brand_name: "Maison".into() }
    }

    #[tokio::test]
    async fn signup_login_roundtrip() {
        let svc = svc();
        let seller = svc.signup(signup("maison", "Passw0rd!")).await.unwrap();
        let login = svc.login(LoginInput { account: "maison".into(), password: "Passw0rd!".into() }).await.unwrap();
        assert_eq!(login.seller, seller);
        assert_eq!(svc.authenticate(&login.token).unwrap().seller_id, seller.id);
    }

    #[tokio::test]
    async fn duplicate_account_conflicts() {
        let svc = svc();
        svc.signup(signup("maison", "Passw0rd!")).await.unwrap();
        let err = svc.signup(signup("maison", "Another1!")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn short_password_and_bad_account_are_rejected() {
        let svc = svc();
        assert!(matches!(svc.signup(signup("maison", "short")).await, Err(AuthError::Validation(_))));
        assert!(matches!(svc.signup(signup("a b", "Passw0rd!")).await, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_account_are_unauthorized() {
        let svc = svc();
        svc.signup(signup("maison", "Passw0rd!")).await.unwrap();
        let wrong = svc.login(LoginInput { account: "maison".into(), password: "nope-nope".into() }).await;
        assert!(matches!(wrong, Err(AuthError::Unauthorized)));
        let unknown = svc.login(LoginInput { account: "ghost".into(), password: "Passw0rd!".into() }).await;
        assert!(matches!(unknown, Err(AuthError::Unauthorized)));
    }
}
