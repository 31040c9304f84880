//! User Repository

use super::{Collection, Document, RequestContext, RepoResult};
use shared::PatchDoc;
use shared::models::User;

impl Document for User {
    const TABLE: &'static str = "users";
    const ID_FIELD: &'static str = "user_id";
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "user_id",
        "first_name",
        "last_name",
        "email",
        "phone",
        "password",
        "created_at",
        "updated_at",
    ];

    fn business_id(&self) -> &str {
        &self.user_id
    }
}

pub type UserRepository = Collection<User>;

impl Collection<User> {
    /// Find user by email (login)
    pub async fn find_by_email(&self, ctx: &RequestContext, email: &str) -> RepoResult<Option<User>> {
        self.find_one_by(ctx, "email", email).await
    }

    /// Whether the email or the phone number is already registered
    pub async fn email_or_phone_taken(
        &self,
        ctx: &RequestContext,
        email: &str,
        phone: &str,
    ) -> RepoResult<bool> {
        Ok(self.count_by(ctx, "email", email).await? > 0
            || self.count_by(ctx, "phone", phone).await? > 0)
    }

    /// Overwrite the stored token pair (stamps `updated_at`)
    pub async fn update_tokens(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        token: &str,
        refresh_token: &str,
    ) -> RepoResult<u64> {
        let patch = PatchDoc::new()
            .set("token", token)
            .set("refresh_token", refresh_token);
        let matched = self.update_fields(ctx, "user_id", user_id, patch).await?;
        tracing::debug!(user_id = %user_id, matched, "Token pair rotated");
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ctx, memory_db};
    use super::super::RepoError;
    use super::*;
    use shared::models::UserType;

    fn user(email: &str, phone: &str) -> User {
        User {
            user_id: shared::util::new_business_id(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            phone: phone.into(),
            password: "hash".into(),
            avatar: None,
            user_type: UserType::User,
            token: Some("t0".into()),
            refresh_token: Some("r0".into()),
            created_at: 1,
            updated_at: 1,
        }
    }

    #[tokio::test]
    async fn test_unique_email_and_phone() {
        let repo = UserRepository::new(memory_db().await);
        let ctx = ctx();
        repo.insert_one(&ctx, &user("a@b.com", "111")).await.unwrap();

        assert!(repo.email_or_phone_taken(&ctx, "a@b.com", "999").await.unwrap());
        assert!(repo.email_or_phone_taken(&ctx, "x@y.com", "111").await.unwrap());
        assert!(!repo.email_or_phone_taken(&ctx, "x@y.com", "999").await.unwrap());

        // the unique index still guards concurrent signups
        let res = repo.insert_one(&ctx, &user("a@b.com", "222")).await;
        assert!(matches!(res, Err(RepoError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_update_tokens() {
        let repo = UserRepository::new(memory_db().await);
        let ctx = ctx();
        let u = user("a@b.com", "111");
        repo.insert_one(&ctx, &u).await.unwrap();

        let matched = repo.update_tokens(&ctx, &u.user_id, "t1", "r1").await.unwrap();
        assert_eq!(matched, 1);

        let stored = repo.find_by_email(&ctx, "a@b.com").await.unwrap().unwrap();
        assert_eq!(stored.token.as_deref(), Some("t1"));
        assert_eq!(stored.refresh_token.as_deref(), Some("r1"));
        assert!(stored.updated_at > 1);

        assert_eq!(repo.update_tokens(&ctx, "nobody", "t", "r").await.unwrap(), 0);
    }
}
