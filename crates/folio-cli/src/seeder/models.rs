//! Row shapes and knobs for seeding runs.

use folio_models::ContentStatus;
use uuid::Uuid;

/// Password given to every generated account.
pub const DEFAULT_SEED_PASSWORD: &str = "password123";

pub struct UserSeed {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub seed_run: String,
}

pub struct ContentSeed {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: ContentStatus,
    pub author_id: Uuid,
    pub template_id: Option<Uuid>,
    pub seed_run: String,
}

#[derive(Clone)]
pub struct SeedConfig {
    pub num_users: usize,
    pub contents_per_user: usize,
    pub password: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_users: 10,
            contents_per_user: 5,
            password: DEFAULT_SEED_PASSWORD.to_string(),
        }
    }
}

impl SeedConfig {
    pub fn new(num_users: usize) -> Self {
        Self {
            num_users,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_contents_per_user(mut self, contents_per_user: usize) -> Self {
        self.contents_per_user = contents_per_user;
        self
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}
