//! Authenticator tests, split by operation.
//!
//! Hashing uses cheap parameters here; the production defaults are exercised
//! in `lib-auth`.

mod signup;

use super::*;
use lib_auth::PwdScheme;
use sqlx::sqlite::SqlitePoolOptions;

/// Argon2id at its minimum useful cost.
fn fast_config() -> AuthConfig {
    AuthConfig {
        pwd_scheme: PwdScheme::Argon2id {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
            output_len: 32,
        },
    }
}

fn memory_auth() -> Authenticator<MemoryStore> {
    Authenticator::with_config(MemoryStore::new(), fast_config())
}

async fn sqlite_auth() -> Authenticator<SqliteStore> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Authenticator::sqlite(pool, fast_config())
        .await
        .expect("Failed to create authenticator")
}

/// Sign up the example user and return the first session token.
async fn signup_jsmith<S: AuthStore>(auth: &Authenticator<S>) -> String {
    auth.signup("John Smith", "jsmith", "supersecretpassword")
        .await
        .expect("signup should succeed")
}
