//! Shared-password login gate.
//!
//! This only keeps casual users out of the search command; the password is a
//! single shared value from `APP_PASSWORD`.

use subtle::ConstantTimeEq;

use crate::store::KeyValueStore;

pub const AUTH_KEY: &str = "sliedic_auth";

/// Returns `true` when a previous `login` stored the auth flag.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub(crate) fn is_authenticated(store: &impl KeyValueStore) -> anyhow::Result<bool> {
    Ok(store.get(AUTH_KEY)?.as_deref() == Some("true"))
}

/// Checks `attempt` against `expected` and stores the auth flag on success.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub(crate) fn login(
    store: &mut impl KeyValueStore,
    expected: &str,
    attempt: &str,
) -> anyhow::Result<bool> {
    if !password_matches(expected, attempt) {
        tracing::info!("login rejected");
        return Ok(false);
    }
    store.set(AUTH_KEY, "true")?;
    Ok(true)
}

/// Clears the auth flag.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub(crate) fn logout(store: &mut impl KeyValueStore) -> anyhow::Result<()> {
    store.clear(AUTH_KEY)
}

fn password_matches(expected: &str, attempt: &str) -> bool {
    expected.as_bytes().ct_eq(attempt.as_bytes()).into()
}
