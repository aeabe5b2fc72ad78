//! Shared values for league fixtures and the mock WTRL client.

/// Season number used by the league fixtures and WTRL payload factories.
pub static TEST_SEASON: i32 = 17;

pub static TEST_COOKIE: &str = "wtrl_sid=test-session";

pub static TEST_USER_AGENT: &str = "zrl-manager-tests/1.0";

/// Plain-text password matching [`TEST_PASSWORD_HASH`].
pub static TEST_PASSWORD: &str = "secret";

/// Werkzeug-format PBKDF2 hash of [`TEST_PASSWORD`] with a low iteration count so
/// verification stays fast in tests.
pub static TEST_PASSWORD_HASH: &str = "pbkdf2:sha256:1000$testsalt12345678$5bb143073f38e29aab6edcbf5f8b83c359cfb7aea4b01d1f0d98b8734ae139bf";
