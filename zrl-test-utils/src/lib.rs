pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{
            TEST_COOKIE, TEST_PASSWORD, TEST_PASSWORD_HASH, TEST_SEASON, TEST_USER_AGENT,
        },
        fixtures::wtrl::factory,
        TestBuilder, TestContext, TestError,
    };
}
