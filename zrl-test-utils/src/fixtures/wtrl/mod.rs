//! WTRL payload factories and mock endpoints.

pub mod factory;
pub mod mockito;

use crate::TestContext;

impl TestContext {
    pub fn wtrl<'a>(&'a mut self) -> WtrlFixtures<'a> {
        WtrlFixtures { setup: self }
    }
}

pub struct WtrlFixtures<'a> {
    pub setup: &'a mut TestContext,
}
