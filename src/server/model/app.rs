use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    service::import::{tracker::ImportTracker, ImportSettings},
    wtrl::WtrlClient,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub wtrl_client: WtrlClient,
    pub imports: ImportTracker,
    pub import_settings: Arc<ImportSettings>,
}
