//! Almoxarifado API Library
//!
//! Backend services for stockroom requisition workflows: request intake,
//! stock separation and delivery confirmation, driven by a status engine
//! that derives each requisition's stage from its items.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod logging;
pub mod models;
pub mod queries;
pub mod services;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use services::requisition_items::RequisitionItemService;
use services::requisition_status::RequisitionStatusService;
use services::requisitions::RequisitionService;

/// Shared application state wiring the workflow services together.
///
/// The (external) presentation layer holds one of these and calls the
/// services directly.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub requisitions: RequisitionService,
    pub items: RequisitionItemService,
    pub status: RequisitionStatusService,
}

impl AppState {
    pub fn new(
        db: Arc<DatabaseConnection>,
        config: config::AppConfig,
        event_sender: events::EventSender,
    ) -> Self {
        let sender = Arc::new(event_sender.clone());
        let status = RequisitionStatusService::new(db.clone(), Some(sender.clone()));
        let items =
            RequisitionItemService::new(db.clone(), status.clone(), Some(sender.clone()));
        let requisitions = RequisitionService::new(db.clone(), Some(sender));

        Self {
            db,
            config,
            event_sender,
            requisitions,
            items,
            status,
        }
    }
}
