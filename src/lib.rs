//! # crosscut
//!
//! Cross-cutting utilities for web-application servers: live properties
//! reload, an entity audit trail, OAuth2 client-credential token management,
//! declarative tabular export, and call logging.
//!
//! ## Overview
//!
//! Most of these are thin, explicit adapters over a narrow trait boundary:
//! the audit store, the token issuer, and the tabular sink all stay outside
//! this crate. The substantial piece is the [`reload`] subsystem, which
//! coordinates filesystem change notification, background polling, and a
//! safe concurrent field-update protocol.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crosscut::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! struct Mailer {
//!     host: String,
//! }
//!
//! # async fn example() -> crosscut::error::Result<()> {
//! // Declare which files feed the configuration.
//! let mut sources = SourceRegistry::new();
//! sources.register_file("/etc/app/app.properties");
//!
//! // Opt a live object into reload, binding fields to property keys.
//! let mailer = Arc::new(Mutex::new(Mailer { host: "localhost".into() }));
//! let observables = ObservableSet::new();
//! observables.register(
//!     Observable::new("mailer", &mailer)
//!         .bind("${mail.host}", |m: &mut Mailer, v| m.host = v.to_string())
//!         .on_update(|_m: &mut Mailer| {
//!             println!("mail settings refreshed");
//!             Ok(())
//!         }),
//! )?;
//!
//! // Wire and start the coordinator.
//! let mut coordinator = ReloadCoordinator::new(sources);
//! coordinator.set_observables(&observables);
//! coordinator.init();
//!
//! // … edits to app.properties now show up in `mailer` within one poll …
//!
//! coordinator.tear_down().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `file-watch` (default): the [`reload::FileWatcher`] and
//!   [`reload::ReloadCoordinator`], built on `notify` and `tokio`. Without
//!   it the registration and update machinery remains available for manual
//!   reloads.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod audit;
pub mod auth;
pub mod error;
pub mod export;
pub mod logging;
pub mod reload;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::audit::{AuditListener, AuditRecord, AuditStore, Auditable, CurrentUser};
    pub use crate::auth::{AccessToken, ClientCredentials, TokenIssuer, TokenManager};
    pub use crate::error::{AuditError, AuthError, ExportError, ReloadError, Result};
    pub use crate::export::{CellValue, Column, TabularSink, export_sheet};
    pub use crate::reload::{FieldUpdater, Observable, ObservableSet, PropertySet, SourceRegistry};

    #[cfg(feature = "file-watch")]
    pub use crate::reload::{FileWatcher, ReloadCoordinator};
}
