//! Scaffolds the skeleton of a Flask web application: a `run.py` runner and an
//! `app_pkg` package with views, templates and static assets, plus optional
//! blueprint, configuration, forms and models modules.
//!
//! ```no_run
//! use flaskgen::config::{Features, ScaffoldConfig};
//!
//! let features = Features {
//!     use_blueprints: true,
//!     ..Features::default()
//! };
//! let config = ScaffoldConfig::new("my_site", features, false);
//!
//! flaskgen::api::generate(&config)?;
//! # Ok::<(), flaskgen::scaffold::ScaffoldError>(())
//! ```
pub mod api;
pub mod config;
pub mod errors;
pub mod plan;
mod preview;
pub mod scaffold;
pub mod template;
