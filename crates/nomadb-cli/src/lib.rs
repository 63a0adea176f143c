//! nomadb-cli
//! ==========
//!
//! Command-line interface for the `nomadb-core` city directory.
//!
//! This crate primarily provides a binary (`nomadb-cli`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview. See the README for full usage examples.
//!
//! Quick start
//! -----------
//!
//! Install the CLI from crates.io:
//!
//! ```text
//! cargo install nomadb-cli
//! ```
//!
//! Basic usage:
//!
//! ```text
//! nomadb-cli --help
//! nomadb-cli stats
//! nomadb-cli list --region jeju --env nature
//! nomadb-cli city seoul
//! ```
//!
//! For programmatic access to the directory engine, use the
//! [`nomadb-core`] crate directly.
//!
//! Links
//! -----
//! - Repository: <https://github.com/nomadb/nomadb-rs>
//! - Core crate: <https://docs.rs/nomadb-core>
//!
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable. The presence of this file enables a rendered page on docs.rs.
