//! # mysql-client
//!
//! Async MySQL connection engine.
//!
//! This crate drives a single, already-authenticated transport: command
//! dispatch, result-set streaming, client-side parameter interpolation,
//! server-side prepared statements, transactions, and cooperative
//! cancellation that can abort an in-flight network operation from a
//! second task.
//!
//! Transport establishment, DSN parsing, and the authentication handshake
//! live outside this crate; the engine consumes their outcome as a
//! [`Handshake`] value.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mysql_client::{Config, Conn, Context, Handshake};
//!
//! let mut conn = Conn::establish(transport, Config::new(), handshake);
//! let ctx = Context::background();
//!
//! conn.exec(&ctx, "INSERT INTO t (a) VALUES (?)", &[42.into()]).await?;
//!
//! let mut rows = conn.query(&ctx, "SELECT a FROM t", &[]).await?;
//! while let Some(row) = rows.next().await? {
//!     println!("{row:?}");
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod cancel;
mod config;
mod conn;
mod error;
mod interpolate;
mod rows;
mod statement;
mod transaction;

pub use cancel::Context;
pub use config::Config;
pub use conn::{Conn, ExecResult, Handshake};
pub use error::{Error, Result};
pub use rows::Rows;
pub use statement::Statement;
pub use transaction::{IsolationLevel, Transaction};

pub use mysql_types::Value;
