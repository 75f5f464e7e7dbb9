//! `SQLite` transactions that report every executed statement to interceptors.
//!
//! - params: conversion from `RowValues` to rusqlite values
//! - query: row extraction back into `RowValues`
//! - transaction: the intercepted transaction handle

pub mod params;
pub mod query;
pub mod transaction;

pub use params::Params;
pub use transaction::{LoggedTransaction, begin_transaction};
