//! Alphafolio Subscription Engine library.
//!
//! This crate implements the subscribe-page core as a reusable engine:
//! a static [`catalog::Catalog`] of portfolios and plans, the
//! [`selection::SelectionState`] tracking which plan a visitor has picked,
//! the account [`form`] validation rules, and the [`checkout`] state machine
//! that gates submission and talks to an injected [`checkout::Submitter`].
//!
//! The engine performs no I/O of its own beyond reading the catalog file at
//! startup; the presentation layer and the real account-creation backend are
//! external collaborators.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod form;
pub mod selection;
