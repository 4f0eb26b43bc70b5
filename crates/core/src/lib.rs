//! Core business logic for Tranzero.
//!
//! This crate contains pure business logic with ZERO web or store dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Transactions, payments, status derivation, and balances
//! - `customer` - Customer aggregate with soft deletion
//! - `account` - Credit/Debit/Settled account classification
//! - `backup` - CSV backup export and import

pub mod account;
pub mod backup;
pub mod customer;
pub mod ledger;
