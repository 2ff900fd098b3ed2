// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Repository code generation.
//!
//! Generated code targets PostgreSQL through `sqlx`; see [`postgres`].

pub mod postgres;

pub use postgres::RepositoryGenerator;
