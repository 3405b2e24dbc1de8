// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! position-history library
//!
//! This module exports the core functionality of position-history for use in
//! integration tests and as a library.

pub mod config;
pub mod extract;
pub mod position;
pub mod report;
