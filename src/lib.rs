// SPDX-License-Identifier: PMPL-1.0-or-later

//! qa-report: quality gate over external Python analysis tools.
//!
//! Runs a style checker (flake8), a static analyzer (pylint) and a coverage
//! runner (coverage + unittest) against a source tree or a single file,
//! stores each tool's raw output under `reports/`, and condenses the run into
//! `reports/summary.txt` plus an exit status.
//!
//! PIPELINE:
//! 1. **Target**: resolve the path and its label (`all` for the source root).
//! 2. **Tools**: invoke each program through a [`tools::ToolRunner`].
//! 3. **Parsers**: one typed parser per tool output contract.
//! 4. **Orchestrator**: sequence the steps and latch the global status.

pub mod config;
pub mod diagnostics;
pub mod orchestrator;
pub mod report;
pub mod storage;
pub mod target;
pub mod tools;
pub mod types;
