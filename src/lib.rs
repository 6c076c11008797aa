//! # Topogen - Synthetic network topology generator
//!
//! This library generates labeled network topologies from a small parameter
//! set: device counts, a network archetype, and policy flags. The result is
//! a deterministic, connected, addressable graph of routers, switches,
//! hosts, and security devices, plus a tiered 2-D layout for rendering.
//!
//! ## Overview
//!
//! Topogen enables network design studies, training labs, and tooling tests
//! without touching real infrastructure. One generation call produces a
//! topology record that downstream tooling consumes: security audits,
//! performance analytics, hybrid-cloud designs, and configuration export.
//!
//! ## Key Features
//!
//! - **Archetype wiring**: enterprise/campus hierarchies with a full-mesh
//!   core, or datacenter spine-leaf fabrics
//! - **Deterministic addressing**: per-tier subnets, /24 rollover for hosts
//! - **Security policy**: firewall and IPS placement driven by the security
//!   level
//! - **Redundant paths**: secondary access uplinks behind a single flag
//! - **Reproducible**: a fixed seed makes every field of the output identical
//!   across runs
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `config`: type-safe generation parameters and validation
//! - `config_loader`: YAML configuration loading and CLI overrides
//! - `device`: device sum type and the factory producing device records
//! - `topology`: wiring rules, link types, and the topology record
//! - `generator`: high-level orchestration of one generation run
//! - `layout`: deterministic tiered 2-D positions for rendering
//! - `audit`: synthetic security audits and compliance checks
//! - `analytics`: synthetic performance and capacity analysis
//! - `cloud`: hybrid cloud designs built around a generated record
//! - `export`: Cisco-style config text, documentation, and JSON bundles
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use topogen::config::GenerationConfig;
//! use topogen::{generator, layout};
//!
//! let config = GenerationConfig {
//!     routers: 3,
//!     switches: 6,
//!     hosts: 30,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! // Generate the topology record
//! let record = generator::generate(&config)?;
//!
//! // Compute rendering positions, independent of the link structure
//! let positions = layout::layout(&record);
//!
//! println!("{} devices, {} links, {} segments",
//!          record.total_devices, record.total_links, record.segments);
//! # Ok::<(), topogen::generator::GenerateError>(())
//! ```
//!
//! ## Error Handling
//!
//! Generation fails fast: invalid parameters are rejected before any device
//! is synthesized, and a defensive link-integrity check runs before a record
//! is returned. Library errors are typed with `thiserror`; the binary wraps
//! them with `color_eyre` for reporting.

pub mod analytics;
pub mod audit;
pub mod cloud;
pub mod config;
pub mod config_loader;
pub mod device;
pub mod export;
pub mod generator;
pub mod layout;
pub mod topology;
