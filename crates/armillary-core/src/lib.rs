//! Armillary Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Armillary
//! component-node renderer. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Semantic**: Port and component descriptions ([`semantic`] module)
//! - **Draw**: The shape-creation surface and an in-memory scene ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod semantic;
