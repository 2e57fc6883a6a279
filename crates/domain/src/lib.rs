//! # myhome-domain
//!
//! Pure domain model for the myHome floor plan.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the persisted **records** (zones, walls, construction, decorations,
//!   devices, links) exactly as the backend stores them
//! - Define the **geometry** rules (rotation extraction, angle and grid snapping)
//! - Define the **palettes** of floor, construction and decoration textures
//! - Define the **push-channel** and **admin/skill-store** value types
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod lenient;
pub mod time;

pub mod channel;
pub mod device;
pub mod geometry;
pub mod palette;
pub mod skill;
pub mod utility;
pub mod zone;
