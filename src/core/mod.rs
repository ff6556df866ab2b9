// src/core/mod.rs

pub mod net;
pub mod numeric;
pub mod text;
