//! A3S Forge CLI - build guest VM images from Forgefiles.

pub mod commands;
pub mod output;
