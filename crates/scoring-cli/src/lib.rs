//! Library side of the `scoring` command: logging setup and input loading.

#![deny(unsafe_code)]

pub mod inputs;
pub mod logging;
