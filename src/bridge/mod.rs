//! Device-bridge tool access.
//!
//! `exec` runs a local program and captures its output as a
//! [`CommandOutput`]. `adb` layers the `devices`/`connect`/`install`
//! contract on top of any [`CommandRunner`], so flows can be exercised
//! without a real `adb` binary.

pub mod adb;
pub mod exec;

pub use adb::Adb;
pub use exec::{CommandOutput, CommandRunner, ProcessRunner};
