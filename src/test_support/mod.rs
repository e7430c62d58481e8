#![cfg(test)]
mod support;

pub use support::*;
