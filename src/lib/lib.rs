#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

pub mod autotune;
pub mod controller;
pub mod filtering;
pub mod rate_loop;
pub mod sim;
