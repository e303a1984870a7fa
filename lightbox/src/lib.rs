#![no_std]

pub mod config;
pub mod inmp441;
pub mod uart_sink;
