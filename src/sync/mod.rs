// src/sync/mod.rs

//! Synchronization primitives

pub mod wait_queue;

pub use wait_queue::WaitQueue;
