// src/buffer/mod.rs

//! Bounded event storage

pub mod ring;

pub use ring::RingBuffer;
