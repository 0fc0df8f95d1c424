//! MoodReel - multi-modal emotion analysis client
//!
//! This crate captures text, a face image and voice audio (from a file or the
//! microphone), submits them to an emotion analysis service, and renders the
//! fused emotion together with movie recommendations. When the service cannot
//! be reached a deterministic offline result is shown instead.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, the view state machine, visibility policy and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (HTTP client, cpal recorder, config file)
//! - **CLI**: Command-line interface, argument parsing, rendering and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
