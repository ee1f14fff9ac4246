//! Core library for vibeplay
//!
//! This crate implements the **Functional Core** of the vibeplay application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`vibeplay_core`** (this crate): Pure transformation functions with zero I/O
//! - **`vibeplay`**: The HTTP client, CLI, and web host (the Imperative Shell)
//!
//! A single click of "generate" flows through this crate like so:
//!
//! ```text
//! UserIdea ──build_prompt──▶ GenerationRequest ──(shell: model call)──▶ raw text
//!     raw text ──split_response──▶ ParsedOutput ──Outcome::from_parsed──▶ RenderRequest
//! ```
//!
//! Nothing here remembers a previous request. Every function takes the values
//! of one interaction and returns new values.
//!
//! # Module Organization
//!
//! - [`idea`]: The three user inputs and their validation
//! - [`prompt`]: Turns an idea into the instruction sent to the model
//! - [`splitter`]: Pulls the explanation and the HTML snippet out of model text
//! - [`gemini`]: Wire types and pure transforms for the generation service
//! - [`outcome`]: Per-click state machine and the value handed to presentation
//! - [`page`]: HTML rendering of the playground page
//! - [`secrets`]: Parsing of the TOML secrets file
//!
//! # Example Usage
//!
//! ```rust
//! use vibeplay_core::splitter::split_response;
//!
//! let parsed = split_response("[explanation]\nHello\n[code]\n```html\n<b>hi</b>\n```");
//! assert_eq!(parsed.explanation, "Hello");
//! assert_eq!(parsed.code, "<b>hi</b>");
//! ```

pub mod gemini;
pub mod idea;
pub mod outcome;
pub mod page;
pub mod prompt;
pub mod secrets;
pub mod splitter;
