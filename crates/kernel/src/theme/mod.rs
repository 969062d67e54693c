//! Theme engine and template rendering.
//!
//! Tera templates for the shell (top bar, sidebar, account menu) and the
//! pages rendered inside it. Built-in templates can be overridden per name
//! or per path from a template directory.

mod engine;

pub use engine::ThemeEngine;
