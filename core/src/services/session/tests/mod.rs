//! Tests for the session manager

#[cfg(test)]
mod ordering_tests;
