//! Tests that run the exercise manager against the real SQLite store.
