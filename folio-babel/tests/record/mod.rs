//! Persisted record format tests

mod persisted;
