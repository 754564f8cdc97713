//! Engine scenario tests.
//!
//! Organized into:
//! - walker_tests: traversal, limits, exclusion and stats end to end
//! - resolver_tests: classification, probing and alias/namespace tables on disk
//! - property_tests: invariants over random import graphs
//! - test_helpers: shared project builders

mod walker_tests;
