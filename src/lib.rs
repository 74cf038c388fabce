//! Solver for the weighted short-cycle cover problem: given a directed graph
//! whose vertices are either heavy (worth 2) or light (worth 1), find a set of
//! vertex-disjoint directed cycles of length 2 to 5 that maximizes the total
//! weight of the covered vertices.
//!
//! The engine repeatedly decomposes the live graph into strongly connected
//! components, discards vertices that lie on no short cycle, solves small
//! components exactly and large ones with randomized packing trials, and
//! reruns on whatever is left until no vertex remains.

pub mod cust_errors;
pub mod other_ds;
pub mod digraph;
pub mod cycle_find;
pub mod wcc_instance;
pub mod reduction;
pub mod solve;
