//! # Linear solvers for oblivious key-value encodings
//!
//! This library solves `lhs * x = rhs` over pluggable algebraic structures
//! and is the encoding core behind OKVE constructions: a set of key-value
//! pairs becomes a system of linear constraints, and the solution vector is
//! the published encoding ("Probe-and-XOR of Strings" style, see
//! ["PSI from PaXoS"](https://eprint.iacr.org/2020/193) for the archetype).
//!
//! [solver] is the main module of this library; [structure] holds the
//! coefficient/value algebras the solvers are generic over.
#![warn(missing_docs)]

pub mod solver;
pub mod structure;
