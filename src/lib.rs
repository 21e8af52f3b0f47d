//! # cspf-rs: Corrections of Finite Automata as Shared Packed Forests
//!
//! **`cspf-rs`** computes every minimal-edit way of turning a deterministic
//! finite automaton into one that recognizes the language of a given
//! minimal DFA, and stores them all in a single shared packed forest.
//!
//! ## What is a correction forest?
//!
//! A correction is a sequence of edit bundles (add a state, rewire a
//! transition, move the initial mark, flip a final mark) that makes the
//! automaton language-equivalent to the target. The forest enumerates the
//! corrections by scanning states against the target's equivalence
//! classes; scans that reach the same intermediate knowledge continue
//! through the same node, so exponentially many corrections share one
//! polynomially-sized graph.
//!
//! ## Key Features
//!
//! - **Shared Packed Representation**: nodes live in an arena behind a
//!   frontier cache, so equal sub-problems are solved and stored once.
//! - **Exhaustive by Construction**: every way of reusing, claiming, or
//!   introducing a state for a target class becomes a family of the node.
//! - **Rich Queries**: minimal-cost extraction under configurable
//!   [`EditCosts`][crate::edits::EditCosts], uniform-per-node random
//!   sampling, and exact correction counting without enumeration.
//! - **Materialization**: any correction replays over the original
//!   automaton into concrete corrected automata.
//!
//! ## Quick Start
//!
//! Add `cspf-rs` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cspf-rs = "0.1"
//! ```
//!
//! ## Basic Usage
//!
//! ```rust
//! use cspf_rs::automaton::{Alphabet, Automaton};
//! use cspf_rs::edits::EditCosts;
//! use cspf_rs::forest::Forest;
//! use cspf_rs::{apply, language};
//!
//! // 1. The automaton to correct and the target language (odd number
//! //    of 'a', as a minimal DFA)
//! let to_correct = Automaton::new([0], [(0, 'a', 1), (1, '0', 0), (1, 'a', 2)], [1]);
//! let target = Automaton::new([0], [(0, 'a', 1), (1, 'a', 0), (0, '0', 0), (1, '0', 1)], [1]);
//! let alphabet = Alphabet::new(['a', '0']);
//!
//! // 2. Build the forest of all corrections
//! let mut forest = Forest::build(&to_correct, &target, &alphabet)?;
//!
//! // 3. Extract the cheapest corrections
//! let (cost, corrections) = forest.compute_minimal_corrections(&EditCosts::default())?;
//! assert!(!corrections.is_empty());
//! println!("cheapest correction costs {}", cost);
//!
//! // 4. Materialize one and check it against the target
//! let automata = apply::apply_correction(&to_correct, &corrections[0])?;
//! for automaton in &automata {
//!     assert!(language::equivalent(automaton, &target, &alphabet));
//! }
//! # Ok::<(), cspf_rs::error::CorrectionError>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`forest`]**: The heart of the library. Builds and owns the shared
//!   packed forest.
//! - **[`edits`]**: Edit operations, bundles, and their costs.
//! - **[`apply`]**: Replays a correction into corrected automata.
//! - **[`dot`]**: Utilities for visualizing forests using Graphviz.
//!
//! For the construction details, check the [`forest`] module documentation.

pub mod apply;
pub mod automaton;
pub mod cost;
pub mod count;
pub mod dot;
pub mod edits;
pub mod error;
pub mod forest;
pub mod frontier;
pub mod language;
pub mod node;
pub mod sample;
pub mod state;
pub mod visitor;
