//! A library for building, and auditing, a logical reasoning dataset in the style of LogicBench.
//!
//! A dataset is built from a catalogue of inference rules.
//! Each rule has templates for a context and for questions about the context, with placeholders for sentences.
//! Sentences for the placeholders are requested from a language model, templates are instantiated, and the resulting contexts are rewritten as short natural narratives.
//! From these, binary (yes/no) and multiple choice question answering datasets are assembled.
//!
//! The ground truth of the dataset is logical consequence, and a small satisfiability solver is included to check it.
//!
//! # Orientation
//!
//! The library has two halves.
//!
//! The logical half is built around a [context], which holds a formula in clausal form and determines whether the formula is satisfiable:
//! - Formulas are written as [expressions](crate::builder::expression), e.g. `Implies(p, Not(q))`, and added to a context through a [definitional encoding](crate::builder::encode).
//! - The [solve procedure](crate::procedures::solve) is a simple backtracking search with two watched literals.
//! - [Consequence](crate::consequence) is checked by refutation, and each rule of the [catalogue] may be [verified](crate::catalogue::verify) against its formalization.
//!
//! The dataset half is a [pipeline] of stages over flat-file artifacts:
//! - [Sentence banks](crate::pipeline::banks) are requested for each rule.
//! - [Templates](crate::template) are instantiated with the banks, and [naturalized](crate::pipeline::naturalize).
//! - The [BQA](crate::pipeline::bqa) and [MCQA](crate::pipeline::mcqa) [datasets](crate::dataset) are written.
//! - Natural contexts are [audited](crate::pipeline::audit) by formalization and a consequence check.
//!
//! # Examples
//!
//! ```rust
//! # use logicbench::config::Config;
//! # use logicbench::context::Context;
//! # use logicbench::reports::Report;
//! # use logicbench::structures::formula::Formula;
//! let mut the_context = Context::from_config(Config::default());
//!
//! let p = Formula::atom("p");
//! let q = Formula::atom("q");
//!
//! assert!(the_context.assert_formula(&Formula::implies(p.clone(), q.clone())).is_ok());
//! assert!(the_context.assert_formula(&p).is_ok());
//! assert!(the_context.assert_formula(&Formula::not(q)).is_ok());
//!
//! assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout the library, with targets listed in [misc::log].
//!
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
//! - Logs related to [propagation](crate::procedures::bcp) can be found with `RUST_LOG=propagation=trace …` or,
//! - Records skipped by the pipeline can be found with `RUST_LOG=pipeline=warn …`

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

pub mod builder;
pub mod procedures;

pub mod catalogue;
pub mod config;
pub mod consequence;
pub mod context;
pub mod dataset;
pub mod reports;
pub mod structures;
pub mod template;
pub mod types;

pub mod db;

pub mod misc;

pub mod pipeline;
