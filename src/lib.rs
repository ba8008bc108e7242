/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Declarative command-line parsing into caller-owned variables.
//!
//! ```
//! use argbind::Parser;
//!
//! let mut jobs = 1u32;
//! let mut verbose = false;
//! let mut files = Vec::new();
//!
//! let mut parser = Parser::new();
//! parser.add_option("-j", &mut jobs);
//! parser.add_switch("-v", &mut verbose, true);
//! parser.remaining_arguments(&mut files);
//! parser.parse(["a.txt", "-j", "4", "-v", "b.txt"]).unwrap();
//!
//! assert_eq!(jobs, 4);
//! assert!(verbose);
//! assert_eq!(files, ["a.txt", "b.txt"]);
//! ```

mod args;
mod errors;

pub use args::{Destination, Numeric, Parser};
pub use errors::ParseError;
