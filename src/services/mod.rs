//! Services module - Pure business logic for the build steps.
//!
//! This module contains the core logic for producing a distributable build:
//! compiling the library source through an external compiler and staging
//! auxiliary assets into the output directory. The services are
//! **framework-agnostic** and have no dependencies on the terminal layer,
//! making them testable and reusable.
//!
//! # Components
//!
//! - [`CompileService`]: Invokes the external compiler. Handles:
//!   - Resolving the compiler command from the build manifest
//!   - Executing the subprocess through the platform shell with a timeout
//!   - Counting error/warning diagnostics in the captured output
//!
//! - [`AssetService`]: Stages distribution assets. Handles:
//!   - Clean-slate deletion of stale outputs (NotFound tolerated, anything
//!     else surfaced)
//!   - Recursive copy of the CSS source tree
//!   - Readme and extra-asset copies
//!
//! # Design Philosophy
//!
//! The services layer is designed to be:
//! - **Pure**: No side effects beyond file I/O and subprocess execution
//! - **Testable**: No hidden dependencies, all inputs are explicit parameters
//! - **Framework-agnostic**: No terminal code, only business logic
//!
//! Both services return tagged outcomes ([`CompileOutcome`], [`CopyReport`])
//! that the pipeline inspects; neither swallows failure.

pub mod assets;
pub mod compile;

pub use assets::{AssetError, AssetService, CopyReport};
pub use compile::{CompileDiagnostics, CompileError, CompileOutcome, CompileService, CompileStatus};
