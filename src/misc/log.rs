/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
The solver logs are verbose and mostly at trace level, while the pipeline logs skipped records at warn and error level so a run may be audited.

No log implementation is provided by the library, the CLI installs [env_logger](https://docs.rs/env_logger/latest/env_logger/).
For example:
- Logs of propagation can be found with `RUST_LOG=propagation=trace …`, or
- Only the pipeline summary can be kept with `RUST_LOG=warn,pipeline=info …`
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [BCP](crate::procedures::bcp)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [decisions](crate::procedures::decision)
    pub const DECISION: &str = "decision";

    /// Logs related to [backtracking](crate::procedures::backtrack)
    pub const BACKTRACK: &str = "backtrack";

    /// Logs related to the [clause database](crate::db::clause)
    pub const CLAUSE_DB: &str = "clause_db";

    /// Logs related to the [definitional encoding](crate::builder::encode) of formulas
    pub const ENCODING: &str = "encoding";

    /// Logs related to [expression parsing](crate::builder::expression)
    pub const PARSER: &str = "parser";

    /// Logs related to the [consequence checker](crate::consequence)
    pub const CONSEQUENCE: &str = "consequence";

    /// Logs related to the [rule catalogue](crate::catalogue)
    pub const CATALOGUE: &str = "catalogue";

    /// Logs related to calls to the [generation collaborator](crate::pipeline::generation)
    pub const GENERATION: &str = "generation";

    /// Logs related to reading and writing [artifacts](crate::pipeline::artifact)
    pub const ARTIFACT: &str = "artifact";

    /// Logs related to the [pipeline stages](crate::pipeline)
    pub const PIPELINE: &str = "pipeline";
}
