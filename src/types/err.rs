//! Error types used in the library.
//!
//! - Some of these are internally expected --- e.g. a conflict during propagation is used to control the flow of a solve.
//! - Most are external, and are reported per record by the pipeline, which skips the record and continues.
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use std::path::PathBuf;

use crate::db::ClauseKey;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Artifact(ArtifactError),
    Assembly(AssemblyError),
    AtomDB(AtomDBError),
    BCP(BCPError),
    Catalogue(CatalogueError),
    ClauseDB(ClauseDBError),
    Extract(ExtractError),
    Generation(GenerationError),
    Parse(ParseError),
    State(StateError),
    Template(TemplateError),

    InvalidState,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Artifact(e) => write!(f, "{e}"),
            Self::Assembly(e) => write!(f, "{e}"),
            Self::AtomDB(e) => write!(f, "atom database: {e:?}"),
            Self::BCP(e) => write!(f, "propagation: {e:?}"),
            Self::Catalogue(e) => write!(f, "{e}"),
            Self::ClauseDB(e) => write!(f, "clause database: {e:?}"),
            Self::Extract(e) => write!(f, "{e}"),
            Self::Generation(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::State(e) => write!(f, "context state: {e:?}"),
            Self::Template(e) => write!(f, "{e}"),
            Self::InvalidState => write!(f, "invalid state"),
        }
    }
}

/// Errors when reading or writing flat-file artifacts.
///
/// IO errors are kept as their message, so the error remains comparable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArtifactError {
    /// A required input artifact does not exist.
    Missing(PathBuf),

    /// Reading from the path failed.
    Read(PathBuf, String),

    /// Writing to the path failed.
    Write(PathBuf, String),

    /// A record could not be serialized.
    Serialize(String),
}

impl From<ArtifactError> for ErrorKind {
    fn from(e: ArtifactError) -> Self {
        ErrorKind::Artifact(e)
    }
}

impl std::fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(path) => write!(f, "missing artifact {}", path.display()),
            Self::Read(path, reason) => write!(f, "failed to read {}: {reason}", path.display()),
            Self::Write(path, reason) => write!(f, "failed to write {}: {reason}", path.display()),
            Self::Serialize(reason) => write!(f, "failed to serialize record: {reason}"),
        }
    }
}

/// Noted errors when assembling the options of a multiple choice sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssemblyError {
    /// Fewer than three distractors were given, the count found is noted.
    InsufficientDistractors(usize),

    /// The distractor at the given position is textually identical to the correct answer.
    DuplicateOfCorrect(usize),
}

impl From<AssemblyError> for ErrorKind {
    fn from(e: AssemblyError) -> Self {
        ErrorKind::Assembly(e)
    }
}

impl std::fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientDistractors(found) => {
                write!(f, "three distractors required, {found} found")
            }
            Self::DuplicateOfCorrect(position) => {
                write!(f, "distractor {position} repeats the correct answer")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomDBError {
    /// There are no more fresh atoms.
    AtomsExhausted,
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        ErrorKind::AtomDB(e)
    }
}

/// Noted errors during boolean constraint propagation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BCPError {
    /// A conflict was found.
    /// This is expected from time to time, and leads to a backtrack.
    Conflict(ClauseKey),

    /// A watched clause is missing from the clause database.
    /// This is unexpected.
    MissingClause,
}

impl From<BCPError> for ErrorKind {
    fn from(e: BCPError) -> Self {
        ErrorKind::BCP(e)
    }
}

/// Errors from the rule catalogue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogueError {
    /// No rule with the given family code and name.
    NotFound(String),

    /// A rule key without a `/` separating the family code from the name.
    MalformedKey(String),

    /// An unrecognised family code.
    UnknownFamily(String),
}

impl From<CatalogueError> for ErrorKind {
    fn from(e: CatalogueError) -> Self {
        ErrorKind::Catalogue(e)
    }
}

impl std::fmt::Display for CatalogueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(key) => write!(f, "no catalogue entry for {key}"),
            Self::MalformedKey(key) => write!(f, "malformed rule key \"{key}\""),
            Self::UnknownFamily(code) => write!(f, "unknown logic family \"{code}\""),
        }
    }
}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseDBError {
    /// Some attempt was made to store an empty clause.
    EmptyClause,

    /// A clause refers to an atom the context has not issued.
    UnknownAtom,

    /// A clause was added after some decision has been made.
    DecisionMade,

    /// A key is not (or is no longer) in the database.
    Missing,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

/// Errors when extracting structured data from free-form generated text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractError {
    /// The text contains no opening delimiter.
    NoStructure,

    /// An opening delimiter was found at the given offset, but was never balanced.
    Unbalanced(usize),

    /// A balanced span was found, but did not decode.
    Decode(String),

    /// The decoded value did not have the expected shape.
    Shape(&'static str),
}

impl From<ExtractError> for ErrorKind {
    fn from(e: ExtractError) -> Self {
        ErrorKind::Extract(e)
    }
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoStructure => write!(f, "no JSON structure in response"),
            Self::Unbalanced(offset) => write!(f, "unbalanced JSON structure from offset {offset}"),
            Self::Decode(reason) => write!(f, "invalid JSON: {reason}"),
            Self::Shape(expected) => write!(f, "unexpected JSON shape, expected {expected}"),
        }
    }
}

/// Errors from the natural-language generation collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationError {
    /// The credential pool is empty.
    NoCredentials,

    /// Every credential failed in sequence.
    CredentialsExhausted,

    /// The credentials file could not be read or decoded.
    CredentialsFile(String),

    /// The client for the generation service could not be built.
    Client(String),
}

impl From<GenerationError> for ErrorKind {
    fn from(e: GenerationError) -> Self {
        ErrorKind::Generation(e)
    }
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no generation credentials"),
            Self::CredentialsExhausted => write!(f, "all generation credentials failed"),
            Self::CredentialsFile(reason) => write!(f, "credentials file: {reason}"),
            Self::Client(reason) => write!(f, "generation client: {reason}"),
        }
    }
}

/// Errors when parsing a formula expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The text does not match the grammar, at the given byte offset.
    Syntax { position: usize, reason: &'static str },

    /// A call to a function which is not an operator.
    UnknownOperator(String),

    /// An operator called with an unsupported number of arguments.
    Arity { operator: &'static str, found: usize },
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax { position, reason } => write!(f, "syntax error at {position}: {reason}"),
            Self::UnknownOperator(name) => write!(f, "unknown operator \"{name}\""),
            Self::Arity { operator, found } => {
                write!(f, "{operator} does not take {found} argument(s)")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateError {
    /// A solve was requested on a context which has already been solved.
    SolveComplete,
}

impl From<StateError> for ErrorKind {
    fn from(e: StateError) -> Self {
        ErrorKind::State(e)
    }
}

/// Errors when instantiating a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder of the template has no fragment in the sentence bank.
    MissingPlaceholder(String),

    /// A `{` without a matching `}`, at the given byte offset.
    UnclosedPlaceholder(usize),
}

impl From<TemplateError> for ErrorKind {
    fn from(e: TemplateError) -> Self {
        ErrorKind::Template(e)
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPlaceholder(name) => write!(f, "missing placeholder \"{name}\""),
            Self::UnclosedPlaceholder(offset) => write!(f, "unclosed placeholder at {offset}"),
        }
    }
}
