use std::fmt;
use std::error::Error;

#[derive(Debug)]
pub enum ImportError {
    IoError(std::io::Error),
    UnexpectedChar(char, usize),
    EmptyIdentifier(usize),
    UnterminatedInput,
    TrailingInput(usize),
    InvalidGraph(GraphError),
}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> ImportError {
        ImportError::IoError(e)
    }
}

impl From<GraphError> for ImportError {
    fn from(e: GraphError) -> ImportError {
        ImportError::InvalidGraph(e)
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(_) => write!(f, "Import: IoError"),
            Self::UnexpectedChar(c, pos) => write!(f, "Import: Unexpected character {:?} at {}.", c, pos),
            Self::EmptyIdentifier(pos) => write!(f, "Import: Empty identifier at {}.", pos),
            Self::UnterminatedInput => write!(f, "Import: Input is not terminated by `;`."),
            Self::TrailingInput(pos) => write!(f, "Import: Trailing input at {}.", pos),
            Self::InvalidGraph(e) => write!(f, "Import: {}", e),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IoError(e) => Some(e),
            Self::InvalidGraph(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GraphError {
    UnknownVertex(String),
    DuplicateVertex(String),
    DuplicateEdge(String, String),
    AsymmetricEdge(String, String),
    RebuildError,
    NothingToRebuildError,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVertex(v) => write!(f, "Graph: Vertex {:?} does not exist.", v),
            Self::DuplicateVertex(v) => write!(f, "Graph: Vertex {:?} was declared twice.", v),
            Self::DuplicateEdge(v, u) => write!(f, "Graph: Neighbor {:?} is listed twice for {:?}.", u, v),
            Self::AsymmetricEdge(v, u) => write!(f, "Graph: {:?} lists {:?} as neighbor but not vice versa.", v, u),
            Self::RebuildError => write!(f, "Graph: Graph could not be recovered"),
            Self::NothingToRebuildError => write!(f, "Graph: There is nothing to recover"),
        }
    }
}

impl Error for GraphError {}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ParamError {
    InvalidParameter(isize),
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(k) => write!(f, "Search: k needs to be >= 0, got {}.", k),
        }
    }
}

impl Error for ParamError {}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InterruptError {
    TimeOut,
    SigInt,
}

impl fmt::Display for InterruptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeOut => write!(f, "Time ran out."),
            Self::SigInt => write!(f, "SigInt was send."),
        }
    }
}

impl Error for InterruptError {}
