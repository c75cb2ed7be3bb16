/*
    Shared error plumbing: every module has its own error kind, and errors
    that come from grammar files are tagged with where they happened
*/

use std::fmt::{Debug, Display};
use std::path::PathBuf;

pub trait ErrorType: Display + PartialEq {
    fn at(self, location: Location) -> Error<Self> where Self: Sized {
        Error { location, error: self }
    }
}

// A line of 0 stands for the whole file
#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    pub fn file(file: PathBuf) -> Self {
        Location { file, line: 0 }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            0 => write!(f, "{}", self.file.display()),
            line => write!(f, "{}:{}", self.file.display(), line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

impl<T: ErrorType + Debug> std::error::Error for Error<T> {}

pub type Errors<T> = Vec<Error<T>>;

// Prints a batch of errors to stderr, one per line
pub fn report<E: Display>(errors: &[E]) {
    for error in errors {
        eprintln!("{}", error);
    }
}
