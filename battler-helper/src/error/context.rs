use std::{
    fmt,
    panic::Location,
};

/// A message attached to an error on its way up, along with where it was attached.
pub struct ContextError {
    message: String,
    location: &'static Location<'static>,
}

impl ContextError {
    #[track_caller]
    pub fn new<M>(message: M) -> Self
    where
        M: fmt::Display,
    {
        Self {
            message: message.to_string(),
            location: Location::caller(),
        }
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.message, self.location)
    }
}
