use thiserror::Error;

#[derive(Error, Debug)]
pub enum StowageError {
    #[error("Item {0} not found")]
    ItemNotFound(String),

    #[error("Container {0} not found")]
    ContainerNotFound(String),

    #[error("Item {0} is not in a container")]
    NotPlaced(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("No container in zone {zone} has free space for item {item_id}")]
    NoCapacity { item_id: String, zone: String },
}

/// Coarse failure classification exposed to the request layer.
///
/// The engine returns precise variants; transport glue only needs the kind
/// to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    MissingField,
    MalformedInput,
    NoCapacity,
}

impl StowageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StowageError::ItemNotFound(_) | StowageError::ContainerNotFound(_) => {
                ErrorKind::NotFound
            }
            StowageError::NotPlaced(_) => ErrorKind::InvalidState,
            StowageError::MissingField(_) => ErrorKind::MissingField,
            StowageError::MalformedInput(_) => ErrorKind::MalformedInput,
            StowageError::NoCapacity { .. } => ErrorKind::NoCapacity,
        }
    }
}

pub type Result<T> = std::result::Result<T, StowageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            StowageError::ItemNotFound("I1".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            StowageError::ContainerNotFound("C1".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            StowageError::NotPlaced("I1".into()).kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(
            StowageError::MissingField("hours").kind(),
            ErrorKind::MissingField
        );
        assert_eq!(
            StowageError::NoCapacity {
                item_id: "I1".into(),
                zone: "A".into()
            }
            .kind(),
            ErrorKind::NoCapacity
        );
    }

    #[test]
    fn test_error_messages() {
        let err = StowageError::ItemNotFound("I42".into());
        assert_eq!(err.to_string(), "Item I42 not found");

        let err = StowageError::MissingField("hours");
        assert_eq!(err.to_string(), "Missing required field: hours");
    }
}
