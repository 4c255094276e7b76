//! Error conversion glue between the domain, repository and service layers.
//!
//! The domain layer must not depend on repository/service error types, so
//! the `From` impls live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod service {
    use crate::domain::types::TypeConstraintError;
    use crate::emailer::NotificationError;
    use crate::forms::FormError;
    use crate::repository::errors::RepositoryError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    impl From<RepositoryError> for ServiceError {
        fn from(val: RepositoryError) -> Self {
            match val {
                RepositoryError::NotFound => ServiceError::NotFound(val.to_string()),
                other => ServiceError::Internal(other.to_string()),
            }
        }
    }

    impl From<FormError> for ServiceError {
        fn from(val: FormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<NotificationError> for ServiceError {
        fn from(val: NotificationError) -> Self {
            ServiceError::Notification(val.to_string())
        }
    }

}
