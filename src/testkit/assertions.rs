//! Assertion macros with call-site locations in their panic messages.

/// Assert that a Result is `Ok` and extract the value.
#[macro_export]
macro_rules! assert_result_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!(
                "Expected Ok, got Err: {:?}\n  at {}:{}:{}",
                e,
                file!(),
                line!(),
                column!()
            ),
        }
    };
}

/// Assert that a Result is `Err` and extract the error.
#[macro_export]
macro_rules! assert_result_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!(
                "Expected Err, got Ok: {:?}\n  at {}:{}:{}",
                value,
                file!(),
                line!(),
                column!()
            ),
            Err(e) => e,
        }
    };
}

/// Assert that a Result failed with a message containing `pattern`.
#[macro_export]
macro_rules! assert_contains_error {
    ($result:expr, $pattern:expr) => {{
        let err = $crate::assert_result_err!($result);
        let message = err.to_string();
        assert!(
            message.contains($pattern),
            "Error '{}' does not contain '{}'\n  at {}:{}:{}",
            message,
            $pattern,
            file!(),
            line!(),
            column!()
        );
        err
    }};
}

/// Assert that a Validation failed with exactly `count` errors.
///
/// Returns the errors as a `Vec`.
#[macro_export]
macro_rules! assert_validation_error_count {
    ($validation:expr, $count:expr) => {
        match $validation {
            stillwater::Validation::Success(value) => panic!(
                "Expected {} validation errors, got success with: {:?}\n  at {}:{}:{}",
                $count,
                value,
                file!(),
                line!(),
                column!()
            ),
            stillwater::Validation::Failure(errors) => {
                let errors: Vec<_> = errors.into_iter().collect();
                assert_eq!(
                    errors.len(),
                    $count,
                    "Expected {} errors, got {}: {:?}\n  at {}:{}:{}",
                    $count,
                    errors.len(),
                    errors,
                    file!(),
                    line!(),
                    column!()
                );
                errors
            }
        }
    };
}

/// Assert that a Validation succeeded and extract the value.
#[macro_export]
macro_rules! assert_validation_ok {
    ($validation:expr) => {
        match $validation {
            stillwater::Validation::Success(value) => value,
            stillwater::Validation::Failure(errors) => {
                let errors: Vec<_> = errors.into_iter().collect();
                panic!(
                    "Expected validation success, got {} errors: {:?}\n  at {}:{}:{}",
                    errors.len(),
                    errors,
                    file!(),
                    line!(),
                    column!()
                )
            }
        }
    };
}
