//! Assertion macros for API responses

/// Assert a response status, showing the body on failure
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "unexpected status, body: {}",
            $response.body
        );
    };
}

/// Assert an error response with the given status and offending field
#[macro_export]
macro_rules! assert_field_error {
    ($response:expr, $status:expr, $field:expr) => {
        $crate::assert_status!($response, $status);
        assert_eq!($response.body["field"], $field, "body: {}", $response.body);
    };
}
