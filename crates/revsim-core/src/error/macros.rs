//! Error macros for revsim

/// Return early with an invalid value error
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::RevsimError::invalid_value($context, $value))
    };
}
