pub mod source;

use std::io;

#[macro_export]
#[cfg(feature = "debug")]
macro_rules! debug_log {
    ($($args:tt)*) => {{
        println!("{}", format_args!($($args)*));
    }};
}

#[macro_export]
#[cfg(not(feature = "debug"))]
macro_rules! debug_log {
    ($($args:tt)*) => {{}};
}

#[macro_export]
macro_rules! define_error {
    ($name:ident) => {
        #[derive(Debug, ::thiserror::Error)]
        #[error("{reason}")]
        pub struct $name {
            pub reason: String,
        }

        impl $name {
            pub fn new(args: impl ::core::fmt::Display) -> Self {
                Self {
                    reason: args.to_string(),
                }
            }

            pub fn fmt(args: ::core::fmt::Arguments<'_>) -> Self {
                Self {
                    reason: args.to_string(),
                }
            }
        }
    };
}

define_error!(OverflowError);
#[macro_export]
macro_rules! overflow_error {
    ($($arg:tt)*) => {
        $crate::utils::CodecError::Overflow(
            $crate::utils::OverflowError::fmt(format_args!($($arg)*))
        )
    };
}

/// Everything an encoder or decoder can report.
///
/// `EndOfData` is the normal termination signal of a decoder, not a failure;
/// use [`CodecError::is_end_of_data`] to tell it apart from the rest.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("end of data")]
    EndOfData,

    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    #[error("varint truncated after a continuation byte")]
    Truncated,

    #[error(transparent)]
    Overflow(#[from] OverflowError),

    #[error("codec used again after a hard i/o failure")]
    Poisoned,
}

impl CodecError {
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, CodecError::EndOfData)
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
