//! Error handling for ring buffer operations
//!
//! One unified error type covers every failure the crate can report, from
//! bare-metal ISR producers to hosted test rigs. The design follows the
//! same split as the rest of the crate:
//!
//! - **no_std**: compact variants, `&'static str` context, numeric error
//!   codes for environments where string formatting is unavailable or too
//!   expensive.
//! - **std**: owned context strings and `thiserror`-derived messages.
//!
//! # Error Categories
//!
//! Each error carries a numeric code, organized by category:
//!
//! - **Transfer** (0x1000-0x1FFF): the routine `Empty`/`Full` outcomes.
//!   These are expected on every call path and must be checked, not
//!   treated as exceptional.
//! - **Validation** (0x2000-0x2FFF): caller-contract violations caught at
//!   construction or registration time.
//! - **Strategy** (0x3000-0x3FFF): unknown, disabled, or unregistered
//!   strategy tags.
//! - **Resource** (0x4000-0x4FFF): lock creation failure, registry
//!   exhaustion, duplicate registration.
//!
//! Transfer errors are per-call, non-fatal and leave the buffer fully
//! usable. Everything else is construction-time only: a failed `create()`
//! or `register_custom()` leaves no binding behind, and nothing in this
//! crate panics or aborts on an error path — embedded deployments have no
//! recovery story for that.
//!
//! ## Platform-Specific Display Behavior
//!
//! - **std**: rich messages via thiserror (e.g. "Unsupported strategy tag 7")
//! - **no_std**: compact format with error codes (e.g. "Error 0x3001: Unsupported strategy")

#[cfg(feature = "std")]
use thiserror::Error;

/// Unified error type for all ring buffer operations
///
/// `Empty` and `Full` are routine outcomes of the single-byte operations;
/// bulk transfers never produce them (they report a partial count
/// instead). The remaining variants can only be produced by `create()` and
/// `register_custom()`.
#[derive(Debug)]
#[cfg_attr(feature = "std", derive(Error))]
pub enum RingError {
    /// Read attempted with no data buffered
    #[cfg_attr(feature = "std", error("Buffer empty"))]
    Empty,

    /// Write attempted with no free slot
    #[cfg_attr(feature = "std", error("Buffer full"))]
    Full,

    /// Caller-contract violation (storage too small, tag out of range)
    #[cfg_attr(feature = "std", error("Invalid argument: {reason}"))]
    InvalidArgument {
        /// What was violated
        #[cfg(feature = "std")]
        reason: String,
        /// What was violated
        #[cfg(not(feature = "std"))]
        reason: &'static str,
    },

    /// Strategy tag is unknown, below the custom base, or not registered
    #[cfg_attr(feature = "std", error("Unsupported strategy tag {tag}"))]
    UnsupportedStrategy {
        /// The tag that failed to resolve
        tag: u8,
    },

    /// A bounded resource was unavailable at construction/registration time
    ///
    /// Covers blocking-lock creation failure, a full custom-strategy
    /// registry, and duplicate registration. The `resource_type` field
    /// identifies which; see the `RESOURCE_TYPE_*` constants.
    #[cfg_attr(feature = "std", error("Resource exhausted: {details}"))]
    ResourceExhausted {
        /// One of the `RESOURCE_TYPE_*` constants
        resource_type: u8,
        /// Which resource ran out
        #[cfg(feature = "std")]
        details: String,
        /// Which resource ran out
        #[cfg(not(feature = "std"))]
        details: &'static str,
    },
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for RingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Compact form for embedded environments: code plus brief description.
        let (code, message) = match self {
            RingError::Empty => (0x1001, "Buffer empty"),
            RingError::Full => (0x1002, "Buffer full"),
            RingError::InvalidArgument { .. } => (0x2001, "Invalid argument"),
            RingError::UnsupportedStrategy { .. } => (0x3001, "Unsupported strategy"),
            RingError::ResourceExhausted { .. } => (0x4001, "Resource exhausted"),
        };
        write!(f, "Error 0x{:04X}: {}", code, message)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RingError {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RingError(code={})", self.error_code());
    }
}

impl RingError {
    /// Blocking-lock creation failed or the platform has none.
    pub const RESOURCE_TYPE_LOCK: u8 = 0;
    /// The custom-strategy registry is full or the tag is already taken.
    pub const RESOURCE_TYPE_REGISTRY: u8 = 1;

    /// Creates an `InvalidArgument` error from a static description
    pub fn invalid_argument(reason: &'static str) -> Self {
        RingError::InvalidArgument {
            #[cfg(feature = "std")]
            reason: reason.to_string(),
            #[cfg(not(feature = "std"))]
            reason,
        }
    }

    /// Creates a `ResourceExhausted` error for the given resource type
    pub fn resource_exhausted(resource_type: u8, details: &'static str) -> Self {
        RingError::ResourceExhausted {
            resource_type,
            #[cfg(feature = "std")]
            details: details.to_string(),
            #[cfg(not(feature = "std"))]
            details,
        }
    }

    /// Returns true for the routine `Empty`/`Full` outcomes
    ///
    /// These signal "try again later" to the caller, never a broken
    /// buffer; retry and backoff policy stays with the caller.
    pub fn is_would_block(&self) -> bool {
        matches!(self, RingError::Empty | RingError::Full)
    }

    /// Returns true for construction-time failures
    ///
    /// After one of these the attempted buffer binding or registration
    /// does not exist and must not be used.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            RingError::InvalidArgument { .. }
                | RingError::UnsupportedStrategy { .. }
                | RingError::ResourceExhausted { .. }
        )
    }

    /// Returns a numeric error code for embedded environments
    ///
    /// Const lookup, no formatting, no allocation. Codes are stable and
    /// grouped by category:
    ///
    /// - **Transfer**: 0x1000-0x1FFF
    /// - **Validation**: 0x2000-0x2FFF
    /// - **Strategy**: 0x3000-0x3FFF
    /// - **Resource**: 0x4000-0x4FFF
    pub const fn error_code(&self) -> u32 {
        match self {
            RingError::Empty => 0x1001,
            RingError::Full => 0x1002,
            RingError::InvalidArgument { .. } => 0x2001,
            RingError::UnsupportedStrategy { .. } => 0x3001,
            RingError::ResourceExhausted { .. } => 0x4001,
        }
    }

    /// Returns the error category based on the error code
    pub const fn error_category(&self) -> u32 {
        self.error_code() & 0xF000
    }
}

/// Result alias used throughout the crate
pub type RingResult<T> = Result<T, RingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size_constraint() {
        // RingError travels through ISR-adjacent call paths; keep it small.
        let size = core::mem::size_of::<RingError>();
        assert!(
            size <= 64,
            "RingError size ({} bytes) exceeds 64-byte limit for embedded targets",
            size
        );
    }

    #[test]
    fn error_codes_and_categories() {
        assert_eq!(RingError::Empty.error_code(), 0x1001);
        assert_eq!(RingError::Full.error_code(), 0x1002);
        assert_eq!(RingError::Empty.error_category(), 0x1000);

        let invalid = RingError::invalid_argument("capacity below minimum");
        assert_eq!(invalid.error_code(), 0x2001);
        assert_eq!(invalid.error_category(), 0x2000);

        let unsupported = RingError::UnsupportedStrategy { tag: 7 };
        assert_eq!(unsupported.error_code(), 0x3001);
        assert_eq!(unsupported.error_category(), 0x3000);

        let exhausted =
            RingError::resource_exhausted(RingError::RESOURCE_TYPE_LOCK, "lock creation failed");
        assert_eq!(exhausted.error_code(), 0x4001);
        assert_eq!(exhausted.error_category(), 0x4000);
    }

    #[test]
    fn error_code_uniqueness() {
        let errors = [
            RingError::Empty,
            RingError::Full,
            RingError::invalid_argument("x"),
            RingError::UnsupportedStrategy { tag: 3 },
            RingError::resource_exhausted(RingError::RESOURCE_TYPE_REGISTRY, "x"),
        ];
        for (i, a) in errors.iter().enumerate() {
            for b in errors.iter().skip(i + 1) {
                assert_ne!(
                    a.error_code(),
                    b.error_code(),
                    "duplicate error code 0x{:04X}",
                    a.error_code()
                );
            }
        }
    }

    #[test]
    fn classification_helpers() {
        assert!(RingError::Empty.is_would_block());
        assert!(RingError::Full.is_would_block());
        assert!(!RingError::Empty.is_construction_error());

        let unsupported = RingError::UnsupportedStrategy { tag: 200 };
        assert!(unsupported.is_construction_error());
        assert!(!unsupported.is_would_block());

        let exhausted = RingError::resource_exhausted(RingError::RESOURCE_TYPE_LOCK, "x");
        assert!(exhausted.is_construction_error());
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_display_formatting() {
        let unsupported = RingError::UnsupportedStrategy { tag: 9 };
        let message = format!("{}", unsupported);
        assert!(message.contains("9"));

        let invalid = RingError::invalid_argument("storage shorter than MIN_CAPACITY");
        let message = format!("{}", invalid);
        assert!(message.contains("storage shorter than MIN_CAPACITY"));

        // Error trait wiring via thiserror
        let _: &dyn std::error::Error = &unsupported;
    }

    #[cfg(not(feature = "std"))]
    #[test]
    fn no_std_display_with_codes() {
        use core::fmt::Write;

        let mut buffer = heapless::String::<64>::new();
        write!(&mut buffer, "{}", RingError::Full).unwrap();
        assert_eq!(buffer.as_str(), "Error 0x1002: Buffer full");

        buffer.clear();
        write!(&mut buffer, "{}", RingError::UnsupportedStrategy { tag: 5 }).unwrap();
        assert_eq!(buffer.as_str(), "Error 0x3001: Unsupported strategy");
    }
}
