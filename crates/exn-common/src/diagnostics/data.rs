//! Diagnostic message table.
//!
//! Every entry is a warning in the `CheckedExceptions` category. Codes are
//! rendered with the `LM` prefix.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const EXCEPTION_SHOULD_BE_DOCUMENTED: u32 = 3001;
    pub const EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED: u32 = 3002;
    pub const OVERRIDE_EXCEPTION_NOT_COMPATIBLE: u32 = 3003;
    pub const INTERFACE_EXCEPTION_NOT_COMPATIBLE: u32 = 3004;
    pub const STATIC_CONSTRUCTORS_SHOULD_NOT_THROW: u32 = 3005;
    pub const EXCEPTION_THROWN_BY_SHOULD_BE_CAUGHT: u32 = 3006;
    pub const STATIC_MEMBER_INITIALIZERS_SHOULD_NOT_THROW: u32 = 3009;
    pub const EXCEPTION_THROWN_BY_INITIALIZER_SHOULD_BE_DOCUMENTED: u32 = 3010;
    pub const EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED_BY_ALL_CONSTRUCTORS: u32 = 3011;
    pub const EXCEPTION_SHOULD_BE_DOCUMENTED_BY_ALL_CONSTRUCTORS: u32 = 3012;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage, diagnostic_codes};

    pub const EXCEPTION_SHOULD_BE_DOCUMENTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::EXCEPTION_SHOULD_BE_DOCUMENTED,
        category: DiagnosticCategory::Warning,
        title: "Thrown exceptions should be documented.",
        message: "Exception '{0}' should be documented.",
    };

    pub const EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED,
        category: DiagnosticCategory::Warning,
        title: "Exceptions thrown by callees should be documented.",
        message: "Exception '{0}', thrown by '{1}', should be documented.",
    };

    pub const OVERRIDE_EXCEPTION_NOT_COMPATIBLE: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::OVERRIDE_EXCEPTION_NOT_COMPATIBLE,
        category: DiagnosticCategory::Warning,
        title: "Exceptions thrown by overrides must be compatible with the overridden member.",
        message: "Exception '{0}' is not compatible with any exception documented by '{1}'.",
    };

    pub const INTERFACE_EXCEPTION_NOT_COMPATIBLE: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::INTERFACE_EXCEPTION_NOT_COMPATIBLE,
        category: DiagnosticCategory::Warning,
        title: "Exceptions thrown by interface implementations must be compatible with the interface.",
        message: "Exception '{0}' is not compatible with any exception documented by '{1}'.",
    };

    pub const STATIC_CONSTRUCTORS_SHOULD_NOT_THROW: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::STATIC_CONSTRUCTORS_SHOULD_NOT_THROW,
        category: DiagnosticCategory::Warning,
        title: "Static constructors should not throw exceptions.",
        message: "Exceptions should not be thrown by static constructors.",
    };

    pub const EXCEPTION_THROWN_BY_SHOULD_BE_CAUGHT: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::EXCEPTION_THROWN_BY_SHOULD_BE_CAUGHT,
        category: DiagnosticCategory::Warning,
        title: "Static constructors should catch exceptions thrown by callees.",
        message: "Exception '{0}', thrown by '{1}', should be caught.",
    };

    pub const STATIC_MEMBER_INITIALIZERS_SHOULD_NOT_THROW: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::STATIC_MEMBER_INITIALIZERS_SHOULD_NOT_THROW,
        category: DiagnosticCategory::Warning,
        title: "Static member initializers should not throw exceptions.",
        message: "Static member initializers should not throw exceptions.",
    };

    pub const EXCEPTION_THROWN_BY_INITIALIZER_SHOULD_BE_DOCUMENTED: DiagnosticMessage =
        DiagnosticMessage {
            code: diagnostic_codes::EXCEPTION_THROWN_BY_INITIALIZER_SHOULD_BE_DOCUMENTED,
            category: DiagnosticCategory::Warning,
            title: "Exceptions thrown by instance member initializers should be documented by all initializing constructors.",
            message: "Exception '{0}', thrown by initializer for '{1}', should be documented.",
        };

    pub const EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED_BY_ALL_CONSTRUCTORS: DiagnosticMessage =
        DiagnosticMessage {
            code: diagnostic_codes::EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED_BY_ALL_CONSTRUCTORS,
            category: DiagnosticCategory::Warning,
            title: "Exceptions thrown by instance member initializers should be documented by all initializing constructors.",
            message: "Exception '{0}', thrown by '{1}', should be documented by all initializing constructors.",
        };

    pub const EXCEPTION_SHOULD_BE_DOCUMENTED_BY_ALL_CONSTRUCTORS: DiagnosticMessage =
        DiagnosticMessage {
            code: diagnostic_codes::EXCEPTION_SHOULD_BE_DOCUMENTED_BY_ALL_CONSTRUCTORS,
            category: DiagnosticCategory::Warning,
            title: "Exceptions thrown by instance member initializers should be documented by all initializing constructors.",
            message: "Exception '{0}' should be documented by all initializing constructors.",
        };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    diagnostic_messages::EXCEPTION_SHOULD_BE_DOCUMENTED,
    diagnostic_messages::EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED,
    diagnostic_messages::OVERRIDE_EXCEPTION_NOT_COMPATIBLE,
    diagnostic_messages::INTERFACE_EXCEPTION_NOT_COMPATIBLE,
    diagnostic_messages::STATIC_CONSTRUCTORS_SHOULD_NOT_THROW,
    diagnostic_messages::EXCEPTION_THROWN_BY_SHOULD_BE_CAUGHT,
    diagnostic_messages::STATIC_MEMBER_INITIALIZERS_SHOULD_NOT_THROW,
    diagnostic_messages::EXCEPTION_THROWN_BY_INITIALIZER_SHOULD_BE_DOCUMENTED,
    diagnostic_messages::EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED_BY_ALL_CONSTRUCTORS,
    diagnostic_messages::EXCEPTION_SHOULD_BE_DOCUMENTED_BY_ALL_CONSTRUCTORS,
];
