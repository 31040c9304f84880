//! Which part of the backend an error code belongs to

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Coarse grouping of error codes, keyed on the thousands digit.
///
/// `System` errors are logged at error level when turned into a response;
/// everything else is a rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed input, missing records, duplicates
    Request,
    /// Login, tokens and permissions
    Auth,
    /// Orders, order items and invoices
    Order,
    /// Menus, foods and tables
    Catalog,
    /// User accounts
    Account,
    /// Storage, configuration and deadlines
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            1 | 2 => Self::Auth,
            4 | 5 => Self::Order,
            6 | 7 => Self::Catalog,
            8 => Self::Account,
            9.. => Self::System,
            _ => Self::Request,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_level_codes_stay_below_one_thousand() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::ReferenceNotFound,
        ] {
            assert_eq!(code.category(), ErrorCategory::Request);
        }
        // 3xxx is unused and is treated like a plain bad request
        assert_eq!(ErrorCategory::from_code(3500), ErrorCategory::Request);
    }

    #[test]
    fn test_domain_codes_map_to_their_area() {
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::PermissionDenied.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::OrderEmpty.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::InvoiceNotFound.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::MenuDateRangeInvalid.category(), ErrorCategory::Catalog);
        assert_eq!(ErrorCode::TableNotFound.category(), ErrorCategory::Catalog);
        assert_eq!(ErrorCode::UserAlreadyExists.category(), ErrorCategory::Account);
    }

    #[test]
    fn test_storage_failures_are_system_errors() {
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
        assert_eq!(ErrorCode::Cancelled.category(), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(u16::MAX), ErrorCategory::System);
    }
}
