//! Invoice Repository

use super::{Collection, Document};
use shared::models::Invoice;

impl Document for Invoice {
    const TABLE: &'static str = "invoices";
    const ID_FIELD: &'static str = "invoice_id";
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "invoice_id",
        "order_id",
        "payment_due_date",
        "created_at",
        "updated_at",
    ];

    fn business_id(&self) -> &str {
        &self.invoice_id
    }
}

pub type InvoiceRepository = Collection<Invoice>;
