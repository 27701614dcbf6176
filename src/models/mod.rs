pub mod invoice;

pub use invoice::{InvoiceStats, PurchaseInvoice, PurchaseInvoiceItem};
