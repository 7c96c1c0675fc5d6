use super::{EntityAdapter, FieldDefault, FieldKind, FieldRule};

/// Treatment quotes.
pub static BUDGETS: EntityAdapter = EntityAdapter {
    name: "budgets",
    collection: "budgets",
    table: "budgets",
    fields: &[
        FieldRule::text("patient_id", &["patientId", "patient_id"], FieldDefault::Literal("")),
        FieldRule::text("patient_name", &["patientName", "patient_name", "name"], FieldDefault::Literal("")),
        FieldRule::new("date", FieldKind::Date, &["date", "budgetDate", "createdAt"], FieldDefault::Today),
        FieldRule::new("items", FieldKind::Json, &["items", "procedures", "treatments"], FieldDefault::EmptyList),
        FieldRule::new("total", FieldKind::Amount, &["total", "totalValue", "amount", "value"], FieldDefault::Zero),
        FieldRule::new("discount", FieldKind::Amount, &["discount", "discountValue"], FieldDefault::Zero),
        FieldRule::text("payment_method", &["paymentMethod", "payment_method", "payment"], FieldDefault::Literal("")),
        FieldRule::text("status", &["status"], FieldDefault::Literal("pending")),
        FieldRule::new("created_at", FieldKind::Timestamp, &["createdAt", "created_at"], FieldDefault::Now),
    ],
    required: &["patient_id"],
    natural_key: &["patient_id", "date", "total"],
};
