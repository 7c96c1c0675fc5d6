use super::{EntityAdapter, FieldDefault, FieldKind, FieldRule};

/// Completed visits with the procedures performed and the amount charged.
pub static ATTENDANCES: EntityAdapter = EntityAdapter {
    name: "attendances",
    collection: "attendances",
    table: "attendances",
    fields: &[
        FieldRule::text("patient_id", &["patientId", "patient_id"], FieldDefault::Literal("")),
        FieldRule::text("patient_name", &["patientName", "patient_name", "name"], FieldDefault::Literal("")),
        FieldRule::new("date", FieldKind::Date, &["date", "attendanceDate", "createdAt"], FieldDefault::Today),
        FieldRule::text("doctor_name", &["doctorName", "doctor_name", "doctor", "professional"], FieldDefault::Literal("")),
        FieldRule::new("procedures", FieldKind::Json, &["procedures", "items", "services"], FieldDefault::EmptyList),
        FieldRule::new("value", FieldKind::Amount, &["value", "amount", "price", "total"], FieldDefault::Zero),
        FieldRule::text("status", &["status"], FieldDefault::Literal("completed")),
        FieldRule::text("notes", &["notes", "observations", "evolution"], FieldDefault::Literal("")),
        FieldRule::new("created_at", FieldKind::Timestamp, &["createdAt", "created_at"], FieldDefault::Now),
    ],
    required: &["patient_id"],
    natural_key: &["patient_id", "date", "doctor_name"],
};
