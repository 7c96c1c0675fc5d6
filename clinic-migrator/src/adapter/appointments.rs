use super::{EntityAdapter, FieldDefault, FieldKind, FieldRule};

/// Scheduled visits.
///
/// The destination table carries no patient identifier reliable enough to key
/// on, so appointments are recognized by who, when and with whom.
pub static APPOINTMENTS: EntityAdapter = EntityAdapter {
    name: "appointments",
    collection: "appointments",
    table: "appointments",
    fields: &[
        FieldRule::text("patient_name", &["patientName", "patient_name", "patient", "name"], FieldDefault::Literal("")),
        FieldRule::text("patient_id", &["patientId", "patient_id"], FieldDefault::Literal("")),
        FieldRule::text("patient_phone", &["patientPhone", "phone", "telephone"], FieldDefault::Literal("")),
        FieldRule::new("appointment_date", FieldKind::Date, &["date", "appointmentDate", "appointment_date"], FieldDefault::Today),
        FieldRule::text("appointment_time", &["time", "appointmentTime", "appointment_time", "hour"], FieldDefault::Literal("00:00")),
        FieldRule::text("doctor_name", &["doctorName", "doctor_name", "doctor", "professional"], FieldDefault::Literal("")),
        FieldRule::text("procedure", &["procedure", "service", "type"], FieldDefault::Literal("")),
        FieldRule::text("status", &["status"], FieldDefault::Literal("scheduled")),
        FieldRule::text("notes", &["notes", "observations"], FieldDefault::Literal("")),
        FieldRule::new("created_at", FieldKind::Timestamp, &["createdAt", "created_at"], FieldDefault::Now),
    ],
    required: &["patient_name"],
    natural_key: &["patient_name", "appointment_date", "appointment_time", "doctor_name"],
};
