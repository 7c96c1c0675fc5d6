use super::{EntityAdapter, FieldDefault, FieldKind, FieldRule};

/// Medical history questionnaires. One per patient, date and questionnaire model.
pub static ANAMNESES: EntityAdapter = EntityAdapter {
    name: "anamneses",
    collection: "anamneses",
    table: "anamneses",
    fields: &[
        FieldRule::text("patient_id", &["patientId", "patient_id", "pacienteId"], FieldDefault::Literal("")),
        FieldRule::text("patient_name", &["patientName", "patient_name", "name"], FieldDefault::Literal("")),
        FieldRule::new("date", FieldKind::Date, &["date", "createdAt", "created_at"], FieldDefault::Today),
        FieldRule::text("model", &["model", "modelName", "template"], FieldDefault::Literal("default")),
        FieldRule::new("answers", FieldKind::Json, &["answers", "responses", "data"], FieldDefault::EmptyMap),
        FieldRule::text("notes", &["notes", "observations"], FieldDefault::Literal("")),
        FieldRule::new("created_at", FieldKind::Timestamp, &["createdAt", "created_at"], FieldDefault::Now),
    ],
    required: &["patient_id"],
    natural_key: &["patient_id", "date", "model"],
};
