//! Accepted header spellings per entity and the canonical field each maps to.
//!
//! Header matching is exact after trimming and lower-casing, so spellings
//! that differ only in case or surrounding spaces need a single entry.
//! Every required field must be reachable from at least one spelling; this is
//! asserted at compile time below.

pub struct ColumnMapping {
    pub spelling: &'static str,
    pub field: &'static str,
}

pub struct EntitySchema {
    pub entity: &'static str,
    pub mappings: &'static [ColumnMapping],
    pub required: &'static [&'static str],
}

const fn map(spelling: &'static str, field: &'static str) -> ColumnMapping {
    ColumnMapping { spelling, field }
}

// ---------------------------
// Persons
// ---------------------------
pub mod person {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const ROLE: &str = "role";
    pub const PROCESS: &str = "process";
    pub const WORKPLACE: &str = "workplace";
}

pub const PERSON_SCHEMA: EntitySchema = EntitySchema {
    entity: "persons",
    mappings: &[
        map("Id Persona", person::ID),
        map("IdPersona", person::ID),
        map("Id_Persona", person::ID),
        map("Person Id", person::ID),
        map("PersonId", person::ID),
        map("Employee Id", person::ID),
        map("Nombre Completo", person::NAME),
        map("Nombre", person::NAME),
        map("Full Name", person::NAME),
        map("Name", person::NAME),
        map("Cargo", person::ROLE),
        map("Role", person::ROLE),
        map("Job Title", person::ROLE),
        map("Proceso", person::PROCESS),
        map("Process", person::PROCESS),
        map("Lugar de Trabajo", person::WORKPLACE),
        map("Lugar_Trabajo", person::WORKPLACE),
        map("LugarTrabajo", person::WORKPLACE),
        map("Workplace", person::WORKPLACE),
        map("Work Place", person::WORKPLACE),
    ],
    required: &[
        person::ID,
        person::NAME,
        person::ROLE,
        person::PROCESS,
        person::WORKPLACE,
    ],
};

// ---------------------------
// Events
// ---------------------------
pub mod event {
    pub const ID: &str = "id";
    pub const TOPIC: &str = "topic";
    pub const NAME: &str = "name";
    pub const SCHEME: &str = "scheme";
    pub const DURATION_HOURS: &str = "duration_hours";
}

pub const EVENT_SCHEMA: EntitySchema = EntitySchema {
    entity: "events",
    mappings: &[
        map("Id Evento", event::ID),
        map("IdEvento", event::ID),
        map("Id_Evento", event::ID),
        map("Event Id", event::ID),
        map("EventId", event::ID),
        map("Tema General", event::TOPIC),
        map("TemaGeneral", event::TOPIC),
        map("Topic", event::TOPIC),
        map("General Topic", event::TOPIC),
        map("Evento Formativo", event::NAME),
        map("Nombre del Evento", event::NAME),
        map("NombreEvento", event::NAME),
        map("Event Name", event::NAME),
        map("Esquema de Evento", event::SCHEME),
        map("Esquema Evento", event::SCHEME),
        map("EsquemaEvento", event::SCHEME),
        map("Scheme", event::SCHEME),
        map("Event Scheme", event::SCHEME),
        map("Duración", event::DURATION_HOURS),
        map("Duracion", event::DURATION_HOURS),
        map("Duración (horas)", event::DURATION_HOURS),
        map("Duracion Horas", event::DURATION_HOURS),
        map("Duration", event::DURATION_HOURS),
        map("Duration (hours)", event::DURATION_HOURS),
        map("Duration Hours", event::DURATION_HOURS),
    ],
    required: &[event::ID, event::TOPIC, event::NAME, event::SCHEME],
};

// ---------------------------
// Execution records
// ---------------------------
pub mod record {
    pub const PERSON_ID: &str = "person_id";
    pub const EVENT_ID: &str = "event_id";
    pub const EXECUTION_DATE: &str = "execution_date";
    pub const HOURS: &str = "hours";
    pub const RESULT: &str = "result";
}

pub const RECORD_SCHEMA: EntitySchema = EntitySchema {
    entity: "execution records",
    mappings: &[
        map("Id Persona", record::PERSON_ID),
        map("IdPersona", record::PERSON_ID),
        map("Person Id", record::PERSON_ID),
        map("Id Evento", record::EVENT_ID),
        map("IdEvento", record::EVENT_ID),
        map("Event Id", record::EVENT_ID),
        map("Fecha", record::EXECUTION_DATE),
        map("Fecha Ejecución", record::EXECUTION_DATE),
        map("Fecha Ejecucion", record::EXECUTION_DATE),
        map("FechaEjecucion", record::EXECUTION_DATE),
        map("Date", record::EXECUTION_DATE),
        map("Execution Date", record::EXECUTION_DATE),
        map("Horas", record::HOURS),
        map("Duración", record::HOURS),
        map("Hours", record::HOURS),
        map("Resultado", record::RESULT),
        map("Aprobó/Reprobó", record::RESULT),
        map("Result", record::RESULT),
        map("Outcome", record::RESULT),
    ],
    required: &[record::PERSON_ID, record::EVENT_ID],
};

// ---------------------------
// Schedule matrix identity columns
// ---------------------------

/// Headers that identify the event in the matrix sheet.
pub const MATRIX_EVENT_ID: &[&str] = &["Id Evento", "IdEvento", "Id_Evento", "Event Id", "EventId"];

/// Descriptive headers of the matrix sheet; never treated as roles.
pub const MATRIX_DESCRIPTORS: &[&str] = &[
    "Tema General",
    "Evento Formativo",
    "Tipo de Evento",
    "Esquema de Evento",
    "Topic",
    "Event",
    "Event Name",
    "Event Type",
    "Scheme",
];

const fn str_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn covers_required(schema: &EntitySchema) -> bool {
    let mut r = 0;
    while r < schema.required.len() {
        let mut found = false;
        let mut m = 0;
        while m < schema.mappings.len() {
            if str_eq(schema.mappings[m].field, schema.required[r]) {
                found = true;
            }
            m += 1;
        }
        if !found {
            return false;
        }
        r += 1;
    }
    true
}

const _: () = assert!(covers_required(&PERSON_SCHEMA));
const _: () = assert!(covers_required(&EVENT_SCHEMA));
const _: () = assert!(covers_required(&RECORD_SCHEMA));
