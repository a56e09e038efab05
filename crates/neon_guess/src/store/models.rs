//! Database models.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use super::schema;

/// Stored profile entry.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::profile_entries)]
pub struct ProfileEntry {
    name: String,
    value: String,
    updated_at: NaiveDateTime,
}

/// Insertable entry. Replaces any row with the same name.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::profile_entries)]
pub struct NewProfileEntry {
    name: String,
    value: String,
    updated_at: NaiveDateTime,
}
