//! Diesel table definitions.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Registered accounts. `email` is unique.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// Argon2id PHC string; never leaves the persistence layer except for
        /// login verification.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    projects (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    teams (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    tags (id) {
        id -> Uuid,
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Work items. `owner_ids` holds user ids; existence is checked on insert.
    tasks (id) {
        id -> Uuid,
        name -> Varchar,
        project_id -> Uuid,
        team_id -> Uuid,
        owner_ids -> Array<Uuid>,
        tags -> Array<Text>,
        time_to_complete -> Int4,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> projects (project_id));
diesel::joinable!(tasks -> teams (team_id));

diesel::allow_tables_to_appear_in_same_query!(users, projects, teams, tags, tasks);
