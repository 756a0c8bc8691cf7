//! Diesel schema for board persistence.

diesel::table! {
    /// Board columns.
    board_columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Display title.
        #[max_length = 100]
        title -> Varchar,
        /// Order of the column on the board.
        position -> Int4,
        /// Status implied for tasks moved into this column.
        #[max_length = 20]
        status -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks placed on the board.
    board_tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Optional description.
        #[max_length = 500]
        description -> Nullable<Varchar>,
        /// Priority (`low`, `medium`, `high`).
        #[max_length = 20]
        priority -> Varchar,
        /// Workflow status (`todo`, `in-progress`, `done`).
        #[max_length = 20]
        status -> Varchar,
        /// Owning column.
        column_id -> Uuid,
        /// Sort key within the column.
        position -> Float8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(board_tasks -> board_columns (column_id));
diesel::allow_tables_to_appear_in_same_query!(board_columns, board_tasks);
