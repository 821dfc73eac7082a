//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with a unique title.
    tasks (id) {
        /// Store-assigned surrogate identifier.
        id -> Int8,
        /// Unique task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-form task description.
        description -> Text,
        /// Completion flag.
        completed -> Bool,
    }
}
