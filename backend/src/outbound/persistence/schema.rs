//! Diesel table definitions for the circulation schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes a table, update the matching `table!` block.

diesel::table! {
    /// Registered library members.
    members (id) {
        /// Primary key.
        id -> Int8,
        /// Display name (max 100 characters).
        name -> Varchar,
        /// Five-digit registration number, unique.
        registration_number -> Varchar,
        /// STUDENT, TEACHER or STAFF.
        member_type -> Varchar,
        /// Optional email, unique when present.
        email -> Nullable<Varchar>,
        /// Registration date.
        registered_on -> Date,
        /// ACTIVE, INACTIVE or SUSPENDED.
        status -> Varchar,
    }
}

diesel::table! {
    /// Book titles with copy counters.
    titles (id) {
        /// Primary key.
        id -> Int8,
        /// Title string (max 200 characters).
        title -> Varchar,
        /// Authors string (max 100 characters).
        authors -> Varchar,
        /// Optional ISBN, 10 to 13 characters.
        isbn -> Nullable<Varchar>,
        /// Optional edition.
        edition -> Nullable<Text>,
        /// Optional publication year.
        year -> Nullable<Int4>,
        /// Copies owned.
        total_copies -> Int4,
        /// Copies on the shelf; `0 <= available_copies <= total_copies`.
        available_copies -> Int4,
        /// AVAILABLE or UNAVAILABLE.
        status -> Varchar,
    }
}

diesel::table! {
    /// Loans of a title to a member.
    loans (id) {
        /// Primary key.
        id -> Int8,
        /// References `members.id`.
        member_id -> Int8,
        /// References `titles.id`.
        title_id -> Int8,
        /// Issue timestamp.
        loaned_at -> Timestamptz,
        /// Due date.
        due_on -> Date,
        /// Return date; never written.
        returned_on -> Nullable<Date>,
        /// ACTIVE, RETURNED, OVERDUE or CANCEL.
        status -> Varchar,
        /// Fine owed; never computed.
        fine -> Float8,
    }
}

diesel::joinable!(loans -> members (member_id));
diesel::joinable!(loans -> titles (title_id));

diesel::allow_tables_to_appear_in_same_query!(loans, members, titles);
