// Table definitions for the legacy restaurant schema. Column names are the
// Spanish / mixed legacy names; the English API field names live in the
// model conversions, not here.

diesel::table! {
    menu (id) {
        id -> Integer,
        nombre -> Text,
        categoria -> Text,
        precio -> Text,
        stock -> Integer,
        vegetariano -> Text,
        gluten -> Text,
        marisco -> Text,
        lactosa -> Text,
        vegano -> Text,
        ingredientes -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    orders (id) {
        id -> Integer,
        nombre -> Text,
        telefono -> Nullable<Text>,
        email -> Nullable<Text>,
        items -> Text,
        total -> Text,
        status -> Text,
        notas -> Nullable<Text>,
        time -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    reservations (id) {
        id -> Integer,
        customer_name -> Text,
        phone -> Text,
        date -> Date,
        time -> Text,
        people -> Integer,
        table_number -> Nullable<Integer>,
        status -> Text,
        google_event_id -> Nullable<Text>,
        observations -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(menu, orders, reservations);
