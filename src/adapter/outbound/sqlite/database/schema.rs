// Diesel table definitions matching `migrations/`.

diesel::table! {
    users (chat_id) {
        chat_id -> BigInt,
        notify_time -> Text,
        sector_filter -> Text,
        budget_filter -> Text,
        risk_filter -> Text,
        subscribed -> Integer,
    }
}
