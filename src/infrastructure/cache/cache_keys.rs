pub fn stats_key(user_id: &str) -> String {
    format!("stats:{}", user_id)
}
