pub fn interval_millis() -> u64 {
    1000
}
pub fn target_millis() -> u64 {
    0
}
pub fn display() -> String {
    ":0".to_string()
}
