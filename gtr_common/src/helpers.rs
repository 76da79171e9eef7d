/// Interpret a configuration flag leniently. `1 / true / yes / on` and `0 / false / no / off` are
/// recognised in any case; anything else, including an unset value, yields the default.
pub fn parse_boolean_flag(value: Option<String>, default: bool) -> bool {
    let Some(value) = value else {
        return default;
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}
